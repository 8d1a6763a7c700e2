use super::error::ConversionError;
use crate::core::io::sbol::SbolFile;
use crate::core::io::traits::DocumentFile;
use crate::core::models::document::SbolDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Serializes `document` to `path` as SBOL2 RDF/XML.
///
/// Missing parent directories are created and an existing file is replaced. When the
/// document's configuration requests validation, the document is checked first and nothing
/// is written if the check fails.
///
/// # Errors
///
/// Returns [`ConversionError::Document`] on a failed validation,
/// [`ConversionError::OutputDirectory`] when the parent directory cannot be created, and
/// [`ConversionError::Write`] when serialization or the file write fails.
pub fn write_document(document: &SbolDocument, path: &Path) -> Result<(), ConversionError> {
    if document.config().validate {
        document.validate()?;
        debug!("Document with {} part(s) passed validation.", document.len());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConversionError::OutputDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    SbolFile::write_to_path(document, path).map_err(|source| ConversionError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Wrote {} part(s) to {}",
        document.len(),
        path.display()
    );
    Ok(())
}
