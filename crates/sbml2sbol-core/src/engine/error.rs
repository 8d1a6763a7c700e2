use super::config::ConfigError;
use crate::core::io::sbml::SbmlError;
use crate::core::io::sbol::SbolError;
use crate::core::models::document::DocumentError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot access input '{path}': {source}", path = path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse model file '{path}': {source}", path = path.display())]
    ModelParse {
        path: PathBuf,
        #[source]
        source: SbmlError,
    },

    #[error("Malformed input model '{path}': {source}", path = path.display())]
    MalformedModel {
        path: PathBuf,
        #[source]
        source: SbmlError,
    },

    #[error("Document invariant violated: {0}")]
    Document(#[from] DocumentError),

    #[error("Failed to create output directory '{path}': {source}", path = path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write SBOL document '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: SbolError,
    },
}

impl ConversionError {
    /// Attaches a model file path to a model-level error, separating unreadable files from
    /// structurally incomplete ones.
    pub fn from_model_error(path: PathBuf, source: SbmlError) -> Self {
        if source.is_malformed_model() {
            ConversionError::MalformedModel { path, source }
        } else {
            ConversionError::ModelParse { path, source }
        }
    }
}
