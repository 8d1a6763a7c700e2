use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing a parts-document file format.
///
/// Implementors handle format-specific parsing and serialization; the provided methods add
/// buffered file access on top.
pub trait DocumentFile {
    /// The in-memory document the format maps to.
    type Document;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a document from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error>;

    /// Writes a document to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying writer fails.
    fn write_to(document: &Self::Document, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a document from a file path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Document, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a document to a file path, truncating any existing file.
    ///
    /// The parent directory must already exist.
    fn write_to_path<P: AsRef<Path>>(
        document: &Self::Document,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(document, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
