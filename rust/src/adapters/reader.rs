//! Readers for raw project input.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File reader requires a source path")]
    MissingPath,
    #[error("Failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read from stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

/// Source of raw project text.
pub trait InputReader {
    /// Read the whole input. `source` is interpreted by the implementation.
    fn read(&self, source: Option<&Path>) -> Result<String, ReadError>;
}

/// Reads a UTF-8 file; a path is required.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileReader;

impl InputReader for FileReader {
    fn read(&self, source: Option<&Path>) -> Result<String, ReadError> {
        let path = source.ok_or(ReadError::MissingPath)?;
        tracing::debug!(path = %path.display(), "reading input file");

        let content = std::fs::read_to_string(path).map_err(|source| ReadError::File {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(chars = content.len(), path = %path.display(), "read input file");
        Ok(content)
    }
}

/// Reads everything from standard input; `source` is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinReader;

impl InputReader for StdinReader {
    fn read(&self, _source: Option<&Path>) -> Result<String, ReadError> {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(ReadError::Stdin)?;

        tracing::info!(chars = content.len(), "read stdin");
        Ok(content)
    }
}
