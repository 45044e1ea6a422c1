//! Exporters for formatted output.
//!
//! `FileExporter` writes atomically (temp file, then rename), creates missing
//! parent directories, refuses paths that resolve outside its base directory
//! and refuses content over its size limit.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::config::ExportConfig;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(
        "Path '{}' is outside allowed base directory '{}'",
        attempted.display(),
        allowed_base.display()
    )]
    PathTraversal {
        attempted: PathBuf,
        allowed_base: PathBuf,
    },
    #[error("Content size ({content_size} bytes) exceeds maximum allowed file size ({max_size} bytes)")]
    FileSizeLimitExceeded { content_size: u64, max_size: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sends formatted content to a destination.
pub trait Exporter {
    /// Export `content`; returns a description of where it went.
    fn export(&self, content: &str, path: &Path) -> Result<String, ExportError>;
}

#[derive(Debug, Clone)]
pub struct FileExporter {
    allowed_base_dir: PathBuf,
    max_file_size_bytes: Option<u64>,
}

impl FileExporter {
    /// Build from configuration; the base directory defaults to the current
    /// directory and must exist.
    pub fn new(config: &ExportConfig) -> Result<Self, ExportError> {
        let base = match &config.allowed_base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(Self {
            allowed_base_dir: base.canonicalize()?,
            max_file_size_bytes: config.max_file_size_bytes,
        })
    }

    pub fn allowed_base_dir(&self) -> &Path {
        &self.allowed_base_dir
    }

    fn check_size(&self, content: &str) -> Result<(), ExportError> {
        let content_size = content.len() as u64;
        match self.max_file_size_bytes {
            Some(max_size) if content_size > max_size => Err(ExportError::FileSizeLimitExceeded {
                content_size,
                max_size,
            }),
            _ => Ok(()),
        }
    }
}

impl Exporter for FileExporter {
    fn export(&self, content: &str, path: &Path) -> Result<String, ExportError> {
        self.check_size(content)?;

        // Relative paths are taken relative to the base directory.
        let absolute = resolve_path(&self.allowed_base_dir.join(path));
        if !absolute.starts_with(&self.allowed_base_dir) {
            return Err(ExportError::PathTraversal {
                attempted: absolute,
                allowed_base: self.allowed_base_dir.clone(),
            });
        }

        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut temp_name = absolute.clone().into_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let written = std::fs::write(&temp_path, content.as_bytes())
            .and_then(|()| std::fs::rename(&temp_path, &absolute));
        if let Err(err) = written {
            // Drop the partial temp file; report the write error.
            let _ = std::fs::remove_file(&temp_path);
            return Err(err.into());
        }

        tracing::info!(path = %absolute.display(), bytes = content.len(), "wrote output file");
        Ok(absolute.display().to_string())
    }
}

/// Prints content to standard output; the path is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutExporter;

impl Exporter for StdoutExporter {
    fn export(&self, content: &str, _path: &Path) -> Result<String, ExportError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{content}")?;
        stdout.flush()?;
        Ok("<stdout>".to_string())
    }
}

/// Normalise `.` and `..` lexically, then canonicalise the longest existing
/// prefix so symlinked ancestors compare equal to the canonical base.
fn resolve_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    let mut existing = normalized.clone();
    let mut suffix: Vec<OsString> = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return suffix
                .iter()
                .rev()
                .fold(canonical, |acc, part| acc.join(part));
        }
        match existing.file_name() {
            Some(name) => {
                suffix.push(name.to_os_string());
                existing.pop();
            }
            None => return normalized,
        }
    }
}
