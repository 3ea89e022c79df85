use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while writing a text document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create, write, or flush the staging file.
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),
    /// Staging file could not be moved over the destination.
    #[error("failed to replace output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Write `text` to `path` atomically.
///
/// Content is staged in a temporary file next to `path` and renamed over it
/// once fully flushed. On error the destination is left as it was.
pub fn write_text_file(path: &Path, text: &str) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(text.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path)?;
    Ok(())
}
