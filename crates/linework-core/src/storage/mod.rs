//! Persistence: the native text format, XML export, and file I/O.

mod file;
pub mod text;
pub mod xml;

pub use file::{export_xml, load_drawing, save_drawing};

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A line of a drawing file could not be parsed.
    #[error("Parse error on line {line}: {reason} ({content:?})")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line as read.
        content: String,
        reason: String,
    },
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing XML failed part-way; the output file may be incomplete.
    #[error("Export error: {0}")]
    Export(String),
    /// The text format has no code for this color.
    #[error("Color {0:?} cannot be saved in the drawing format")]
    UnsupportedColor(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
