//! Reading and writing drawings on disk.

use super::{StorageError, StorageResult, text, xml};
use crate::canvas::Document;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Save a document in the native text format.
///
/// The text is rendered before the file is opened, so an unsupported color
/// leaves any existing file untouched.
pub fn save_drawing(path: &Path, document: &Document) -> StorageResult<()> {
    let contents = text::to_text(document)?;
    fs::write(path, contents).map_err(io_error(path))?;
    log::info!("Saved {} groups to {}", document.len(), path.display());
    Ok(())
}

/// Load a document from a native text file. The document is named after
/// the file stem.
pub fn load_drawing(path: &Path) -> StorageResult<Document> {
    let bytes = fs::read(path).map_err(io_error(path))?;
    let mut document = text::from_bytes(&bytes)?;
    if let Some(stem) = path.file_stem() {
        document.name = stem.to_string_lossy().into_owned();
    }
    log::info!(
        "Loaded {} groups ({} shapes) from {}",
        document.len(),
        document.shape_count(),
        path.display()
    );
    Ok(document)
}

/// Export a document as XML.
pub fn export_xml(path: &Path, document: &Document) -> StorageResult<()> {
    let file = File::create(path).map_err(io_error(path))?;
    xml::write_xml(document, BufWriter::new(file))?;
    log::info!("Exported {} groups to {}", document.len(), path.display());
    Ok(())
}
