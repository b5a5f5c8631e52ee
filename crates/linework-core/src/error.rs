//! Crate-wide error type for callers that want a single error.

use crate::canvas::EditError;
use crate::config::ConfigError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn group_nothing(canvas: &mut Canvas) -> Result<()> {
        canvas.group_selected()?;
        Ok(())
    }

    #[test]
    fn test_edit_error_converts() {
        let mut canvas = Canvas::new();
        let err = group_nothing(&mut canvas).unwrap_err();
        assert!(matches!(err, Error::Edit(EditError::InvalidOperation(_))));
    }

    #[test]
    fn test_storage_error_message_passes_through() {
        let err: Error = StorageError::UnsupportedColor("teal".to_string()).into();
        assert_eq!(
            err.to_string(),
            StorageError::UnsupportedColor("teal".to_string()).to_string()
        );
    }
}
