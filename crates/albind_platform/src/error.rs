//! Platform Error Types

use thiserror::Error;

/// Errors from the platform library loader
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Failed to load library {path}: {reason}")]
    LibraryLoadFailed { path: String, reason: String },

    #[error("Invalid library path: {0}")]
    InvalidPath(String),

    #[error("No library loaded")]
    NotLoaded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlatformError::LibraryLoadFailed {
            path: "libopenal.so.1".into(),
            reason: "file not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("libopenal.so.1"));
        assert!(msg.contains("file not found"));
    }
}
