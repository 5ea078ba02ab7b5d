//! Binding Error Types

use thiserror::Error;

/// Reasons an initialization attempt failed
///
/// Every variant leaves the binding fully unloaded. A missing extension is
/// not an error; it only leaves the matching capability absent.
#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Failed to load audio library: {0}")]
    LibraryLoadFailed(#[from] albind_platform::PlatformError),

    #[error("Required symbol missing: {0}")]
    RequiredSymbolMissing(&'static str),

    #[error("Failed to open audio device: {0}")]
    DeviceOpenFailed(String),

    #[error("Failed to create audio context: {0}")]
    ContextCreateFailed(String),

    #[error("Failed to make audio context current")]
    ContextMakeCurrentFailed,
}

/// Result type alias for binding operations
pub type BindingResult<T> = Result<T, BindingError>;

/// Errors from loading, validating or saving `BindingConfig`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine config path")]
    NoConfigPath,

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
