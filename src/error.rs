//! Error types for the capture-runtime library

use thiserror::Error;

/// Error type for capture-source directory transports
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The transport could not be opened (shared memory missing, etc.)
    #[error("Directory initialization failed: {0}")]
    InitFailed(String),

    /// The directory could not be read
    #[error("Directory read failed: {0}")]
    ReadFailed(String),

    /// A record advertised a pixel format this library does not know
    #[error("Unknown pixel format: {0}")]
    UnknownPixelFormat(i32),

    /// Other transport errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Error type for desktop composition control
#[derive(Error, Debug)]
pub enum CompositionError {
    /// A toggle was requested before the startup state was saved
    #[error("Composition guard used before the startup state was saved")]
    NotInitialized,

    /// Composition control is not available on this platform
    #[error("Composition control is not supported on this platform")]
    Unsupported,

    /// Querying the composition state failed
    #[error("Failed to query composition state: {0}")]
    QueryFailed(String),

    /// Changing the composition state failed
    #[error("Failed to change composition state: {0}")]
    ToggleFailed(String),

    /// Windows-specific error
    #[cfg(windows)]
    #[error("Windows error: {0}")]
    WindowsError(#[from] windows::core::Error),
}

/// Error type for source selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested process is not in the current directory
    #[error("Unknown capture source: process {0}")]
    UnknownSource(u32),

    /// Process ID 0 is reserved for "no selection"
    #[error("Process ID 0 cannot be selected")]
    InvalidSelection,
}

/// Error type for session-level operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Selection error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Composition error
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// `start` was called twice
    #[error("Session already started")]
    AlreadyStarted,

    /// A composition toggle was requested before `start`
    #[error("Session not started")]
    NotStarted,

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for directory transports
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Result type for composition control
pub type CompositionResult<T> = Result<T, CompositionError>;

/// Result type for source selection
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

impl DirectoryError {
    /// Check if the next poll may succeed where this one failed
    pub fn is_transient(&self) -> bool {
        !matches!(self, DirectoryError::UnknownPixelFormat(_))
    }

    /// Get error code for FFI
    pub fn to_error_code(&self) -> i32 {
        match self {
            DirectoryError::InitFailed(_) => -1001,
            DirectoryError::ReadFailed(_) => -1002,
            DirectoryError::UnknownPixelFormat(_) => -1003,
            DirectoryError::Other(_) => -1999,
        }
    }
}

impl CompositionError {
    /// Get error code for FFI
    pub fn to_error_code(&self) -> i32 {
        match self {
            CompositionError::NotInitialized => -2001,
            CompositionError::Unsupported => -2002,
            CompositionError::QueryFailed(_) => -2003,
            CompositionError::ToggleFailed(_) => -2004,
            #[cfg(windows)]
            CompositionError::WindowsError(_) => -2005,
        }
    }
}

impl RegistryError {
    /// Get error code for FFI
    pub fn to_error_code(&self) -> i32 {
        match self {
            RegistryError::UnknownSource(_) => -3001,
            RegistryError::InvalidSelection => -3002,
        }
    }
}

impl SessionError {
    /// Get error code for FFI
    pub fn to_error_code(&self) -> i32 {
        match self {
            SessionError::InvalidConfiguration(_) => -4001,
            SessionError::Registry(e) => e.to_error_code(),
            SessionError::Composition(e) => e.to_error_code(),
            SessionError::AlreadyStarted => -4002,
            SessionError::NotStarted => -4003,
            SessionError::Other(_) => -4999,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_display() {
        let err = DirectoryError::InitFailed("shared memory not found".to_string());
        assert_eq!(
            err.to_string(),
            "Directory initialization failed: shared memory not found"
        );
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::UnknownSource(42);
        assert_eq!(err.to_string(), "Unknown capture source: process 42");
    }

    #[test]
    fn test_is_transient() {
        assert!(DirectoryError::ReadFailed("busy".to_string()).is_transient());
        assert!(!DirectoryError::UnknownPixelFormat(9).is_transient());
    }

    #[test]
    fn test_session_error_code_passthrough() {
        let err: SessionError = RegistryError::InvalidSelection.into();
        assert_eq!(err.to_error_code(), -3002);

        let err: SessionError = CompositionError::NotInitialized.into();
        assert_eq!(err.to_error_code(), -2001);
    }
}
