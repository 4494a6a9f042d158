//! Configuration errors

use super::FvmError;

/// Creates a configuration missing error
pub fn missing(message: impl Into<String>) -> FvmError {
    FvmError::ConfigurationMissing {
        message: message.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> FvmError {
    FvmError::ConfigInvalid {
        message: message.into(),
    }
}
