//! File system errors

use std::path::Path;

use super::FvmError;

/// Creates a file system failure for `operation` on `path`
pub fn failure(operation: &str, path: &Path, err: &std::io::Error) -> FvmError {
    FvmError::FilesystemFailure {
        operation: operation.to_string(),
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
