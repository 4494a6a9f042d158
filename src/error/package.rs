//! Download, archive and manifest errors

use std::path::Path;

use super::FvmError;

/// Creates a manifest not found error
pub fn manifest_not_found(file: &str, searched: &Path) -> FvmError {
    FvmError::ManifestNotFound {
        file: file.to_string(),
        path: searched.display().to_string(),
    }
}

/// Creates a manifest unreadable error
pub fn manifest_unreadable(path: &Path, reason: impl Into<String>) -> FvmError {
    FvmError::ManifestUnreadable {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates a network failure error
pub fn network_failure(url: &str, reason: impl Into<String>) -> FvmError {
    FvmError::NetworkFailure {
        url: url.to_string(),
        reason: reason.into(),
    }
}

/// Creates an archive extraction error
pub fn archive_failed(path: &Path, reason: impl Into<String>) -> FvmError {
    FvmError::ArchiveFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}
