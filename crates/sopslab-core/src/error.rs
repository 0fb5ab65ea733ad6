use std::path::PathBuf;
use thiserror::Error;

use crate::lock::LockError;

#[derive(Error, Debug)]
pub enum SopslabError {
    // Input errors
    #[error("INPUT_REQUIRED: input required and not supplied: {0}")]
    InputRequired(String),

    // Config errors
    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    #[error("CACHE_DIR_UNAVAILABLE: could not determine a cache directory, set {env_var}")]
    CacheDirUnavailable { env_var: String },

    // Network errors
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    #[error("NETWORK_FETCH_FAILED: {url}: {reason}")]
    NetworkFetchFailed { url: String, reason: String },

    #[error("RELEASE_INDEX_INVALID: {url}: {reason}")]
    ReleaseIndexInvalid { url: String, reason: String },

    // Acquisition errors
    #[error("DOWNLOAD_FAILED: failed to download sops from location {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("EXECUTABLE_NOT_FOUND: {name} executable not found in path {}", dir.display())]
    ExecutableNotFound { name: String, dir: PathBuf },

    #[error("CACHE_ERROR: {operation}: {source}")]
    Cache {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("LOCK_FAILED: {0}")]
    Lock(#[from] LockError),
}

impl SopslabError {
    /// Wraps an I/O error with the cache operation that produced it
    pub fn cache(operation: impl Into<String>, source: std::io::Error) -> Self {
        SopslabError::Cache {
            operation: operation.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SopslabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_failed_names_url() {
        let err = SopslabError::DownloadFailed {
            url: "https://example.com/sops-v3.8.1.linux.amd64".to_string(),
            reason: "HTTP status 404".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("DOWNLOAD_FAILED:"));
        assert!(msg.contains("https://example.com/sops-v3.8.1.linux.amd64"));
    }

    #[test]
    fn test_executable_not_found_names_directory() {
        let err = SopslabError::ExecutableNotFound {
            name: "sops".to_string(),
            dir: PathBuf::from("/cache/sops/3.8.1/x64"),
        };
        assert_eq!(
            err.to_string(),
            "EXECUTABLE_NOT_FOUND: sops executable not found in path /cache/sops/3.8.1/x64"
        );
    }

    #[test]
    fn test_cache_error_keeps_source() {
        use std::error::Error as _;

        let err = SopslabError::cache(
            "create directory /cache/sops",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("create directory /cache/sops"));
        assert!(err.source().is_some());
    }
}
