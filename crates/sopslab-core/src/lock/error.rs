//! Error types for cache locks

use crate::config::consts::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    /// Another process kept the lock for longer than the allowed wait
    #[error(
        "timed out after {}s waiting for {} ({description}); another install may be stuck, \
         or raise {hint} to wait longer",
        .waited.as_secs(),
        .path.display(),
        hint = env::LOCK_TIMEOUT_SECS
    )]
    Timeout {
        path: PathBuf,
        description: String,
        waited: Duration,
    },

    #[error("{operation} failed for lock file {}: {source}", .path.display())]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
