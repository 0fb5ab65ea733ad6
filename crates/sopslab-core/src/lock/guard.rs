//! RAII guard releasing the cache lock

use std::fs::File;
use std::path::{Path, PathBuf};

/// Holds an exclusive advisory lock until dropped
///
/// fs2 locks belong to the open file description, so closing `file` on drop
/// releases the lock even on early return or panic.
#[derive(Debug)]
pub struct LockGuard {
    #[allow(dead_code)]
    pub(crate) file: File,
    pub(crate) path: PathBuf,
}

impl LockGuard {
    /// Path of the lock file backing this guard
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        tracing::debug!("released lock {}", self.path.display());
    }
}
