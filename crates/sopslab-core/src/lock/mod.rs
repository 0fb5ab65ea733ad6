//! Advisory file locks guarding cache installs
//!
//! Two processes acquiring the same tool version would otherwise both download
//! and both write into the same cache entry. The installer takes an exclusive
//! lock next to the entry and re-checks the cache once it holds it.

use std::path::Path;
use std::time::Duration;

mod acquire;
mod error;
mod guard;

pub use error::LockError;
pub use guard::LockGuard;


/// Acquires an exclusive lock on `lock_path`, waiting up to `timeout`.
///
/// The lock file and its parent directories are created when missing. While
/// another holder keeps the lock, acquisition is retried with exponential
/// backoff. The returned guard releases the lock when dropped.
///
/// # Examples
///
/// ```no_run
/// use sopslab_core::lock::acquire_lock;
/// use std::time::Duration;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let guard = acquire_lock(
///     Path::new("/tmp/tools/sops/3.8.1.lock"),
///     Duration::from_secs(30),
///     "install sops 3.8.1",
/// )?;
/// // install into the cache entry
/// drop(guard);
/// # Ok(())
/// # }
/// ```
pub fn acquire_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description)
}
