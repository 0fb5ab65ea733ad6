//! Lock acquisition with retry and timeout

use super::{LockError, LockGuard};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(10);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);
const WAITING_NOTICE_THRESHOLD: Duration = Duration::from_secs(2);

pub(crate) fn acquire_with_retry(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    let io_err = |operation: &str, source: std::io::Error| LockError::Io {
        source,
        path: lock_path.to_path_buf(),
        operation: operation.to_string(),
    };

    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err("create parent directories", e))?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| io_err("open lock file", e))?;

    let start = Instant::now();
    let mut retry_delay = INITIAL_RETRY_DELAY;
    let mut notice_shown = false;

    loop {
        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!("acquired lock {} ({})", lock_path.display(), description);
                return Ok(LockGuard {
                    file,
                    path: lock_path.to_path_buf(),
                });
            }
            Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    return Err(LockError::Timeout {
                        path: lock_path.to_path_buf(),
                        description: description.to_string(),
                        waited: elapsed,
                    });
                }

                if !notice_shown && elapsed >= WAITING_NOTICE_THRESHOLD {
                    tracing::info!(
                        "waiting for lock on {} ({})...",
                        lock_path.display(),
                        description
                    );
                    notice_shown = true;
                }

                // Never sleep past the deadline
                thread::sleep(retry_delay.min(timeout.saturating_sub(elapsed)));
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => return Err(io_err("acquire lock", e)),
        }
    }
}
