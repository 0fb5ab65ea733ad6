//! Environment isolation utilities for testing
//!
//! Tests that read or change process environment variables must hold
//! [`ENV_LOCK`] so parallel tests in the same binary do not see each other's
//! values.

use sopslab_core::config::consts;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: [&str; 5] = [
    consts::env::CACHE_DIR,
    consts::env::RUNNER_TOOL_CACHE,
    consts::env::INPUT_VERSION,
    consts::env::GITHUB_OUTPUT,
    consts::env::GITHUB_PATH,
];

/// Paths handed to a closure run by [`with_isolated_cache_env`]
#[derive(Debug, Clone)]
pub struct IsolatedEnv {
    /// Value of `SOPSLAB_CACHE_DIR` (exists, empty)
    pub cache_dir: PathBuf,
    /// Value of `GITHUB_OUTPUT` (exists, empty)
    pub output_file: PathBuf,
    /// Value of `GITHUB_PATH` (exists, empty)
    pub path_file: PathBuf,
}

impl IsolatedEnv {
    /// Environment pairs for spawning a child process with the same isolation
    pub fn vars(&self) -> Vec<(&'static str, &Path)> {
        vec![
            (consts::env::CACHE_DIR, self.cache_dir.as_path()),
            (consts::env::GITHUB_OUTPUT, self.output_file.as_path()),
            (consts::env::GITHUB_PATH, self.path_file.as_path()),
        ]
    }
}

/// Runs `f` with the sopslab cache and runner files pointed at a temp dir
///
/// `RUNNER_TOOL_CACHE` and `INPUT_VERSION` are unset for the duration. All
/// touched variables are restored afterwards.
///
/// # Examples
///
/// ```no_run
/// use sopslab_testkit::with_isolated_cache_env;
///
/// with_isolated_cache_env(|env| {
///     assert_eq!(
///         std::env::var("SOPSLAB_CACHE_DIR").unwrap(),
///         env.cache_dir.to_string_lossy()
///     );
/// });
/// ```
pub fn with_isolated_cache_env<F, R>(f: F) -> R
where
    F: FnOnce(&IsolatedEnv) -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| {
        // Only access is serialised; the environment stays valid after a panic
        poisoned.into_inner()
    });

    let originals: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|key| (*key, std::env::var(key).ok()))
        .collect();

    let temp = TempDir::new().unwrap();
    let env = IsolatedEnv {
        cache_dir: temp.path().join("tool-cache"),
        output_file: temp.path().join("github_output"),
        path_file: temp.path().join("github_path"),
    };
    std::fs::create_dir_all(&env.cache_dir).unwrap();
    std::fs::write(&env.output_file, "").unwrap();
    std::fs::write(&env.path_file, "").unwrap();

    // SAFETY: ENV_LOCK is held, so no other test mutates the environment
    unsafe {
        std::env::remove_var(consts::env::RUNNER_TOOL_CACHE);
        std::env::remove_var(consts::env::INPUT_VERSION);
        for (key, value) in env.vars() {
            std::env::set_var(key, value);
        }
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&env)));

    // SAFETY: still holding ENV_LOCK
    unsafe {
        for (key, value) in originals {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
    drop(temp);

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
