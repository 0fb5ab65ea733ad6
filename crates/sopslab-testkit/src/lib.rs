//! Test utilities for sopslab
//!
//! This crate provides shared testing utilities used across the sopslab workspace.

pub mod env;
pub mod fixtures;
pub mod mock;

pub use env::{ENV_LOCK, IsolatedEnv, with_isolated_cache_env};
pub use fixtures::{releases_json, seed_cache_entry, write_fake_binary};
pub use mock::{get_shared_mock_server, shared_mock_url};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// All test temporary files end up in one gitignored location that is easy
/// to clean up by hand.
///
/// # Panics
///
/// Panics if the current directory is unknown or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use sopslab_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("sops"), "bin").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
