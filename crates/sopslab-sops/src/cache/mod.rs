//! Local tool cache
//!
//! Layout below the cache root, shared with other tool-cache users on CI
//! runners:
//!
//! ```text
//! <root>/
//! └── sops/
//!     ├── 3.8.1.lock          advisory lock held while installing 3.8.1
//!     └── 3.8.1/
//!         ├── x64/
//!         │   └── sops        the binary (sops.exe on Windows)
//!         └── x64.complete    written last; entry exists only with it
//! ```
//!
//! A hit never touches the network. A miss downloads the platform asset once,
//! under the lock, re-checking the cache after the lock is taken so that
//! processes waiting on the same version reuse the first install.

mod download;
mod store;

pub use download::download_tool;

use crate::github::Endpoints;
use crate::permissions::make_fully_executable;
use crate::platform::{Platform, download_url};
use crate::version::clean_version;
use sopslab_core::config::Settings;
use sopslab_core::config::consts::{cache, tool};
use sopslab_core::lock::acquire_lock;
use sopslab_core::{Result, SopslabError};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Directory-backed store of downloaded tool binaries
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
    tool: String,
    lock_timeout: Duration,
}

impl ToolCache {
    /// Cache for sops under the configured root
    pub fn new(settings: &Settings) -> Self {
        Self {
            root: settings.cache_root.clone(),
            tool: tool::NAME.to_string(),
            lock_timeout: settings.lock_timeout,
        }
    }

    /// Key under which `version` is stored
    ///
    /// The cleaned semantic version (`v3.8.1` → `3.8.1`) when it parses,
    /// otherwise the raw string. Explicit versions reach here unvalidated, so
    /// the key must be a single plain path component.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalidValue` for an empty key, `.`/`..`, or a key
    /// containing a path separator.
    pub fn cache_version(version: &str) -> Result<String> {
        let key = clean_version(version)
            .map(|v| v.to_string())
            .unwrap_or_else(|| version.to_string());

        let mut components = Path::new(&key).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if !single_normal || key.contains(['/', '\\']) {
            return Err(SopslabError::ConfigInvalidValue {
                field: "version".to_string(),
                reason: format!("'{}' cannot be used as a cache directory name", version),
            });
        }

        Ok(key)
    }

    fn version_dir(&self, version: &str) -> Result<PathBuf> {
        Ok(self.root.join(&self.tool).join(Self::cache_version(version)?))
    }

    /// Directory holding the binary for `version` on `arch`
    pub fn entry_dir(&self, version: &str, arch: &str) -> Result<PathBuf> {
        Ok(self.version_dir(version)?.join(arch))
    }

    pub fn marker_path(&self, version: &str, arch: &str) -> Result<PathBuf> {
        Ok(self
            .version_dir(version)?
            .join(format!("{}.{}", arch, cache::COMPLETE_MARKER_EXT)))
    }

    fn lock_path(&self, version: &str) -> Result<PathBuf> {
        Ok(self
            .root
            .join(&self.tool)
            .join(format!("{}.lock", Self::cache_version(version)?)))
    }

    /// Returns the entry directory when it and its marker both exist
    ///
    /// A version that cannot be a cache key is never cached.
    pub fn find(&self, version: &str, arch: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(version, arch).ok()?;
        let marker = self.marker_path(version, arch).ok()?;
        if dir.is_dir() && marker.is_file() {
            Some(dir)
        } else {
            None
        }
    }

    /// Registers `source` as `target_name` in the entry for `version`/`arch`
    ///
    /// Stale contents of the entry are replaced. Returns the entry directory.
    pub fn cache_file(
        &self,
        source: &Path,
        target_name: &str,
        version: &str,
        arch: &str,
    ) -> Result<PathBuf> {
        store::store_entry(
            source,
            &self.entry_dir(version, arch)?,
            target_name,
            &self.marker_path(version, arch)?,
        )
    }

    /// Returns the entry directory for `version` on `platform`, downloading on a miss
    ///
    /// # Errors
    ///
    /// - `DownloadFailed` naming the URL when the asset cannot be fetched
    /// - `Lock` when another install holds the version past the lock timeout
    /// - `Cache` on filesystem failures
    pub fn acquire(
        &self,
        version: &str,
        platform: &Platform,
        endpoints: &Endpoints,
    ) -> Result<PathBuf> {
        let arch = platform.arch.identifier();

        if let Some(dir) = self.find(version, arch) {
            debug!("cache hit for {} {} ({}): {}", self.tool, version, arch, dir.display());
            return Ok(dir);
        }

        let _guard = acquire_lock(
            &self.lock_path(version)?,
            self.lock_timeout,
            &format!("install {} {}", self.tool, version),
        )?;

        // Another process may have finished the install while we waited
        if let Some(dir) = self.find(version, arch) {
            debug!("{} {} installed by another process", self.tool, version);
            return Ok(dir);
        }

        let url = download_url(version, platform, endpoints).map_err(SopslabError::from)?;
        let downloaded = download_tool(&url)?;

        make_fully_executable(&downloaded).map_err(|e| {
            SopslabError::cache(format!("set permissions on {}", downloaded.display()), e)
        })?;

        let dir = self.cache_file(&downloaded, &platform.executable_name(), version, arch)?;
        info!("Cached {} {} at {}", self.tool, version, dir.display());

        Ok(dir)
    }
}
