//! Full acquisition pipeline: resolve, cache, locate

use crate::cache::ToolCache;
use crate::finder::locate;
use crate::github::Endpoints;
use crate::platform::Platform;
use crate::version::resolve_version;
use sopslab_core::Result;
use sopslab_core::config::Settings;
use std::path::PathBuf;
use tracing::info;

/// Inputs of [`setup_sops`]
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// `latest` (any case) or an explicit version, with or without `v`
    pub version_spec: String,
    pub settings: Settings,
    pub endpoints: Endpoints,
    pub platform: Platform,
}

impl SetupOptions {
    /// Options for this host talking to github.com
    pub fn for_current_platform(version_spec: impl Into<String>, settings: Settings) -> Result<Self> {
        Ok(Self {
            version_spec: version_spec.into(),
            settings,
            endpoints: Endpoints::github()?,
            platform: Platform::current(),
        })
    }
}

/// Outcome of a successful setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupResult {
    /// Resolved version, `v`-prefixed
    pub version: String,
    /// Absolute path of the executable
    pub path: PathBuf,
}

/// Makes the requested sops version available and returns its executable
///
/// # Errors
///
/// Fails when the binary cannot be downloaded, cached or found in its cache
/// entry. Failing to read the release index is not an error.
pub fn setup_sops(options: &SetupOptions) -> Result<SetupResult> {
    let version = resolve_version(&options.version_spec, &options.endpoints);

    let cache = ToolCache::new(&options.settings);
    let entry = cache.acquire(&version, &options.platform, &options.endpoints)?;

    let path = locate(&entry, &options.platform.executable_name())?;
    info!("sops version '{}' has been cached at {}", version, path.display());

    Ok(SetupResult { version, path })
}
