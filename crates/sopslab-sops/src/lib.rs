//! sops version resolution and binary acquisition for sopslab.
//!
//! Given a version specifier this crate produces the absolute path of a sops
//! executable on the local filesystem, downloading the release asset into a
//! local tool cache when it is not already there.
//!
//! # Architecture
//!
//! - [`version`]: turns `latest` or an explicit version into a concrete tag
//! - [`platform`]: host detection and the release asset URL
//! - [`cache`]: the on-disk tool cache and locked installs
//! - [`finder`]: locating the executable inside a cache entry
//! - [`setup`]: the pipeline tying the above together
//!
//! # Acquisition Flow
//!
//! ```text
//! setup_sops()
//!     ↓
//! 1. Resolve version
//!     → "latest": release index, greatest non-rc tag
//!     → fetch failure: warn, fall back to the pinned stable version
//!     ↓
//! 2. Look up {cache_root}/sops/{version}/{arch}
//!     ↓ (miss)
//! 3. Lock, re-check, download sops-{version}.{suffix}, chmod, register
//!     ↓
//! 4. Walk the entry for sops / sops.exe, chmod, return its path
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use sopslab_core::config::Settings;
//! use sopslab_sops::{SetupOptions, setup_sops};
//!
//! # fn main() -> sopslab_core::Result<()> {
//! let options = SetupOptions::for_current_platform("latest", Settings::from_env()?)?;
//! let result = setup_sops(&options)?;
//! println!("{} at {}", result.version, result.path.display());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod finder;
pub mod github;
pub mod permissions;
pub mod platform;
pub mod release;
pub mod setup;
pub mod version;

pub use cache::ToolCache;
pub use finder::locate;
pub use github::Endpoints;
pub use platform::{Arch, Os, Platform, download_url};
pub use setup::{SetupOptions, SetupResult, setup_sops};
pub use version::{normalize_version, resolve_latest, resolve_version};
