//! Version resolution
//!
//! Turns a caller-supplied specifier into a concrete `v`-prefixed tag:
//!
//! ```text
//! "latest" (any case) → scan the release index for the greatest non-rc tag
//!                       → on any failure: warn, use STABLE_VERSION
//! "3.8.1"             → "v3.8.1"
//! "v3.8.1" / "V3.8.1" → unchanged
//! ```
//!
//! Explicit versions are not validated; an unknown version surfaces later as
//! a download failure naming the URL.

use crate::github::Endpoints;
use crate::release::{ReleaseRecord, fetch_release_index};
use semver::{BuildMetadata, Version};
use sopslab_core::config::consts::tool;
use tracing::{debug, warn};

/// Whether `spec` is the "latest stable" sentinel
pub fn is_latest(spec: &str) -> bool {
    spec.eq_ignore_ascii_case(tool::LATEST_SENTINEL)
}

/// Ensures exactly one leading `v` on an explicit version
///
/// Strings already starting with `v` or `V` are returned unchanged.
pub fn normalize_version(spec: &str) -> String {
    if spec.starts_with(['v', 'V']) {
        spec.to_string()
    } else {
        format!("v{}", spec)
    }
}

/// Parses a tag loosely as a semantic version
///
/// Surrounding whitespace and any leading run of `=`, `v` and spaces is dropped.
/// Build metadata is discarded so it takes no part in ordering.
pub fn clean_version(tag: &str) -> Option<Version> {
    let trimmed = tag
        .trim()
        .trim_start_matches(|c: char| c == '=' || c == 'v' || c.is_whitespace());
    let mut version = Version::parse(trimmed).ok()?;
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

/// Greatest stable version among `records`, never lower than `fallback`
///
/// A tag counts as stable when its cleaned form does not contain `rc`. This is
/// a substring test, so any pre-release label containing "rc" is excluded
/// while e.g. `-beta.1` is not. Tags that do not parse are skipped.
///
/// Returns the winner with a `v` prefix. If `fallback` itself does not parse
/// it is returned unchanged.
pub fn latest_stable_from_index(records: &[ReleaseRecord], fallback: &str) -> String {
    let Some(mut latest) = clean_version(fallback) else {
        return fallback.to_string();
    };

    for tag in records.iter().filter_map(ReleaseRecord::tag) {
        let Some(candidate) = clean_version(&tag) else {
            debug!("skipping release tag '{}': not a semantic version", tag);
            continue;
        };

        if !candidate.to_string().contains("rc") && candidate > latest {
            latest = candidate;
        }
    }

    format!("v{}", latest)
}

/// Resolves the newest stable sops release from the release index
///
/// Never fails: when the index cannot be fetched or parsed a warning is
/// logged and [`tool::STABLE_VERSION`] is returned unchanged.
pub fn resolve_latest(endpoints: &Endpoints) -> String {
    let url = &endpoints.releases_index;

    match fetch_release_index(url) {
        Ok(records) => {
            let version = latest_stable_from_index(&records, tool::STABLE_VERSION);
            debug!(
                "resolved latest sops to {} from {} release records",
                version,
                records.len()
            );
            version
        }
        Err(e) => {
            warn!(
                "Cannot get the latest sops info from {}. Error {}. Using default sops version {}.",
                url,
                e,
                tool::STABLE_VERSION
            );
            tool::STABLE_VERSION.to_string()
        }
    }
}

/// Resolves a version specifier to a concrete `v`-prefixed version
pub fn resolve_version(spec: &str, endpoints: &Endpoints) -> String {
    if is_latest(spec) {
        resolve_latest(endpoints)
    } else {
        normalize_version(spec)
    }
}
