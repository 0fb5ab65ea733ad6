//! Url command - print the release asset URL for this platform

use anyhow::Result;
use sopslab_sops::{Endpoints, Platform, download_url, resolve_version};

use super::version_input;
use crate::output::print_text;

/// Execute `sopslab url` command
pub fn run(version: &str) -> Result<()> {
    let spec = version_input(version)?;
    let endpoints = Endpoints::github()?;

    let resolved = resolve_version(spec, &endpoints);
    let url = download_url(&resolved, &Platform::current(), &endpoints)?;

    print_text(url.as_str())?;
    Ok(())
}
