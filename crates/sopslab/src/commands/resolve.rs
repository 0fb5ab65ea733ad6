//! Resolve command - show which version a specifier selects

use anyhow::Result;
use serde::Serialize;
use sopslab_sops::{Endpoints, resolve_version};

use super::version_input;
use crate::output::{print_json, print_text};

#[derive(Debug, Serialize)]
struct ResolvedVersion<'a> {
    requested: &'a str,
    version: String,
}

/// Execute `sopslab resolve` command
pub fn run(version: &str, json: bool) -> Result<()> {
    let spec = version_input(version)?;
    let resolved = resolve_version(spec, &Endpoints::github()?);

    if json {
        let info = ResolvedVersion {
            requested: spec,
            version: resolved,
        };
        print_json(&serde_json::to_string_pretty(&info)?)?;
    } else {
        print_text(&resolved)?;
    }

    Ok(())
}
