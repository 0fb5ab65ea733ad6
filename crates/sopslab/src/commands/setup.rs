//! Setup command - make sops available and export its location

use anyhow::Result;
use sopslab_core::config::Settings;
use sopslab_sops::{SetupOptions, setup_sops};
use tracing::debug;

use super::version_input;
use crate::host;

/// Execute `sopslab setup` command
pub fn run(version: &str) -> Result<()> {
    let spec = version_input(version)?;
    let settings = Settings::from_env()?;

    let result = setup_sops(&SetupOptions::for_current_platform(spec, settings)?)?;

    host::set_output("sops-path", &result.path.to_string_lossy())?;

    if let Some(dir) = result.path.parent() {
        match host::add_path(dir) {
            Ok(true) => debug!("added {} to PATH", dir.display()),
            Ok(false) => debug!("PATH already starts with {}", dir.display()),
            Err(e) => debug!("could not add {} to PATH: {}", dir.display(), e),
        }
    }

    Ok(())
}
