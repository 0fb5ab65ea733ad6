pub mod resolve;
pub mod setup;
pub mod url;

use sopslab_core::SopslabError;

/// Trims the version input; an empty value is a usage error
pub(crate) fn version_input(raw: &str) -> Result<&str, SopslabError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SopslabError::InputRequired("version".to_string()));
    }
    Ok(trimmed)
}
