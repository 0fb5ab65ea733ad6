//! URL construction helpers for GitHub resources

use sopslab_core::config::consts::github;
use thiserror::Error;
use url::Url;

/// Builds GitHub base URL
pub fn github_base_url() -> Result<Url, url::ParseError> {
    Url::parse(github::BASE_URL)
}

/// Builds GitHub API base URL
pub fn github_api_base_url() -> Result<Url, url::ParseError> {
    Url::parse(github::API_BASE_URL)
}

/// Replaces the path of `url` with `segments`
///
/// Each segment is percent-encoded, so `/` or `..` inside a segment can never
/// escape it.
///
/// # Errors
///
/// Returns error if URL cannot be a base
pub fn add_path_segments(url: &mut Url, segments: &[&str]) -> Result<(), UrlError> {
    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .clear()
        .extend(segments);
    Ok(())
}

/// Appends `segments` after the existing path of `url`
///
/// A trailing slash on `url` does not produce an empty segment.
///
/// # Errors
///
/// Returns error if URL cannot be a base
pub fn append_path_segments(url: &mut Url, segments: &[&str]) -> Result<(), UrlError> {
    let url_for_error = url.clone();
    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase { url: url_for_error })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// URL construction errors
#[derive(Debug, Error)]
pub enum UrlError {
    /// URL cannot be used as a base
    #[error("URL cannot be a base: {url}")]
    CannotBeABase {
        /// The problematic URL
        url: Url,
    },

    /// Invalid URL parse error
    #[error("Invalid URL: {0}")]
    ParseError(#[from] url::ParseError),
}

impl From<UrlError> for sopslab_core::SopslabError {
    fn from(err: UrlError) -> Self {
        sopslab_core::SopslabError::InvalidUrl(err.to_string())
    }
}
