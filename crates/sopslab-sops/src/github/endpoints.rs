//! Remote endpoints consulted while acquiring sops

use super::url::{UrlError, add_path_segments, github_api_base_url, github_base_url};
use sopslab_core::config::consts::github;
use url::Url;

/// Where the release index lives and where release assets are served from
///
/// Production code always uses [`Endpoints::github`]; other bases exist so
/// tests can point the pipeline at a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `GET` returns a JSON array of releases
    pub releases_index: Url,
    /// `{download_base}/{version}/{asset}` is the raw binary
    pub download_base: Url,
}

impl Endpoints {
    /// The getsops/sops repository on github.com
    pub fn github() -> Result<Self, UrlError> {
        Self::from_bases(github_base_url()?, github_api_base_url()?)
    }

    /// Builds the sops endpoints below arbitrary web and API bases
    ///
    /// # Examples
    ///
    /// ```
    /// use sopslab_sops::github::Endpoints;
    ///
    /// let endpoints = Endpoints::with_base_urls("http://127.0.0.1:4000", "http://127.0.0.1:4000")?;
    /// assert_eq!(
    ///     endpoints.releases_index.as_str(),
    ///     "http://127.0.0.1:4000/repos/getsops/sops/releases"
    /// );
    /// # Ok::<(), sopslab_sops::github::UrlError>(())
    /// ```
    pub fn with_base_urls(web_base: &str, api_base: &str) -> Result<Self, UrlError> {
        Self::from_bases(Url::parse(web_base)?, Url::parse(api_base)?)
    }

    fn from_bases(mut web_base: Url, mut api_base: Url) -> Result<Self, UrlError> {
        add_path_segments(
            &mut api_base,
            &["repos", github::OWNER, github::REPO, "releases"],
        )?;
        add_path_segments(
            &mut web_base,
            &[github::OWNER, github::REPO, "releases", "download"],
        )?;

        Ok(Self {
            releases_index: api_base,
            download_base: web_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_endpoints() {
        let endpoints = Endpoints::github().unwrap();
        assert_eq!(
            endpoints.releases_index.as_str(),
            "https://api.github.com/repos/getsops/sops/releases"
        );
        assert_eq!(
            endpoints.download_base.as_str(),
            "https://github.com/getsops/sops/releases/download"
        );
    }

    #[test]
    fn test_with_base_urls_rejects_garbage() {
        assert!(Endpoints::with_base_urls("not a url", "http://localhost").is_err());
    }
}
