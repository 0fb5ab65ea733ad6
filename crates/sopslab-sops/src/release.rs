//! GitHub release index for sops
//!
//! The index is the JSON array served by the releases API. Only `tag_name` is
//! read; every other field, and every record that is not an object, is
//! ignored rather than failing the whole index.

use crate::github::{build_index_client, download_to_memory};
use serde::Deserialize;
use serde_json::Value;
use sopslab_core::{Result, SopslabError};
use url::Url;

/// One entry of the release index
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReleaseRecord {
    /// Raw tag (e.g. "v3.8.1"); may be missing or not even a string
    #[serde(default)]
    pub tag_name: Option<Value>,
}

impl ReleaseRecord {
    /// Record carrying a string tag
    pub fn with_tag(tag: &str) -> Self {
        Self {
            tag_name: Some(Value::String(tag.to_string())),
        }
    }

    /// The tag rendered as text
    ///
    /// Strings are returned as-is and scalar values (numbers, booleans) in
    /// their JSON rendering. Null, arrays and objects carry no usable tag.
    pub fn tag(&self) -> Option<String> {
        match self.tag_name.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Parses a release index body
///
/// # Errors
///
/// Returns `ReleaseIndexInvalid` when the body is not JSON or not an array.
pub fn parse_release_index(url: &Url, body: &[u8]) -> Result<Vec<ReleaseRecord>> {
    let invalid = |reason: String| SopslabError::ReleaseIndexInvalid {
        url: url.to_string(),
        reason,
    };

    let value: Value = serde_json::from_slice(body).map_err(|e| invalid(e.to_string()))?;
    let Value::Array(entries) = value else {
        return Err(invalid("expected a JSON array of releases".to_string()));
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ReleaseRecord>(entry).ok())
        .collect())
}

/// Fetches and parses the release index at `url`
///
/// # Errors
///
/// Returns `NetworkFetchFailed` when the request fails and
/// `ReleaseIndexInvalid` when the body is not an array.
pub fn fetch_release_index(url: &Url) -> Result<Vec<ReleaseRecord>> {
    let fetch_failed = |reason: String| SopslabError::NetworkFetchFailed {
        url: url.to_string(),
        reason,
    };

    let client = build_index_client().map_err(|e| fetch_failed(e.to_string()))?;
    let body = download_to_memory(&client, url).map_err(|e| fetch_failed(e.to_string()))?;

    parse_release_index(url, &body)
}
