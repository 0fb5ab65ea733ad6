//! Artifact download into a temporary file

use crate::github::{build_download_client, download_to_writer};
use sopslab_core::{Result, SopslabError};
use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, info};
use url::Url;

/// Downloads `url` into a fresh temporary file
///
/// The file is removed when the returned [`TempPath`] is dropped, so an error
/// anywhere later in the install leaves nothing behind.
///
/// # Errors
///
/// Any failure (client construction, transport, non-success status, write)
/// becomes `DownloadFailed` naming `url`.
pub fn download_tool(url: &Url) -> Result<TempPath> {
    let failed = |reason: String| SopslabError::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    info!("Downloading {}", url);

    let client = build_download_client().map_err(|e| failed(e.to_string()))?;
    let mut temp_file = NamedTempFile::new().map_err(|e| failed(e.to_string()))?;

    let bytes =
        download_to_writer(&client, url, &mut temp_file).map_err(|e| failed(e.to_string()))?;

    // download_to_writer flushes; sync so the copy into the cache sees every byte
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| failed(e.to_string()))?;

    debug!("downloaded {} bytes to {}", bytes, temp_file.path().display());

    Ok(temp_file.into_temp_path())
}
