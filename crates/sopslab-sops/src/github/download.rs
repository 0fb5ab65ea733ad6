//! Generic streaming download for GitHub resources

use reqwest::blocking::Client;
use std::io::{Read, Write};
use thiserror::Error;
use url::Url;

const CHUNK_SIZE: usize = 8192;

/// Downloads from URL into memory
///
/// # Errors
///
/// Returns error if the request fails, the status is not success, or the
/// body cannot be read.
pub fn download_to_memory(client: &Client, url: &Url) -> Result<Vec<u8>, DownloadError> {
    let mut buffer = Vec::new();
    download_to_writer(client, url, &mut buffer)?;
    Ok(buffer)
}

/// Streams the body at `url` into `writer`, returning the byte count
///
/// # Errors
///
/// Returns error if:
/// - HTTP request fails
/// - Response status is not success
/// - I/O error while reading the body or writing it out
pub fn download_to_writer<W: Write>(
    client: &Client,
    url: &Url,
    writer: &mut W,
) -> Result<u64, DownloadError> {
    let mut response = client
        .get(url.as_str())
        .send()
        .map_err(|e| DownloadError::NetworkError {
            url: url.clone(),
            source: e.without_url(),
        })?;

    if let Err(err) = response.error_for_status_ref() {
        return Err(DownloadError::HttpError {
            url: url.clone(),
            source: err.without_url(),
        });
    }

    let mut chunk = [0; CHUNK_SIZE];
    let mut downloaded: u64 = 0;

    loop {
        let bytes_read = response.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }

        writer.write_all(&chunk[..bytes_read])?;
        downloaded += bytes_read as u64;
    }

    writer.flush()?;
    Ok(downloaded)
}

/// Download error types
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Server answered with a non-success status
    #[error("HTTP error downloading {url}: {source}")]
    HttpError {
        /// URL that failed
        url: Url,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Request could not be sent or completed
    #[error("network error downloading {url}: {source}")]
    NetworkError {
        /// URL that failed
        url: Url,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// I/O error during download
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
