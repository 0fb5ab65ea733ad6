//! HTTP client construction for GitHub interactions

use reqwest::blocking::Client;
use sopslab_core::config::consts::network;
use std::time::Duration;

/// Builds HTTP client with the sopslab user agent
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(network::USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Client for the release index (short timeout, small JSON bodies)
pub fn build_index_client() -> Result<Client, reqwest::Error> {
    build_client(network::INDEX_TIMEOUT)
}

/// Client for binary downloads (long timeout)
pub fn build_download_client() -> Result<Client, reqwest::Error> {
    build_client(network::DOWNLOAD_TIMEOUT)
}
