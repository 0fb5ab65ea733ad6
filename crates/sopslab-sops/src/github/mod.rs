//! Shared GitHub interaction utilities
//!
//! This module provides common functionality for talking to GitHub:
//! - HTTP client construction with the sopslab user agent and timeouts
//! - Streaming downloads into memory or into any writer
//! - Safe URL construction helpers and the sops endpoints

pub mod client;
pub mod download;
pub mod endpoints;
pub mod url;

// Re-exports for convenient access
pub use client::{build_client, build_download_client, build_index_client};
pub use download::{DownloadError, download_to_memory, download_to_writer};
pub use endpoints::Endpoints;
pub use url::{UrlError, add_path_segments, append_path_segments, github_api_base_url, github_base_url};
