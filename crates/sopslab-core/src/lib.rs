//! Shared foundations for sopslab: error type, configuration and cache locks.

// Core modules
pub mod config;
pub mod error;
pub mod lock;

// Re-export commonly used types
pub use config::Settings;
pub use error::{Result, SopslabError};
