//! Mock server infrastructure for testing
//!
//! One mockito server shared by every test in a binary. Tests keep their
//! mocks apart by using distinct versions in the mocked paths.

use lazy_static::lazy_static;
use mockito::{Server, ServerGuard};
use std::sync::{Mutex, MutexGuard};

lazy_static! {
    /// Global shared mockito server, started on first access
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Locks the shared mock server
///
/// Hold the guard only while creating mocks, not for the whole test, so
/// parallel tests do not serialise on it.
///
/// # Examples
///
/// ```no_run
/// use sopslab_testkit::get_shared_mock_server;
///
/// let mock = {
///     let mut server = get_shared_mock_server();
///     server
///         .mock("GET", "/getsops/sops/releases/download/v3.7.1/sops-v3.7.1.linux.amd64")
///         .with_status(200)
///         .create()
/// };
/// ```
pub fn get_shared_mock_server() -> MutexGuard<'static, ServerGuard> {
    // A panicking test leaves the server usable; only access is serialised
    SHARED_MOCK_SERVER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Base URL of the shared mock server (e.g. `http://127.0.0.1:1234`)
pub fn shared_mock_url() -> String {
    get_shared_mock_server().url()
}
