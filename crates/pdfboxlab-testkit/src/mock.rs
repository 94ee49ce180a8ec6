//! Shared mockito server
//!
//! Tests register mocks under a path prefix unique to the test, so one server
//! serves every test in a binary without collisions.

use lazy_static::lazy_static;
use mockito::{Server, ServerGuard};
use std::sync::{Mutex, MutexGuard};

lazy_static! {
    /// Process-wide mock server, started on first use
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Locks the shared mock server
///
/// Hold the guard only while creating mocks; release it before running the
/// code under test so parallel tests are not serialized.
///
/// # Examples
///
/// ```no_run
/// use pdfboxlab_testkit::get_shared_mock_server;
///
/// let (base, _mock) = {
///     let mut server = get_shared_mock_server();
///     let mock = server
///         .mock("GET", "/my-test/index/")
///         .with_body("<html></html>")
///         .create();
///     (format!("{}/my-test/index", server.url()), mock)
/// };
/// // use `base` here with the lock released
/// ```
pub fn get_shared_mock_server() -> MutexGuard<'static, ServerGuard> {
    SHARED_MOCK_SERVER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Apache-style directory listing linking the given version directories
pub fn index_page(versions: &[&str]) -> String {
    let mut html = String::from(
        "<html><head><title>Index of /dist/pdfbox</title></head><body><pre>\n\
         <a href=\"?C=N;O=D\">Name</a>\n<a href=\"/dist/\">Parent Directory</a>\n",
    );
    for version in versions {
        html.push_str(&format!("<a href=\"{0}/\">{0}/</a>\n", version));
    }
    html.push_str("<a href=\"KEYS\">KEYS</a>\n</pre></body></html>\n");
    html
}
