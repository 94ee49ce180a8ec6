//! Test utilities for pdfboxlab
//!
//! This crate provides shared testing utilities used across the pdfboxlab workspace.

pub mod env;
pub mod fixtures;
pub mod mock;

pub use env::{ENV_LOCK, with_isolated_pdfbox_env};
pub use mock::get_shared_mock_server;

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` under the current directory
///
/// Test files stay next to the crate under test instead of the system temp
/// dir. The directory is removed when the returned `TempDir` drops.
///
/// # Panics
///
/// Panics if the current directory is unknown or `.tmp/` cannot be created.
///
/// # Examples
///
/// ```rust
/// use pdfboxlab_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Fallible variant of [`temp_dir_in_workspace`]
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
