//! Environment isolation for tests that resolve PDFBox through the environment

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify process environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "HOME",
    "XDG_CACHE_HOME",
    "XDG_CONFIG_HOME",
    "PDFBOX",
    "PDFBOXLAB_CACHE_DIR",
    "PDFBOXLAB_CONFIG",
];

/// Runs `f` with an isolated home, cache directory and jar override
///
/// - `HOME`, `XDG_CACHE_HOME` and `XDG_CONFIG_HOME` point into a fresh temp dir
/// - `PDFBOXLAB_CACHE_DIR` points to an empty cache inside it
/// - `PDFBOX` is set to `jar`, or removed when `jar` is `None`
/// - `PDFBOXLAB_CONFIG` is removed
///
/// The closure receives the cache directory. The previous environment is
/// restored afterwards.
///
/// # Examples
///
/// ```no_run
/// use pdfboxlab_testkit::with_isolated_pdfbox_env;
///
/// with_isolated_pdfbox_env(None, |cache_dir| {
///     // no override, empty cache
///     assert!(cache_dir.exists());
/// });
/// ```
pub fn with_isolated_pdfbox_env<F, R>(jar: Option<&Path>, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let saved: Vec<(&str, Option<std::ffi::OsString>)> = ISOLATED_VARS
        .iter()
        .map(|name| (*name, std::env::var_os(name)))
        .collect();

    let fake_home = TempDir::new().expect("Failed to create isolated HOME");
    let fake_cache: PathBuf = fake_home.path().join(".cache").join("pdfboxlab");
    std::fs::create_dir_all(&fake_cache).expect("Failed to create isolated cache dir");

    // SAFETY: ENV_LOCK is held, so no other cooperating test touches the environment.
    unsafe {
        std::env::set_var("HOME", fake_home.path());
        std::env::set_var("XDG_CACHE_HOME", fake_home.path().join(".cache"));
        std::env::set_var("XDG_CONFIG_HOME", fake_home.path().join(".config"));
        std::env::set_var("PDFBOXLAB_CACHE_DIR", &fake_cache);
        std::env::remove_var("PDFBOXLAB_CONFIG");

        match jar {
            Some(path) => std::env::set_var("PDFBOX", path),
            None => std::env::remove_var("PDFBOX"),
        }
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(&fake_cache)));

    // SAFETY: ENV_LOCK is still held.
    unsafe {
        for (name, value) in saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    drop(fake_home);

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
