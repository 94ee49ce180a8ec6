//! Atomic persistence into the cache directory

use pdfboxlab_core::{PdfboxError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes `bytes` to `to` so that readers never observe a partial file
///
/// 1. Creates a temp file in the destination directory (same filesystem)
/// 2. Writes and syncs the content
/// 3. Atomically renames over the destination (replacing an existing file)
/// 4. Syncs the parent directory on Unix
///
/// The destination directory is created if missing.
pub fn persist_atomically(bytes: &[u8], to: &Path) -> Result<()> {
    let dest_dir = to.parent().ok_or_else(|| PdfboxError::CacheWriteFailed {
        operation: format!("get parent directory of {}", to.display()),
        reason: "no parent directory".to_string(),
    })?;

    fs::create_dir_all(dest_dir)
        .map_err(|e| cache_error(format!("create {}", dest_dir.display()), e))?;

    let mut temp_dest = tempfile::NamedTempFile::new_in(dest_dir)
        .map_err(|e| cache_error(format!("create temporary file in {}", dest_dir.display()), e))?;

    temp_dest
        .write_all(bytes)
        .map_err(|e| cache_error("write temporary file".to_string(), e))?;

    temp_dest
        .as_file()
        .sync_all()
        .map_err(|e| cache_error("sync temporary file".to_string(), e))?;

    // same filesystem, so this is a rename that replaces any existing file
    temp_dest
        .persist(to)
        .map_err(|e| cache_error(format!("rename temporary file to {}", to.display()), e.error))?;

    #[cfg(unix)]
    {
        let dir = fs::File::open(dest_dir)
            .map_err(|e| cache_error(format!("open directory {}", dest_dir.display()), e))?;
        dir.sync_all()
            .map_err(|e| cache_error("sync cache directory".to_string(), e))?;
    }

    Ok(())
}

fn cache_error(operation: String, err: std::io::Error) -> PdfboxError {
    PdfboxError::CacheWriteFailed {
        operation,
        reason: err.to_string(),
    }
}
