//! Stdout/stderr rendering shared by commands

use serde::Serialize;
use std::io::{self, Write};

/// Pretty JSON followed by a newline
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn print_line(line: &str) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{line}")
}

/// Writes tool output verbatim, without adding a newline
pub fn print_raw(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(s.as_bytes())?;
    out.flush()
}

/// Download progress on stderr
pub fn progress(downloaded: u64, total: u64) {
    if total == 0 {
        return;
    }
    eprint!("\rDownloading PDFBox {:>3}%", downloaded * 100 / total);
    if downloaded >= total {
        eprintln!();
    }
}
