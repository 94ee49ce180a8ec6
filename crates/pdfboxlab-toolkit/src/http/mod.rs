//! Shared HTTP utilities
//!
//! This module provides the plumbing used by the resolver:
//! - Blocking HTTP client construction with a user-agent and timeout
//! - In-memory downloads with status checking and progress tracking
//! - URL construction for the Apache distribution layout

pub mod client;
pub mod download;
pub mod url;

// Re-exports for convenient access
pub use client::{USER_AGENT, build_client};
pub use download::{DownloadError, Progress, download_text, download_to_memory};
pub use url::{UrlError, archive_file_name, archive_url, checksum_url};
