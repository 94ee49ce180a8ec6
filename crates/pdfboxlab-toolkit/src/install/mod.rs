//! Checksum-verified download of a PDFBox archive into the cache
//!
//! ```text
//! download_and_install(version)
//!     ↓
//! 1. GET <base>/<version>/pdfbox-app-<version>.jar        (into memory)
//!     ↓
//! 2. GET <archive-url>.sha512
//!     ↓
//! 3. SHA-512(bytes) == published digest ?  ── no ──> ChecksumMismatch (nothing written)
//!     ↓ yes
//! 4. atomic write to <cache_dir>/pdfbox-app-<version>.jar
//! ```

pub mod persist;

pub use persist::persist_atomically;

use crate::checksum::{parse_checksum_resource, sha512_hex, verify_sha512};
use crate::http::{
    Progress, archive_file_name, archive_url, build_client, checksum_url, download_text,
    download_to_memory,
};
use pdfboxlab_core::{PdfboxError, Result};
use semver::Version;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Remote location and integrity data of one archive version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub version: Version,
    pub archive_url: Url,
    pub checksum_url: Url,
}

impl ArtifactRef {
    /// Digest algorithm of the checksum resource
    pub const ALGORITHM: &'static str = "sha512";

    /// Builds the reference for `version` under `base`
    pub fn for_version(base: &str, version: &Version) -> Result<Self> {
        let archive = archive_url(base, version).map_err(|e| PdfboxError::ConfigInvalidValue {
            field: "toolkit.index_url".to_string(),
            reason: e.to_string(),
        })?;
        let checksum = checksum_url(&archive).map_err(|e| PdfboxError::ConfigInvalidValue {
            field: "toolkit.index_url".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            version: version.clone(),
            archive_url: archive,
            checksum_url: checksum,
        })
    }
}

/// Installation settings
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Target cache directory
    pub cache_dir: PathBuf,

    /// Base URL the archive and checksum are fetched from
    pub download_base: String,

    /// Timeout for the archive request
    pub download_timeout: Duration,

    /// Timeout for the checksum request
    pub checksum_timeout: Duration,

    /// Reported while the archive body arrives
    pub progress: Option<Progress>,
}

/// Downloads, verifies and caches `version`
///
/// # Returns
///
/// Path to the cached archive (`<cache_dir>/pdfbox-app-<version>.jar`)
///
/// # Errors
///
/// - `ArchiveFetchFailed` / `ChecksumFetchFailed` on network failure
/// - `ChecksumMalformed` if the checksum resource holds no digest
/// - `ChecksumMismatch` if the digest differs; the cache is left untouched
/// - `CacheWriteFailed` if the cache directory is not writable
pub fn download_and_install(version: &Version, options: &InstallOptions) -> Result<PathBuf> {
    let artifact = ArtifactRef::for_version(&options.download_base, version)?;
    let bytes = fetch_verified(&artifact, options)?;

    let final_path = options.cache_dir.join(archive_file_name(version));
    persist_atomically(&bytes, &final_path)?;

    tracing::info!(
        "installed PDFBox {} to {}",
        artifact.version,
        final_path.display()
    );
    Ok(final_path)
}

/// Downloads the archive and checks it against its published digest
///
/// Nothing touches the filesystem; the verified bytes are returned.
pub fn fetch_verified(artifact: &ArtifactRef, options: &InstallOptions) -> Result<Vec<u8>> {
    tracing::info!("downloading {}", artifact.archive_url);

    let archive_client =
        build_client(options.download_timeout).map_err(|e| PdfboxError::ArchiveFetchFailed {
            url: artifact.archive_url.to_string(),
            reason: e.to_string(),
        })?;

    let bytes = download_to_memory(&archive_client, &artifact.archive_url, options.progress)
        .map_err(|e| PdfboxError::ArchiveFetchFailed {
            url: artifact.archive_url.to_string(),
            reason: e.to_string(),
        })?;

    let checksum_client =
        build_client(options.checksum_timeout).map_err(|e| PdfboxError::ChecksumFetchFailed {
            url: artifact.checksum_url.to_string(),
            reason: e.to_string(),
        })?;

    let resource = download_text(&checksum_client, &artifact.checksum_url).map_err(|e| {
        PdfboxError::ChecksumFetchFailed {
            url: artifact.checksum_url.to_string(),
            reason: e.to_string(),
        }
    })?;

    let expected =
        parse_checksum_resource(&resource).ok_or_else(|| PdfboxError::ChecksumMalformed {
            url: artifact.checksum_url.to_string(),
        })?;

    if !verify_sha512(&bytes, &expected) {
        return Err(PdfboxError::ChecksumMismatch {
            url: artifact.archive_url.to_string(),
            expected,
            actual: sha512_hex(&bytes),
        });
    }

    tracing::debug!(
        "{} digest verified for {}",
        ArtifactRef::ALGORITHM,
        artifact.archive_url
    );
    Ok(bytes)
}
