use crate::http::{build_client, download_text};
use crate::index::{VersionPolicy, parse_index, select_newest};
use crate::info::{ToolkitInfo, ToolkitSource};
use crate::install::{InstallOptions, download_and_install};
use pdfboxlab_core::config::consts::remote;
use pdfboxlab_core::{Config, PdfboxError, Result};
use semver::Version;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Everything the resolver needs, passed explicitly
///
/// The cache directory is plain data so tests can point it at a temp dir.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub jar_override: Option<PathBuf>,
    pub cache_dir: PathBuf,
    pub index_url: String,
    pub mirror_url: Option<String>,
    pub policy: VersionPolicy,
    pub pinned_version: Option<Version>,
    pub offline: bool,
    pub index_timeout: Duration,
    pub download_timeout: Duration,
    /// Optional progress callback (bytes_downloaded, total_bytes)
    pub progress: Option<fn(u64, u64)>,
}

impl ResolverConfig {
    /// Defaults for everything except the two locations
    pub fn new(cache_dir: impl Into<PathBuf>, index_url: impl Into<String>) -> Self {
        Self {
            jar_override: None,
            cache_dir: cache_dir.into(),
            index_url: index_url.into(),
            mirror_url: None,
            policy: VersionPolicy::default(),
            pinned_version: None,
            offline: false,
            index_timeout: Duration::from_secs(remote::DEFAULT_INDEX_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(remote::DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            progress: None,
        }
    }

    /// Builds resolver settings from a loaded [`Config`]
    pub fn from_config(config: &Config) -> Result<Self> {
        let toolkit = &config.toolkit;

        let pinned_version = toolkit
            .pinned_version
            .as_deref()
            .map(|v| {
                Version::parse(v.trim()).map_err(|e| PdfboxError::ConfigInvalidValue {
                    field: "toolkit.pinned_version".to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            jar_override: toolkit.jar.clone(),
            cache_dir: config.cache_dir()?,
            index_url: toolkit.index_url.clone(),
            mirror_url: toolkit.mirror_url.clone(),
            policy: VersionPolicy {
                excluded_majors: toolkit.excluded_majors.clone(),
                allow_prerelease: toolkit.allow_prerelease,
            },
            pinned_version,
            offline: toolkit.offline,
            index_timeout: Duration::from_secs(toolkit.index_timeout_secs),
            download_timeout: Duration::from_secs(toolkit.download_timeout_secs),
            progress: None,
        })
    }

    fn install_options(&self) -> InstallOptions {
        InstallOptions {
            cache_dir: self.cache_dir.clone(),
            download_base: self
                .mirror_url
                .clone()
                .unwrap_or_else(|| self.index_url.clone()),
            download_timeout: self.download_timeout,
            checksum_timeout: self.index_timeout,
            progress: self.progress,
        }
    }
}

/// An archive found in the cache directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArtifact {
    pub version: Version,
    pub path: PathBuf,
}

/// Version carried by an archive file name (`pdfbox-app-2.0.27.jar` -> `2.0.27`)
pub fn version_from_file_name(name: &str) -> Option<Version> {
    let stem = name
        .strip_prefix(remote::ARCHIVE_PREFIX)?
        .strip_suffix(remote::ARCHIVE_EXTENSION)?
        .strip_suffix('.')?;
    Version::parse(stem).ok()
}

/// Lists cached archives, newest first
///
/// A missing cache directory is an empty cache.
pub fn list_cached(cache_dir: &Path) -> Result<Vec<CachedArtifact>> {
    if !cache_dir.exists() {
        return Ok(Vec::new());
    }

    let mut artifacts = Vec::new();
    for entry in std::fs::read_dir(cache_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match version_from_file_name(name) {
            Some(version) => artifacts.push(CachedArtifact { version, path }),
            None if name.starts_with(remote::ARCHIVE_PREFIX) => {
                tracing::warn!("ignoring unrecognized cache entry {}", path.display());
            }
            None => {}
        }
    }

    artifacts.sort_by(|a, b| b.version.cmp(&a.version));
    Ok(artifacts)
}

/// Newest cached archive acceptable under the resolver's policy
///
/// With a pinned version only that exact version qualifies.
pub fn find_cached(config: &ResolverConfig) -> Result<Option<CachedArtifact>> {
    let cached = list_cached(&config.cache_dir)?;

    Ok(cached.into_iter().find(|artifact| match &config.pinned_version {
        Some(pinned) => &artifact.version == pinned,
        None => config.policy.accepts(&artifact.version),
    }))
}

/// Every version linked from the remote index, newest first
fn fetch_index(config: &ResolverConfig) -> Result<Vec<Version>> {
    let index_error = |reason: String| PdfboxError::IndexFetchFailed {
        url: config.index_url.clone(),
        reason,
    };

    let url = Url::parse(&config.index_url).map_err(|e| index_error(e.to_string()))?;
    let client = build_client(config.index_timeout).map_err(|e| index_error(e.to_string()))?;

    tracing::debug!("fetching version index {}", url);
    let html = download_text(&client, &url).map_err(|e| index_error(e.to_string()))?;
    Ok(parse_index(&html))
}

/// Versions advertised by the remote index that the policy accepts, newest first
pub fn list_remote(config: &ResolverConfig) -> Result<Vec<Version>> {
    let versions: Vec<Version> = fetch_index(config)?
        .into_iter()
        .filter(|v| config.policy.accepts(v))
        .collect();

    tracing::debug!("{} compatible versions listed", versions.len());
    Ok(versions)
}

/// Newest compatible remote version
pub fn discover_latest(config: &ResolverConfig) -> Result<Version> {
    let versions = fetch_index(config)?;
    select_newest(&versions, &config.policy).ok_or_else(|| PdfboxError::NoCompatibleVersion {
        index_url: config.index_url.clone(),
    })
}

/// Downloads, verifies and caches a specific version
pub fn install_version(config: &ResolverConfig, version: &Version) -> Result<ToolkitInfo> {
    let path = download_and_install(version, &config.install_options())?;

    Ok(ToolkitInfo {
        version: Some(version.clone()),
        source: ToolkitSource::Downloaded,
        path,
    })
}

/// Resolves the PDFBox archive
///
/// Resolution priority:
/// 1. Explicit override (must exist)
/// 2. Newest acceptable archive in the cache directory
/// 3. Pinned or newest compatible remote version, downloaded and verified
pub fn resolve_toolkit(config: &ResolverConfig) -> Result<ToolkitInfo> {
    if let Some(path) = &config.jar_override {
        return resolve_override(path);
    }

    if let Some(cached) = find_cached(config)? {
        tracing::debug!(
            "using cached PDFBox {} at {}",
            cached.version,
            cached.path.display()
        );
        return Ok(ToolkitInfo {
            version: Some(cached.version),
            source: ToolkitSource::Cache,
            path: cached.path,
        });
    }

    if config.offline {
        return Err(PdfboxError::ToolkitNotFound {
            cache_dir: config.cache_dir.clone(),
        });
    }

    let version = match &config.pinned_version {
        Some(pinned) => pinned.clone(),
        None => discover_latest(config)?,
    };

    install_version(config, &version)
}

fn resolve_override(path: &Path) -> Result<ToolkitInfo> {
    if !path.exists() {
        return Err(PdfboxError::JarOverrideMissing {
            path: path.to_path_buf(),
        });
    }

    let version = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(version_from_file_name);

    tracing::debug!("using PDFBox override {}", path.display());
    Ok(ToolkitInfo {
        version,
        source: ToolkitSource::Override,
        path: path.to_path_buf(),
    })
}

// ============================================================================
// Tests
// ============================================================================
