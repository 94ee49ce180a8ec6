use semver::Version;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolkitSource {
    /// Explicit path from `PDFBOX` or the config file
    Override,
    /// Previously downloaded archive in the cache directory
    Cache,
    /// Downloaded and verified during this resolution
    Downloaded,
}

impl fmt::Display for ToolkitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolkitSource::Override => write!(f, "explicit override"),
            ToolkitSource::Cache => write!(f, "cache"),
            ToolkitSource::Downloaded => write!(f, "download"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolkitInfo {
    /// `None` for an override whose file name carries no version
    pub version: Option<Version>,
    pub source: ToolkitSource,
    pub path: PathBuf,
}

impl ToolkitInfo {
    /// Version string for display
    pub fn version_label(&self) -> String {
        self.version
            .as_ref()
            .map(Version::to_string)
            .unwrap_or_else(|| "unknown".to_string())
    }
}
