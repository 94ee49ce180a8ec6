use super::consts::remote;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// pdfboxlab config file schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub toolkit: ToolkitConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Where the PDFBox jar comes from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolkitConfig {
    /// Explicit jar path; `PDFBOX` in the environment takes precedence
    #[serde(default)]
    pub jar: Option<PathBuf>,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default = "default_index_url")]
    pub index_url: String,
    /// Alternate base for archive and checksum downloads
    #[serde(default)]
    pub mirror_url: Option<String>,
    #[serde(default = "default_excluded_majors")]
    pub excluded_majors: Vec<u64>,
    #[serde(default)]
    pub allow_prerelease: bool,
    /// Skip index discovery and download this version
    #[serde(default)]
    pub pinned_version: Option<String>,
    #[serde(default)]
    pub offline: bool,
    #[serde(default = "default_index_timeout_secs")]
    pub index_timeout_secs: u64,
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            jar: None,
            cache_dir: None,
            index_url: default_index_url(),
            mirror_url: None,
            excluded_majors: default_excluded_majors(),
            allow_prerelease: false,
            pinned_version: None,
            offline: false,
            index_timeout_secs: default_index_timeout_secs(),
            download_timeout_secs: default_download_timeout_secs(),
        }
    }
}

fn default_index_url() -> String {
    remote::DEFAULT_INDEX_URL.to_string()
}

fn default_excluded_majors() -> Vec<u64> {
    remote::DEFAULT_EXCLUDED_MAJORS.to_vec()
}

fn default_index_timeout_secs() -> u64 {
    remote::DEFAULT_INDEX_TIMEOUT_SECS
}

fn default_download_timeout_secs() -> u64 {
    remote::DEFAULT_DOWNLOAD_TIMEOUT_SECS
}

/// How the toolkit is invoked
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub invoker: InvokerKind,
    /// Explicit `java` executable
    #[serde(default)]
    pub java: Option<PathBuf>,
    /// Extra JVM options placed before `-jar`
    #[serde(default)]
    pub jvm_args: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvokerKind {
    /// `java -jar <jar> <Tool> ...` as a child process
    #[default]
    Subprocess,
    /// In-process JVM through JNI
    Jvm,
}
