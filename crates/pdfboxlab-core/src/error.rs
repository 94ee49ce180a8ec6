use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfboxError {
    // Configuration errors
    #[error("JAR_OVERRIDE_MISSING: PDFBox jar override '{path}' does not exist")]
    JarOverrideMissing { path: PathBuf },

    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Network errors
    #[error("INDEX_FETCH_FAILED: failed to fetch version index {url}: {reason}")]
    IndexFetchFailed { url: String, reason: String },

    #[error("ARCHIVE_FETCH_FAILED: failed to download {url}: {reason}")]
    ArchiveFetchFailed { url: String, reason: String },

    #[error("CHECKSUM_FETCH_FAILED: failed to fetch checksum {url}: {reason}")]
    ChecksumFetchFailed { url: String, reason: String },

    // Integrity errors
    #[error("CHECKSUM_MISMATCH: {url}: expected {expected}, computed {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("CHECKSUM_MALFORMED: checksum resource {url} does not contain a digest")]
    ChecksumMalformed { url: String },

    // Resolution errors
    #[error("NO_COMPATIBLE_VERSION: no compatible PDFBox version listed at {index_url}")]
    NoCompatibleVersion { index_url: String },

    #[error("TOOLKIT_NOT_FOUND: no cached PDFBox jar in {cache_dir} and downloads are disabled")]
    ToolkitNotFound { cache_dir: PathBuf },

    #[error("CACHE_WRITE_FAILED: {operation}: {reason}")]
    CacheWriteFailed { operation: String, reason: String },

    // Runtime errors
    #[error("RUNTIME_MISSING: {0}")]
    RuntimeMissing(String),

    // Tool errors
    #[error("TOOL_LAUNCH_FAILED: {tool}: {reason}")]
    ToolLaunchFailed { tool: String, reason: String },

    #[error("TOOL_FAILED: {tool} exited with status {exit_code}: {stderr}")]
    ToolFailed {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

/// Coarse classification of [`PdfboxError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Integrity,
    Resolution,
    RuntimeMissing,
    ExternalTool,
    Other,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Integrity => write!(f, "integrity"),
            ErrorCategory::Resolution => write!(f, "resolution"),
            ErrorCategory::RuntimeMissing => write!(f, "runtime missing"),
            ErrorCategory::ExternalTool => write!(f, "external tool"),
            ErrorCategory::Other => write!(f, "other"),
        }
    }
}

impl PdfboxError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PdfboxError::JarOverrideMissing { .. }
            | PdfboxError::ConfigParseError(_)
            | PdfboxError::ConfigInvalidValue { .. } => ErrorCategory::Configuration,
            PdfboxError::IndexFetchFailed { .. }
            | PdfboxError::ArchiveFetchFailed { .. }
            | PdfboxError::ChecksumFetchFailed { .. } => ErrorCategory::Network,
            PdfboxError::ChecksumMismatch { .. } | PdfboxError::ChecksumMalformed { .. } => {
                ErrorCategory::Integrity
            }
            PdfboxError::NoCompatibleVersion { .. }
            | PdfboxError::ToolkitNotFound { .. }
            | PdfboxError::CacheWriteFailed { .. } => ErrorCategory::Resolution,
            PdfboxError::RuntimeMissing(_) => ErrorCategory::RuntimeMissing,
            PdfboxError::ToolLaunchFailed { .. } | PdfboxError::ToolFailed { .. } => {
                ErrorCategory::ExternalTool
            }
            PdfboxError::IoError(_) | PdfboxError::Generic(_) => ErrorCategory::Other,
        }
    }

    /// Exit code reported by the external tool, if this is a tool failure
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            PdfboxError::ToolFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PdfboxError {
    fn from(err: serde_json::Error) -> Self {
        PdfboxError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PdfboxError>;
