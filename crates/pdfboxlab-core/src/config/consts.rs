//! Constants shared across the workspace

/// Environment variables recognized by pdfboxlab
pub mod env {
    /// Explicit path to a PDFBox jar, bypassing cache and download
    pub const JAR_OVERRIDE: &str = "PDFBOX";

    /// Cache directory override
    pub const CACHE_DIR: &str = "PDFBOXLAB_CACHE_DIR";

    /// Config file path override
    pub const CONFIG: &str = "PDFBOXLAB_CONFIG";

    /// Java installation root
    pub const JAVA_HOME: &str = "JAVA_HOME";
}

/// Remote artifact layout
pub mod remote {
    /// Directory listing of released versions
    pub const DEFAULT_INDEX_URL: &str = "https://archive.apache.org/dist/pdfbox";

    /// Prefix of the runnable archive file name
    pub const ARCHIVE_PREFIX: &str = "pdfbox-app-";

    /// Extension of the runnable archive file name
    pub const ARCHIVE_EXTENSION: &str = "jar";

    /// Suffix appended to an archive URL to locate its checksum
    pub const CHECKSUM_EXTENSION: &str = "sha512";

    /// Major lines whose command-line grammar differs from the 2.x tools
    pub const DEFAULT_EXCLUDED_MAJORS: &[u64] = &[3];

    /// Index and checksum requests (seconds)
    pub const DEFAULT_INDEX_TIMEOUT_SECS: u64 = 30;

    /// Archive downloads (seconds)
    pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 300;
}

/// Local file layout
pub mod paths {
    /// Application directory name under the platform cache/config roots
    pub const APP_DIR: &str = "pdfboxlab";

    /// Config file name under `<config_dir>/pdfboxlab`
    pub const CONFIG_FILE: &str = "config.toml";
}
