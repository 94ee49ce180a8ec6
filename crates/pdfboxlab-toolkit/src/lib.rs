//! Apache PDFBox resolution and typed invocation for pdfboxlab.
//!
//! This crate locates (or downloads and verifies) a `pdfbox-app` archive and
//! runs its command-line tools with typed options.
//!
//! # Architecture
//!
//! - [`resolve`]: override, cache, then verified download
//! - [`index`]: version discovery from the distribution index page
//! - [`install`]: checksum-verified download and atomic cache write
//! - [`exec`]: the [`Invoker`] trait with subprocess and embedded-JVM strategies
//! - [`facade`]: [`PdfBox`], one method per tool
//!
//! # Resolution Flow
//!
//! ```text
//! resolve_toolkit()
//!     ↓
//! 1. Override (PDFBOX / [toolkit] jar)
//!     → must exist, otherwise JAR_OVERRIDE_MISSING (no network access)
//!     ↓ (not set)
//! 2. Cache
//!     → {cache_dir}/pdfbox-app-{version}.jar, newest allowed by policy
//!     ↓ (miss)
//! 3. Download (unless offline)
//!     → pinned version, or newest compatible version on the index page
//!     → fetch archive + .sha512, verify in memory, persist atomically
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pdfboxlab_core::Config;
//! use pdfboxlab_toolkit::{ExtractTextOptions, PdfBox};
//!
//! # fn main() -> pdfboxlab_core::Result<()> {
//! let config = Config::load(None)?;
//! let pdfbox = PdfBox::new(&config)?;
//!
//! let text = pdfbox.extract_text("report.pdf", &ExtractTextOptions::default())?;
//! println!("{}", text.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod checksum;
pub mod exec;
pub mod facade;
pub mod http;
pub mod index;
pub mod info;
pub mod install;
pub mod resolve;

// Re-export commonly used types
pub use exec::{ExecResult, Invoker, SubprocessInvoker, Tool};
pub use facade::{
    ColorDepth, CropBox, ExtractImagesOptions, ExtractTextOptions, PdfBox, PdfToImageOptions,
};
pub use index::VersionPolicy;
pub use info::{ToolkitInfo, ToolkitSource};
pub use resolve::{ResolverConfig, resolve_toolkit};

#[cfg(feature = "jvm")]
pub use exec::JvmInvoker;

// Type alias for convenience
pub type Result<T> = pdfboxlab_core::Result<T>;
