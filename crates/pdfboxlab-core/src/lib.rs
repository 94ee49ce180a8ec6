//! Shared error taxonomy and configuration for pdfboxlab.

// Core modules
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{Config, InvokerKind};
pub use error::{ErrorCategory, PdfboxError, Result};
