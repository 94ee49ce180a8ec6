//! Running PDFBox command-line tools
//!
//! Two strategies share the [`Invoker`] trait:
//!
//! - [`SubprocessInvoker`]: `java [jvm_args] -jar <jar> <Tool> <args>`
//! - `JvmInvoker` (feature `jvm`): one embedded JVM per process

pub mod subprocess;

#[cfg(feature = "jvm")]
pub mod jvm;

pub use subprocess::{SubprocessInvoker, discover_java};

#[cfg(feature = "jvm")]
pub use jvm::JvmInvoker;

use pdfboxlab_core::{InvokerKind, PdfboxError, Result};
use pdfboxlab_core::config::RuntimeConfig;
use std::fmt;
use std::path::Path;

/// PDFBox tool classes under `org.apache.pdfbox.tools`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    ExtractText,
    PDFToImage,
    ExtractImages,
}

impl Tool {
    /// Name accepted by the `pdfbox-app` launcher
    pub fn name(&self) -> &'static str {
        match self {
            Tool::ExtractText => "ExtractText",
            Tool::PDFToImage => "PDFToImage",
            Tool::ExtractImages => "ExtractImages",
        }
    }

    /// JNI class path of the tool
    pub fn class_name(&self) -> String {
        format!("org/apache/pdfbox/tools/{}", self.name())
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured stdout followed by captured stderr
    pub fn diagnostics(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }

    /// Turns a nonzero exit into `ToolFailed`
    pub fn into_checked(self, tool: Tool) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }

        Err(PdfboxError::ToolFailed {
            tool: tool.to_string(),
            exit_code: self.exit_code,
            stderr: self.stderr.trim_end().to_string(),
        })
    }
}

/// Strategy that runs a PDFBox tool against a resolved archive
pub trait Invoker: Send + Sync {
    /// Runs `tool` with `args`, capturing its output
    ///
    /// A nonzero exit is reported through [`ExecResult::exit_code`], not as an error.
    fn invoke(&self, jar: &Path, tool: Tool, args: &[String]) -> Result<ExecResult>;
}

/// Builds the invoker selected by `[runtime] invoker`
pub fn invoker_for(runtime: &RuntimeConfig) -> Result<Box<dyn Invoker>> {
    match runtime.invoker {
        InvokerKind::Subprocess => {
            let java_home = std::env::var_os(pdfboxlab_core::config::consts::env::JAVA_HOME);
            let java = discover_java(runtime.java.as_deref(), java_home.as_deref())?;
            Ok(Box::new(SubprocessInvoker::new(java, runtime.jvm_args.clone())))
        }
        InvokerKind::Jvm => jvm_invoker(runtime),
    }
}

#[cfg(feature = "jvm")]
fn jvm_invoker(runtime: &RuntimeConfig) -> Result<Box<dyn Invoker>> {
    Ok(Box::new(JvmInvoker::new(runtime.jvm_args.clone())))
}

#[cfg(not(feature = "jvm"))]
fn jvm_invoker(_runtime: &RuntimeConfig) -> Result<Box<dyn Invoker>> {
    Err(PdfboxError::ConfigInvalidValue {
        field: "runtime.invoker".to_string(),
        reason: "the jvm invoker requires building with the `jvm` feature".to_string(),
    })
}
