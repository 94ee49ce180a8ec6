use super::{ExecResult, Invoker, Tool};
use pdfboxlab_core::{PdfboxError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

#[cfg(windows)]
const JAVA_BINARY: &str = "java.exe";
#[cfg(not(windows))]
const JAVA_BINARY: &str = "java";

/// Locates the `java` launcher
///
/// Order: explicit config value (a path, or a name looked up on `PATH`),
/// then `$JAVA_HOME/bin/java`, then `java` on `PATH`.
pub fn discover_java(explicit: Option<&Path>, java_home: Option<&OsStr>) -> Result<PathBuf> {
    if let Some(java) = explicit {
        if java.is_file() {
            return Ok(java.to_path_buf());
        }
        return which::which(java).map_err(|_| {
            PdfboxError::RuntimeMissing(format!(
                "configured java '{}' does not exist",
                java.display()
            ))
        });
    }

    if let Some(home) = java_home.filter(|h| !h.is_empty()) {
        let candidate = Path::new(home).join("bin").join(JAVA_BINARY);
        if candidate.is_file() {
            return Ok(candidate);
        }
        tracing::debug!("JAVA_HOME has no {}", candidate.display());
    }

    which::which(JAVA_BINARY).map_err(|_| {
        PdfboxError::RuntimeMissing(
            "no java executable found (set [runtime] java, JAVA_HOME, or add java to PATH)"
                .to_string(),
        )
    })
}

/// Runs each tool in a fresh `java -jar` process
#[derive(Debug, Clone)]
pub struct SubprocessInvoker {
    java: PathBuf,
    jvm_args: Vec<String>,
}

impl SubprocessInvoker {
    pub fn new(java: impl Into<PathBuf>, jvm_args: Vec<String>) -> Self {
        Self {
            java: java.into(),
            jvm_args,
        }
    }

    pub fn java(&self) -> &Path {
        &self.java
    }

    fn command(&self, jar: &Path, tool: Tool, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.java);
        cmd.args(&self.jvm_args)
            .arg("-jar")
            .arg(jar)
            .arg(tool.name())
            .args(args);
        cmd
    }
}

impl Invoker for SubprocessInvoker {
    fn invoke(&self, jar: &Path, tool: Tool, args: &[String]) -> Result<ExecResult> {
        tracing::debug!(
            "running {} -jar {} {} {:?}",
            self.java.display(),
            jar.display(),
            tool,
            args
        );

        let start = Instant::now();
        let output = self
            .command(jar, tool, args)
            .output()
            .map_err(|e| PdfboxError::ToolLaunchFailed {
                tool: tool.to_string(),
                reason: format!("failed to execute {}: {}", self.java.display(), e),
            })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        // Killed by a signal: no exit code
        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!("{} exited with {} after {} ms", tool, exit_code, duration_ms);

        Ok(ExecResult {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms,
        })
    }
}
