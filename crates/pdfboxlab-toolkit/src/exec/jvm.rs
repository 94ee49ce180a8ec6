//! In-process invocation through an embedded JVM
//!
//! The JVM is started once per process with the archive on its class path.
//! `System.out` and `System.err` are swapped for in-memory buffers for the
//! duration of each call, so calls are serialized.
//!
//! A tool that calls `System.exit` terminates the host process. PDFBox does
//! so on usage errors and on an image type without a writer. The facade
//! rejects unknown image types before invoking; argument vectors built
//! elsewhere get no such check.

use super::{ExecResult, Invoker, Tool};
use jni::objects::{JObject, JString, JValue};
use jni::{InitArgsBuilder, JNIEnv, JNIVersion, JavaVM};
use pdfboxlab_core::{PdfboxError, Result};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

struct EmbeddedJvm {
    vm: JavaVM,
    class_path: PathBuf,
}

static JVM: OnceLock<EmbeddedJvm> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());
static CALL_LOCK: Mutex<()> = Mutex::new(());

const PRINT_STREAM: &str = "Ljava/io/PrintStream;";

/// Runs tools inside the process-wide JVM
#[derive(Debug, Clone, Default)]
pub struct JvmInvoker {
    jvm_args: Vec<String>,
}

impl JvmInvoker {
    /// `jvm_args` only take effect if this invoker starts the JVM
    pub fn new(jvm_args: Vec<String>) -> Self {
        Self { jvm_args }
    }

    fn embedded(&self, jar: &Path, tool: Tool) -> Result<&'static EmbeddedJvm> {
        if JVM.get().is_none() {
            let _guard = INIT_LOCK.lock().unwrap_or_else(|p| p.into_inner());
            if JVM.get().is_none() {
                let vm = start_vm(jar, &self.jvm_args).map_err(|e| launch_error(tool, e))?;
                tracing::debug!("started embedded JVM with class path {}", jar.display());
                let _ = JVM.set(EmbeddedJvm {
                    vm,
                    class_path: jar.to_path_buf(),
                });
            }
        }

        let jvm = JVM
            .get()
            .ok_or_else(|| launch_error(tool, "embedded JVM unavailable"))?;

        if jvm.class_path != jar {
            return Err(PdfboxError::ConfigInvalidValue {
                field: "runtime.invoker".to_string(),
                reason: format!(
                    "embedded JVM already runs {}; cannot switch to {} in the same process",
                    jvm.class_path.display(),
                    jar.display()
                ),
            });
        }

        Ok(jvm)
    }
}

fn start_vm(jar: &Path, jvm_args: &[String]) -> std::result::Result<JavaVM, String> {
    let mut builder = InitArgsBuilder::new()
        .version(JNIVersion::V8)
        .option(format!("-Djava.class.path={}", jar.display()));
    for arg in jvm_args {
        builder = builder.option(arg.as_str());
    }

    let init_args = builder.build().map_err(|e| e.to_string())?;
    JavaVM::new(init_args).map_err(|e| e.to_string())
}

fn launch_error(tool: Tool, reason: impl Display) -> PdfboxError {
    PdfboxError::ToolLaunchFailed {
        tool: tool.to_string(),
        reason: reason.to_string(),
    }
}

/// Captured streams plus the Java exception, if one escaped `main`
struct Captured {
    stdout: String,
    stderr: String,
    exception: Option<String>,
}

fn call_main(env: &mut JNIEnv<'_>, tool: Tool, args: &[String]) -> jni::errors::Result<Captured> {
    let original_out = env
        .get_static_field("java/lang/System", "out", PRINT_STREAM)?
        .l()?;
    let original_err = env
        .get_static_field("java/lang/System", "err", PRINT_STREAM)?
        .l()?;

    let out_buffer = env.new_object("java/io/ByteArrayOutputStream", "()V", &[])?;
    let err_buffer = env.new_object("java/io/ByteArrayOutputStream", "()V", &[])?;
    let out_stream = print_stream(env, &out_buffer)?;
    let err_stream = print_stream(env, &err_buffer)?;
    set_system_stream(env, "setOut", &out_stream)?;
    set_system_stream(env, "setErr", &err_stream)?;

    let argv = env.new_object_array(args.len() as i32, "java/lang/String", JObject::null())?;
    for (i, arg) in args.iter().enumerate() {
        let value = env.new_string(arg)?;
        env.set_object_array_element(&argv, i as i32, value)?;
    }

    let call = env.call_static_method(
        tool.class_name(),
        "main",
        "([Ljava/lang/String;)V",
        &[JValue::Object(&argv)],
    );

    let exception = match call {
        Ok(_) => None,
        Err(jni::errors::Error::JavaException) => Some(take_exception(env)?),
        Err(e) => {
            set_system_stream(env, "setOut", &original_out)?;
            set_system_stream(env, "setErr", &original_err)?;
            return Err(e);
        }
    };

    set_system_stream(env, "setOut", &original_out)?;
    set_system_stream(env, "setErr", &original_err)?;

    Ok(Captured {
        stdout: buffer_text(env, &out_buffer)?,
        stderr: buffer_text(env, &err_buffer)?,
        exception,
    })
}

fn print_stream<'local>(
    env: &mut JNIEnv<'local>,
    buffer: &JObject<'_>,
) -> jni::errors::Result<JObject<'local>> {
    let encoding = env.new_string("UTF-8")?;
    env.new_object(
        "java/io/PrintStream",
        "(Ljava/io/OutputStream;ZLjava/lang/String;)V",
        &[
            JValue::Object(buffer),
            JValue::Bool(1),
            JValue::Object(&encoding),
        ],
    )
}

fn set_system_stream(
    env: &mut JNIEnv<'_>,
    setter: &str,
    stream: &JObject<'_>,
) -> jni::errors::Result<()> {
    env.call_static_method(
        "java/lang/System",
        setter,
        "(Ljava/io/PrintStream;)V",
        &[JValue::Object(stream)],
    )?;
    Ok(())
}

fn buffer_text(env: &mut JNIEnv<'_>, buffer: &JObject<'_>) -> jni::errors::Result<String> {
    let encoding = env.new_string("UTF-8")?;
    let text = env
        .call_method(
            buffer,
            "toString",
            "(Ljava/lang/String;)Ljava/lang/String;",
            &[JValue::Object(&encoding)],
        )?
        .l()?;
    let text = JString::from(text);
    let value: String = env.get_string(&text)?.into();
    Ok(value)
}

fn take_exception(env: &mut JNIEnv<'_>) -> jni::errors::Result<String> {
    let throwable = env.exception_occurred()?;
    env.exception_clear()?;

    let description = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    let description = JString::from(description);
    let value: String = env.get_string(&description)?.into();
    Ok(value)
}

impl Invoker for JvmInvoker {
    fn invoke(&self, jar: &Path, tool: Tool, args: &[String]) -> Result<ExecResult> {
        let jvm = self.embedded(jar, tool)?;

        let _guard = CALL_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        let mut env = jvm
            .vm
            .attach_current_thread()
            .map_err(|e| launch_error(tool, e))?;

        tracing::debug!("calling {}.main {:?}", tool.class_name(), args);
        let start = Instant::now();
        let captured = call_main(&mut env, tool, args).map_err(|e| launch_error(tool, e))?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let (exit_code, stderr) = match captured.exception {
            None => (0, captured.stderr),
            Some(exception) => {
                tracing::debug!("{} threw {}", tool, exception);
                let mut stderr = captured.stderr;
                if !stderr.is_empty() && !stderr.ends_with('\n') {
                    stderr.push('\n');
                }
                stderr.push_str(&exception);
                (1, stderr)
            }
        };

        Ok(ExecResult {
            exit_code,
            stdout: captured.stdout,
            stderr,
            duration_ms,
        })
    }
}
