mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands, JarCommands};
use context::Context;
use pdfboxlab_core::PdfboxError;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = Context::new(cli.config.as_deref(), cli.verbose).and_then(|ctx| match &cli.command {
        Commands::ExtractText(args) => commands::extract_text::run(&ctx, args),
        Commands::ToImages(args) => commands::to_images::run(&ctx, args),
        Commands::ExtractImages(args) => commands::extract_images::run(&ctx, args),
        Commands::Jar(jar_cmd) => match jar_cmd {
            JarCommands::Path { json } => commands::jar::path::execute_path(&ctx, *json),
            JarCommands::Versions { remote, json } => {
                commands::jar::versions::execute_versions(&ctx, *remote, *json)
            }
            JarCommands::Install { version } => {
                commands::jar::install::execute_install(&ctx, version)
            }
        },
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// A failed PDFBox tool passes its own status through
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PdfboxError>()
        .and_then(PdfboxError::tool_exit_code)
        .filter(|code| (1..=255).contains(code))
        .unwrap_or(1)
}
