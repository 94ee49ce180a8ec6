//! Global context for CLI commands

use anyhow::{Context as _, Result};
use pdfboxlab_core::Config;
use pdfboxlab_toolkit::{PdfBox, ResolverConfig};
use std::path::Path;

/// Loaded configuration shared by all commands
pub struct Context {
    pub config: Config,
    pub verbose: bool,
}

impl Context {
    /// Loads config from `--config`, the environment, or the default location
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let config = Config::load(config_path).context("Failed to load configuration")?;
        Ok(Self { config, verbose })
    }

    pub fn resolver(&self) -> Result<ResolverConfig> {
        let mut resolver = ResolverConfig::from_config(&self.config)?;
        if self.verbose {
            resolver.progress = Some(crate::output::progress);
        }
        Ok(resolver)
    }

    /// Resolves the jar and prepares the configured invoker
    pub fn pdfbox(&self) -> Result<PdfBox> {
        let pdfbox = PdfBox::with_resolver(&self.resolver()?, &self.config)?;
        tracing::info!(
            "using PDFBox {} ({})",
            pdfbox.info().version_label(),
            pdfbox.info().source
        );
        Ok(pdfbox)
    }
}
