//! Typed operations over the PDFBox tools

pub mod args;
pub mod options;

pub use options::{
    ColorDepth, CropBox, ExtractImagesOptions, ExtractTextOptions, PdfToImageOptions, expand_path,
};

use crate::exec::{ExecResult, Invoker, Tool, invoker_for};
use crate::info::ToolkitInfo;
use crate::resolve::{ResolverConfig, resolve_toolkit};
use pdfboxlab_core::{Config, Result};
use std::path::Path;

/// A resolved PDFBox archive plus the strategy that runs it
pub struct PdfBox {
    info: ToolkitInfo,
    invoker: Box<dyn Invoker>,
}

impl std::fmt::Debug for PdfBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfBox").field("info", &self.info).finish()
    }
}

impl PdfBox {
    /// Resolves the archive and prepares the configured invoker
    ///
    /// # Errors
    ///
    /// Any resolution error, or `RuntimeMissing` when no Java launcher is found.
    pub fn new(config: &Config) -> Result<Self> {
        let resolver = ResolverConfig::from_config(config)?;
        Self::with_resolver(&resolver, config)
    }

    /// Same as [`PdfBox::new`] with explicit resolver settings
    pub fn with_resolver(resolver: &ResolverConfig, config: &Config) -> Result<Self> {
        let info = resolve_toolkit(resolver)?;
        tracing::debug!(
            "PDFBox {} from {} at {}",
            info.version_label(),
            info.source,
            info.path.display()
        );

        let invoker = invoker_for(&config.runtime)?;
        Ok(Self { info, invoker })
    }

    /// Uses an already resolved archive and a caller-supplied invoker
    pub fn with_invoker(info: ToolkitInfo, invoker: Box<dyn Invoker>) -> Self {
        Self { info, invoker }
    }

    pub fn info(&self) -> &ToolkitInfo {
        &self.info
    }

    /// Extracts the text of `input`
    ///
    /// Returns the text when no output file is given, `None` otherwise.
    pub fn extract_text(
        &self,
        input: impl AsRef<Path>,
        options: &ExtractTextOptions,
    ) -> Result<Option<String>> {
        let input = expand_path(input.as_ref())?;
        let mut options = options.clone();
        options.output = options.output.as_deref().map(expand_path).transpose()?;

        let result = self.run(Tool::ExtractText, args::extract_text_args(&input, &options))?;

        Ok(match options.output {
            Some(_) => None,
            None => Some(result.stdout),
        })
    }

    /// Renders pages of `input` to image files
    pub fn rasterize_pages(
        &self,
        input: impl AsRef<Path>,
        options: &PdfToImageOptions,
    ) -> Result<ExecResult> {
        options.check_image_type()?;
        let input = expand_path(input.as_ref())?;
        let mut options = options.clone();
        options.output_prefix = options
            .output_prefix
            .as_deref()
            .map(expand_path)
            .transpose()?;

        self.run(Tool::PDFToImage, args::pdf_to_image_args(&input, &options))
    }

    /// Writes the embedded images of `input` to files
    pub fn extract_images(
        &self,
        input: impl AsRef<Path>,
        options: &ExtractImagesOptions,
    ) -> Result<ExecResult> {
        let input = expand_path(input.as_ref())?;
        let mut options = options.clone();
        options.prefix = options.prefix.as_deref().map(expand_path).transpose()?;

        self.run(Tool::ExtractImages, args::extract_images_args(&input, &options))
    }

    fn run(&self, tool: Tool, args: Vec<String>) -> Result<ExecResult> {
        self.invoker
            .invoke(&self.info.path, tool, &args)?
            .into_checked(tool)
    }
}
