//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use pdfboxlab_toolkit::{ColorDepth, CropBox};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfboxlab")]
#[command(version, about = "Run Apache PDFBox tools with a managed jar", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log resolution and invocation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: PDFBOXLAB_CONFIG, then the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the text of a PDF (to stdout unless OUTPUT is given)
    ExtractText(ExtractTextArgs),

    /// Render PDF pages to image files
    ToImages(ToImagesArgs),

    /// Save the images embedded in a PDF
    ExtractImages(ExtractImagesArgs),

    /// PDFBox jar management
    #[command(subcommand)]
    Jar(JarCommands),
}

#[derive(Args)]
pub struct ExtractTextArgs {
    /// Input PDF
    pub input: PathBuf,

    /// Text file to write
    pub output: Option<PathBuf>,

    /// Password of an encrypted PDF
    #[arg(long)]
    pub password: Option<String>,

    /// Output encoding (e.g. UTF-8)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Emit HTML instead of plain text
    #[arg(long)]
    pub html: bool,

    /// Sort text by position
    #[arg(long)]
    pub sort: bool,

    /// Ignore article beads
    #[arg(long)]
    pub ignore_beads: bool,

    /// First page (1-based)
    #[arg(long)]
    pub start_page: Option<u32>,

    /// Last page (1-based, inclusive)
    #[arg(long)]
    pub end_page: Option<u32>,
}

#[derive(Args)]
pub struct ToImagesArgs {
    /// Input PDF
    pub input: PathBuf,

    /// Password of an encrypted PDF
    #[arg(long)]
    pub password: Option<String>,

    /// Image format (png, jpg, ...)
    #[arg(long)]
    pub image_type: Option<String>,

    /// Files are named <PREFIX><page>.<ext>
    #[arg(long)]
    pub output_prefix: Option<PathBuf>,

    #[arg(long)]
    pub start_page: Option<u32>,

    #[arg(long)]
    pub end_page: Option<u32>,

    /// Render only this page
    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub dpi: Option<u32>,

    /// bilevel, gray, rgb or rgba
    #[arg(long)]
    pub color: Option<ColorDepth>,

    /// Crop rectangle "x1 y1 x2 y2"
    #[arg(long, allow_hyphen_values = true)]
    pub cropbox: Option<CropBox>,

    /// Do not report rendering time
    #[arg(long)]
    pub no_time: bool,
}

#[derive(Args)]
pub struct ExtractImagesArgs {
    /// Input PDF
    pub input: PathBuf,

    /// Password of an encrypted PDF
    #[arg(long)]
    pub password: Option<String>,

    /// Files are named <PREFIX>-<n>.<ext>
    #[arg(long)]
    pub prefix: Option<PathBuf>,

    /// Write JPEG images without re-encoding
    #[arg(long)]
    pub direct_jpeg: bool,
}

#[derive(Subcommand)]
pub enum JarCommands {
    /// Resolve the jar (downloading if needed) and print its location
    Path {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List cached (and optionally remote) versions
    Versions {
        /// Also query the distribution index
        #[arg(long)]
        remote: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download and verify a specific version into the cache
    Install {
        /// Version to install (e.g., "2.0.27")
        version: String,
    },
}
