//! `pdfboxlab to-images`

use crate::cli::ToImagesArgs;
use crate::context::Context;
use crate::output::print_raw;
use anyhow::Result;
use pdfboxlab_toolkit::PdfToImageOptions;

impl From<&ToImagesArgs> for PdfToImageOptions {
    fn from(args: &ToImagesArgs) -> Self {
        PdfToImageOptions {
            password: args.password.clone(),
            image_type: args.image_type.clone(),
            output_prefix: args.output_prefix.clone(),
            start_page: args.start_page,
            end_page: args.end_page,
            page: args.page,
            dpi: args.dpi,
            color: args.color,
            cropbox: args.cropbox,
            time: !args.no_time,
        }
    }
}

/// Execute `pdfboxlab to-images`
pub fn run(ctx: &Context, args: &ToImagesArgs) -> Result<()> {
    let pdfbox = ctx.pdfbox()?;
    let result = pdfbox.rasterize_pages(&args.input, &PdfToImageOptions::from(args))?;

    tracing::debug!("PDFToImage finished in {} ms", result.duration_ms);
    print_raw(&result.diagnostics())?;
    Ok(())
}
