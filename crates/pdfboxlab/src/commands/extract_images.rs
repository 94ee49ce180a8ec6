//! `pdfboxlab extract-images`

use crate::cli::ExtractImagesArgs;
use crate::context::Context;
use crate::output::print_raw;
use anyhow::Result;
use pdfboxlab_toolkit::ExtractImagesOptions;

impl From<&ExtractImagesArgs> for ExtractImagesOptions {
    fn from(args: &ExtractImagesArgs) -> Self {
        ExtractImagesOptions {
            password: args.password.clone(),
            prefix: args.prefix.clone(),
            direct_jpeg: args.direct_jpeg,
        }
    }
}

/// Execute `pdfboxlab extract-images`
pub fn run(ctx: &Context, args: &ExtractImagesArgs) -> Result<()> {
    let pdfbox = ctx.pdfbox()?;
    let result = pdfbox.extract_images(&args.input, &ExtractImagesOptions::from(args))?;

    print_raw(&result.diagnostics())?;
    Ok(())
}
