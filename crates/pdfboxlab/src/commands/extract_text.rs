//! `pdfboxlab extract-text`

use crate::cli::ExtractTextArgs;
use crate::context::Context;
use crate::output::{print_line, print_raw};
use anyhow::Result;
use pdfboxlab_toolkit::ExtractTextOptions;

impl From<&ExtractTextArgs> for ExtractTextOptions {
    fn from(args: &ExtractTextArgs) -> Self {
        ExtractTextOptions {
            output: args.output.clone(),
            password: args.password.clone(),
            encoding: args.encoding.clone(),
            html: args.html,
            sort: args.sort,
            ignore_beads: args.ignore_beads,
            start_page: args.start_page,
            end_page: args.end_page,
        }
    }
}

/// Execute `pdfboxlab extract-text`
pub fn run(ctx: &Context, args: &ExtractTextArgs) -> Result<()> {
    let pdfbox = ctx.pdfbox()?;

    match pdfbox.extract_text(&args.input, &ExtractTextOptions::from(args))? {
        Some(text) => print_raw(&text)?,
        None => {
            if let Some(output) = &args.output
                && ctx.verbose
            {
                print_line(&format!("Wrote {}", output.display()))?;
            }
        }
    }

    Ok(())
}
