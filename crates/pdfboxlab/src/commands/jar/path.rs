//! `pdfboxlab jar path` - resolve the jar and show where it lives

use crate::context::Context;
use crate::output::{print_json, print_line};
use anyhow::Result;
use pdfboxlab_toolkit::resolve_toolkit;

/// Execute `pdfboxlab jar path`
pub fn execute_path(ctx: &Context, json: bool) -> Result<()> {
    let info = resolve_toolkit(&ctx.resolver()?)?;

    if json {
        print_json(&info)?;
    } else {
        print_line(&info.path.display().to_string())?;
        if ctx.verbose {
            print_line(&format!("version: {}", info.version_label()))?;
            print_line(&format!("source:  {}", info.source))?;
        }
    }

    Ok(())
}
