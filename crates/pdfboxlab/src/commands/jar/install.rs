//! `pdfboxlab jar install` - download and verify a specific version

use crate::context::Context;
use crate::output::print_line;
use anyhow::{Context as _, Result};
use pdfboxlab_toolkit::resolve::install_version;
use semver::Version;

/// Execute `pdfboxlab jar install`
pub fn execute_install(ctx: &Context, version: &str) -> Result<()> {
    let version = Version::parse(version.trim().trim_start_matches('v'))
        .with_context(|| format!("Invalid version '{}'", version))?;

    let resolver = ctx.resolver()?;
    if !resolver.policy.accepts(&version) {
        tracing::warn!(
            "PDFBox {} is outside the version policy and will not be selected automatically",
            version
        );
    }

    let info = install_version(&resolver, &version)?;
    print_line(&format!("Installed PDFBox {} to {}", version, info.path.display()))?;
    Ok(())
}
