//! `pdfboxlab jar versions` - list cached and remote PDFBox versions

use crate::context::Context;
use crate::output::{print_json, print_line};
use anyhow::Result;
use pdfboxlab_toolkit::resolve::{list_cached, list_remote};
use semver::Version;
use serde::Serialize;
use std::path::PathBuf;

/// A version present in the cache
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CachedEntry {
    pub version: Version,
    pub path: PathBuf,
    /// Whether the version policy allows resolving to it
    pub selectable: bool,
}

#[derive(Debug, Serialize)]
pub struct VersionsList {
    pub cached: Vec<CachedEntry>,
    /// Present only with `--remote`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<Vec<Version>>,
}

/// Execute `pdfboxlab jar versions`
pub fn execute_versions(ctx: &Context, remote: bool, json: bool) -> Result<()> {
    let resolver = ctx.resolver()?;

    let cached = list_cached(&resolver.cache_dir)?
        .into_iter()
        .map(|artifact| CachedEntry {
            selectable: resolver.policy.accepts(&artifact.version),
            version: artifact.version,
            path: artifact.path,
        })
        .collect();

    let remote = if remote {
        Some(list_remote(&resolver)?)
    } else {
        None
    };

    let list = VersionsList { cached, remote };

    if json {
        print_json(&list)?;
    } else {
        format_human_readable(&list)?;
    }

    Ok(())
}

fn format_human_readable(list: &VersionsList) -> Result<()> {
    if list.cached.is_empty() {
        print_line("No cached PDFBox versions")?;
    } else {
        print_line("Cached:")?;
        for entry in &list.cached {
            let marker = if entry.selectable { "" } else { " (excluded)" };
            print_line(&format!(
                "  {:<10} {}{}",
                entry.version.to_string(),
                entry.path.display(),
                marker
            ))?;
        }
    }

    if let Some(remote) = &list.remote {
        print_line("Remote:")?;
        for version in remote {
            print_line(&format!("  {}", version))?;
        }
    }

    Ok(())
}
