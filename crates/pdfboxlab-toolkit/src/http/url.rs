//! URL construction for the Apache distribution layout
//!
//! ```text
//! <base>/                                          version index
//! <base>/<version>/pdfbox-app-<version>.jar        archive
//! <base>/<version>/pdfbox-app-<version>.jar.sha512 checksum
//! ```

use pdfboxlab_core::config::consts::remote;
use semver::Version;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("'{base}' is not a valid URL: {source}")]
    Parse {
        base: String,
        #[source]
        source: url::ParseError,
    },

    /// `mailto:`-style URLs have no path to extend
    #[error("{0} has no hierarchical path")]
    NotHierarchical(Url),

    #[error("{0} does not end in a file name")]
    NoFileName(Url),
}

/// File name of the runnable archive for a version
pub fn archive_file_name(version: &Version) -> String {
    format!(
        "{}{}.{}",
        remote::ARCHIVE_PREFIX,
        version,
        remote::ARCHIVE_EXTENSION
    )
}

/// `<base>/<version>/pdfbox-app-<version>.jar`
///
/// A trailing slash on `base` is ignored.
pub fn archive_url(base: &str, version: &Version) -> Result<Url, UrlError> {
    let mut url = Url::parse(base).map_err(|source| UrlError::Parse {
        base: base.to_string(),
        source,
    })?;

    let not_hierarchical = UrlError::NotHierarchical(url.clone());
    url.path_segments_mut()
        .map_err(|_| not_hierarchical)?
        .pop_if_empty()
        .push(&version.to_string())
        .push(&archive_file_name(version));
    Ok(url)
}

/// `<archive-url>.sha512`
pub fn checksum_url(archive: &Url) -> Result<Url, UrlError> {
    let names_file = archive
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(|name| !name.is_empty());
    if !names_file {
        return Err(UrlError::NoFileName(archive.clone()));
    }

    let mut url = archive.clone();
    url.set_path(&format!(
        "{}.{}",
        archive.path(),
        remote::CHECKSUM_EXTENSION
    ));
    Ok(url)
}
