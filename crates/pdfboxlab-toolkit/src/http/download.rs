//! In-memory downloads
//!
//! Archives are a few megabytes, so the body is buffered whole; nothing is
//! written to disk until the caller has verified it.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::io::{self, Read};
use thiserror::Error;
use url::Url;

/// Progress callback (bytes_downloaded, total_bytes); total is 0 when the server sends no length
pub type Progress = fn(u64, u64);

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{url} answered {status}")]
    Status { url: Url, status: StatusCode },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading body of {url} failed: {source}")]
    Body {
        url: Url,
        #[source]
        source: io::Error,
    },
}

/// Reader adapter reporting cumulative progress after every read
struct ProgressReader<R> {
    inner: R,
    read: u64,
    total: Option<u64>,
    progress: Option<Progress>,
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.read += n as u64;
            if let Some(report) = self.progress {
                report(self.read, self.total.unwrap_or(0));
            }
        }
        Ok(n)
    }
}

/// GETs `url` and returns the whole body
///
/// Any non-2xx status is an error; redirects are followed by the client.
pub fn download_to_memory(
    client: &Client,
    url: &Url,
    progress: Option<Progress>,
) -> Result<Vec<u8>, DownloadError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.as_str())
        .send()
        .map_err(|source| DownloadError::Transport {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status {
            url: url.clone(),
            status,
        });
    }

    let total = response.content_length();
    let mut reader = ProgressReader {
        inner: response,
        read: 0,
        total,
        progress,
    };

    let mut body = Vec::with_capacity(total.unwrap_or(0) as usize);
    reader
        .read_to_end(&mut body)
        .map_err(|source| DownloadError::Body {
            url: url.clone(),
            source,
        })?;

    tracing::debug!("{} bytes from {}", body.len(), url);
    Ok(body)
}

/// Downloads a small text resource (index page, checksum file)
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn download_text(client: &Client, url: &Url) -> Result<String, DownloadError> {
    let bytes = download_to_memory(client, url, None)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
