//! Dataset loading: one read of a local file or one HTTP GET

use crate::core::models::Dataset;
use crate::{debug, info};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Where the dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A JSON file on disk
    File(PathBuf),
    /// A JSON document served over HTTP(S)
    Url(String),
}

impl DataSource {
    /// Classify a location string: `http://` and `https://` prefixes are URLs
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// File stem (or last URL segment without extension) used to name outputs
    #[must_use]
    pub fn stem(&self) -> String {
        let stem = match self {
            Self::File(path) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string),
            Self::Url(url) => url
                .split(|c: char| c == '?' || c == '#')
                .next()
                .and_then(|u| u.trim_end_matches('/').rsplit('/').next())
                .map(|seg| match seg.rsplit_once('.') {
                    Some((stem, _)) if !stem.is_empty() => stem.to_string(),
                    _ => seg.to_string(),
                }),
        };
        stem.filter(|s| !s.is_empty())
            .unwrap_or_else(|| "dashboard".to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Dataset loading failures
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The HTTP request failed before a response arrived
    #[cfg(feature = "remote")]
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested URL
        url: String,
        /// Underlying error
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },
    /// URL sources need the `remote` feature
    #[error("cannot fetch {0}: built without the `remote` feature")]
    RemoteDisabled(String),
    /// The document is not a valid dataset
    #[error("invalid dataset JSON from {origin}: {source}")]
    Parse {
        /// Where the document came from
        origin: String,
        /// Underlying error
        source: serde_json::Error,
    },
}

/// Fetch and parse the dataset
///
/// The document is read fully into memory before parsing. There is no retry.
///
/// # Errors
/// Returns a [`LoadError`] describing the failed step
pub fn load_dataset(source: &DataSource, timeout: Duration) -> Result<Dataset, LoadError> {
    let text = match source {
        DataSource::File(path) => fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?,
        DataSource::Url(url) => fetch(url, timeout)?,
    };
    debug!("Read {} bytes from {source}", text.len());

    let dataset = Dataset::from_json(&text).map_err(|e| LoadError::Parse {
        origin: source.to_string(),
        source: e,
    })?;

    info!(
        "Dataset loaded from {source}: {} themes, {} schools, {} graph nodes",
        dataset.themes.len(),
        dataset.matrix.len(),
        dataset.radial_graph.nodes.len()
    );
    Ok(dataset)
}

#[cfg(feature = "remote")]
fn fetch(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let http_err = |e: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source: e,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(http_err)?;
    let response = client.get(url).send().map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(http_err)
}

#[cfg(not(feature = "remote"))]
fn fetch(url: &str, _timeout: Duration) -> Result<String, LoadError> {
    Err(LoadError::RemoteDisabled(url.to_string()))
}
