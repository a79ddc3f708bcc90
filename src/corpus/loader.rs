//! Fetches the corpus document from disk or over HTTP.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::corpus::{LoadedCorpus, TopicCorpus};
use crate::error::{Result, SkemiError};

const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Where a corpus document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    File(PathBuf),
    Url(String),
}

impl CorpusSource {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

pub struct CorpusLoader {
    timeout: Duration,
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl CorpusLoader {
    /// Timeouts under one second are raised to one second.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: timeout.max(MIN_TIMEOUT),
        }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and parse the whole document. Any failure to obtain it is
    /// reported as [`SkemiError::CorpusUnavailable`].
    pub fn load(&self, source: &CorpusSource) -> Result<LoadedCorpus> {
        debug!(%source, "loading corpus");
        let raw = match source {
            CorpusSource::File(path) => std::fs::read_to_string(path).map_err(|err| {
                SkemiError::CorpusUnavailable(format!("read {}: {err}", path.display()))
            })?,
            CorpusSource::Url(url) => self.fetch(url)?,
        };

        let loaded = TopicCorpus::from_json_str(&raw)?;
        info!(
            %source,
            topics = loaded.corpus.len(),
            skipped = loaded.warnings.len(),
            "corpus loaded"
        );
        Ok(loaded)
    }

    fn fetch(&self, url: &str) -> Result<String> {
        let unavailable = |err: reqwest::Error| SkemiError::CorpusUnavailable(format!("{url}: {err}"));
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(unavailable)?;
        client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(unavailable)
    }
}
