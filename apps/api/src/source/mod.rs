//! Source-text providers for the roster, with a bundled sample as last resort.
//!
//! Providers only fetch text; parsing happens in `ingest` once the full body
//! is in memory.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::ingest::jitter::JitterSource;
use crate::ingest::scoring::ScoringWeights;
use crate::ingest::{parse_source_with, IngestReport};
use crate::roster::store::{RosterOrigin, RosterSnapshot};

/// Sample roster compiled into the binary.
pub const BUNDLED_SAMPLE: &str = include_str!("../../data/sample_candidates.csv");

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Supplies the raw source text. Implement to add a new origin.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<String, SourceError>;
}

pub struct FileSource {
    pub path: PathBuf,
}

#[async_trait]
impl SourceProvider for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }
}

pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: String) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl SourceProvider for HttpSource {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// The configured provider, URL taking precedence over path.
pub fn configured_provider(
    config: &Config,
) -> Result<Option<Arc<dyn SourceProvider>>, SourceError> {
    if let Some(url) = &config.candidates_csv_url {
        let provider: Arc<dyn SourceProvider> = Arc::new(HttpSource::new(url.clone())?);
        return Ok(Some(provider));
    }
    let provider = config.candidates_csv_path.as_ref().map(|path| {
        Arc::new(FileSource { path: path.clone() }) as Arc<dyn SourceProvider>
    });
    Ok(provider)
}

/// Loads the initial roster from `provider`, falling back to the bundled
/// sample when there is no provider, the fetch fails, or no header is found.
pub async fn load_roster(
    provider: Option<&dyn SourceProvider>,
    jitter: &mut dyn JitterSource,
    weights: &ScoringWeights,
) -> RosterSnapshot {
    if let Some(provider) = provider {
        let origin = provider.describe();
        match provider.fetch().await {
            Ok(text) => match parse_source_with(&text, &mut *jitter, weights) {
                Ok(report) => {
                    info!(
                        "Loaded {} candidates from {origin} ({} rows rejected)",
                        report.candidates.len(),
                        report.rejected.len()
                    );
                    return RosterSnapshot::new(RosterOrigin::Source(origin), report);
                }
                Err(e) => warn!("Ingestion of {origin} failed: {e}; using bundled sample"),
            },
            Err(e) => warn!("Fetching {origin} failed: {e}; using bundled sample"),
        }
    } else {
        info!("No candidate source configured; using bundled sample");
    }

    RosterSnapshot::new(RosterOrigin::BundledSample, bundled_sample(jitter, weights))
}

fn bundled_sample(jitter: &mut dyn JitterSource, weights: &ScoringWeights) -> IngestReport {
    parse_source_with(BUNDLED_SAMPLE, jitter, weights).unwrap_or_else(|e| {
        warn!("Bundled sample is unreadable: {e}");
        IngestReport {
            candidates: Vec::new(),
            rows_scanned: 0,
            rejected: Vec::new(),
        }
    })
}
