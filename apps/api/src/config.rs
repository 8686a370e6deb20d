use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::roster::shortlist::{valid_fraction, DEFAULT_FRACTION};

/// Application configuration loaded from environment variables.
/// No variable is required; without a source the bundled sample roster is served.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub candidates_csv_path: Option<PathBuf>,
    /// Takes precedence over `candidates_csv_path`.
    pub candidates_csv_url: Option<String>,
    pub shortlist_fraction: f64,
    /// Fixes the composite-score jitter when set.
    pub score_seed: Option<u64>,
    /// Request body cap for `POST /api/v1/ingest`.
    pub max_upload_bytes: usize,
}

/// Room for exports of tens of thousands of rows.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            candidates_csv_path: None,
            candidates_csv_url: None,
            shortlist_fraction: DEFAULT_FRACTION,
            score_seed: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let shortlist_fraction = match optional_env("SHORTLIST_FRACTION") {
            Some(raw) => raw
                .parse::<f64>()
                .context("SHORTLIST_FRACTION must be a number")?,
            None => DEFAULT_FRACTION,
        };
        if !valid_fraction(shortlist_fraction) {
            bail!("SHORTLIST_FRACTION must be greater than 0 and at most 1");
        }

        let max_upload_bytes = match optional_env("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };
        if max_upload_bytes == 0 {
            bail!("MAX_UPLOAD_BYTES must be greater than 0");
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            candidates_csv_path: optional_env("CANDIDATES_CSV_PATH").map(PathBuf::from),
            candidates_csv_url: optional_env("CANDIDATES_CSV_URL"),
            shortlist_fraction,
            score_seed: optional_env("SCORE_SEED")
                .map(|raw| raw.parse::<u64>())
                .transpose()
                .context("SCORE_SEED must be an unsigned integer")?,
            max_upload_bytes,
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
