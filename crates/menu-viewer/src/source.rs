//! Where a published menu document comes from.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSource {
    Url(String),
    File(PathBuf),
}

impl MenuSource {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            MenuSource::Url(raw.to_string())
        } else {
            MenuSource::File(PathBuf::from(raw))
        }
    }

    pub async fn fetch(&self) -> Result<Value> {
        match self {
            MenuSource::Url(url) => {
                debug!("Fetching menu from {}", url);
                let response = reqwest::get(url)
                    .await
                    .with_context(|| format!("failed to fetch {}", url))?;
                if !response.status().is_success() {
                    bail!("{} answered with {}", url, response.status());
                }
                response
                    .json()
                    .await
                    .with_context(|| format!("{} did not return JSON", url))
            }
            MenuSource::File(path) => {
                debug!("Reading menu from {}", path.display());
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_slice(&bytes)
                    .with_context(|| format!("{} is not valid JSON", path.display()))
            }
        }
    }
}
