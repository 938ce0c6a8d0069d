//! Calendar source retrieval.
//!
//! A source beginning with `http` is downloaded; anything else is read as a
//! local UTF-8 file. There is no timeout: a hung download blocks the run.

use reqwest::Client;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

const USER_AGENT: &str = concat!("icsorg/", env!("CARGO_PKG_VERSION"));

/// Returns true if the source should be fetched over HTTP.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http")
}

/// Reads the raw calendar text from `source`.
///
/// # Errors
///
/// Fails with a configuration error before any I/O when no source is given,
/// and with a network or file error when retrieval fails.
pub async fn fetch(source: Option<&str>) -> ProviderResult<String> {
    let source = source
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ProviderError::configuration("source file not given"))?;

    if is_remote(source) {
        fetch_url(source).await
    } else {
        read_file(source).await
    }
}

async fn fetch_url(url: &str) -> ProviderResult<String> {
    debug!(url, "Downloading calendar");

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::network(format!("failed to create HTTP client: {}", e)))?;

    let response = client.get(url).send().await.map_err(|e| {
        let message = if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            format!("request failed: {}", e)
        };
        ProviderError::network(message).with_origin(url).with_source(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::network(format!("server returned {}", status)).with_origin(url));
    }

    let body = response.text().await.map_err(|e| {
        ProviderError::invalid_response(format!("failed to read response: {}", e))
            .with_origin(url)
            .with_source(e)
    })?;

    debug!(url, bytes = body.len(), "Downloaded calendar");
    Ok(body)
}

async fn read_file(path: &str) -> ProviderResult<String> {
    debug!(path, "Reading calendar file");

    tokio::fs::read_to_string(path).await.map_err(|e| {
        ProviderError::file(e.to_string())
            .with_origin(path)
            .with_source(e)
    })
}
