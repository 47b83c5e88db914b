use crate::utils::error::{AtlasError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("species-atlas/", env!("CARGO_PKG_VERSION"));

/// Per-call timeouts: short for name lookups, longer for occurrence pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub lookup: Duration,
    pub fetch: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            lookup: Duration::from_secs(5),
            fetch: Duration::from_secs(10),
        }
    }
}

pub fn build_client(user_agent: &str) -> Result<Client> {
    let client = Client::builder().user_agent(user_agent).build()?;
    Ok(client)
}

/// GET `url` with query parameters and a per-call timeout, decoding the JSON body.
///
/// Non-2xx statuses become [`AtlasError::UpstreamStatus`]; no retries.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<T> {
    tracing::debug!("📡 GET {} {:?}", url, query);
    let response = client.get(url).query(query).timeout(timeout).send().await?;

    let status = response.status();
    tracing::debug!("📡 {} responded with {}", url, status);
    if !status.is_success() {
        return Err(AtlasError::UpstreamStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AtlasError::MalformedPayload {
        message: format!("{}: {}", url, e),
    })
}

/// Join a base URL and an endpoint path without doubling slashes.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
