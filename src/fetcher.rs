use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout or body read error.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Fetches raw markdown documents relative to a base URL.
pub struct Fetcher {
    client: reqwest::Client,
    settings: Settings,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout())
            .build()?;
        Ok(Fetcher {
            client,
            settings: settings.clone(),
        })
    }

    pub fn url_for(&self, filename: &str) -> String {
        self.settings.document_url(filename)
    }

    /// Fetch one document. Non-2xx responses are errors.
    pub async fn fetch(&self, filename: &str) -> Result<String, FetchError> {
        let url = self.url_for(filename);
        debug!("Fetching: {}", url);

        let start = Instant::now();
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(
            bytes = body.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Fetched {}",
            filename
        );
        Ok(body)
    }
}
