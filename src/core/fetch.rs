use crate::domain::ports::PageFetcher;
use crate::utils::error::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("playstore-scrape/", env!("CARGO_PKG_VERSION"));

/// One-shot HTTP GET; no retries, redirects follow reqwest's default policy.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(ScrapeError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
