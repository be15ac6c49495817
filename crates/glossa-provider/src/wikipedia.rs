use std::time::Duration;

use serde::Deserialize;

use crate::{Encyclopedia, ProviderError};

/// Wikipedia REST summary client.
///
/// The resolver wraps calls to this in its own hard timeout; the client-level
/// timeout here only guards against connections that hang past it.
pub struct WikipediaClient {
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: String,
}

impl WikipediaClient {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("glossa/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Encyclopedia for WikipediaClient {
    async fn fetch_summary(
        &self,
        word: &str,
        language: &str,
    ) -> Result<Option<String>, ProviderError> {
        let title = word.trim().replace(' ', "_");
        let url = format!("https://{language}.wikipedia.org/api/rest_v1/page/summary/{title}");

        let response = self.client.get(&url).send().await?;

        if response.status() == 404 {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ProviderError::Api(format!("HTTP {}", response.status())));
        }

        let summary: PageSummary = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("failed to parse summary: {e}")))?;

        let extract = summary.extract.trim().to_string();
        Ok(if extract.is_empty() {
            None
        } else {
            Some(extract)
        })
    }
}
