use std::time::Duration;

use serde::Deserialize;

use crate::ProviderError;

const OPENVERSE_URL: &str = "https://api.openverse.org/v1/images/";
const COMMONS_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// Keyless image lookup tried against two independent providers in sequence.
///
/// "Nothing found" is a normal outcome, so this type never surfaces errors;
/// failures are logged and treated as a miss.
pub struct ImageSearch {
    client: reqwest::Client,
}

impl ImageSearch {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("glossa/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    pub async fn find(&self, query: &str) -> Option<String> {
        if query.trim().is_empty() {
            return None;
        }

        if let Some(url) = self.from_openverse(query).await {
            return Some(url);
        }
        self.from_commons(query).await
    }

    async fn from_openverse(&self, query: &str) -> Option<String> {
        let response = self
            .client
            .get(OPENVERSE_URL)
            .query(&[("q", query), ("page_size", "1")])
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!("openverse returned HTTP {}", response.status());
                return None;
            }
            Err(e) => {
                tracing::debug!("openverse request failed: {e}");
                return None;
            }
        };

        let page: OpenverseResponse = match response.json().await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("failed to parse openverse response: {e}");
                return None;
            }
        };

        page.results
            .into_iter()
            .next()
            .map(|image| image.url)
            .filter(|url| !url.is_empty())
    }

    async fn from_commons(&self, query: &str) -> Option<String> {
        let response = self
            .client
            .get(COMMONS_URL)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrnamespace", "6"),
                ("gsrlimit", "1"),
                ("prop", "imageinfo"),
                ("iiprop", "url"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!("commons returned HTTP {}", response.status());
                return None;
            }
            Err(e) => {
                tracing::debug!("commons request failed: {e}");
                return None;
            }
        };

        let json: serde_json::Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!("failed to parse commons response: {e}");
                return None;
            }
        };

        // page ids are dynamic keys, take the first page's first imageinfo url
        json["query"]["pages"]
            .as_object()
            .and_then(|pages| pages.values().next())
            .and_then(|page| page["imageinfo"][0]["url"].as_str())
            .map(str::to_string)
    }
}

#[derive(Deserialize)]
struct OpenverseResponse {
    #[serde(default)]
    results: Vec<OpenverseImage>,
}

#[derive(Deserialize)]
struct OpenverseImage {
    url: String,
}
