use crate::SearchError;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shared HTTP client for provider requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, SearchError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` with `query` and decode the JSON body.
    ///
    /// Non-success statuses are reported as `SearchError::StatusError` tagged
    /// with `provider`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        provider: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SearchError> {
        debug!("{} GET {}", provider, url);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::StatusError {
                provider: provider.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
