use crate::provider::session::SessionState;
use crate::{ProviderError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for the adapter
///
/// Read fetches (`get_text`, `get_json`) go out bare; write requests
/// (`post_json`) carry the session cookie and anti-forgery token recorded
/// by the last `bootstrap` call.
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionState,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            session: SessionState::new(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Build full URL from endpoint path
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Fetch a page body as text
    pub async fn get_text(&self, endpoint: &str) -> Result<String> {
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let response = Self::check_status(response).await?;
        response.text().await.map_err(ProviderError::Network)
    }

    /// Fetch the bootstrap page, recording session state from its response
    /// headers and body before handing the body back.
    pub async fn bootstrap(&self, endpoint: &str) -> Result<String> {
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let response = Self::check_status(response).await?;
        let headers = response.headers().clone();
        let body = response.text().await.map_err(ProviderError::Network)?;

        self.session.record_from_bootstrap(&headers, &body);

        Ok(body)
    }

    /// Execute GET request with query parameters and parse JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.url(endpoint))
            .query(params)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        Self::handle_json_response(response).await
    }

    /// Execute a write request: POST JSON with the session pair attached
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .client
            .post(self.url(endpoint))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(body);

        let response = self
            .session
            .attach_to_write_request(request)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        Self::handle_json_response(response).await
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(ProviderError::Api {
                status: status_code,
                message,
            });
        }

        Ok(response)
    }

    /// Handle response and parse JSON
    async fn handle_json_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let client = HttpClient::new("https://www.example.so", "test-agent");

        assert_eq!(client.url("archivio"), "https://www.example.so/archivio");
        assert_eq!(client.url("/anime/42"), "https://www.example.so/anime/42");
        assert_eq!(client.url(""), "https://www.example.so/");
    }

    #[test]
    fn test_url_tolerates_trailing_slash_in_base() {
        let client = HttpClient::new("https://www.example.so/", "test-agent");

        assert_eq!(client.url("archivio"), "https://www.example.so/archivio");
    }
}
