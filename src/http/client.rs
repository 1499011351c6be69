use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// HTTP client with a per-request timeout and a static credential.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct AuthorizedClient {
    client: Client,
}

impl AuthorizedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, authorization: Option<&str>) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs, authorization)?;
        Ok(Self { client })
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<Response> {
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send POST request")
    }

    fn build_client(
        user_agent: &str,
        timeout_secs: u64,
        authorization: Option<&str>,
    ) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(Self::build_headers(authorization)?)
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_headers(authorization: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(value) = authorization {
            let mut value =
                HeaderValue::from_str(value).context("Credential is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_credential() {
        assert!(AuthorizedClient::new("test", 5, Some("bad\nkey")).is_err());
        assert!(AuthorizedClient::new("test", 5, Some("HDEV-key")).is_ok());
        assert!(AuthorizedClient::new("test", 5, None).is_ok());
    }
}
