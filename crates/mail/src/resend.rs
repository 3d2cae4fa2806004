//! REST client for the Resend email API.
//!
//! Wraps the two endpoints the mailer uses (`POST /emails`,
//! `GET /domains`) using [`reqwest`] with bearer authentication.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::MailConfig;
use crate::error::ProviderError;
use crate::provider::{Domain, EmailProvider, OutboundEmail, SentEmail};

/// HTTP client for one Resend account.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Envelope of the `GET /domains` response.
#[derive(Debug, Deserialize)]
struct DomainList {
    #[serde(default)]
    data: Vec<Domain>,
}

impl ResendClient {
    /// Create a client with its own connection pool and request timeout.
    ///
    /// * `api_url` - Base URL without trailing slash, e.g. `https://api.resend.com`.
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    pub fn from_config(config: &MailConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`ProviderError::Api`] carrying the body
    /// text, otherwise decode the JSON body.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

impl std::fmt::Debug for ResendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl EmailProvider for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn list_domains(&self) -> Result<Vec<Domain>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/domains", self.api_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let list: DomainList = Self::parse_response(response).await?;
        Ok(list.data)
    }
}
