//! HTTP plumbing shared by every service.
//!
//! Wraps a [`reqwest::Client`] bound to the API root. Each call names the
//! action it performs so failures without a server message still read
//! "Failed to <action>".

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// `{ "data": T }` envelope used by every successful response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// HTTP client for the placement portal API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        action: &str,
    ) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse_response(response, action).await
    }

    pub(crate) async fn get_with_query<Q: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
        action: &str,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::parse_response(response, action).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        action: &str,
    ) -> Result<T, ClientError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::parse_response(response, action).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        action: &str,
    ) -> Result<T, ClientError> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::parse_response(response, action).await
    }

    pub(crate) async fn delete(&self, path: &str, action: &str) -> Result<(), ClientError> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::ensure_success(response, action).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a [`ClientError::Api`]
    /// carrying the server's message on failure.
    async fn ensure_success(
        response: reqwest::Response,
        action: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_body(status.as_u16(), &body, action);
            tracing::debug!(status = status.as_u16(), action, error = %err, "API call failed");
            return Err(err);
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response, action).await?;
        let envelope = response.json::<Envelope<T>>().await?;
        Ok(envelope.data)
    }
}
