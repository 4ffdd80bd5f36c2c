//! REST client for the profile backend.
//!
//! Wraps the four collection endpoints (`GET/POST /profiles`,
//! `PUT/DELETE /profiles/{id}`) using [`reqwest`]. Calls are not
//! retried; any failure is surfaced to the caller as a
//! [`RemoteError`].

use async_trait::async_trait;
use parokya_core::{Profile, ProfileId, ProfileInput, ProfileStore, RemoteError};

use crate::config::ClientConfig;

/// HTTP client bound to one profile backend.
pub struct ProfilesApi {
    client: reqwest::Client,
    base_url: String,
}

impl ProfilesApi {
    /// Create a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling across components).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Base HTTP URL this client is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full profile collection.
    ///
    /// Sends `GET /profiles`. The response replaces any client-side
    /// snapshot wholesale; there is no incremental merge.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, RemoteError> {
        let url = format!("{}/profiles", self.base_url);
        tracing::debug!(method = "GET", %url, "Fetching profile collection");

        let response = self.client.get(&url).send().await.map_err(transport)?;
        Self::parse_response(response).await
    }

    /// Submit a new profile.
    ///
    /// Sends `POST /profiles` with the normalized input as the JSON
    /// body. Returns the created profile with its server-assigned id
    /// and timestamps.
    pub async fn create_profile(&self, input: &ProfileInput) -> Result<Profile, RemoteError> {
        let url = format!("{}/profiles", self.base_url);
        tracing::debug!(method = "POST", %url, "Creating profile");

        let response = self
            .client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    /// Submit a full replacement for an existing profile.
    ///
    /// Sends `PUT /profiles/{id}`.
    pub async fn update_profile(
        &self,
        id: ProfileId,
        input: &ProfileInput,
    ) -> Result<Profile, RemoteError> {
        let url = format!("{}/profiles/{}", self.base_url, id);
        tracing::debug!(method = "PUT", %url, "Updating profile");

        let response = self
            .client
            .put(&url)
            .json(input)
            .send()
            .await
            .map_err(transport)?;
        Self::parse_response(response).await
    }

    /// Remove a profile.
    ///
    /// Sends `DELETE /profiles/{id}`. No response body is required.
    pub async fn delete_profile(&self, id: ProfileId) -> Result<(), RemoteError> {
        let url = format!("{}/profiles/{}", self.base_url, id);
        tracing::debug!(method = "DELETE", %url, "Deleting profile");

        let response = self.client.delete(&url).send().await.map_err(transport)?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or [`RemoteError::Api`] carrying
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(transport)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), RemoteError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Map a reqwest-level failure (connection, DNS, decode) to the shared
/// error type.
fn transport(error: reqwest::Error) -> RemoteError {
    RemoteError::Transport(error.to_string())
}

#[async_trait]
impl ProfileStore for ProfilesApi {
    async fn list(&self) -> Result<Vec<Profile>, RemoteError> {
        self.list_profiles().await
    }

    async fn create(&self, input: &ProfileInput) -> Result<Profile, RemoteError> {
        self.create_profile(input).await
    }

    async fn update(&self, id: ProfileId, input: &ProfileInput) -> Result<Profile, RemoteError> {
        self.update_profile(id, input).await
    }

    async fn delete(&self, id: ProfileId) -> Result<(), RemoteError> {
        self.delete_profile(id).await
    }
}
