//! Low-level HTTP client for the registration backend.

use reqwest::Response;
use serde::Serialize;

use super::error::BackendError;

/// Makes requests to the registration backend.
///
pub(crate) struct Client {
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(base_url: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// POST a JSON body to the given path and return the raw response.
    ///
    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, BackendError> {
        let request_url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self.http_client.post(&request_url).json(body).send().await?;
        Ok(response)
    }
}
