// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with API-key and bearer-token handling.

use reqwest::{Client, RequestBuilder, Response};

use crate::config::SupabaseConfig;
use crate::error::SupabaseError;

/// HTTP client for the auth and `PostgREST` endpoints.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: SupabaseConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request against a path relative to the project base URL.
    ///
    /// Every request carries the `apikey` header; `Authorization` is the
    /// user's access token when one is given, the anon key otherwise.
    pub fn build_request(
        &self,
        method: reqwest::Method,
        path: &str,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        let bearer = access_token.unwrap_or(&self.config.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, SupabaseError> {
        let resp = req.send().await?;

        match resp.status() {
            reqwest::StatusCode::OK
            | reqwest::StatusCode::CREATED
            | reqwest::StatusCode::NO_CONTENT => Ok(resp),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                let text = body_or_placeholder(resp).await;
                Err(SupabaseError::Auth(text))
            }
            status => {
                let text = body_or_placeholder(resp).await;
                Err(SupabaseError::Http(format!("{status}: {text}")))
            }
        }
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }
}

async fn body_or_placeholder(resp: Response) -> String {
    resp.text()
        .await
        .unwrap_or_else(|_| "Unable to read response".to_string())
}
