// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Entry point for talking to a Supabase project.

use std::sync::Arc;

use chrono::Utc;
use reqwest::Method;

use crate::auth::{Session, TokenResponse};
use crate::config::SupabaseConfig;
use crate::error::SupabaseError;
use crate::http::HttpClient;
use crate::rest::TableQuery;

/// Client for a Supabase project.
///
/// # Example
///
/// ```ignore
/// use agendo_supabase::{SupabaseClient, SupabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SupabaseConfig {
///     base_url: "https://demo.supabase.co".to_string(),
///     anon_key: "anon-key".to_string(),
///     ..Default::default()
/// };
///
/// let client = SupabaseClient::new(config)?;
/// let session = client.sign_in_with_password("me@example.com", "secret").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Arc<HttpClient>,
}

impl SupabaseClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is incomplete or HTTP client
    /// initialization fails.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        if config.base_url.is_empty() {
            return Err(SupabaseError::Config("base_url is required".to_string()));
        }
        if config.anon_key.is_empty() {
            return Err(SupabaseError::Config("anon_key is required".to_string()));
        }
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &SupabaseConfig {
        self.http.config()
    }

    /// Signs in with email and password, returning a fresh session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, SupabaseError> {
        tracing::debug!(email, "signing in");
        let req = self
            .http
            .build_request(Method::POST, "/auth/v1/token?grant_type=password", None)
            .json(&serde_json::json!({ "email": email, "password": password }));

        let resp = self.http.execute(req).await.map_err(into_auth_error)?;
        let token: TokenResponse = resp.json().await?;
        Ok(token.into_session(Utc::now()))
    }

    /// Exchanges a refresh token for a new session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, SupabaseError> {
        let req = self
            .http
            .build_request(Method::POST, "/auth/v1/token?grant_type=refresh_token", None)
            .json(&serde_json::json!({ "refresh_token": refresh_token }));

        let resp = self.http.execute(req).await.map_err(into_auth_error)?;
        let token: TokenResponse = resp.json().await?;
        Ok(token.into_session(Utc::now()))
    }

    /// Revokes the session's tokens on the server.
    pub async fn sign_out(&self, session: &Session) -> Result<(), SupabaseError> {
        let req = self.http.build_request(
            Method::POST,
            "/auth/v1/logout",
            Some(&session.access_token),
        );
        self.http.execute(req).await.map_err(into_auth_error)?;
        Ok(())
    }

    /// Starts a `PostgREST` query against the given table.
    #[must_use]
    pub fn from(&self, table: &str) -> TableQuery {
        TableQuery::new(Arc::clone(&self.http), table)
    }
}

fn into_auth_error(e: SupabaseError) -> SupabaseError {
    match e {
        SupabaseError::Http(msg) | SupabaseError::Auth(msg) => SupabaseError::Auth(msg),
        other => other,
    }
}
