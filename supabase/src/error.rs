// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Supabase client errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum SupabaseError {
    /// HTTP layer error.
    Http(String),

    /// Authentication error (sign-in, refresh or sign-out failed).
    Auth(String),

    /// Response body could not be decoded.
    Decode(String),

    /// WebSocket transport error.
    Socket(String),

    /// Realtime channel rejected the subscription.
    Subscription(String),

    /// Configuration error.
    Config(String),
}

impl fmt::Display for SupabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Auth(e) => write!(f, "Authentication failed: {e}"),
            Self::Decode(e) => write!(f, "Invalid server response: {e}"),
            Self::Socket(e) => write!(f, "WebSocket error: {e}"),
            Self::Subscription(e) => write!(f, "Realtime subscription failed: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for SupabaseError {}

impl From<reqwest::Error> for SupabaseError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for SupabaseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for SupabaseError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Socket(e.to_string())
    }
}
