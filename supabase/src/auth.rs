// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! GoTrue session types.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// An authenticated user, as returned by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Stable user identifier; every row read or written is scoped to it.
    pub id: Uuid,
    /// Email the user signed in with, when known.
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// JWT sent as the bearer token on data requests.
    pub access_token: String,
    /// Token used to obtain a fresh access token.
    pub refresh_token: String,
    /// Instant at which `access_token` expires.
    pub expires_at: DateTime<Utc>,
    /// The user this session belongs to.
    pub user: User,
}

impl Session {
    /// Whether the access token has expired (with a small safety margin).
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(30) >= self.expires_at
    }
}

/// Wire shape of a successful token grant.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: User,
}

impl TokenResponse {
    pub(crate) fn into_session(self, now: DateTime<Utc>) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: now + Duration::seconds(self.expires_in),
            user: self.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expiry_includes_margin() {
        let now = Utc::now();
        let session = Session {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_at: now + Duration::seconds(10),
            user: User {
                id: Uuid::nil(),
                email: None,
            },
        };
        assert!(session.is_expired(now));
        assert!(!session.is_expired(now - Duration::seconds(60)));
    }
}
