// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Error from an [`AppointmentService`](crate::AppointmentService)
/// implementation, opaque to the view.
#[derive(Debug, Clone)]
pub struct ServiceError(pub String);

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ServiceError {}

impl From<agendo_supabase::SupabaseError> for ServiceError {
    fn from(e: agendo_supabase::SupabaseError) -> Self {
        Self(e.to_string())
    }
}

/// View-level errors, caught at the component boundary and surfaced as
/// user-visible notices.
#[non_exhaustive]
#[derive(Debug)]
pub enum ViewError {
    /// Session problem (no identity bound, sign-out failure). Non-fatal.
    Auth(String),

    /// A read failed; the visible list was cleared.
    Fetch(String),

    /// A cancel or bulk-cancel failed; no state was changed.
    Mutation(String),

    /// The change feed is degraded or could not be established.
    Subscription(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth(e) => write!(f, "Session error: {e}"),
            Self::Fetch(e) => write!(f, "Failed to load appointments: {e}"),
            Self::Mutation(e) => write!(f, "Failed to cancel: {e}"),
            Self::Subscription(e) => write!(f, "Live updates unavailable: {e}"),
        }
    }
}

impl std::error::Error for ViewError {}
