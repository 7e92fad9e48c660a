// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Client for Supabase-compatible backends: GoTrue auth, `PostgREST` table
//! access and the Realtime `postgres_changes` WebSocket channel.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::pedantic
)]
#![allow(clippy::single_match_else, clippy::missing_errors_doc)]

mod auth;
mod client;
mod config;
mod error;
mod http;
mod realtime;
mod rest;

pub use crate::auth::{Session, User};
pub use crate::client::SupabaseClient;
pub use crate::config::SupabaseConfig;
pub use crate::error::SupabaseError;
pub use crate::realtime::{ChangeKind, FeedEvent, PostgresChange, RealtimeSubscription};
pub use crate::rest::TableQuery;
