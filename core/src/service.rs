// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Seams between the view and the backend.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::appointment::Appointment;
use crate::datetime::DayWindow;
use crate::error::ServiceError;

/// Read/write access to the appointment collection, always scoped to one
/// user.
#[async_trait]
pub trait AppointmentService: Send + Sync + 'static {
    /// Lists the rows in the fetch window: pending rows, plus rows
    /// cancelled today (`scheduled_for` inside `window`).
    async fn list(
        &self,
        user_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<Appointment>, ServiceError>;

    /// Marks the given rows cancelled (`id IN ids AND user_id == user_id`),
    /// returning the updated rows.
    async fn cancel(&self, user_id: &str, ids: &[i64]) -> Result<Vec<Appointment>, ServiceError>;
}

/// A change reported by the backend for a row owned by the watched user.
/// The payload is not inspected: any change triggers a full re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Row inserted.
    Inserted,
    /// Row updated.
    Updated,
    /// Row deleted.
    Deleted,
}

/// Message delivered by a change feed.
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// A row changed; the view should re-fetch.
    Change(Change),
    /// The feed lost its connection and is recovering.
    Degraded(String),
    /// The feed recovered after a gap; the view should re-fetch.
    Resumed,
}

/// Handle keeping a change feed alive; dropping it unsubscribes.
pub type FeedHandle = Box<dyn std::any::Any + Send>;

/// Source of change notifications for one user's rows.
pub trait ChangeFeed: Send + Sync + 'static {
    /// Starts a feed scoped server-side to `user_id`, for all event types.
    fn subscribe(&self, user_id: &str) -> (FeedHandle, mpsc::Receiver<FeedMessage>);
}
