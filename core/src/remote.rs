// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Supabase-backed implementation of the service seams.

use agendo_supabase::{ChangeKind, FeedEvent, Session, SupabaseClient};
use async_trait::async_trait;
use chrono::SecondsFormat;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::appointment::{Appointment, AppointmentStatus};
use crate::datetime::DayWindow;
use crate::error::ServiceError;
use crate::service::{AppointmentService, Change, ChangeFeed, FeedHandle, FeedMessage};

/// Table holding the scheduled messages.
pub const APPOINTMENTS_TABLE: &str = "appointments";

/// Appointment access backed by a Supabase project, scoped to one session.
#[derive(Debug, Clone)]
pub struct SupabaseAppointments {
    client: SupabaseClient,
    session: Session,
    table: String,
}

impl SupabaseAppointments {
    /// Creates the adapter for the default table.
    #[must_use]
    pub fn new(client: SupabaseClient, session: Session) -> Self {
        Self::with_table(client, session, APPOINTMENTS_TABLE)
    }

    /// Creates the adapter for a custom table name.
    #[must_use]
    pub fn with_table(client: SupabaseClient, session: Session, table: &str) -> Self {
        Self {
            client,
            session,
            table: table.to_string(),
        }
    }

    /// The session this adapter authenticates with.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn window_clause(window: &DayWindow) -> String {
        format!(
            "status.eq.pending,and(status.eq.cancelado,scheduled_for.gte.{},scheduled_for.lt.{})",
            window.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            window.end.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}

#[async_trait]
impl AppointmentService for SupabaseAppointments {
    async fn list(
        &self,
        user_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<Appointment>, ServiceError> {
        let rows = self
            .client
            .from(&self.table)
            .select("*")
            .eq("user_id", user_id)
            .or(&Self::window_clause(window))
            .fetch(Some(&self.session.access_token))
            .await?;
        Ok(rows)
    }

    async fn cancel(&self, user_id: &str, ids: &[i64]) -> Result<Vec<Appointment>, ServiceError> {
        let rows = self
            .client
            .from(&self.table)
            .in_list("id", ids)
            .eq("user_id", user_id)
            .update(
                &serde_json::json!({ "status": AppointmentStatus::Cancelled }),
                Some(&self.session.access_token),
            )
            .await?;
        Ok(rows)
    }
}

impl ChangeFeed for SupabaseAppointments {
    fn subscribe(&self, user_id: &str) -> (FeedHandle, mpsc::Receiver<FeedMessage>) {
        let (subscription, mut events) = self.client.subscribe_postgres_changes(
            &self.session,
            &self.table,
            &format!("user_id=eq.{user_id}"),
        );

        let (tx, rx) = mpsc::channel(16);
        let forward = TaskGuard(tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let msg = match event {
                    FeedEvent::Change(change) => FeedMessage::Change(match change.kind {
                        ChangeKind::Insert => Change::Inserted,
                        ChangeKind::Update => Change::Updated,
                        ChangeKind::Delete => Change::Deleted,
                    }),
                    FeedEvent::Degraded(reason) => FeedMessage::Degraded(reason),
                    FeedEvent::Resumed => FeedMessage::Resumed,
                };
                if tx.send(msg).await.is_err() {
                    break;
                }
            }
        }));

        (Box::new((subscription, forward)), rx)
    }
}

struct TaskGuard(JoinHandle<()>);

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
