// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Realtime `postgres_changes` subscription over the Phoenix-channels
//! WebSocket protocol.
//!
//! Connection lifecycle:
//! 1. Connect to `/realtime/v1/websocket` and join the table topic with a
//!    `postgres_changes` config carrying the row filter.
//! 2. Heartbeat every 30s to keep the channel open.
//! 3. Decoded change events are forwarded to an `mpsc` channel.
//! 4. On socket loss the task reconnects with capped exponential backoff,
//!    reporting [`FeedEvent::Degraded`] / [`FeedEvent::Resumed`] around the
//!    gap. Dropping the receiver ends the task.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::auth::Session;
use crate::client::SupabaseClient;
use crate::config::SupabaseConfig;
use crate::error::SupabaseError;

/// Heartbeat interval expected by the Realtime server.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// First reconnect delay after a dropped socket.
const BACKOFF_INITIAL: Duration = Duration::from_secs(1);

/// Reconnect delay cap.
const BACKOFF_MAX: Duration = Duration::from_secs(30);

/// Buffered change events before backpressure kicks in.
const CHANNEL_CAPACITY: usize = 64;

/// Kind of row change reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A row was inserted.
    Insert,
    /// A row was updated.
    Update,
    /// A row was deleted.
    Delete,
}

/// A decoded `postgres_changes` event.
#[derive(Debug, Clone)]
pub struct PostgresChange {
    /// What happened to the row.
    pub kind: ChangeKind,
    /// The new row, absent for deletes.
    pub record: Option<Value>,
    /// The previous row, when the server replicates it.
    pub old_record: Option<Value>,
}

/// Event delivered to feed consumers.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A row matching the subscription filter changed.
    Change(PostgresChange),
    /// The channel was lost; the task is reconnecting.
    Degraded(String),
    /// The channel was re-established after a gap.
    Resumed,
}

/// Handle to a running Realtime subscription.
///
/// The subscription ends when this handle is dropped or
/// [`unsubscribe`](RealtimeSubscription::unsubscribe) is called.
#[derive(Debug)]
pub struct RealtimeSubscription {
    task: JoinHandle<()>,
}

impl RealtimeSubscription {
    /// Tears the subscription down.
    pub fn unsubscribe(self) {
        self.task.abort();
    }
}

impl Drop for RealtimeSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl SupabaseClient {
    /// Subscribes to all insert/update/delete events on `table` for rows
    /// matching `filter` (`PostgREST` filter syntax, e.g. `user_id=eq.u1`).
    #[must_use]
    pub fn subscribe_postgres_changes(
        &self,
        session: &Session,
        table: &str,
        filter: &str,
    ) -> (RealtimeSubscription, mpsc::Receiver<FeedEvent>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let config = self.config().clone();
        let access_token = session.access_token.clone();
        let table = table.to_string();
        let filter = filter.to_string();

        let task = tokio::spawn(async move {
            run_feed(config, access_token, table, filter, tx).await;
        });

        (RealtimeSubscription { task }, rx)
    }
}

async fn run_feed(
    config: SupabaseConfig,
    access_token: String,
    table: String,
    filter: String,
    tx: mpsc::Sender<FeedEvent>,
) {
    let mut backoff = BACKOFF_INITIAL;
    let mut was_degraded = false;

    loop {
        let result = run_channel(
            &config,
            &access_token,
            &table,
            &filter,
            &tx,
            &mut was_degraded,
            &mut backoff,
        )
        .await;

        let err = match result {
            Ok(()) => return, // receiver gone
            Err(e) => e,
        };

        tracing::warn!(%table, %err, delay = ?backoff, "realtime channel lost, reconnecting");
        was_degraded = true;
        if tx.send(FeedEvent::Degraded(err.to_string())).await.is_err() {
            return;
        }

        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(BACKOFF_MAX);
    }
}

/// Runs one channel session. `Ok(())` means the consumer dropped the
/// receiver and the feed should end; `Err` asks the caller to reconnect.
async fn run_channel(
    config: &SupabaseConfig,
    access_token: &str,
    table: &str,
    filter: &str,
    tx: &mpsc::Sender<FeedEvent>,
    was_degraded: &mut bool,
    backoff: &mut Duration,
) -> Result<(), SupabaseError> {
    let (mut ws, _) = connect_async(config.realtime_url()).await?;

    let topic = format!("realtime:{}:{table}", config.schema);
    let join = json!({
        "topic": topic,
        "event": "phx_join",
        "ref": "1",
        "payload": {
            "access_token": access_token,
            "config": {
                "postgres_changes": [{
                    "event": "*",
                    "schema": config.schema,
                    "table": table,
                    "filter": filter,
                }],
            },
        },
    });
    ws.send(Message::Text(join.to_string())).await?;

    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    heartbeat.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    heartbeat.reset(); // first tick fires immediately otherwise
    let mut msg_ref: u64 = 1;
    let mut joined = false;

    loop {
        tokio::select! {
            () = tx.closed() => {
                let leave = json!({"topic": topic, "event": "phx_leave", "payload": {}, "ref": "0"});
                let _ = ws.send(Message::Text(leave.to_string())).await;
                let _ = ws.close(None).await;
                return Ok(());
            }
            _ = heartbeat.tick() => {
                msg_ref += 1;
                let hb = json!({
                    "topic": "phoenix",
                    "event": "heartbeat",
                    "payload": {},
                    "ref": msg_ref.to_string(),
                });
                ws.send(Message::Text(hb.to_string())).await?;
            }
            msg = ws.next() => match msg {
                Some(Ok(Message::Text(text))) => match parse_message(&text)? {
                    Some(ServerMessage::Joined) if !joined => {
                        joined = true;
                        *backoff = BACKOFF_INITIAL;
                        tracing::debug!(%topic, "realtime channel joined");
                        if *was_degraded {
                            *was_degraded = false;
                            if tx.send(FeedEvent::Resumed).await.is_err() {
                                return Ok(());
                            }
                        }
                    }
                    Some(ServerMessage::Joined) => {}
                    Some(ServerMessage::Change(change)) => {
                        if tx.send(FeedEvent::Change(change)).await.is_err() {
                            return Ok(());
                        }
                    }
                    None => {}
                },
                Some(Ok(Message::Ping(payload))) => ws.send(Message::Pong(payload)).await?,
                Some(Ok(Message::Close(_))) | None => {
                    return Err(SupabaseError::Socket("connection closed".to_string()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
        }
    }
}

enum ServerMessage {
    Joined,
    Change(PostgresChange),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Deserialize)]
struct ChangeData {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    record: Option<Value>,
    #[serde(default)]
    old_record: Option<Value>,
}

fn parse_message(text: &str) -> Result<Option<ServerMessage>, SupabaseError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    match envelope.event.as_str() {
        "phx_reply" => {
            let status = envelope.payload["status"].as_str().unwrap_or("");
            if status == "ok" {
                Ok(Some(ServerMessage::Joined))
            } else {
                Err(SupabaseError::Subscription(format!(
                    "join rejected: {}",
                    envelope.payload["response"]
                )))
            }
        }
        "postgres_changes" => {
            let data: ChangeData = serde_json::from_value(envelope.payload["data"].clone())?;
            let kind = match data.kind.as_str() {
                "INSERT" => ChangeKind::Insert,
                "UPDATE" => ChangeKind::Update,
                "DELETE" => ChangeKind::Delete,
                other => {
                    tracing::warn!(kind = other, "ignoring unknown change kind");
                    return Ok(None);
                }
            };
            Ok(Some(ServerMessage::Change(PostgresChange {
                kind,
                record: data.record,
                old_record: data.old_record,
            })))
        }
        "phx_error" => Err(SupabaseError::Subscription(format!(
            "channel error: {}",
            envelope.payload
        ))),
        _ => Ok(None),
    }
}
