// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use agendo_core::{
    Appointment, AppointmentService, ChangeFeed, DayWindow, FeedHandle, FeedMessage, ServiceError,
};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A scripted response for one `list` call.
pub struct ScriptedList {
    /// Simulated network latency before the response resolves.
    pub delay: Duration,
    /// Rows to return, or an error message.
    pub result: Result<Vec<Appointment>, String>,
}

impl ScriptedList {
    pub fn rows(rows: Vec<Appointment>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(rows),
        }
    }

    pub fn rows_after(delay: Duration, rows: Vec<Appointment>) -> Self {
        Self {
            delay,
            result: Ok(rows),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(message.to_string()),
        }
    }
}

/// Scriptable in-memory service recording every call.
///
/// Unscripted `list` calls return an empty row set; unscripted `cancel`
/// calls succeed.
#[derive(Default)]
pub struct MockService {
    lists: Mutex<VecDeque<ScriptedList>>,
    list_users: Mutex<Vec<String>>,
    cancels: Mutex<Vec<(String, Vec<i64>)>>,
    fail_next_cancel: Mutex<Option<String>>,
}

impl MockService {
    pub fn script_list(&self, scripted: ScriptedList) {
        self.lists.lock().unwrap().push_back(scripted);
    }

    pub fn fail_next_cancel(&self, message: &str) {
        *self.fail_next_cancel.lock().unwrap() = Some(message.to_string());
    }

    /// Users passed to `list`, in call order.
    pub fn list_calls(&self) -> Vec<String> {
        self.list_users.lock().unwrap().clone()
    }

    /// `(user, ids)` pairs passed to successful `cancel` calls.
    pub fn cancel_calls(&self) -> Vec<(String, Vec<i64>)> {
        self.cancels.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppointmentService for MockService {
    async fn list(
        &self,
        user_id: &str,
        _window: &DayWindow,
    ) -> Result<Vec<Appointment>, ServiceError> {
        self.list_users.lock().unwrap().push(user_id.to_string());
        let scripted = self.lists.lock().unwrap().pop_front();
        match scripted {
            Some(s) => {
                if s.delay > Duration::ZERO {
                    tokio::time::sleep(s.delay).await;
                }
                s.result.map_err(ServiceError)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn cancel(&self, user_id: &str, ids: &[i64]) -> Result<Vec<Appointment>, ServiceError> {
        if let Some(message) = self.fail_next_cancel.lock().unwrap().take() {
            return Err(ServiceError(message));
        }
        self.cancels
            .lock()
            .unwrap()
            .push((user_id.to_string(), ids.to_vec()));
        Ok(Vec::new())
    }
}

/// Change feed whose events are emitted by the test.
#[derive(Default)]
pub struct MockFeed {
    tx: Mutex<Option<mpsc::Sender<FeedMessage>>>,
    users: Mutex<Vec<String>>,
}

impl MockFeed {
    /// Pushes an event to the current subscriber.
    pub async fn emit(&self, msg: FeedMessage) {
        let tx = self
            .tx
            .lock()
            .unwrap()
            .clone()
            .expect("no active subscriber");
        tx.send(msg).await.expect("feed receiver dropped");
    }

    /// Users passed to `subscribe`, in call order.
    pub fn subscriptions(&self) -> Vec<String> {
        self.users.lock().unwrap().clone()
    }
}

impl ChangeFeed for MockFeed {
    fn subscribe(&self, user_id: &str) -> (FeedHandle, mpsc::Receiver<FeedMessage>) {
        let (tx, rx) = mpsc::channel(16);
        self.users.lock().unwrap().push(user_id.to_string());
        *self.tx.lock().unwrap() = Some(tx);
        (Box::new(()), rx)
    }
}
