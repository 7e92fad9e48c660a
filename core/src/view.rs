// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The appointment view: synchronizes the row list with the backend and
//! drives selection and cancellation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::appointment::compare_for_display;
use crate::datetime::DayWindow;
use crate::error::ViewError;
use crate::service::{AppointmentService, ChangeFeed, FeedHandle, FeedMessage};
use crate::state::ViewState;

/// How long change notifications are coalesced before the single re-fetch
/// they trigger. Full re-fetch per burst is the chosen simplicity tradeoff
/// over maintaining a differential view.
const REFETCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Outcome of a bulk cancel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Nothing was selected; no request was made.
    NothingSelected,
    /// The given number of rows were cancelled.
    Cancelled(usize),
}

/// View over one user's scheduled messages.
///
/// Clones share the same state; observers get it through
/// [`subscribe`](AppointmentView::subscribe). All cancel operations are to
/// be invoked only after the user confirmed the action; prompting is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct AppointmentView {
    shared: Arc<Shared>,
}

struct Shared {
    service: Arc<dyn AppointmentService>,
    state: watch::Sender<ViewState>,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared").finish_non_exhaustive()
    }
}

struct Inner {
    user: Option<String>,
    /// Monotonic refresh token. Bumped by every refresh and every identity
    /// change, so a response that raced a newer request is discarded.
    epoch: u64,
    feed: Option<ActiveFeed>,
}

struct ActiveFeed {
    _handle: FeedHandle,
    task: JoinHandle<()>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock()
            && let Some(feed) = inner.feed.take()
        {
            feed.task.abort();
        }
    }
}

impl AppointmentView {
    /// Creates a view with no identity bound.
    #[must_use]
    pub fn new(service: Arc<dyn AppointmentService>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            shared: Arc::new(Shared {
                service,
                state,
                inner: Mutex::new(Inner {
                    user: None,
                    epoch: 0,
                    feed: None,
                }),
            }),
        }
    }

    /// Observes the view state; a new value is published on every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.shared.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.shared.state.borrow().clone()
    }

    /// The currently bound user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        self.lock_inner().user.clone()
    }

    /// Binds the view to `user` (or to no identity) and performs the
    /// initial fetch.
    ///
    /// Any in-flight refresh for the previous identity is orphaned, its
    /// change feed torn down, and all state cleared before the switch, so
    /// rows can never leak across identities. When a `feed` is given and a
    /// user is bound, a background task re-fetches on every change burst.
    pub async fn bind_user(
        &self,
        user: Option<String>,
        feed: Option<&dyn ChangeFeed>,
    ) -> Result<(), ViewError> {
        {
            let mut inner = self.lock_inner();
            if let Some(old) = inner.feed.take() {
                old.task.abort();
            }
            inner.epoch += 1;
            inner.user.clone_from(&user);
        }

        self.shared.state.send_modify(|s| *s = ViewState::default());

        if let (Some(user), Some(feed)) = (user.as_deref(), feed) {
            let (handle, rx) = feed.subscribe(user);
            let task = tokio::spawn(run_feed(self.clone(), rx));
            self.lock_inner().feed = Some(ActiveFeed {
                _handle: handle,
                task,
            });
        }

        self.refresh().await
    }

    /// Re-fetches the appointment list for the bound user.
    ///
    /// With no identity bound this publishes an empty list and issues no
    /// backend call. A refresh superseded by a newer one (or by an identity
    /// switch) discards its response without publishing.
    pub async fn refresh(&self) -> Result<(), ViewError> {
        let (user, token) = {
            let mut inner = self.lock_inner();
            inner.epoch += 1;
            (inner.user.clone(), inner.epoch)
        };

        let Some(user) = user else {
            self.shared.state.send_modify(|s| {
                s.appointments.clear();
                s.selection.clear();
                s.loading = false;
                s.error = None;
            });
            return Ok(());
        };

        self.shared.state.send_modify(|s| s.loading = true);

        let window = DayWindow::containing(&Local::now());
        let result = self.shared.service.list(&user, &window).await;

        if self.lock_inner().epoch != token {
            tracing::debug!(token, "discarding superseded refresh");
            return Ok(());
        }

        match result {
            Ok(mut rows) => {
                rows.sort_by(compare_for_display);
                self.shared.state.send_modify(|s| {
                    s.appointments = rows;
                    s.loading = false;
                    s.error = None;
                    s.prune_selection();
                });
                Ok(())
            }
            Err(e) => {
                let err = ViewError::Fetch(e.to_string());
                tracing::warn!(%user, %err, "refresh failed");
                self.shared.state.send_modify(|s| {
                    s.appointments.clear();
                    s.selection.clear();
                    s.loading = false;
                    s.error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Sets the client-side search term and re-applies the selection
    /// invariant: ids hidden by the new term are dropped.
    pub fn set_search(&self, term: &str) {
        self.shared.state.send_modify(|s| {
            s.search = term.to_string();
            s.prune_selection();
        });
    }

    /// Toggles a row in the selection. Adding requires the row to be
    /// visible and not cancelled; removing always works. A no-op for
    /// cancelled or unknown ids.
    pub fn toggle_selection(&self, id: i64) {
        self.shared.state.send_modify(|s| {
            if !s.selection.remove(&id) && s.visible_selectable_ids().contains(&id) {
                s.selection.insert(id);
            }
        });
    }

    /// Selects every visible non-cancelled row, or clears the selection.
    pub fn select_all_visible(&self, select: bool) {
        self.shared.state.send_modify(|s| {
            s.selection = if select {
                s.visible_selectable_ids()
            } else {
                Default::default()
            };
        });
    }

    /// Cancels a single appointment, then re-fetches.
    ///
    /// No optimistic update: nothing changes locally until the server
    /// confirmed the write. A failed request publishes the error notice
    /// and leaves all other state untouched.
    pub async fn cancel_one(&self, id: i64) -> Result<(), ViewError> {
        let user = self.require_user()?;
        match self.shared.service.cancel(&user, &[id]).await {
            Ok(_) => self.refresh().await,
            Err(e) => {
                let err = ViewError::Mutation(e.to_string());
                tracing::warn!(id, %err, "cancel failed");
                self.shared.state.send_modify(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// Cancels every selected appointment in one batch request.
    ///
    /// With an empty selection this is a no-op reporting
    /// [`CancelOutcome::NothingSelected`]. On success the selection is
    /// cleared and the list re-fetched; on failure the selection is left
    /// untouched.
    pub async fn cancel_selected(&self) -> Result<CancelOutcome, ViewError> {
        let ids: Vec<i64> = self
            .shared
            .state
            .borrow()
            .selection
            .iter()
            .copied()
            .collect();
        if ids.is_empty() {
            return Ok(CancelOutcome::NothingSelected);
        }

        let user = self.require_user()?;
        match self.shared.service.cancel(&user, &ids).await {
            Ok(_) => {
                self.shared.state.send_modify(|s| s.selection.clear());
                self.refresh().await?;
                Ok(CancelOutcome::Cancelled(ids.len()))
            }
            Err(e) => {
                let err = ViewError::Mutation(e.to_string());
                tracing::warn!(count = ids.len(), %err, "bulk cancel failed");
                self.shared.state.send_modify(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    fn require_user(&self) -> Result<String, ViewError> {
        self.current_user()
            .ok_or_else(|| ViewError::Auth("no identity bound".to_string()))
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.shared.inner.lock().expect("view state mutex poisoned")
    }

    fn publish_degraded(&self, reason: &str) {
        let err = ViewError::Subscription(reason.to_string());
        tracing::warn!(%err, "change feed degraded");
        self.shared
            .state
            .send_modify(|s| s.error = Some(err.to_string()));
    }
}

/// Consumes a change feed, coalescing event bursts into single re-fetches.
async fn run_feed(view: AppointmentView, mut rx: mpsc::Receiver<FeedMessage>) {
    while let Some(msg) = rx.recv().await {
        match msg {
            FeedMessage::Change(change) => {
                tracing::debug!(?change, "change notification");
                let deadline = tokio::time::sleep(REFETCH_DEBOUNCE);
                tokio::pin!(deadline);
                loop {
                    tokio::select! {
                        () = &mut deadline => break,
                        more = rx.recv() => match more {
                            Some(FeedMessage::Change(_)) => {}
                            Some(FeedMessage::Degraded(reason)) => view.publish_degraded(&reason),
                            Some(FeedMessage::Resumed) => {}
                            None => break,
                        },
                    }
                }
                if let Err(err) = view.refresh().await {
                    tracing::warn!(%err, "re-fetch after change failed");
                }
            }
            FeedMessage::Degraded(reason) => view.publish_degraded(&reason),
            FeedMessage::Resumed => {
                tracing::info!("change feed resumed, re-fetching");
                if let Err(err) = view.refresh().await {
                    tracing::warn!(%err, "re-fetch after resume failed");
                }
            }
        }
    }
    tracing::debug!("change feed closed");
}
