// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Agendo core: keeps a user's scheduled-message appointments synchronized
//! with the backend and drives selection and bulk cancellation.
//!
//! The [`AppointmentView`] owns the observable [`ViewState`] (rows, loading
//! flag, error notice, search term, selection) and re-fetches on demand or
//! whenever the backend reports a change. The backend is reached through
//! the [`AppointmentService`] and [`ChangeFeed`] traits; the
//! [`remote::SupabaseAppointments`] adapter implements both against a
//! Supabase project.

mod appointment;
mod datetime;
mod error;
pub mod remote;
mod service;
mod state;
mod view;

pub use crate::appointment::{Appointment, AppointmentStatus, compare_for_display};
pub use crate::datetime::DayWindow;
pub use crate::error::{ServiceError, ViewError};
pub use crate::service::{AppointmentService, Change, ChangeFeed, FeedHandle, FeedMessage};
pub use crate::state::ViewState;
pub use crate::view::{AppointmentView, CancelOutcome};
