// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled message, as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Stable row identifier.
    pub id: i64,

    /// Owner; every read and write is scoped to it.
    pub user_id: String,

    /// Destination phone number, searched as a plain substring.
    pub phone_number: String,

    /// Message payload.
    pub message_text: String,

    /// Delivery time, ISO-8601 UTC on the wire.
    pub scheduled_for: DateTime<Utc>,

    /// Delivery status.
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Whether this row may be selected for bulk cancellation.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

/// Status of a scheduled message.
///
/// The cancelled value is `cancelado` on the wire, a legacy of the original
/// deployment; it is kept verbatim. Values outside the known pair survive
/// round-trips through [`Other`](AppointmentStatus::Other).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentStatus {
    /// Waiting to be delivered.
    Pending,
    /// Cancelled before delivery.
    Cancelled,
    /// A legacy value not actively filtered for.
    Other(String),
}

const STATUS_PENDING: &str = "pending";
const STATUS_CANCELLED: &str = "cancelado";

impl AsRef<str> for AppointmentStatus {
    fn as_ref(&self) -> &str {
        match self {
            AppointmentStatus::Pending => STATUS_PENDING,
            AppointmentStatus::Cancelled => STATUS_CANCELLED,
            AppointmentStatus::Other(s) => s,
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for AppointmentStatus {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            STATUS_PENDING => AppointmentStatus::Pending,
            STATUS_CANCELLED => AppointmentStatus::Cancelled,
            other => AppointmentStatus::Other(other.to_string()),
        })
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        match value.parse() {
            Ok(status) => Ok(status),
            Err(never) => match never {},
        }
    }
}

/// Display order for the appointment list.
///
/// Two tiers: a pending row sorts strictly before a cancelled one, but the
/// status comparison fires only for that exact pairing. Every other pair,
/// including ones involving legacy statuses, is ordered by ascending
/// `scheduled_for`.
#[must_use]
pub fn compare_for_display(a: &Appointment, b: &Appointment) -> Ordering {
    use AppointmentStatus::{Cancelled, Pending};
    match (&a.status, &b.status) {
        (Pending, Cancelled) => Ordering::Less,
        (Cancelled, Pending) => Ordering::Greater,
        _ => a.scheduled_for.cmp(&b.scheduled_for),
    }
}
