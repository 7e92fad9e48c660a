// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use agendo_core::{Appointment, AppointmentStatus};
use chrono::{TimeZone, Utc};

/// A pending appointment scheduled at the given hour of 2024-01-02 UTC.
pub fn pending(id: i64, hour: u32) -> Appointment {
    appointment(id, AppointmentStatus::Pending, hour)
}

/// A cancelled appointment scheduled at the given hour of 2024-01-02 UTC.
pub fn cancelled(id: i64, hour: u32) -> Appointment {
    appointment(id, AppointmentStatus::Cancelled, hour)
}

/// Replaces the fixture phone number.
pub fn with_phone(mut appointment: Appointment, phone: &str) -> Appointment {
    appointment.phone_number = phone.to_string();
    appointment
}

fn appointment(id: i64, status: AppointmentStatus, hour: u32) -> Appointment {
    Appointment {
        id,
        user_id: "u1".to_string(),
        phone_number: format!("1199999{id:04}"),
        message_text: format!("message {id}"),
        scheduled_for: Utc.with_ymd_and_hms(2024, 1, 2, hour, 0, 0).unwrap(),
        status,
    }
}
