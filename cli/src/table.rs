// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Plain-text rendering of the view state.

use agendo_core::{AppointmentStatus, ViewState};
use chrono::Local;
use colored::Colorize;

/// Prints the visible rows as a table.
///
/// Timestamps are rendered in the system's local timezone; no hard-coded
/// offsets.
pub fn print_state(state: &ViewState) {
    if let Some(error) = &state.error {
        eprintln!("{}", error.red());
    }

    let visible: Vec<_> = state.visible().collect();
    if visible.is_empty() {
        let note = if state.search.is_empty() {
            "No appointments for today."
        } else {
            "No appointments match the search."
        };
        println!("{}", note.dimmed());
        return;
    }

    println!(
        "{:>3} {:>6}  {:<15} {:<16} {:<10} MESSAGE",
        "", "ID", "PHONE", "SCHEDULED", "STATUS"
    );
    for appointment in visible {
        let mark = if state.is_selected(appointment.id) {
            "[x]"
        } else {
            "   "
        };
        let scheduled = appointment
            .scheduled_for
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        // pad before colouring so ANSI escapes don't skew the columns
        let padded = format!("{:<10}", appointment.status.as_ref());
        let status = match &appointment.status {
            AppointmentStatus::Pending => padded.yellow(),
            AppointmentStatus::Cancelled => padded.red().dimmed(),
            AppointmentStatus::Other(_) => padded.normal(),
        };
        println!(
            "{mark} {:>6}  {:<15} {:<16} {} {}",
            appointment.id,
            appointment.phone_number,
            scheduled,
            status,
            truncate(&appointment.message_text, 48),
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let mut truncated: String = text.chars().take(max_chars).collect();
    if truncated.len() < text.len() {
        truncated.push('…');
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("hello", 48), "hello");
    }

    #[test]
    fn truncate_marks_long_text() {
        let long = "x".repeat(60);
        let out = truncate(&long, 48);
        assert_eq!(out.chars().count(), 49);
        assert!(out.ends_with('…'));
    }
}
