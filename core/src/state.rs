// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use crate::appointment::Appointment;

/// Observable state of the appointment view.
///
/// One struct instead of scattered variables: the presentation layer holds
/// a `watch::Receiver<ViewState>` and re-renders on every published value.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Fetched rows, already in display order.
    pub appointments: Vec<Appointment>,

    /// True while a refresh is in flight.
    pub loading: bool,

    /// Last user-visible error notice, if any.
    pub error: Option<String>,

    /// Client-side search term, matched as a substring of `phone_number`.
    pub search: String,

    /// Ids selected for bulk cancellation. Never contains a cancelled row,
    /// and always a subset of the visible rows.
    pub selection: BTreeSet<i64>,
}

impl ViewState {
    /// Rows passing the search filter, in display order.
    ///
    /// The match is a case-sensitive substring test on the phone number;
    /// an empty term passes everything. Purely presentational: it never
    /// affects what was fetched.
    pub fn visible(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.phone_number.contains(&self.search))
    }

    /// Ids of visible rows that may be selected (not cancelled).
    #[must_use]
    pub fn visible_selectable_ids(&self) -> BTreeSet<i64> {
        self.visible()
            .filter(|a| a.is_selectable())
            .map(|a| a.id)
            .collect()
    }

    /// Whether the given row is currently selected.
    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selection.contains(&id)
    }

    /// Drops selected ids that are no longer visible and selectable.
    /// Called after every change to the visible set.
    pub(crate) fn prune_selection(&mut self) {
        let keep = self.visible_selectable_ids();
        self.selection.retain(|id| keep.contains(id));
    }
}
