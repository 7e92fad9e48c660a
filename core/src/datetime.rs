// SPDX-FileCopyrightText: 2026 Agendo contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Days, NaiveDateTime, NaiveTime, TimeZone, Utc, offset::LocalResult};

/// The half-open fetch window `[start_of_today, start_of_tomorrow)`,
/// taken at local midnight and carried as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// Local midnight of the reference day, in UTC.
    pub start: DateTime<Utc>,
    /// Local midnight of the following day, in UTC (exclusive).
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The window covering the day containing `now` in `now`'s timezone.
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 must exist in NaiveTime");
        let today = NaiveDateTime::new(now.date_naive(), midnight);
        let tomorrow = today + Days::new(1);

        let tz = now.timezone();
        Self {
            start: from_local_datetime(&tz, today).with_timezone(&Utc),
            end: from_local_datetime(&tz, tomorrow).with_timezone(&Utc),
        }
    }
}

/// Convert the `NaiveDateTime` to the given timezone, handling local time
/// ambiguities:
/// - `Single(dt)` returns directly;
/// - `Ambiguous(a, b)` takes the earlier one;
/// - `None` (local time does not exist, e.g., due to DST transition): falls
///   back to the UTC combination and then converts.
fn from_local_datetime<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(x) => x,
        LocalResult::Ambiguous(a, b) => {
            if a <= b { a } else { b }
        }
        LocalResult::None => Utc.from_utc_datetime(&naive).with_timezone(tz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn window_spans_exactly_one_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 15, 30, 0).unwrap();
        let window = DayWindow::containing(&now);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn window_uses_local_midnight_converted_to_utc() {
        // UTC-3: local midnight is 03:00 UTC
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 6, 10, 22, 0, 0).unwrap();
        let window = DayWindow::containing(&now);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 6, 10, 3, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 6, 11, 3, 0, 0).unwrap());
    }

    #[test]
    fn window_contains_now() {
        let tz = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 1, 0, 10, 0).unwrap();
        let window = DayWindow::containing(&now);
        let now_utc = now.with_timezone(&Utc);
        assert!(window.start <= now_utc && now_utc < window.end);
        assert_eq!(window.start.minute(), 30); // half-hour offset zone
    }
}
