//! Millisecond epoch timestamps and calendar helpers
//!
//! All view state carries time as `u64` milliseconds since the Unix epoch.
//! The gallery date windows need two different comparison bases: `today` and
//! the month/year windows compare calendar fields (in UTC), while the week
//! window is a plain trailing elapsed duration. The helpers here keep that
//! distinction in one place.

use chrono::{DateTime, Months, TimeZone, Utc};

/// Milliseconds since the Unix epoch.
pub type EpochMs = u64;

/// Milliseconds in one day.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Milliseconds in a trailing week window.
pub const WEEK_MS: u64 = 7 * DAY_MS;

fn to_datetime(ts: EpochMs) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ts as i64).single()
}

/// Whether two timestamps fall on the same UTC calendar day.
///
/// Unrepresentable timestamps never match.
pub fn same_calendar_day(a: EpochMs, b: EpochMs) -> bool {
    match (to_datetime(a), to_datetime(b)) {
        (Some(a), Some(b)) => a.date_naive() == b.date_naive(),
        _ => false,
    }
}

/// The start of the day one calendar month before `now`, by year/month/day
/// arithmetic.
///
/// Days that do not exist in the target month clamp to its last day. The
/// result is truncated to midnight UTC: the window boundary is a calendar
/// day, not an instant, so the whole boundary day falls inside the window.
/// Returns `now` itself if the subtraction is unrepresentable, which makes
/// the window degenerate (nothing earlier passes) rather than silently
/// widening it.
pub fn one_calendar_month_back(now: EpochMs) -> EpochMs {
    calendar_months_back(now, 1)
}

/// The start of the day one calendar year before `now`, by year/month/day
/// arithmetic.
pub fn one_calendar_year_back(now: EpochMs) -> EpochMs {
    calendar_months_back(now, 12)
}

fn calendar_months_back(now: EpochMs, months: u32) -> EpochMs {
    to_datetime(now)
        .and_then(|dt| dt.checked_sub_months(Months::new(months)))
        .and_then(|dt| dt.date_naive().and_hms_opt(0, 0, 0))
        .map(|day_start| day_start.and_utc().timestamp_millis() as u64)
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ms(y: i32, m: u32, d: u32, h: u32) -> EpochMs {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis() as u64
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        assert!(same_calendar_day(ms(2025, 3, 14, 1), ms(2025, 3, 14, 23)));
        assert!(!same_calendar_day(ms(2025, 3, 14, 23), ms(2025, 3, 15, 0)));
    }

    #[test]
    fn month_back_is_calendar_arithmetic_not_30_days() {
        // March 31 minus one calendar month clamps to February's last day.
        let now = ms(2025, 3, 31, 12);
        let back = one_calendar_month_back(now);
        assert_eq!(back, ms(2025, 2, 28, 0));
    }

    #[test]
    fn year_back_keeps_month_and_day() {
        let now = ms(2025, 6, 15, 9);
        assert_eq!(one_calendar_year_back(now), ms(2024, 6, 15, 0));
    }

    #[test]
    fn window_boundary_covers_the_whole_day() {
        // The boundary is day-granular: an instant earlier than now's
        // time-of-day on the boundary day is still inside the window.
        let now = ms(2025, 3, 14, 12);
        assert!(one_calendar_month_back(now) <= ms(2025, 2, 14, 8));
        assert!(one_calendar_month_back(now) > ms(2025, 2, 13, 23));
    }
}
