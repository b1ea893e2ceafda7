//! Logical-day and calendar-week math.
//!
//! Days roll over at 06:00 local time, not midnight: a timestamp before the
//! reset hour belongs to the previous calendar day. Week windows are the
//! exception and run Monday 00:00:00.000 through Sunday 23:59:59.999 at
//! calendar midnight. That asymmetry is intentional: a 2 a.m. reflection
//! counts against yesterday's promise, but weekly summaries follow the
//! calendar.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Hour of the local day at which the daily cycle rolls over.
pub const RESET_HOUR: u32 = 6;

/// Logical-day key for `ts` under the default reset boundary.
pub fn day_key(ts: NaiveDateTime) -> String {
    day_key_with_reset(ts, RESET_HOUR)
}

/// Logical-day key with an explicit reset hour.
pub fn day_key_with_reset(ts: NaiveDateTime, reset_hour: u32) -> String {
    let date = if ts.hour() < reset_hour {
        ts.date() - Duration::days(1)
    } else {
        ts.date()
    };
    format_day_key(date)
}

/// `YYYY-MM-DD`, zero padded, lexicographically sortable.
pub fn format_day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short human form for history rows, e.g. `Mon, Aug 18`.
pub fn format_day_human(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Monday 00:00:00.000 through Sunday 23:59:59.999 of the calendar week
/// containing `ts`.
pub fn week_range(ts: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let monday = ts.date() - Duration::days(ts.date().weekday().num_days_from_monday() as i64);
    let sunday = monday + Duration::days(6);
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap();
    (monday.and_time(NaiveTime::MIN), sunday.and_time(end_of_day))
}
