use time::{Date, OffsetDateTime};
use time_tz::{ToTimezone, timezones};

/// Calendar date of "now" in the given IANA timezone.
///
/// Unknown timezone names fall back to UTC.
pub fn today(tz: &str) -> Date {
    let now = OffsetDateTime::now_utc();

    match timezones::get_by_name(tz) {
        Some(tz) => now.to_timezone(tz).date(),
        _ => now.date(),
    }
}

pub fn is_known_timezone(tz: &str) -> bool {
    timezones::get_by_name(tz).is_some()
}
