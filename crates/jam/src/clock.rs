use std::sync::LazyLock;

use regex::Regex;

static TWENTY_FOUR_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid regex"));

static TWELVE_HOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?\s*(am|pm)$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time `{0}`, use 19:30 or 7:30 pm")]
pub struct InvalidTime(pub String);

/// Normalise a user supplied time of day to `HH:MM:SS`.
///
/// Accepts `HH:MM`, `HH:MM:SS` and `H[:MM] am|pm`. An empty value is `Ok(None)`.
pub fn parse_time_to_db(raw: &str) -> Result<Option<String>, InvalidTime> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let number = |m: Option<regex::Match<'_>>| m.and_then(|m| m.as_str().parse::<u32>().ok());

    if let Some(caps) = TWENTY_FOUR_HOUR.captures(value) {
        let hours = number(caps.get(1)).unwrap_or(99);
        let minutes = number(caps.get(2)).unwrap_or(99);
        let seconds = number(caps.get(3)).unwrap_or(0);

        if hours <= 23 && minutes <= 59 && seconds <= 59 {
            return Ok(Some(format!("{hours:02}:{minutes:02}:{seconds:02}")));
        }
    }

    if let Some(caps) = TWELVE_HOUR.captures(value) {
        let mut hours = number(caps.get(1)).unwrap_or(99);
        let minutes = number(caps.get(2)).unwrap_or(0);
        let pm = caps
            .get(3)
            .is_some_and(|m| m.as_str().eq_ignore_ascii_case("pm"));

        if hours == 12 {
            hours = 0;
        }
        if pm {
            hours += 12;
        }

        if hours <= 23 && minutes <= 59 {
            return Ok(Some(format!("{hours:02}:{minutes:02}:00")));
        }
    }

    Err(InvalidTime(value.to_owned()))
}

/// `19:00:00` -> `19:00`.
pub fn short_time(value: &str) -> &str {
    value.get(..5).unwrap_or(value)
}
