use time::{Date, Weekday, macros::format_description};

/// Parse a stored `YYYY-MM-DD` date. Anything else is treated as absent.
pub fn parse_date(value: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");

    Date::parse(value.trim(), format).ok()
}

/// Parse a stored week list such as `"2,4"`.
///
/// Entries outside 1..=5 or without a leading number are dropped, order is kept.
pub fn parse_weeks_of_month(value: &str) -> Vec<u8> {
    value
        .split(',')
        .filter_map(|part| {
            let digits: String = part
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();

            digits.parse::<u8>().ok()
        })
        .filter(|week| (1..=5).contains(week))
        .collect()
}

/// Stored weekdays come in several spellings (`Thu`, `Thur`, `thursday`), only the
/// first three letters matter.
pub fn parse_day_of_week(value: &str) -> Option<Weekday> {
    let key: String = value.trim().chars().take(3).collect::<String>().to_lowercase();

    match key.as_str() {
        "sun" => Some(Weekday::Sunday),
        "mon" => Some(Weekday::Monday),
        "tue" => Some(Weekday::Tuesday),
        "wed" => Some(Weekday::Wednesday),
        "thu" => Some(Weekday::Thursday),
        "fri" => Some(Weekday::Friday),
        "sat" => Some(Weekday::Saturday),
        _ => None,
    }
}

pub fn day_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Sun",
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
    }
}

/// 1-based index of the 7-day bucket a date falls into.
pub fn week_of_month(date: Date) -> u8 {
    (date.day() - 1) / 7 + 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    OneOff,
    Weekly,
    Biweekly,
    Monthly,
    FirstMonthly,
    SecondMonthly,
    ThirdMonthly,
    FourthMonthly,
    SecondFourthMonthly,
    /// Stored as `1st_3rd_monthly` or `1nd_3th_monthly`. On the calendar it only
    /// lands on the first week unless `weeks_of_month` lists more, while the listing
    /// filter files it under "Biweekly".
    FirstThirdMonthly,
    Yearly,
    /// Empty or unknown values. Treated as weekly.
    Unrecognized(String),
}

impl Frequency {
    pub fn parse(value: &str) -> Self {
        let raw = value.trim().to_lowercase();

        match raw.as_str() {
            "one_off" => Self::OneOff,
            "weekly" => Self::Weekly,
            "biweekly" => Self::Biweekly,
            "yearly" => Self::Yearly,
            "1st_3rd_monthly" | "1nd_3th_monthly" => Self::FirstThirdMonthly,
            _ if raw.contains("monthly") => Self::from_monthly_prefix(&raw),
            _ => Self::Unrecognized(raw),
        }
    }

    fn from_monthly_prefix(raw: &str) -> Self {
        if raw.starts_with("1st") {
            Self::FirstMonthly
        } else if raw.starts_with("2nd_4th") {
            Self::SecondFourthMonthly
        } else if raw.starts_with("2nd") {
            Self::SecondMonthly
        } else if raw.starts_with("3rd") {
            Self::ThirdMonthly
        } else if raw.starts_with("4th") {
            Self::FourthMonthly
        } else {
            Self::Monthly
        }
    }

    /// Weeks of the month implied by the frequency name, `None` for kinds that are
    /// not monthly.
    pub fn monthly_weeks(&self) -> Option<&'static [u8]> {
        match self {
            Self::Monthly | Self::FirstMonthly | Self::FirstThirdMonthly => Some(&[1]),
            Self::SecondMonthly => Some(&[2]),
            Self::ThirdMonthly => Some(&[3]),
            Self::FourthMonthly => Some(&[4]),
            Self::SecondFourthMonthly => Some(&[2, 4]),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneOff => "One-off",
            Self::Weekly | Self::Unrecognized(_) => "Weekly",
            Self::Biweekly => "Every other week",
            Self::Monthly => "Monthly",
            Self::FirstMonthly => "1st of the month",
            Self::SecondMonthly => "2nd of the month",
            Self::ThirdMonthly => "3rd of the month",
            Self::FourthMonthly => "4th of the month",
            Self::SecondFourthMonthly => "2nd & 4th of the month",
            Self::FirstThirdMonthly => "1st & 3rd of the month",
            Self::Yearly => "Yearly",
        }
    }
}

/// Scheduling fields as they sit in storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawSchedule<'a> {
    pub frequency: Option<&'a str>,
    pub day_of_week: Option<&'a str>,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub weeks_of_month: Option<&'a str>,
    pub is_festival: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub frequency: Frequency,
    pub day_of_week: Option<Weekday>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub weeks_of_month: Vec<u8>,
    pub is_festival: bool,
}

impl From<RawSchedule<'_>> for Schedule {
    fn from(raw: RawSchedule<'_>) -> Self {
        Self {
            frequency: Frequency::parse(raw.frequency.unwrap_or_default()),
            day_of_week: raw.day_of_week.and_then(parse_day_of_week),
            start_date: raw.start_date.and_then(parse_date),
            end_date: raw.end_date.and_then(parse_date),
            weeks_of_month: raw
                .weeks_of_month
                .map(parse_weeks_of_month)
                .unwrap_or_default(),
            is_festival: raw.is_festival,
        }
    }
}

impl Schedule {
    /// Whether the event takes place on `date`.
    ///
    /// Never fails: incomplete scheduling data degrades to the weekly fallback or to
    /// `false`, so a half-filled record still shows up where it can be placed.
    pub fn occurs_on(&self, date: Date) -> bool {
        if self.start_date.is_some_and(|start| date < start)
            || self.end_date.is_some_and(|end| date > end)
        {
            return false;
        }

        if self.frequency == Frequency::OneOff {
            let Some(start) = self.start_date else {
                return false;
            };

            return match self.end_date {
                Some(end) if self.is_festival => start <= date && date <= end,
                _ => date == start,
            };
        }

        if self.is_festival {
            if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
                return start <= date && date <= end;
            }
        }

        if self.day_of_week != Some(date.weekday()) {
            return false;
        }

        let week = week_of_month(date);

        if self.frequency == Frequency::Biweekly {
            let Some(start) = self.start_date else {
                return true;
            };

            let weeks = (date - start).whole_days().div_euclid(7);

            return weeks.rem_euclid(2) == 0;
        }

        if let Some(named_weeks) = self.frequency.monthly_weeks() {
            if !self.weeks_of_month.is_empty() {
                return self.weeks_of_month.contains(&week);
            }

            return named_weeks.contains(&week);
        }

        if self.frequency == Frequency::Yearly {
            return self
                .start_date
                .is_some_and(|start| start.month() == date.month() && start.day() == date.day());
        }

        true
    }
}

/// Anything the calendar can place on dates.
pub trait Scheduled {
    fn schedule(&self) -> Schedule;
}

impl Scheduled for Schedule {
    fn schedule(&self) -> Schedule {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, Month, macros::date};

    fn schedule(raw: RawSchedule<'_>) -> Schedule {
        Schedule::from(raw)
    }

    fn matching_days(schedule: &Schedule, year: i32, month: Month) -> Vec<u8> {
        let mut date = Date::from_calendar_date(year, month, 1).unwrap();
        let mut days = vec![];

        while date.month() == month {
            if schedule.occurs_on(date) {
                days.push(date.day());
            }
            date += Duration::days(1);
        }

        days
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-11-20"), Some(date!(2025 - 11 - 20)));
        assert_eq!(parse_date(" 2025-11-20 "), Some(date!(2025 - 11 - 20)));
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date("11/20/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_weeks_of_month() {
        assert_eq!(parse_weeks_of_month("2,4"), vec![2, 4]);
        assert_eq!(parse_weeks_of_month(" 3 , 1 "), vec![3, 1]);
        assert_eq!(parse_weeks_of_month("0,6,x,5"), vec![5]);
        assert_eq!(parse_weeks_of_month("2nd"), vec![2]);
        assert!(parse_weeks_of_month("").is_empty());
    }

    #[test]
    fn test_parse_day_of_week_spellings() {
        assert_eq!(parse_day_of_week("Thur"), Some(Weekday::Thursday));
        assert_eq!(parse_day_of_week("thursday"), Some(Weekday::Thursday));
        assert_eq!(parse_day_of_week("Thu"), Some(Weekday::Thursday));
        assert_eq!(parse_day_of_week("SUN"), Some(Weekday::Sunday));
        assert_eq!(parse_day_of_week("Tues"), Some(Weekday::Tuesday));
        assert_eq!(parse_day_of_week("Th"), None);
        assert_eq!(parse_day_of_week(""), None);
        assert_eq!(day_key(Weekday::Thursday), "Thu");
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("ONE_OFF"), Frequency::OneOff);
        assert_eq!(Frequency::parse("2nd_4th_monthly"), Frequency::SecondFourthMonthly);
        assert_eq!(Frequency::parse("1nd_3th_monthly"), Frequency::FirstThirdMonthly);
        assert_eq!(Frequency::parse("1st_3rd_monthly"), Frequency::FirstThirdMonthly);
        assert_eq!(Frequency::parse("3rd_monthly_ish"), Frequency::ThirdMonthly);
        assert_eq!(Frequency::parse("Monthly"), Frequency::Monthly);
        assert_eq!(
            Frequency::parse("irregular"),
            Frequency::Unrecognized("irregular".to_owned())
        );
        assert_eq!(Frequency::parse(""), Frequency::Unrecognized(String::new()));
    }

    #[test]
    fn test_one_off_occurs_once_a_year() {
        let jam = schedule(RawSchedule {
            frequency: Some("one_off"),
            day_of_week: Some("Sat"),
            start_date: Some("2025-06-14"),
            ..Default::default()
        });

        let mut date = date!(2025 - 01 - 01);
        let mut hits = vec![];
        while date.year() == 2025 {
            if jam.occurs_on(date) {
                hits.push(date);
            }
            date += Duration::days(1);
        }

        assert_eq!(hits, vec![date!(2025 - 06 - 14)]);
    }

    #[test]
    fn test_one_off_without_start_date_never_occurs() {
        let jam = schedule(RawSchedule {
            frequency: Some("one_off"),
            day_of_week: Some("Sat"),
            ..Default::default()
        });

        assert!(matching_days(&jam, 2025, Month::June).is_empty());
    }

    #[test]
    fn test_one_off_festival_spans_range() {
        let jam = schedule(RawSchedule {
            frequency: Some("one_off"),
            start_date: Some("2025-11-20"),
            end_date: Some("2025-11-22"),
            is_festival: true,
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::November), vec![20, 21, 22]);
    }

    #[test]
    fn test_festival_ignores_weekday() {
        let jam = schedule(RawSchedule {
            frequency: Some("yearly"),
            day_of_week: Some("Mon"),
            start_date: Some("2025-08-29"),
            end_date: Some("2025-09-02"),
            is_festival: true,
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::August), vec![29, 30, 31]);
        assert_eq!(matching_days(&jam, 2025, Month::September), vec![1, 2]);
    }

    #[test]
    fn test_weekly_matches_every_weekday() {
        let jam = schedule(RawSchedule {
            frequency: Some("weekly"),
            day_of_week: Some("Fri"),
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::November), vec![7, 14, 21, 28]);
        assert_eq!(
            matching_days(&jam, 2025, Month::October),
            vec![3, 10, 17, 24, 31]
        );
    }

    #[test]
    fn test_weekly_needs_day_of_week() {
        let jam = schedule(RawSchedule {
            frequency: Some("weekly"),
            ..Default::default()
        });

        assert!(matching_days(&jam, 2025, Month::November).is_empty());
    }

    #[test]
    fn test_unrecognized_frequency_is_weekly() {
        let jam = schedule(RawSchedule {
            frequency: Some("irregular"),
            day_of_week: Some("Thur"),
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::November), vec![6, 13, 20, 27]);

        let jam = schedule(RawSchedule {
            day_of_week: Some("Thur"),
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::November), vec![6, 13, 20, 27]);
    }

    #[test]
    fn test_second_and_fourth_fridays() {
        let jam = schedule(RawSchedule {
            frequency: Some("2nd_4th_monthly"),
            day_of_week: Some("Fri"),
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::November), vec![14, 28]);
        // five Fridays: 1st, 8th, 15th, 22nd, 29th
        assert_eq!(matching_days(&jam, 2024, Month::March), vec![8, 22]);
    }

    #[test]
    fn test_weeks_of_month_override() {
        let jam = schedule(RawSchedule {
            frequency: Some("monthly"),
            day_of_week: Some("Mon"),
            weeks_of_month: Some("1,3"),
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::December), vec![1, 15]);

        let plain = schedule(RawSchedule {
            frequency: Some("monthly"),
            day_of_week: Some("Mon"),
            ..Default::default()
        });

        assert_eq!(matching_days(&plain, 2025, Month::December), vec![1]);
    }

    #[test]
    fn test_ordinal_monthly_rules() {
        let third = schedule(RawSchedule {
            frequency: Some("3rd_monthly"),
            day_of_week: Some("Wed"),
            ..Default::default()
        });
        assert_eq!(matching_days(&third, 2025, Month::November), vec![19]);

        let fourth = schedule(RawSchedule {
            frequency: Some("4th_monthly"),
            day_of_week: Some("Sun"),
            ..Default::default()
        });
        assert_eq!(matching_days(&fourth, 2025, Month::November), vec![23]);

        let first_third = schedule(RawSchedule {
            frequency: Some("1nd_3th_monthly"),
            day_of_week: Some("Tue"),
            ..Default::default()
        });
        assert_eq!(matching_days(&first_third, 2025, Month::November), vec![4]);

        let first_third = schedule(RawSchedule {
            frequency: Some("1nd_3th_monthly"),
            day_of_week: Some("Tue"),
            weeks_of_month: Some("1,3"),
            ..Default::default()
        });
        assert_eq!(
            matching_days(&first_third, 2025, Month::November),
            vec![4, 18]
        );
    }

    #[test]
    fn test_biweekly_phase() {
        let jam = schedule(RawSchedule {
            frequency: Some("biweekly"),
            day_of_week: Some("Mon"),
            start_date: Some("2025-11-03"),
            ..Default::default()
        });

        assert!(jam.occurs_on(date!(2025 - 11 - 03)));
        assert!(!jam.occurs_on(date!(2025 - 11 - 10)));
        assert!(jam.occurs_on(date!(2025 - 11 - 17)));
        assert!(!jam.occurs_on(date!(2025 - 10 - 20)));
    }

    #[test]
    fn test_biweekly_without_anchor_is_weekly() {
        let jam = schedule(RawSchedule {
            frequency: Some("biweekly"),
            day_of_week: Some("Mon"),
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::November), vec![3, 10, 17, 24]);
    }

    #[test]
    fn test_yearly_matches_anniversary_on_weekday() {
        let jam = schedule(RawSchedule {
            frequency: Some("yearly"),
            day_of_week: Some("Fri"),
            start_date: Some("2023-07-04"),
            ..Default::default()
        });

        // 2025-07-04 is a Friday, 2026-07-04 a Saturday
        assert!(jam.occurs_on(date!(2025 - 07 - 04)));
        assert!(!jam.occurs_on(date!(2026 - 07 - 04)));
        assert!(!jam.occurs_on(date!(2025 - 07 - 11)));

        let undated = schedule(RawSchedule {
            frequency: Some("yearly"),
            day_of_week: Some("Fri"),
            ..Default::default()
        });
        assert!(!undated.occurs_on(date!(2025 - 07 - 04)));
    }

    #[test]
    fn test_date_window_bounds_every_frequency() {
        let jam = schedule(RawSchedule {
            frequency: Some("weekly"),
            day_of_week: Some("Fri"),
            start_date: Some("2025-11-10"),
            end_date: Some("2025-11-25"),
            ..Default::default()
        });

        assert_eq!(matching_days(&jam, 2025, Month::November), vec![14, 21]);

        let open_start = schedule(RawSchedule {
            frequency: Some("weekly"),
            day_of_week: Some("Fri"),
            end_date: Some("2025-11-15"),
            ..Default::default()
        });

        assert_eq!(matching_days(&open_start, 2025, Month::November), vec![7, 14]);
    }

    #[test]
    fn test_invalid_dates_impose_no_constraint() {
        let jam = schedule(RawSchedule {
            frequency: Some("weekly"),
            day_of_week: Some("Fri"),
            start_date: Some("soon"),
            end_date: Some("2025-13-01"),
            ..Default::default()
        });

        assert_eq!(jam.start_date, None);
        assert_eq!(jam.end_date, None);
        assert_eq!(matching_days(&jam, 2025, Month::November), vec![7, 14, 21, 28]);
    }

    #[test]
    fn test_occurs_on_is_pure() {
        let jam = schedule(RawSchedule {
            frequency: Some("biweekly"),
            day_of_week: Some("Mon"),
            start_date: Some("2025-11-03"),
            ..Default::default()
        });

        for offset in 0..60 {
            let date = date!(2025 - 11 - 01) + Duration::days(offset);
            assert_eq!(jam.occurs_on(date), jam.occurs_on(date));
        }
    }
}
