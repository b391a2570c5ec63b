use time::{Date, Duration, Month};

use crate::schedule::Scheduled;

/// Sunday-first column headers.
pub const WEEKDAY_HEADERS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Events shown inside a day cell before collapsing into `+N more`.
pub const VISIBLE_EVENTS_PER_DAY: usize = 3;

const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first: Date,
}

impl CalendarMonth {
    pub fn new(year: i32, month: Month) -> Option<Self> {
        Date::from_calendar_date(year, month, 1)
            .ok()
            .map(|first| Self { first })
    }

    pub fn containing(date: Date) -> Self {
        Self {
            first: date.replace_day(1).unwrap_or(date),
        }
    }

    /// Month selected by `?year=&month=` (month is 1-based). Each field falls back
    /// to today's value on its own when missing or out of range.
    pub fn from_query(year: Option<&str>, month: Option<&str>, today: Date) -> Self {
        let year = year
            .and_then(|v| v.trim().parse::<i32>().ok())
            .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
            .unwrap_or(today.year());

        let month = month
            .and_then(|v| v.trim().parse::<u8>().ok())
            .and_then(|m| Month::try_from(m).ok())
            .unwrap_or(today.month());

        Self::new(year, month).unwrap_or_else(|| Self::containing(today))
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        self.first.month()
    }

    pub fn month_number(&self) -> u8 {
        self.first.month() as u8
    }

    pub fn first_day(&self) -> Date {
        self.first
    }

    pub fn days(&self) -> u8 {
        self.first.month().length(self.first.year())
    }

    /// 0 = Sunday.
    pub fn first_weekday_index(&self) -> u8 {
        self.first.weekday().number_days_from_sunday()
    }

    pub fn previous(&self) -> Self {
        let (year, month) = match self.first.month() {
            Month::January => (self.first.year() - 1, Month::December),
            month => (self.first.year(), month.previous()),
        };

        Self::new(year, month).unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        let (year, month) = match self.first.month() {
            Month::December => (self.first.year() + 1, Month::January),
            month => (self.first.year(), month.next()),
        };

        Self::new(year, month).unwrap_or(*self)
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.first.month(), self.first.year())
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        (0..self.days()).map(|offset| self.first + Duration::days(offset.into()))
    }
}

#[derive(Debug)]
pub struct DayCell<'a, T> {
    pub date: Option<Date>,
    pub is_today: bool,
    pub events: Vec<&'a T>,
}

impl<T> DayCell<'_, T> {
    fn blank() -> Self {
        Self {
            date: None,
            is_today: false,
            events: vec![],
        }
    }

    pub fn day(&self) -> Option<u8> {
        self.date.map(|d| d.day())
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }

    pub fn visible_events(&self) -> &[&T] {
        &self.events[..self.events.len().min(VISIBLE_EVENTS_PER_DAY)]
    }

    pub fn hidden_count(&self) -> usize {
        self.events.len().saturating_sub(VISIBLE_EVENTS_PER_DAY)
    }
}

#[derive(Debug)]
pub struct MonthGrid<'a, T> {
    pub month: CalendarMonth,
    pub rows: Vec<Vec<DayCell<'a, T>>>,
}

impl<'a, T: Scheduled> MonthGrid<'a, T> {
    /// Lay out `month` Sunday-first, placing every event on each day it occurs.
    /// Events keep their input order inside a cell.
    pub fn build(month: CalendarMonth, events: &'a [T], today: Date) -> Self {
        let schedules = events.iter().map(|e| e.schedule()).collect::<Vec<_>>();

        let mut cells = (0..month.first_weekday_index())
            .map(|_| DayCell::blank())
            .collect::<Vec<_>>();

        for date in month.dates() {
            let events = events
                .iter()
                .zip(schedules.iter())
                .filter(|(_, schedule)| schedule.occurs_on(date))
                .map(|(event, _)| event)
                .collect();

            cells.push(DayCell {
                date: Some(date),
                is_today: date == today,
                events,
            });
        }

        while cells.len() % 7 != 0 {
            cells.push(DayCell::blank());
        }

        let mut rows = Vec::with_capacity(cells.len() / 7);
        let mut cells = cells.into_iter().peekable();
        while cells.peek().is_some() {
            rows.push(cells.by_ref().take(7).collect());
        }

        Self { month, rows }
    }

    pub fn event_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(|cell| cell.events.len())
            .sum()
    }
}
