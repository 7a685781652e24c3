//! Per-day contest lookup and the month view behind the calendar page.
//!
//! Days are UTC calendar days of `start_time`. The view is Sunday-first:
//! `leading_blanks` is the number of empty cells before day 1.

use chrono::{Datelike, Months, NaiveDate};
use codenotify_types::Contest;

/// Contests starting on `date`, in collection order.
pub fn contests_on(contests: &[Contest], date: NaiveDate) -> Vec<&Contest> {
    contests
        .iter()
        .filter(|c| c.start_time.date_naive() == date)
        .collect()
}

/// Highlight of a calendar cell. `Today` wins over `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMark {
    /// The current day.
    Today,
    /// At least one contest starts this day.
    Active,
    /// Nothing to highlight.
    Plain,
}

/// One day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// Day of month, starting at 1.
    pub day: u32,
    /// Number of contests starting that day.
    pub contests: usize,
    /// Cell highlight.
    pub mark: DayMark,
}

/// A month of day cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    /// First day of the month.
    pub first: NaiveDate,
    /// Empty cells before day 1 in a Sunday-first week.
    pub leading_blanks: u32,
    /// One entry per day of the month.
    pub days: Vec<CalendarDay>,
}

impl MonthView {
    /// Build the view for `year`/`month`. Returns `None` for an invalid month.
    pub fn build(contests: &[Contest], year: i32, month: u32, today: NaiveDate) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = first.checked_add_months(Months::new(1))?;

        let days = first
            .iter_days()
            .take_while(|d| *d < next)
            .map(|date| {
                let count = contests_on(contests, date).len();
                let mark = if date == today {
                    DayMark::Today
                } else if count > 0 {
                    DayMark::Active
                } else {
                    DayMark::Plain
                };
                CalendarDay {
                    day: date.day(),
                    contests: count,
                    mark,
                }
            })
            .collect();

        Some(Self {
            first,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    /// Heading such as `December 2024`.
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Days with at least one contest.
    pub fn active_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.contests > 0)
    }
}
