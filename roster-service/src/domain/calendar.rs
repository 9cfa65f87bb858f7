use chrono::{Datelike, NaiveDate, Weekday};
use shared::{DomainError, DomainResult};
use std::collections::BTreeSet;

/// The calendar frame a roster is generated against: one month plus the
/// public-holiday day numbers supplied by the caller (the holiday oracle is
/// an external collaborator; we only consume its verdicts).
#[derive(Debug, Clone)]
pub struct MonthSpan {
    year: i32,
    month: u32,
    last_day: u32,
    holidays: BTreeSet<u32>,
}

impl MonthSpan {
    pub fn new(year: i32, month: u32, holidays: BTreeSet<u32>) -> DomainResult<Self> {
        if year < 1 {
            return Err(DomainError::InvalidInput(format!(
                "year must be positive, got {}",
                year
            )));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            DomainError::InvalidInput(format!("invalid month {}-{:02}", year, month))
        })?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| DomainError::InvalidInput(format!("invalid month {}-{:02}", year, month)))?;

        let last_day = (next_month - first).num_days() as u32;
        let holidays = holidays
            .into_iter()
            .filter(|d| (1..=last_day).contains(d))
            .collect();

        Ok(Self {
            year,
            month,
            last_day,
            holidays,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn last_day(&self) -> u32 {
        self.last_day
    }

    /// Day numbers of the month, 1-based.
    pub fn days(&self) -> impl Iterator<Item = u32> {
        1..=self.last_day
    }

    pub fn date(&self, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .unwrap_or_else(|| panic!("day {} outside {}-{:02}", day, self.year, self.month))
    }

    pub fn is_weekend(&self, day: u32) -> bool {
        matches!(self.date(day).weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_holiday(&self, day: u32) -> bool {
        self.holidays.contains(&day)
    }

    /// Days where the combined day-evening shift replaces separate D and E
    /// coverage, and where assistant nurses rest instead of taking `M`.
    pub fn is_holiday_or_weekend(&self, day: u32) -> bool {
        self.is_weekend(day) || self.is_holiday(day)
    }
}
