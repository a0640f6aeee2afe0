//! Calendar helpers: seasons and the 12-month planning horizon.
//!
//! Northern-Hemisphere season bands. "Today" is always an explicit argument
//! so callers and tests control the clock.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::template::SeasonalAffinity;

/// Scheduling horizon: dates beyond `start + HORIZON_DAYS` are dropped.
pub const HORIZON_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn months(self) -> &'static [u32] {
        match self {
            Season::Spring => &[3, 4, 5],
            Season::Summer => &[6, 7, 8],
            Season::Fall => &[9, 10, 11],
            Season::Winter => &[12, 1, 2],
        }
    }

    pub fn for_month(month: u32) -> Season {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn for_date(date: NaiveDate) -> Season {
        Season::for_month(date.month())
    }
}

/// The `(year, month)` pairs a template prefers within the 12 months
/// beginning at `start`'s month, in calendar order.
pub fn preferred_months(affinity: SeasonalAffinity, start: NaiveDate) -> Vec<(i32, u32)> {
    let wanted = affinity.months();
    let mut out = Vec::new();
    let mut year = start.year();
    let mut month = start.month();
    for _ in 0..12 {
        if wanted.contains(&month) {
            out.push((year, month));
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    out
}

/// A concrete date inside a `(year, month)` pair from `preferred_months`.
pub fn month_day(year: i32, month: u32, day: u32) -> NaiveDate {
    // Days 1..=28 only; callers never ask for 29+.
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid calendar day {year}-{month}-{day}"))
}
