use crate::calendar::{DAYS_PER_WEEK, add_days, days_between};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The due date is gestational week 40 by convention.
pub const DUE_WEEK: i32 = 40;
pub const MAX_WEEK: i32 = 42;

/// Calendar date at `week` weeks of gestation for a pregnancy due on `due_date`.
///
/// Total over any integer week; week 40 always yields `due_date`.
pub fn week_to_date(due_date: NaiveDate, week: i32) -> NaiveDate {
    let weeks_before_due = i64::from(DUE_WEEK) - i64::from(week);
    add_days(due_date, -weeks_before_due * DAYS_PER_WEEK)
}

/// Gestational age (whole weeks plus remaining days) on `date`.
pub fn gestational_age(due_date: NaiveDate, date: NaiveDate) -> GestationalAge {
    let days = days_between(due_date, date) + i64::from(DUE_WEEK) * DAYS_PER_WEEK;
    GestationalAge {
        weeks: days.div_euclid(DAYS_PER_WEEK),
        days: days.rem_euclid(DAYS_PER_WEEK) as u32,
    }
}

/// A gestational week restricted to the clinically meaningful range [0, 42].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct GestationalWeek(i32);

impl GestationalWeek {
    pub const DUE: GestationalWeek = GestationalWeek(DUE_WEEK);

    pub fn new(week: i32) -> Option<Self> {
        (0..=MAX_WEEK).contains(&week).then_some(Self(week))
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn date_for(self, due_date: NaiveDate) -> NaiveDate {
        week_to_date(due_date, self.0)
    }
}

impl TryFrom<i32> for GestationalWeek {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("week {value} outside 0..={MAX_WEEK}"))
    }
}

impl From<GestationalWeek> for i32 {
    fn from(value: GestationalWeek) -> Self {
        value.0
    }
}

impl fmt::Display for GestationalWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestationalAge {
    pub weeks: i64,
    pub days: u32,
}

impl fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}w{}d", self.weeks, self.days)
    }
}
