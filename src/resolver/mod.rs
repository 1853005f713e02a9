//! Weekday alignment: turns a raw target date (or week range) into one or more
//! calendar dates that satisfy a day-of-week constraint.

pub mod clinic;
pub mod fridays;
pub mod month;
pub mod rotation;

pub use clinic::clinic_day_pair;
pub use fridays::{bracketing_pair, on_or_after, range_bracketing_pair};
pub use month::month_relative_before_due;
pub use rotation::{LabRotation, WEEKDAY_ANCHOR};

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Two candidate dates offered for one appointment, earliest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatePair {
    pub first: NaiveDate,
    pub second: NaiveDate,
}

impl DatePair {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn dates(&self) -> [NaiveDate; 2] {
        [self.first, self.second]
    }
}

/// How a milestone's target date is aligned to a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Alignment {
    /// The target date itself, no alignment.
    #[default]
    Exact,
    /// The target if it already falls on `weekday`, else the next one.
    OnOrAfter { weekday: Weekday },
    /// The two `weekday`s strictly before and strictly after the target.
    Bracketing { weekday: Weekday },
    /// A `weekday` touching the range plus the one a week later.
    RangeBracketing { weekday: Weekday },
    /// Two in-office days found after stepping back from the target.
    ClinicPair {
        first: Weekday,
        second: Weekday,
        #[serde(default = "clinic::default_lookback_days")]
        lookback_days: i64,
    },
    /// The biweekly lab rotation anchored on the table's rotation anchor.
    Rotation,
}

impl Alignment {
    pub const fn monday_wednesday() -> Self {
        Alignment::ClinicPair {
            first: Weekday::Mon,
            second: Weekday::Wed,
            lookback_days: clinic::LOOKBACK_DAYS,
        }
    }

    pub const fn friday_pair() -> Self {
        Alignment::Bracketing {
            weekday: Weekday::Fri,
        }
    }

    /// Short policy name used by the CSV table format.
    pub fn name(&self) -> &'static str {
        match self {
            Alignment::Exact => "exact",
            Alignment::OnOrAfter { .. } => "on_or_after",
            Alignment::Bracketing { .. } => "bracketing",
            Alignment::RangeBracketing { .. } => "range_bracketing",
            Alignment::ClinicPair { .. } => "clinic_pair",
            Alignment::Rotation => "rotation",
        }
    }
}

/// Result of aligning a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aligned {
    Single(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
    Pair(DatePair),
}

/// Aligns the inclusive window `[start, end]`; a single-week target passes the
/// same date twice. Point policies use the window midpoint.
pub fn align(
    alignment: Alignment,
    start: NaiveDate,
    end: NaiveDate,
    rotation: &LabRotation,
) -> Aligned {
    let target = midpoint(start, end);
    match alignment {
        Alignment::Exact if start == end => Aligned::Single(start),
        Alignment::Exact => Aligned::Range { start, end },
        Alignment::OnOrAfter { weekday } => Aligned::Single(on_or_after(target, weekday)),
        Alignment::Bracketing { weekday } => Aligned::Pair(bracketing_pair(target, weekday)),
        Alignment::RangeBracketing { weekday } => {
            Aligned::Pair(range_bracketing_pair(start, end, weekday))
        }
        Alignment::ClinicPair {
            first,
            second,
            lookback_days,
        } => Aligned::Pair(clinic_day_pair(target, first, second, lookback_days)),
        Alignment::Rotation => Aligned::Pair(rotation.pair_for(target)),
    }
}

fn midpoint(start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = crate::calendar::days_between(start, end);
    crate::calendar::add_days(start, span.div_euclid(2))
}
