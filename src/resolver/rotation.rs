//! Alternating biweekly lab rotation.
//!
//! Lab draws run every other week on the weekday of a single fixed anchor
//! date. Offsets before the anchor use floor division so that the rotation
//! parity is the same on both sides of it.

use super::DatePair;
use crate::calendar::{DAYS_PER_WEEK, add_days, days_between, subtract_days};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const ROTATION_PERIOD_DAYS: i64 = 2 * DAYS_PER_WEEK;

/// Friday 2026-01-09, zero point of the default rotation.
pub const WEEKDAY_ANCHOR: NaiveDate = match NaiveDate::from_ymd_opt(2026, 1, 9) {
    Some(date) => date,
    None => panic!("rotation anchor is not a valid date"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabRotation {
    anchor: NaiveDate,
}

impl Default for LabRotation {
    fn default() -> Self {
        Self::new(WEEKDAY_ANCHOR)
    }
}

impl LabRotation {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn weekday(&self) -> Weekday {
        self.anchor.weekday()
    }

    /// Rotation occurrence on or before `target` (within 13 days of it).
    pub fn occurrence_on_or_before(&self, target: NaiveDate) -> NaiveDate {
        let week_diff = days_between(self.anchor, target).div_euclid(DAYS_PER_WEEK);
        let even_weeks = week_diff.div_euclid(2) * 2;
        add_days(self.anchor, even_weeks * DAYS_PER_WEEK)
    }

    /// The two consecutive rotation days around `target`.
    ///
    /// A pair whose first date falls before the 14-day lookback window is
    /// advanced by one cycle.
    pub fn pair_for(&self, target: NaiveDate) -> DatePair {
        let first = self.occurrence_on_or_before(target);
        let second = add_days(first, ROTATION_PERIOD_DAYS);
        // Flooring to an even week keeps `first` within 13 days of `target`,
        // so this only fires if `occurrence_on_or_before` stops flooring.
        if first < subtract_days(target, ROTATION_PERIOD_DAYS) {
            DatePair {
                first: second,
                second: add_days(second, ROTATION_PERIOD_DAYS),
            }
        } else {
            DatePair { first, second }
        }
    }

    /// Whether `date` is itself a rotation day.
    pub fn is_rotation_day(&self, date: NaiveDate) -> bool {
        days_between(self.anchor, date).rem_euclid(ROTATION_PERIOD_DAYS) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchor_is_a_friday() {
        assert_eq!(WEEKDAY_ANCHOR.weekday(), Weekday::Fri);
        assert_eq!(LabRotation::default().weekday(), Weekday::Fri);
    }

    #[test]
    fn day_before_anchor_floors_into_previous_cycle() {
        let rotation = LabRotation::default();
        let pair = rotation.pair_for(ymd(2026, 1, 8));
        assert_eq!(pair.first, ymd(2025, 12, 26));
        assert_eq!(pair.second, WEEKDAY_ANCHOR);
    }

    #[test]
    fn last_day_of_cycle_keeps_the_current_pair() {
        // 13 days after the anchor is the widest gap the floor allows
        let rotation = LabRotation::default();
        let target = ymd(2026, 1, 22);
        assert_eq!(rotation.occurrence_on_or_before(target), WEEKDAY_ANCHOR);
        let pair = rotation.pair_for(target);
        assert_eq!(pair.first, WEEKDAY_ANCHOR);
        assert_eq!(pair.second, ymd(2026, 1, 23));

        let before = ymd(2026, 1, 8);
        assert_eq!(days_between(rotation.occurrence_on_or_before(before), before), 13);
    }

    #[test]
    fn odd_week_before_anchor_is_not_a_rotation_day() {
        let rotation = LabRotation::default();
        assert!(!rotation.is_rotation_day(ymd(2026, 1, 2)));
        assert!(rotation.is_rotation_day(ymd(2025, 12, 26)));
        assert!(rotation.is_rotation_day(ymd(2026, 1, 23)));
    }
}
