use super::DatePair;
use crate::calendar::{
    DAYS_PER_WEEK, add_days, next_occurrence_of_weekday, previous_occurrence_of_weekday,
};
use chrono::{NaiveDate, Weekday};

/// The target itself when it falls on `weekday`, else the next such day.
pub fn on_or_after(target: NaiveDate, weekday: Weekday) -> NaiveDate {
    next_occurrence_of_weekday(target, weekday, true)
}

/// The `weekday` strictly before and strictly after `target`.
///
/// A target that already falls on `weekday` yields the days one week either
/// side of it, never the target itself.
pub fn bracketing_pair(target: NaiveDate, weekday: Weekday) -> DatePair {
    DatePair {
        first: previous_occurrence_of_weekday(target, weekday, false),
        second: next_occurrence_of_weekday(target, weekday, false),
    }
}

/// First `weekday` on or after `start`, falling back to the one strictly
/// before `start` when the range is too short to contain it; the second date
/// is one week later.
pub fn range_bracketing_pair(start: NaiveDate, end: NaiveDate, weekday: Weekday) -> DatePair {
    let mut first = next_occurrence_of_weekday(start, weekday, true);
    if first > end {
        first = previous_occurrence_of_weekday(start, weekday, false);
    }
    DatePair {
        first,
        second: add_days(first, DAYS_PER_WEEK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bracketing_from_each_weekday() {
        // 2025-10-05 is a Sunday
        for offset in 0..7 {
            let target = add_days(ymd(2025, 10, 5), offset);
            let pair = bracketing_pair(target, Weekday::Fri);
            assert_eq!(pair.first.weekday(), Weekday::Fri);
            assert_eq!(pair.second.weekday(), Weekday::Fri);
            assert!(pair.first < target && target < pair.second);
            let expected = if target.weekday() == Weekday::Fri { 14 } else { 7 };
            assert_eq!((pair.second - pair.first).num_days(), expected, "target {target}");
        }
    }

    #[test]
    fn single_day_range_on_a_saturday_falls_back() {
        let saturday = ymd(2025, 10, 11);
        let pair = range_bracketing_pair(saturday, saturday, Weekday::Fri);
        assert_eq!(pair.first, ymd(2025, 10, 10));
        assert_eq!(pair.second, ymd(2025, 10, 17));
    }
}
