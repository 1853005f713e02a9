//! Calendar primitives over plain local dates.
//!
//! Weekday indices follow Sunday = 0 ... Saturday = 6 throughout the crate.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DAYS_PER_WEEK: i64 = 7;

/// Shift a date by `days` calendar days (negative moves backwards).
///
/// Saturates at `NaiveDate::MIN` / `NaiveDate::MAX` instead of overflowing.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

pub fn subtract_days(date: NaiveDate, days: i64) -> NaiveDate {
    add_days(date, days.saturating_neg())
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn weekday_from_index(index: u32) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Nearest date on or after `date` (strictly after unless `include_same_day`)
/// that falls on `weekday`.
pub fn next_occurrence_of_weekday(
    date: NaiveDate,
    weekday: Weekday,
    include_same_day: bool,
) -> NaiveDate {
    let current = i64::from(weekday_index(date));
    let wanted = i64::from(weekday.num_days_from_sunday());
    let mut delta = (wanted - current).rem_euclid(DAYS_PER_WEEK);
    if delta == 0 && !include_same_day {
        delta = DAYS_PER_WEEK;
    }
    add_days(date, delta)
}

/// Mirror of [`next_occurrence_of_weekday`] searching backwards.
pub fn previous_occurrence_of_weekday(
    date: NaiveDate,
    weekday: Weekday,
    include_same_day: bool,
) -> NaiveDate {
    let current = i64::from(weekday_index(date));
    let wanted = i64::from(weekday.num_days_from_sunday());
    let mut delta = (current - wanted).rem_euclid(DAYS_PER_WEEK);
    if delta == 0 && !include_same_day {
        delta = DAYS_PER_WEEK;
    }
    subtract_days(date, delta)
}

/// Find the nth occurrence (1-based) of a weekday in a month.
///
/// Returns `None` for an invalid month, `n == 0`, or when the month has no
/// nth occurrence (e.g. a fifth Monday).
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_match = next_occurrence_of_weekday(first_of_month, weekday, true);
    let date = add_days(first_match, i64::from(n - 1) * DAYS_PER_WEEK);
    (date.month() == month && date.year() == year).then_some(date)
}

/// The (year, month) immediately preceding the month containing `date`.
/// January rolls back to December of the previous year.
pub fn month_before(date: NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}
