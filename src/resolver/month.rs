use crate::calendar::{month_before, nth_weekday_of_month};
use chrono::{NaiveDate, Weekday};

/// The nth `weekday` of the month preceding the due date's month.
///
/// `None` only when that month has no nth occurrence (n = 5 in short months).
pub fn month_relative_before_due(due_date: NaiveDate, weekday: Weekday, nth: u32) -> Option<NaiveDate> {
    let (year, month) = month_before(due_date);
    nth_weekday_of_month(year, month, weekday, nth)
}
