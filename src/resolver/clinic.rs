use super::DatePair;
use crate::calendar::{next_occurrence_of_weekday, subtract_days};
use chrono::{NaiveDate, Weekday};

pub const LOOKBACK_DAYS: i64 = 3;

pub(crate) fn default_lookback_days() -> i64 {
    LOOKBACK_DAYS
}

/// Step back `lookback_days` from `target`, then take the next `first` and
/// next `second` weekday on or after that point.
pub fn clinic_day_pair(
    target: NaiveDate,
    first: Weekday,
    second: Weekday,
    lookback_days: i64,
) -> DatePair {
    let shifted = subtract_days(target, lookback_days);
    DatePair::new(
        next_occurrence_of_weekday(shifted, first, true),
        next_occurrence_of_weekday(shifted, second, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn friday_target_offers_following_monday_and_wednesday() {
        // Friday 2025-08-22 steps back to Tuesday 08-19
        let pair = clinic_day_pair(ymd(2025, 8, 22), Weekday::Mon, Weekday::Wed, LOOKBACK_DAYS);
        assert_eq!(pair.first, ymd(2025, 8, 20));
        assert_eq!(pair.second, ymd(2025, 8, 25));
    }

    #[test]
    fn monday_target_keeps_itself() {
        // Monday 2025-08-25 steps back to Friday 08-22
        let pair = clinic_day_pair(ymd(2025, 8, 25), Weekday::Mon, Weekday::Wed, LOOKBACK_DAYS);
        assert_eq!(pair.first, ymd(2025, 8, 25));
        assert_eq!(pair.second, ymd(2025, 8, 27));
    }
}
