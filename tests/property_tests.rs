use chrono::{Datelike, NaiveDate, Weekday};
use prenatal_schedule::calendar::{
    add_days, days_between, nth_weekday_of_month, next_occurrence_of_weekday,
};
use prenatal_schedule::resolver::{LabRotation, WEEKDAY_ANCHOR, range_bracketing_pair};
use prenatal_schedule::{calculate_from_input, calculate_schedule, week_to_date};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200i32, 1u32..13u32, 1u32..32u32)
        .prop_filter_map("valid date", |(year, month, day)| {
            NaiveDate::from_ymd_opt(year, month, day)
        })
}

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|n| Weekday::try_from(n).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn week_forty_maps_to_anchor(due in date_strategy()) {
        prop_assert_eq!(week_to_date(due, 40), due);
    }

    #[test]
    fn week_spacing_is_exact(due in date_strategy(), w1 in 0i32..42, gap in 1i32..20) {
        let w2 = w1 + gap;
        let spacing = days_between(week_to_date(due, w1), week_to_date(due, w2));
        prop_assert_eq!(spacing, i64::from(gap) * 7);
    }

    #[test]
    fn next_occurrence_stays_within_one_week(
        date in date_strategy(),
        weekday in weekday_strategy(),
        include_same_day in any::<bool>(),
    ) {
        let next = next_occurrence_of_weekday(date, weekday, include_same_day);
        prop_assert_eq!(next.weekday(), weekday);
        let offset = days_between(date, next);
        if include_same_day {
            prop_assert!((0..=6).contains(&offset));
        } else {
            prop_assert!((1..=7).contains(&offset));
        }
    }

    #[test]
    fn range_bracketing_touches_the_range(start in date_strategy(), span in 0i64..60) {
        let end = add_days(start, span);
        let pair = range_bracketing_pair(start, end, Weekday::Fri);
        prop_assert_eq!(pair.first.weekday(), Weekday::Fri);
        prop_assert_eq!(days_between(pair.first, pair.second), 7);
        prop_assert!(pair.first <= end);
        prop_assert!(pair.second >= start);
    }

    #[test]
    fn rotation_pair_keeps_parity(target in date_strategy()) {
        let rotation = LabRotation::default();
        let pair = rotation.pair_for(target);
        prop_assert_eq!(days_between(pair.first, pair.second), 14);
        for date in pair.dates() {
            let weeks = days_between(WEEKDAY_ANCHOR, date) / 7;
            prop_assert_eq!(days_between(WEEKDAY_ANCHOR, date) % 7, 0);
            prop_assert_eq!(weeks.rem_euclid(2), 0);
        }
        prop_assert!(pair.first <= target);
        prop_assert!(days_between(pair.first, target) < 14);
    }

    #[test]
    fn month_relative_classes(year in 1900i32..2200, month in 1u32..13) {
        let first_saturday = nth_weekday_of_month(year, month, Weekday::Sat, 1).unwrap();
        prop_assert!(first_saturday.day() <= 7);
        let first_thursday = nth_weekday_of_month(year, month, Weekday::Thu, 1).unwrap();
        let third_thursday = nth_weekday_of_month(year, month, Weekday::Thu, 3).unwrap();
        prop_assert_eq!(days_between(first_thursday, third_thursday), 14);
    }

    #[test]
    fn class_milestones_precede_due_month(due in date_strategy()) {
        let bundle = calculate_schedule(due);
        let class = bundle.get("Childbirth Education Class").and_then(|m| m.single_date()).unwrap();
        prop_assert!(class < due.with_day(1).unwrap());
        prop_assert!(class.day() <= 7);
    }

    #[test]
    fn identical_input_strings_give_identical_bundles(due in date_strategy()) {
        let input = due.format("%Y-%m-%d").to_string();
        let first = calculate_from_input(&input).unwrap();
        let second = calculate_from_input(&input).unwrap();
        prop_assert!(first.is_some());
        prop_assert_eq!(first, second);
    }
}
