use chrono::NaiveDate;
use prenatal_schedule::{
    InputError, MilestoneTable, calculate_from_input, calculate_from_input_with, parse_due_date,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parses_literal_components() {
    assert_eq!(parse_due_date("2026-01-09"), Ok(Some(ymd(2026, 1, 9))));
    assert_eq!(parse_due_date(" 2026-1-9 "), Ok(Some(ymd(2026, 1, 9))));
}

#[test]
fn blank_input_means_no_schedule() {
    assert_eq!(parse_due_date(""), Ok(None));
    assert_eq!(parse_due_date("   "), Ok(None));
    assert_eq!(calculate_from_input(""), Ok(None));
}

#[test]
fn malformed_inputs_are_rejected() {
    for input in ["2026/01/09", "2026-01", "abcd-01-09", "2026-01-09-01", "-2026-01-09", "2026--09"] {
        assert_eq!(
            parse_due_date(input),
            Err(InputError::Malformed {
                input: input.to_string()
            }),
            "{input}"
        );
    }
}

#[test]
fn numeric_but_impossible_dates_are_rejected() {
    assert_eq!(
        parse_due_date("2026-02-30"),
        Err(InputError::InvalidDate {
            year: 2026,
            month: 2,
            day: 30
        })
    );
    assert!(matches!(
        parse_due_date("2026-13-01"),
        Err(InputError::InvalidDate { month: 13, .. })
    ));
}

#[test]
fn valid_input_produces_a_bundle() {
    let bundle = calculate_from_input("2026-01-09").unwrap().unwrap();
    assert_eq!(bundle.due_date, ymd(2026, 1, 9));
    let ultrasound = bundle.get("20 Week Ultrasound").unwrap();
    assert_eq!(ultrasound.single_date(), Some(ymd(2025, 8, 22)));
}

#[test]
fn same_input_string_gives_identical_bundles() {
    let table = MilestoneTable::friday_clinic();
    let first = calculate_from_input_with(&table, "2025-11-30").unwrap();
    let second = calculate_from_input_with(&table, "2025-11-30").unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
}
