//! Boundary between the due-date input field and the engine.

use crate::error::InputError;
use crate::schedule::{ScheduleBundle, calculate_schedule, calculate_schedule_with};
use crate::table::MilestoneTable;
use chrono::NaiveDate;
use tracing::warn;

/// Parse a `YYYY-MM-DD` string from its literal numeric components.
///
/// Blank input yields `Ok(None)` ("no schedule"), not an error.
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let malformed = || InputError::Malformed {
        input: trimmed.to_string(),
    };
    let parts: Vec<&str> = trimmed.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(malformed());
    };
    if [year, month, day]
        .iter()
        .any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(malformed());
    }

    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let day: u32 = day.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or(InputError::InvalidDate { year, month, day })
}

/// Standard-table schedule for the raw input string.
pub fn calculate_from_input(input: &str) -> Result<Option<ScheduleBundle>, InputError> {
    Ok(parse_logged(input)?.map(calculate_schedule))
}

pub fn calculate_from_input_with(
    table: &MilestoneTable,
    input: &str,
) -> Result<Option<ScheduleBundle>, InputError> {
    Ok(parse_logged(input)?.map(|due| calculate_schedule_with(table, due)))
}

fn parse_logged(input: &str) -> Result<Option<NaiveDate>, InputError> {
    parse_due_date(input).inspect_err(|err| warn!(%err, "rejected due date input"))
}
