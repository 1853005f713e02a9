use crate::milestone::{Milestone, MilestoneDates};
use crate::schedule::ScheduleBundle;
use chrono::NaiveDate;
use std::fmt;

/// "Friday, January 9, 2026"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Plain-text listing of a schedule grouped by category.
pub struct ScheduleText<'a> {
    pub bundle: &'a ScheduleBundle,
    pub show_weeks: bool,
}

impl fmt::Display for ScheduleText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Estimated due date: {}", long_date(self.bundle.due_date))?;

        for (category, milestones) in self.bundle.groups() {
            writeln!(f)?;
            writeln!(f, "{category}")?;
            writeln!(f, "{}", "-".repeat(category.to_string().len()))?;
            for milestone in milestones {
                write_milestone(f, milestone, self.show_weeks)?;
            }
        }
        Ok(())
    }
}

pub fn render_text(bundle: &ScheduleBundle, show_weeks: bool) -> String {
    ScheduleText { bundle, show_weeks }.to_string()
}

fn write_milestone(
    f: &mut fmt::Formatter<'_>,
    milestone: &Milestone,
    show_weeks: bool,
) -> fmt::Result {
    match (show_weeks, milestone.weeks) {
        (true, Some(weeks)) => writeln!(f, "{} ({weeks} weeks gestation)", milestone.title)?,
        _ => writeln!(f, "{}", milestone.title)?,
    }

    match milestone.dates {
        MilestoneDates::SingleDate { date } => writeln!(f, "  {}", long_date(date))?,
        MilestoneDates::DateRange { start, end } => {
            writeln!(f, "  {} to {}", long_date(start), long_date(end))?
        }
        MilestoneDates::CandidatePair { candidates } => {
            writeln!(f, "  Choose one:")?;
            for date in candidates.dates() {
                writeln!(f, "    - {}", long_date(date))?;
            }
        }
        MilestoneDates::DescriptiveOnly => {}
    }

    if let Some(description) = &milestone.description {
        writeln!(f, "  {description}")?;
    }
    Ok(())
}
