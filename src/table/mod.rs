//! Milestone tables: the care timeline as configuration data.
//!
//! A table lists every milestone with the rule that derives its date(s) from
//! the due date. Alternate clinic timelines are alternate tables over the same
//! resolver primitives.

pub mod file;

pub use file::{load_table_from_csv, load_table_from_json, save_table_to_csv, save_table_to_json};

use crate::error::{TableError, TableResult};
use crate::gestation::GestationalWeek;
use crate::milestone::Category;
use crate::resolver::{Alignment, WEEKDAY_ANCHOR};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Largest supported "nth weekday of month".
pub const MAX_NTH_WEEKDAY: u32 = 5;

/// How a milestone's date(s) are derived from the due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MilestoneRule {
    /// A gestational week, optionally shifted by whole days.
    AtWeek {
        week: i32,
        #[serde(default)]
        offset_days: i64,
        #[serde(default)]
        align: Alignment,
    },
    /// An inclusive span of gestational weeks.
    WeekRange {
        start: i32,
        end: i32,
        #[serde(default)]
        align: Alignment,
    },
    /// Whole days after the resolved date of an earlier milestone in the
    /// same table (its single date, or its first candidate).
    AfterMilestone {
        milestone: String,
        #[serde(default)]
        offset_days: i64,
        #[serde(default)]
        align: Alignment,
    },
    /// The nth `weekday` of the month before the due date's month.
    MonthBeforeDue { weekday: Weekday, nth: u32 },
    /// No date, only a description.
    Descriptive,
}

impl MilestoneRule {
    pub fn name(&self) -> &'static str {
        match self {
            MilestoneRule::AtWeek { .. } => "at_week",
            MilestoneRule::WeekRange { .. } => "week_range",
            MilestoneRule::AfterMilestone { .. } => "after_milestone",
            MilestoneRule::MonthBeforeDue { .. } => "month_before_due",
            MilestoneRule::Descriptive => "descriptive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSpec {
    pub title: String,
    pub category: Category,
    #[serde(flatten)]
    pub rule: MilestoneRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MilestoneSpec {
    pub fn new(title: impl Into<String>, category: Category, rule: MilestoneRule) -> Self {
        Self {
            title: title.into(),
            category,
            rule,
            description: None,
        }
    }

    /// Milestone at a gestational week, filed under that week's trimester.
    pub fn at_week(title: impl Into<String>, week: i32, align: Alignment) -> Self {
        Self::new(
            title,
            Category::for_week(week),
            MilestoneRule::AtWeek {
                week,
                offset_days: 0,
                align,
            },
        )
    }

    /// Filed under the trimester of the range start.
    pub fn week_range(title: impl Into<String>, start: i32, end: i32, align: Alignment) -> Self {
        Self::new(
            title,
            Category::for_week(start),
            MilestoneRule::WeekRange { start, end, align },
        )
    }

    /// Follow-up to `milestone`, `offset_days` after its resolved date.
    pub fn after_milestone(
        title: impl Into<String>,
        category: Category,
        milestone: impl Into<String>,
        offset_days: i64,
        align: Alignment,
    ) -> Self {
        Self::new(
            title,
            category,
            MilestoneRule::AfterMilestone {
                milestone: milestone.into(),
                offset_days,
                align,
            },
        )
    }

    pub fn month_before_due(title: impl Into<String>, weekday: Weekday, nth: u32) -> Self {
        Self::new(
            title,
            Category::Classes,
            MilestoneRule::MonthBeforeDue { weekday, nth },
        )
    }

    /// Shift an `AtWeek` or `AfterMilestone` target by whole days; other
    /// rules are unchanged.
    pub fn offset_by(mut self, days: i64) -> Self {
        match &mut self.rule {
            MilestoneRule::AtWeek { offset_days, .. }
            | MilestoneRule::AfterMilestone { offset_days, .. } => *offset_days = days,
            _ => {}
        }
        self
    }

    pub fn in_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self) -> TableResult<()> {
        if self.title.trim().is_empty() {
            return Err(self.invalid("title must not be empty"));
        }
        match self.rule {
            MilestoneRule::AtWeek { week, .. } => self.check_week(week),
            MilestoneRule::AfterMilestone { ref milestone, .. } => {
                if milestone.trim().is_empty() {
                    return Err(self.invalid("referenced milestone must not be empty"));
                }
                Ok(())
            }
            MilestoneRule::WeekRange { start, end, .. } => {
                self.check_week(start)?;
                self.check_week(end)?;
                if start > end {
                    return Err(self.invalid(format!("week range {start}-{end} is descending")));
                }
                Ok(())
            }
            MilestoneRule::MonthBeforeDue { nth, .. } => {
                if !(1..=MAX_NTH_WEEKDAY).contains(&nth) {
                    return Err(self.invalid(format!(
                        "nth weekday must be between 1 and {MAX_NTH_WEEKDAY}, got {nth}"
                    )));
                }
                Ok(())
            }
            MilestoneRule::Descriptive => Ok(()),
        }
    }

    fn check_week(&self, week: i32) -> TableResult<()> {
        GestationalWeek::try_from(week)
            .map(|_| ())
            .map_err(|reason| self.invalid(reason))
    }

    fn invalid(&self, reason: impl Into<String>) -> TableError {
        TableError::InvalidRule {
            title: self.title.clone(),
            reason: reason.into(),
        }
    }
}

fn default_rotation_anchor() -> NaiveDate {
    WEEKDAY_ANCHOR
}

/// An ordered milestone table plus the anchor of its lab rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTable {
    pub name: String,
    #[serde(default = "default_rotation_anchor")]
    pub rotation_anchor: NaiveDate,
    pub milestones: Vec<MilestoneSpec>,
}

impl Default for MilestoneTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl MilestoneTable {
    pub fn new(name: impl Into<String>, milestones: Vec<MilestoneSpec>) -> Self {
        Self {
            name: name.into(),
            rotation_anchor: WEEKDAY_ANCHOR,
            milestones,
        }
    }

    pub fn with_rotation_anchor(mut self, anchor: NaiveDate) -> Self {
        self.rotation_anchor = anchor;
        self
    }

    /// Full care timeline: telehealth, labs, in-office visits, classes.
    pub fn standard() -> Self {
        let friday = Alignment::OnOrAfter {
            weekday: Weekday::Fri,
        };
        let visit = Alignment::monday_wednesday();

        let mut milestones = vec![
            MilestoneSpec::at_week("Initial Telehealth Visit", 11, friday),
            MilestoneSpec::at_week("Initial Labs", 11, Alignment::Rotation),
            MilestoneSpec::after_milestone(
                "First In-Office Visit",
                Category::FirstTrimester,
                "Initial Telehealth Visit",
                3,
                visit,
            ),
            MilestoneSpec::at_week("Monthly Visit - 16 weeks", 16, visit),
            MilestoneSpec::at_week("20 Week Ultrasound", 20, Alignment::Exact),
            MilestoneSpec::at_week("Monthly Visit - 20 weeks", 20, visit),
            MilestoneSpec::at_week("Monthly Visit - 24 weeks", 24, visit),
            MilestoneSpec::week_range("Glucose Test - 26-28 weeks", 26, 28, Alignment::Rotation),
            MilestoneSpec::at_week("Monthly Visit - 28 weeks", 28, visit),
            MilestoneSpec::at_week("Biweekly Visit - 30 weeks", 30, visit),
            MilestoneSpec::at_week("32 Week Telehealth", 32, Alignment::friday_pair()),
            MilestoneSpec::at_week("Biweekly Visit - 34 weeks", 34, visit),
            MilestoneSpec::at_week("36 Week Visit", 36, visit),
            MilestoneSpec::at_week("36 Week Labs", 36, Alignment::Rotation),
            MilestoneSpec::at_week("Birth Rehearsal", 36, Alignment::Exact),
            MilestoneSpec::at_week("37 Week Telehealth", 37, Alignment::friday_pair()),
        ];
        for week in 38..=41 {
            if week == 40 {
                milestones.push(MilestoneSpec::at_week(
                    "Estimated Due Date - 40 weeks",
                    40,
                    Alignment::Exact,
                ));
            }
            milestones.push(MilestoneSpec::at_week(
                format!("Weekly Visit - {week} weeks"),
                week,
                visit,
            ));
        }
        milestones.push(MilestoneSpec::at_week(
            "41 Week Biophysical Profile",
            41,
            Alignment::Exact,
        ));
        milestones.extend(Self::classes());

        Self::new("standard", milestones)
    }

    /// Smaller timeline where every appointment is offered on Fridays.
    pub fn friday_clinic() -> Self {
        let fridays = Alignment::friday_pair();
        let mut milestones = vec![
            MilestoneSpec::at_week("Estimated Due Date - 40 weeks", 40, Alignment::Exact),
            MilestoneSpec::at_week("20 Week Ultrasound", 20, Alignment::Exact),
            MilestoneSpec::week_range(
                "Glucose Test - 26-28 weeks",
                26,
                28,
                Alignment::RangeBracketing {
                    weekday: Weekday::Fri,
                },
            ),
            MilestoneSpec::at_week("32 Week Appointment", 32, fridays),
            MilestoneSpec::at_week("36 Week Labs", 36, fridays),
            MilestoneSpec::at_week("37 Week Appointment", 37, fridays),
            MilestoneSpec::at_week("41 Week Biophysical Profile", 41, Alignment::Exact),
        ];
        milestones.extend(Self::classes());

        Self::new("friday_clinic", milestones)
    }

    /// Look up a built-in table by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "friday" | "friday_clinic" => Some(Self::friday_clinic()),
            _ => None,
        }
    }

    fn classes() -> [MilestoneSpec; 2] {
        [
            MilestoneSpec::month_before_due("Childbirth Education Class", Weekday::Sat, 1)
                .describe("First Saturday of the month before due date"),
            MilestoneSpec::month_before_due("Breastfeeding Class", Weekday::Thu, 3)
                .describe("Third Thursday of the month before due date"),
        ]
    }

    pub fn get(&self, title: &str) -> Option<&MilestoneSpec> {
        self.milestones.iter().find(|spec| spec.title == title)
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Check every rule and reject duplicate titles.
    pub fn validate(&self) -> TableResult<()> {
        let mut seen = HashSet::new();
        for spec in &self.milestones {
            spec.validate()?;
            if let MilestoneRule::AfterMilestone { milestone, .. } = &spec.rule {
                if !seen.contains(milestone.as_str()) {
                    return Err(spec.invalid(format!(
                        "'{milestone}' must appear earlier in the table"
                    )));
                }
            }
            if !seen.insert(spec.title.as_str()) {
                return Err(spec.invalid("duplicate title"));
            }
        }
        Ok(())
    }
}
