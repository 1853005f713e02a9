use crate::resolver::DatePair;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping used when presenting a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FirstTrimester,
    SecondTrimester,
    ThirdTrimester,
    Classes,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::FirstTrimester,
        Category::SecondTrimester,
        Category::ThirdTrimester,
        Category::Classes,
    ];

    /// Trimester containing gestational `week`.
    pub fn for_week(week: i32) -> Self {
        match week {
            i32::MIN..=13 => Category::FirstTrimester,
            14..=27 => Category::SecondTrimester,
            _ => Category::ThirdTrimester,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Category::FirstTrimester => "first_trimester",
            Category::SecondTrimester => "second_trimester",
            Category::ThirdTrimester => "third_trimester",
            Category::Classes => "classes",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::FirstTrimester => "First Trimester",
            Category::SecondTrimester => "Second Trimester",
            Category::ThirdTrimester => "Third Trimester",
            Category::Classes => "Classes",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    SingleDate,
    DateRange,
    CandidatePair,
    DescriptiveOnly,
}

/// Resolved date(s) of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MilestoneDates {
    SingleDate { date: NaiveDate },
    DateRange { start: NaiveDate, end: NaiveDate },
    CandidatePair { candidates: DatePair },
    DescriptiveOnly,
}

impl MilestoneDates {
    pub fn kind(&self) -> MilestoneKind {
        match self {
            MilestoneDates::SingleDate { .. } => MilestoneKind::SingleDate,
            MilestoneDates::DateRange { .. } => MilestoneKind::DateRange,
            MilestoneDates::CandidatePair { .. } => MilestoneKind::CandidatePair,
            MilestoneDates::DescriptiveOnly => MilestoneKind::DescriptiveOnly,
        }
    }

    /// Every concrete date carried, in chronological order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        match *self {
            MilestoneDates::SingleDate { date } => vec![date],
            MilestoneDates::DateRange { start, end } => vec![start, end],
            MilestoneDates::CandidatePair { candidates } => candidates.dates().to_vec(),
            MilestoneDates::DescriptiveOnly => Vec::new(),
        }
    }
}

/// Gestational-week annotation shown next to a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeekLabel {
    Single(i32),
    Range(i32, i32),
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekLabel::Single(week) => write!(f, "{week}"),
            WeekLabel::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub category: Category,
    pub dates: MilestoneDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<WeekLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Milestone {
    pub fn kind(&self) -> MilestoneKind {
        self.dates.kind()
    }

    pub fn single_date(&self) -> Option<NaiveDate> {
        match self.dates {
            MilestoneDates::SingleDate { date } => Some(date),
            _ => None,
        }
    }

    pub fn candidates(&self) -> Option<DatePair> {
        match self.dates {
            MilestoneDates::CandidatePair { candidates } => Some(candidates),
            _ => None,
        }
    }
}
