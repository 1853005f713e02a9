use crate::calendar::add_days;
use crate::gestation::week_to_date;
use crate::milestone::{Category, Milestone, MilestoneDates, WeekLabel};
use crate::resolver::{Aligned, Alignment, LabRotation, align, month_relative_before_due};
use crate::table::{MilestoneRule, MilestoneSpec, MilestoneTable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, info};

static STANDARD_TABLE: LazyLock<MilestoneTable> = LazyLock::new(MilestoneTable::standard);

/// Every milestone computed for one due date, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBundle {
    pub due_date: NaiveDate,
    pub table: String,
    pub milestones: Vec<Milestone>,
}

impl ScheduleBundle {
    pub fn get(&self, title: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.title == title)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Milestone> {
        self.milestones.iter().filter(move |m| m.category == category)
    }

    /// Non-empty categories in presentation order.
    pub fn groups(&self) -> Vec<(Category, Vec<&Milestone>)> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.by_category(category).collect::<Vec<_>>()))
            .filter(|(_, milestones)| !milestones.is_empty())
            .collect()
    }

    pub fn earliest(&self) -> Option<NaiveDate> {
        self.all_dates().min()
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.all_dates().max()
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Milestone> {
        self.milestones.iter()
    }

    fn all_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.milestones.iter().flat_map(|m| m.dates.dates())
    }
}

impl<'a> IntoIterator for &'a ScheduleBundle {
    type Item = &'a Milestone;
    type IntoIter = std::slice::Iter<'a, Milestone>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Resolves a milestone table against a due date.
pub struct ScheduleAssembler<'a> {
    table: &'a MilestoneTable,
    rotation: LabRotation,
}

impl<'a> ScheduleAssembler<'a> {
    pub fn new(table: &'a MilestoneTable) -> Self {
        Self {
            table,
            rotation: LabRotation::new(table.rotation_anchor),
        }
    }

    pub fn execute(&self, due_date: NaiveDate) -> ScheduleBundle {
        let mut milestones: Vec<Milestone> = Vec::with_capacity(self.table.milestones.len());
        for spec in &self.table.milestones {
            let milestone = self.resolve(spec, due_date, &milestones);
            debug!(
                title = %milestone.title,
                kind = ?milestone.kind(),
                dates = ?milestone.dates.dates(),
                "resolved milestone"
            );
            milestones.push(milestone);
        }

        info!(
            %due_date,
            table = %self.table.name,
            milestones = milestones.len(),
            "calculated schedule"
        );

        ScheduleBundle {
            due_date,
            table: self.table.name.clone(),
            milestones,
        }
    }

    /// `resolved` holds the milestones already computed, in table order.
    fn resolve(
        &self,
        spec: &MilestoneSpec,
        due_date: NaiveDate,
        resolved: &[Milestone],
    ) -> Milestone {
        let (dates, weeks) = match &spec.rule {
            MilestoneRule::AtWeek {
                week,
                offset_days,
                align,
            } => {
                let target = add_days(week_to_date(due_date, *week), *offset_days);
                (self.aligned(*align, target, target), Some(WeekLabel::Single(*week)))
            }
            MilestoneRule::WeekRange { start, end, align } => {
                let dates = self.aligned(
                    *align,
                    week_to_date(due_date, *start),
                    week_to_date(due_date, *end),
                );
                (dates, Some(WeekLabel::Range(*start, *end)))
            }
            MilestoneRule::AfterMilestone {
                milestone,
                offset_days,
                align,
            } => {
                // Validation guarantees the reference precedes this entry.
                let anchor = resolved
                    .iter()
                    .find(|m| &m.title == milestone)
                    .and_then(|m| m.dates.dates().first().map(|date| (*date, m.weeks)));
                match anchor {
                    Some((date, weeks)) => {
                        let target = add_days(date, *offset_days);
                        (self.aligned(*align, target, target), weeks)
                    }
                    None => (MilestoneDates::DescriptiveOnly, None),
                }
            }
            MilestoneRule::MonthBeforeDue { weekday, nth } => {
                let dates = month_relative_before_due(due_date, *weekday, *nth)
                    .map(|date| MilestoneDates::SingleDate { date })
                    .unwrap_or(MilestoneDates::DescriptiveOnly);
                (dates, None)
            }
            MilestoneRule::Descriptive => (MilestoneDates::DescriptiveOnly, None),
        };

        Milestone {
            title: spec.title.clone(),
            category: spec.category,
            dates,
            weeks,
            description: spec.description.clone(),
        }
    }

    fn aligned(&self, alignment: Alignment, start: NaiveDate, end: NaiveDate) -> MilestoneDates {
        match align(alignment, start, end, &self.rotation) {
            Aligned::Single(date) => MilestoneDates::SingleDate { date },
            Aligned::Range { start, end } => MilestoneDates::DateRange { start, end },
            Aligned::Pair(candidates) => MilestoneDates::CandidatePair { candidates },
        }
    }
}

/// Schedule for `due_date` using the standard milestone table.
pub fn calculate_schedule(due_date: NaiveDate) -> ScheduleBundle {
    ScheduleAssembler::new(&STANDARD_TABLE).execute(due_date)
}

pub fn calculate_schedule_with(table: &MilestoneTable, due_date: NaiveDate) -> ScheduleBundle {
    ScheduleAssembler::new(table).execute(due_date)
}
