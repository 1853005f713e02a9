use super::{MilestoneRule, MilestoneSpec, MilestoneTable};
use crate::error::{TableError, TableResult};
use crate::milestone::Category;
use crate::resolver::Alignment;
use crate::resolver::clinic::LOOKBACK_DAYS;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

pub fn save_table_to_json<P: AsRef<Path>>(table: &MilestoneTable, path: P) -> TableResult<()> {
    table.validate()?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, table)?;
    Ok(())
}

pub fn load_table_from_json<P: AsRef<Path>>(path: P) -> TableResult<MilestoneTable> {
    let file = File::open(path)?;
    let table: MilestoneTable = serde_json::from_reader(file)?;
    table.validate()?;
    Ok(table)
}

/// One milestone per row. Unused columns stay empty.
#[derive(Debug, Default, Serialize, Deserialize)]
struct MilestoneCsvRecord {
    title: String,
    category: String,
    rule: String,
    #[serde(default)]
    after: String,
    #[serde(default)]
    week: String,
    #[serde(default)]
    week_end: String,
    #[serde(default)]
    offset_days: String,
    #[serde(default)]
    policy: String,
    #[serde(default)]
    weekday: String,
    #[serde(default)]
    second_weekday: String,
    #[serde(default)]
    lookback_days: String,
    #[serde(default)]
    nth: String,
    #[serde(default)]
    description: String,
}

impl From<&MilestoneSpec> for MilestoneCsvRecord {
    fn from(spec: &MilestoneSpec) -> Self {
        let mut record = MilestoneCsvRecord {
            title: spec.title.clone(),
            category: spec.category.key().to_string(),
            rule: spec.rule.name().to_string(),
            description: spec.description.clone().unwrap_or_default(),
            ..Default::default()
        };
        match &spec.rule {
            MilestoneRule::AtWeek {
                week,
                offset_days,
                align,
            } => {
                record.week = week.to_string();
                record.write_offset(*offset_days);
                record.write_alignment(*align);
            }
            MilestoneRule::WeekRange { start, end, align } => {
                record.week = start.to_string();
                record.week_end = end.to_string();
                record.write_alignment(*align);
            }
            MilestoneRule::AfterMilestone {
                milestone,
                offset_days,
                align,
            } => {
                record.after = milestone.clone();
                record.write_offset(*offset_days);
                record.write_alignment(*align);
            }
            MilestoneRule::MonthBeforeDue { weekday, nth } => {
                record.weekday = weekday.to_string();
                record.nth = nth.to_string();
            }
            MilestoneRule::Descriptive => {}
        }
        record
    }
}

impl MilestoneCsvRecord {
    fn write_offset(&mut self, offset_days: i64) {
        if offset_days != 0 {
            self.offset_days = offset_days.to_string();
        }
    }

    fn write_alignment(&mut self, align: Alignment) {
        self.policy = align.name().to_string();
        match align {
            Alignment::Exact | Alignment::Rotation => {}
            Alignment::OnOrAfter { weekday }
            | Alignment::Bracketing { weekday }
            | Alignment::RangeBracketing { weekday } => {
                self.weekday = weekday.to_string();
            }
            Alignment::ClinicPair {
                first,
                second,
                lookback_days,
            } => {
                self.weekday = first.to_string();
                self.second_weekday = second.to_string();
                self.lookback_days = lookback_days.to_string();
            }
        }
    }

    fn into_spec(self) -> TableResult<MilestoneSpec> {
        let category = Category::from_key(self.category.trim())
            .ok_or_else(|| self.invalid(format!("unknown category '{}'", self.category)))?;
        let rule = match self.rule.trim() {
            "at_week" => MilestoneRule::AtWeek {
                week: self.required("week", &self.week)?,
                offset_days: self.optional("offset_days", &self.offset_days)?.unwrap_or(0),
                align: self.alignment()?,
            },
            "week_range" => MilestoneRule::WeekRange {
                start: self.required("week", &self.week)?,
                end: self.required("week_end", &self.week_end)?,
                align: self.alignment()?,
            },
            "after_milestone" => MilestoneRule::AfterMilestone {
                milestone: Some(self.after.trim())
                    .filter(|after| !after.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid("column after is required".to_string()))?,
                offset_days: self.optional("offset_days", &self.offset_days)?.unwrap_or(0),
                align: self.alignment()?,
            },
            "month_before_due" => MilestoneRule::MonthBeforeDue {
                weekday: self.weekday("weekday", &self.weekday)?,
                nth: self.required("nth", &self.nth)?,
            },
            "descriptive" => MilestoneRule::Descriptive,
            other => return Err(self.invalid(format!("unknown rule '{other}'"))),
        };
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok(MilestoneSpec {
            title: self.title,
            category,
            rule,
            description,
        })
    }

    fn alignment(&self) -> TableResult<Alignment> {
        let align = match self.policy.trim() {
            "" | "exact" => Alignment::Exact,
            "on_or_after" => Alignment::OnOrAfter {
                weekday: self.weekday("weekday", &self.weekday)?,
            },
            "bracketing" => Alignment::Bracketing {
                weekday: self.weekday("weekday", &self.weekday)?,
            },
            "range_bracketing" => Alignment::RangeBracketing {
                weekday: self.weekday("weekday", &self.weekday)?,
            },
            "clinic_pair" => Alignment::ClinicPair {
                first: self.weekday("weekday", &self.weekday)?,
                second: self.weekday("second_weekday", &self.second_weekday)?,
                lookback_days: self
                    .optional("lookback_days", &self.lookback_days)?
                    .unwrap_or(LOOKBACK_DAYS),
            },
            "rotation" => Alignment::Rotation,
            other => return Err(self.invalid(format!("unknown policy '{other}'"))),
        };
        Ok(align)
    }

    fn weekday(&self, column: &str, value: &str) -> TableResult<Weekday> {
        value
            .trim()
            .parse::<Weekday>()
            .map_err(|_| self.invalid(format!("column {column}: '{value}' is not a weekday")))
    }

    fn required<T: FromStr>(&self, column: &str, value: &str) -> TableResult<T> {
        self.optional(column, value)?
            .ok_or_else(|| self.invalid(format!("column {column} is required")))
    }

    fn optional<T: FromStr>(&self, column: &str, value: &str) -> TableResult<Option<T>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<T>()
            .map(Some)
            .map_err(|_| self.invalid(format!("column {column}: '{value}' is not a number")))
    }

    fn invalid(&self, reason: String) -> TableError {
        TableError::InvalidRule {
            title: self.title.clone(),
            reason,
        }
    }
}

/// Writes the milestones of `table`; the rotation anchor is not part of the
/// CSV format.
pub fn save_table_to_csv<P: AsRef<Path>>(table: &MilestoneTable, path: P) -> TableResult<()> {
    table.validate()?;
    let mut writer = csv::Writer::from_path(path)?;
    for spec in &table.milestones {
        writer.serialize(MilestoneCsvRecord::from(spec))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a table from CSV, naming it after the file stem. The default
/// rotation anchor is used.
pub fn load_table_from_csv<P: AsRef<Path>>(path: P) -> TableResult<MilestoneTable> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    let mut reader = csv::Reader::from_path(path)?;
    let mut milestones = Vec::new();
    for record in reader.deserialize::<MilestoneCsvRecord>() {
        milestones.push(record?.into_spec()?);
    }
    let table = MilestoneTable::new(name, milestones);
    table.validate()?;
    Ok(table)
}
