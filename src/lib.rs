pub mod calendar;
pub mod error;
pub mod format;
pub mod gestation;
pub mod input;
pub mod milestone;
pub mod resolver;
pub mod schedule;
pub mod table;

pub use error::{InputError, TableError};
pub use gestation::{GestationalAge, GestationalWeek, gestational_age, week_to_date};
pub use input::{calculate_from_input, calculate_from_input_with, parse_due_date};
pub use milestone::{Category, Milestone, MilestoneDates, MilestoneKind, WeekLabel};
pub use resolver::{Alignment, DatePair, LabRotation, WEEKDAY_ANCHOR};
pub use schedule::{ScheduleAssembler, ScheduleBundle, calculate_schedule, calculate_schedule_with};
pub use table::{
    MilestoneRule, MilestoneSpec, MilestoneTable, load_table_from_csv, load_table_from_json,
    save_table_to_csv, save_table_to_json,
};
