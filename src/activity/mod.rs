//! Reading weekly activity logs. Text goes through [parser] into a [entities::RawWeekLog],
//! which [table] decodes into flat [entities::ActivityRecord]s. JSON input is handled by
//! [structured], and [load] ties both paths together.

pub mod day;
pub mod diagnostic;
pub mod entities;
pub mod load;
pub mod parser;
pub mod structured;
pub mod table;
pub mod week;
