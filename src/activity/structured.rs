//! Alternate input path for data that already arrives as JSON. Two shapes are accepted:
//!
//! * a records table, an array of `{"week", "category", "day", "activity"}` objects;
//! * the nested form produced by [crate::activity::parser], `{"<week>": {"<category>": "<raw>"}}`.

use serde_json::Value;
use thiserror::Error;

use super::{
    entities::{ActivityRecord, RawWeekLog},
    week::WeekLabel,
};

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("input is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("invalid activity record at index {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid week label `{0}`")]
    WeekLabel(String),
    #[error("week {week}: activity of `{category}` should be a string")]
    RawValue { week: String, category: String },
    #[error("week {0} should map categories to activity strings")]
    Week(String),
    #[error("expected an array of records or an object of weeks, found {0}")]
    Shape(&'static str),
}

#[derive(Debug)]
pub enum StructuredInput {
    Records(Vec<ActivityRecord>),
    Log(RawWeekLog),
}

pub fn parse_structured(input: &str) -> Result<StructuredInput, FormatError> {
    let value: Value = serde_json::from_str(input).map_err(FormatError::Syntax)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<ActivityRecord>(item)
                    .map_err(|source| FormatError::Record { index, source })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(StructuredInput::Records),
        Value::Object(weeks) => {
            let mut log = RawWeekLog::default();
            for (week, categories) in weeks {
                let label =
                    WeekLabel::new_opt(&week).ok_or_else(|| FormatError::WeekLabel(week.clone()))?;
                let Value::Object(categories) = categories else {
                    return Err(FormatError::Week(week));
                };
                log.reset_week(label.clone());
                let Some(target) = log.week_mut(&label) else {
                    return Err(FormatError::Week(week));
                };
                for (category, raw) in categories {
                    let Value::String(raw) = raw else {
                        return Err(FormatError::RawValue { week, category });
                    };
                    target.insert(&category, raw);
                }
            }
            Ok(StructuredInput::Log(log))
        }
        Value::Null => Err(FormatError::Shape("null")),
        Value::Bool(_) => Err(FormatError::Shape("a boolean")),
        Value::Number(_) => Err(FormatError::Shape("a number")),
        Value::String(_) => Err(FormatError::Shape("a string")),
    }
}
