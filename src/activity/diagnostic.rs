use std::{fmt::Display, sync::Arc};

use super::week::WeekLabel;

/// Something that was skipped or replaced while reading a log. Diagnostics never change what
/// gets parsed, they only explain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Non-blank line that is neither a week header nor a category line.
    UnrecognizedLine { line: usize },
    /// Category line without a week header above it. Its value is dropped.
    CategoryBeforeWeek { line: usize, category: Arc<str> },
    /// The same week header appeared twice. Categories read before the repeat are dropped.
    WeekRedeclared { line: usize, week: WeekLabel },
    /// The same category appeared twice within a week. The later value wins.
    CategoryOverwritten {
        line: usize,
        week: WeekLabel,
        category: Arc<str>,
    },
    /// Activity string that doesn't start with a day marker. No record is produced for it.
    MissingDayMarker { week: WeekLabel, category: Arc<str> },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnrecognizedLine { line } => write!(f, "line {line}: unrecognized line"),
            Diagnostic::CategoryBeforeWeek { line, category } => {
                write!(f, "line {line}: category {category} has no week header")
            }
            Diagnostic::WeekRedeclared { line, week } => {
                write!(f, "line {line}: week {week} declared again, earlier entries dropped")
            }
            Diagnostic::CategoryOverwritten {
                line,
                week,
                category,
            } => write!(f, "line {line}: category {category} repeated in week {week}"),
            Diagnostic::MissingDayMarker { week, category } => {
                write!(f, "{week} {category}: activity doesn't start with a day")
            }
        }
    }
}
