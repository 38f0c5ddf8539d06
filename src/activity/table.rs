use std::fmt::Display;

use clap::ValueEnum;
use tracing::{trace, warn};

use super::{
    day::{Day, DAY_SPELLINGS},
    diagnostic::Diagnostic,
    entities::{ActivityRecord, RawWeekLog},
};

const FILLER: char = '.';

/// How an activity string is turned into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DecodeMode {
    /// Format version 1. Only the day marker the string starts with is decoded, so every
    /// string yields at most one record.
    #[default]
    First,
    /// Format version 2. Day markers are tried once each in spelling order and every marker
    /// found at the front of what is left of the string yields a record.
    Sequential,
}

impl DecodeMode {
    pub fn format_version(&self) -> u32 {
        match self {
            DecodeMode::First => 1,
            DecodeMode::Sequential => 2,
        }
    }
}

impl Display for DecodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeMode::First => write!(f, "first"),
            DecodeMode::Sequential => write!(f, "sequential"),
        }
    }
}

/// Turns a [RawWeekLog] into flat [ActivityRecord]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityTableBuilder {
    mode: DecodeMode,
}

impl ActivityTableBuilder {
    pub fn new(mode: DecodeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Records ordered by week, then by category, in the order they appear in the log.
    pub fn build(&self, log: &RawWeekLog) -> Vec<ActivityRecord> {
        self.build_with_report(log).0
    }

    /// Same as [ActivityTableBuilder::build] but also reports activity strings that produced
    /// no records.
    pub fn build_with_report(&self, log: &RawWeekLog) -> (Vec<ActivityRecord>, Vec<Diagnostic>) {
        let mut records = vec![];
        let mut diagnostics = vec![];

        for (week, categories) in log.iter() {
            for (category, value) in categories.iter() {
                let decoded = decode_activity(value, self.mode);
                if decoded.is_empty() {
                    warn!("{week} {category}: no day marker at the start of {value:?}");
                    diagnostics.push(Diagnostic::MissingDayMarker {
                        week: week.clone(),
                        category: category.clone(),
                    });
                }
                for (day, activity) in decoded {
                    trace!("{week} {category} {day} {activity}");
                    records.push(ActivityRecord {
                        week: week.clone(),
                        category: category.clone(),
                        day,
                        activity,
                    });
                }
            }
        }

        (records, diagnostics)
    }
}

/// Decodes a single activity string into `(day, filler count)` pairs.
pub fn decode_activity(value: &str, mode: DecodeMode) -> Vec<(Day, u32)> {
    let mut text = value;
    let mut decoded = vec![];
    for (spelling, day) in DAY_SPELLINGS {
        let Some(rest) = text.strip_prefix(spelling) else {
            continue;
        };
        let after_filler = rest.trim_start_matches(FILLER);
        // Filler is a single byte, so the byte difference is the character count.
        let count = (rest.len() - after_filler.len()) as u32;
        decoded.push((day, count));
        match mode {
            DecodeMode::First => break,
            DecodeMode::Sequential => text = after_filler,
        }
    }
    decoded
}
