use std::fmt::Display;

use clap::ValueEnum;
use serde::de::IgnoredAny;
use tracing::{debug, instrument};

use super::{
    diagnostic::Diagnostic,
    entities::ActivityRecord,
    parser::parse_log_with_report,
    structured::{parse_structured, FormatError, StructuredInput},
    table::{ActivityTableBuilder, DecodeMode},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON when the text is well formed JSON, the weekly log format otherwise.
    #[default]
    Auto,
    Log,
    Json,
}

impl InputFormat {
    /// Resolves [InputFormat::Auto] by looking at the text. Text is JSON only when it starts
    /// with `{` or `[` and is well formed, so a log opening with a bracketed note is still read
    /// as a log.
    pub fn detect(self, input: &str) -> InputFormat {
        match self {
            InputFormat::Auto => match input.trim_start().chars().next() {
                Some('{' | '[') if serde_json::from_str::<IgnoredAny>(input).is_ok() => {
                    InputFormat::Json
                }
                _ => InputFormat::Log,
            },
            other => other,
        }
    }
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Auto => write!(f, "auto"),
            InputFormat::Log => write!(f, "log"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadedActivity {
    pub records: Vec<ActivityRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns input text of any supported format into activity records. Only malformed JSON is an
/// error; an input that yields nothing is a valid, empty result.
#[instrument(skip(input), fields(bytes = input.len()))]
pub fn load_activity(
    input: &str,
    format: InputFormat,
    mode: DecodeMode,
) -> Result<LoadedActivity, FormatError> {
    let builder = ActivityTableBuilder::new(mode);
    let loaded = match format.detect(input) {
        InputFormat::Json => match parse_structured(input)? {
            StructuredInput::Records(records) => LoadedActivity {
                records,
                diagnostics: vec![],
            },
            StructuredInput::Log(log) => {
                let (records, diagnostics) = builder.build_with_report(&log);
                LoadedActivity {
                    records,
                    diagnostics,
                }
            }
        },
        InputFormat::Log | InputFormat::Auto => {
            let report = parse_log_with_report(input);
            let (records, skipped) = builder.build_with_report(&report.log);
            let mut diagnostics = report.diagnostics;
            diagnostics.extend(skipped);
            LoadedActivity {
                records,
                diagnostics,
            }
        }
    };
    debug!(
        "Loaded {} records with {} diagnostics",
        loaded.records.len(),
        loaded.diagnostics.len()
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{load_activity, InputFormat};
    use crate::activity::{
        day::Day, diagnostic::Diagnostic, structured::FormatError, table::DecodeMode,
    };

    #[test]
    fn detects_format() {
        assert_eq!(InputFormat::Auto.detect("  [ ]"), InputFormat::Json);
        assert_eq!(InputFormat::Auto.detect("\n{}"), InputFormat::Json);
        assert_eq!(InputFormat::Auto.detect("[1, 2]"), InputFormat::Json);
        assert_eq!(InputFormat::Auto.detect("[work notes]\n# 2024/11/25-29"), InputFormat::Log);
        assert_eq!(InputFormat::Auto.detect("{draft}"), InputFormat::Log);
        assert_eq!(InputFormat::Auto.detect("# 2024/11/25-29"), InputFormat::Log);
        assert_eq!(InputFormat::Auto.detect(""), InputFormat::Log);
        assert_eq!(InputFormat::Log.detect("[]"), InputFormat::Log);
    }

    #[test]
    fn log_and_nested_json_agree() -> Result<()> {
        let text = load_activity(
            "# 2024/11/25-29\n* GitHub: 月.....火...\n* JIRA: xyz",
            InputFormat::Auto,
            DecodeMode::First,
        )?;
        let json = load_activity(
            r#"{"2024/11/25-29": {"GitHub": "月.....火...", "JIRA": "xyz"}}"#,
            InputFormat::Auto,
            DecodeMode::First,
        )?;
        assert_eq!(text.records, json.records);
        assert_eq!(text.records.len(), 1);
        assert_eq!(text.records[0].day, Day::Mon);
        assert_eq!(text.diagnostics.len(), 1);
        assert_eq!(json.diagnostics.len(), 1);
        Ok(())
    }

    #[test]
    fn decode_mode_is_forwarded() -> Result<()> {
        let loaded = load_activity(
            "# 2024/11/25-29\n* GitHub: 月.....火...",
            InputFormat::Log,
            DecodeMode::Sequential,
        )?;
        assert_eq!(loaded.records.len(), 2);
        Ok(())
    }

    #[test]
    fn nothing_parsed_is_not_an_error() -> Result<()> {
        let loaded = load_activity("just some notes", InputFormat::Auto, DecodeMode::First)?;
        assert!(loaded.records.is_empty());
        Ok(())
    }

    #[test]
    fn bracketed_note_above_log_is_not_json() -> Result<()> {
        let loaded = load_activity(
            "[work notes]\n# 2024/11/25-29\n* GitHub: 月.....",
            InputFormat::Auto,
            DecodeMode::First,
        )?;
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].day, Day::Mon);
        assert_eq!(loaded.records[0].activity, 5);
        assert!(matches!(
            loaded.diagnostics.as_slice(),
            [Diagnostic::UnrecognizedLine { line: 1 }]
        ));
        Ok(())
    }

    #[test]
    fn forced_json_reports_format_error() {
        assert!(load_activity("# 2024/11/25-29", InputFormat::Json, DecodeMode::First).is_err());
        assert!(matches!(
            load_activity("[work notes]", InputFormat::Json, DecodeMode::First),
            Err(FormatError::Syntax(_))
        ));
        // Well formed JSON of the wrong shape is still an error in auto mode.
        assert!(matches!(
            load_activity("[1]", InputFormat::Auto, DecodeMode::First),
            Err(FormatError::Record { index: 0, .. })
        ));
    }
}
