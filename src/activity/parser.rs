use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::{diagnostic::Diagnostic, entities::RawWeekLog, week::WeekLabel};

static WEEK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[#\s]*([0-9]{4}/[0-9]{2}/[0-9]{2}-[0-9]{2})")
        .expect("week header pattern should compile")
});

static CATEGORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\* (.+): (.+)").expect("category line pattern should compile")
});

/// Result of reading a log together with everything that got skipped on the way.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub log: RawWeekLog,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reads a weekly log. Never fails: lines that can't be understood are skipped.
///
/// ```text
/// # 2024/11/25-29
/// * GitHub: 月.....火...水.木...金........
/// * JIRA: 月..火.............水.....木金.
/// ```
pub fn parse_log(input: &str) -> RawWeekLog {
    parse_log_with_report(input).log
}

/// Same as [parse_log] but also reports skipped and replaced lines.
pub fn parse_log_with_report(input: &str) -> ParseReport {
    let mut report = ParseReport::default();

    let trimmed_start = input.trim_start();
    // Line numbers refer to the untrimmed input.
    let skipped_lines = input[..input.len() - trimmed_start.len()].matches('\n').count();

    let mut current_week: Option<WeekLabel> = None;
    for (index, line) in trimmed_start.trim_end().split('\n').enumerate() {
        let line_number = skipped_lines + index + 1;
        let mut recognized = false;

        if let Some(week) = WEEK_HEADER
            .captures(line)
            .and_then(|captures| WeekLabel::new_opt(&captures[1]))
        {
            recognized = true;
            debug!("Found week {week} on line {line_number}");
            if report.log.reset_week(week.clone()) {
                report.diagnostics.push(Diagnostic::WeekRedeclared {
                    line: line_number,
                    week: week.clone(),
                });
            }
            current_week = Some(week);
        }

        if let Some(captures) = CATEGORY_LINE.captures(line) {
            recognized = true;
            let category = captures[1].trim();
            let value = captures[2].trim();
            match current_week
                .as_ref()
                .and_then(|week| Some((week, report.log.week_mut(week)?)))
            {
                Some((week, categories)) => {
                    trace!("{week} {category}: {value}");
                    if categories.insert(category, value.to_string()) {
                        report.diagnostics.push(Diagnostic::CategoryOverwritten {
                            line: line_number,
                            week: week.clone(),
                            category: category.into(),
                        });
                    }
                }
                None => report.diagnostics.push(Diagnostic::CategoryBeforeWeek {
                    line: line_number,
                    category: category.into(),
                }),
            }
        }

        if !recognized && !line.trim().is_empty() {
            report
                .diagnostics
                .push(Diagnostic::UnrecognizedLine { line: line_number });
        }
    }

    report
}
