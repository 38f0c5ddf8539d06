use std::fmt::Display;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use crate::activity::{
    entities::ActivityRecord, load::InputFormat, parser::parse_log_with_report,
};

use super::{
    input::{load_input, read_input, InputArgs},
    output::week_labels,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RecordsOutput {
    Table,
    Json,
}

impl Display for RecordsOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordsOutput::Table => write!(f, "table"),
            RecordsOutput::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct RecordsCommand {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long, short, default_value_t = RecordsOutput::Table, help = "How records are printed")]
    output: RecordsOutput,
}

/// Prints the flat `week, category, day, activity` table.
pub async fn process_records_command(RecordsCommand { input, output }: RecordsCommand) -> Result<()> {
    let loaded = load_input(&input).await?;
    println!("{}", format_records(&loaded.records, output)?);
    Ok(())
}

fn format_records(records: &[ActivityRecord], output: RecordsOutput) -> Result<String> {
    match output {
        RecordsOutput::Json => {
            serde_json::to_string_pretty(records).context("Failed to serialize records")
        }
        RecordsOutput::Table => {
            let mut lines = vec!["week\tcategory\tday\tactivity".to_string()];
            lines.extend(records.iter().map(|r| {
                format!("{}\t{}\t{}\t{}", r.week, r.category, r.day, r.activity)
            }));
            Ok(lines.join("\n"))
        }
    }
}

#[derive(Debug, Parser)]
pub struct ParseCommand {
    #[arg(help = "File with the weekly log. Reads stdin when missing or \"-\"")]
    file: Option<std::path::PathBuf>,
    #[arg(long, help = "Print skipped lines to stderr")]
    diagnostics: bool,
}

/// Prints the log as it was read, before any day decoding.
pub async fn process_parse_command(ParseCommand { file, diagnostics }: ParseCommand) -> Result<()> {
    let text = read_input(file.as_deref()).await?;
    if InputFormat::Auto.detect(&text) == InputFormat::Json {
        bail!("parse expects the weekly log format, use `records` for JSON input");
    }
    let report = parse_log_with_report(&text);
    if diagnostics {
        for diagnostic in &report.diagnostics {
            eprintln!("{diagnostic}");
        }
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&report.log).context("Failed to serialize log")?
    );
    Ok(())
}

#[derive(Debug, Parser)]
pub struct WeeksCommand {
    #[command(flatten)]
    input: InputArgs,
}

/// Prints every week with records, oldest first.
pub async fn process_weeks_command(WeeksCommand { input }: WeeksCommand) -> Result<()> {
    let loaded = load_input(&input).await?;
    for week in week_labels(&loaded.records) {
        match (week.start_date(), week.end_date()) {
            (Some(start), Some(end)) => {
                println!("{week}\t{}\t{}", start.format("%a %d %b %Y"), end.format("%a %d %b %Y"))
            }
            _ => println!("{week}"),
        }
    }
    Ok(())
}
