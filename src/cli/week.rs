use std::fmt::Display;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use crate::{
    activity::{entities::ActivityRecord, week::WeekLabel},
    utils::percentage::{count_percentage, Percentage},
};

use super::{
    input::{load_input, InputArgs},
    output::{
        analysis::{analyze_categories, analyze_days},
        records_for_week, select_week,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WeekGrouping {
    Category,
    Day,
}

impl Display for WeekGrouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekGrouping::Category => write!(f, "category"),
            WeekGrouping::Day => write!(f, "day"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct WeekCommand {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long, short, help = "Week to display, for example 2024/11/25-29. Defaults to the latest week")]
    week: Option<WeekLabel>,
    #[arg(long, default_value_t = WeekGrouping::Category, help = "Group activity per app or per day")]
    by: WeekGrouping,
    #[arg(short = 'p', long = "percentage", help = "Filter entries to have at least specified percentage", default_value_t = Percentage::zero())]
    min_percentage: Percentage,
}

/// Command to process `week` command. Prints how activity of one week splits between apps or
/// between days.
pub async fn process_week_command(
    WeekCommand {
        input,
        week,
        by,
        min_percentage,
    }: WeekCommand,
) -> Result<()> {
    let loaded = load_input(&input).await?;
    let Some(selected) = select_week(&loaded.records, week.as_ref()) else {
        return match week {
            Some(week) => Err(anyhow!("No activity recorded for week {week}")),
            None => {
                println!("No activity recorded");
                Ok(())
            }
        };
    };

    let records = records_for_week(&loaded.records, &selected);
    print!("{}", format_week(&selected, &records, by, min_percentage));
    Ok(())
}

fn format_week(
    week: &WeekLabel,
    records: &[ActivityRecord],
    by: WeekGrouping,
    min_percentage: Percentage,
) -> String {
    let mut output = String::new();
    match by {
        WeekGrouping::Category => {
            output.push_str(&format!("{week} per app\n"));
            let (usages, total) = analyze_categories(records, min_percentage);
            for usage in usages {
                let days = usage
                    .days
                    .iter()
                    .map(|(day, activity)| format!("{day}:{activity}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                output.push_str(&format!(
                    "{}\t{}%\t{}\t{}\n",
                    usage.category,
                    *count_percentage(usage.activity, total) as i32,
                    usage.activity,
                    days
                ));
            }
        }
        WeekGrouping::Day => {
            output.push_str(&format!("{week} per day\n"));
            let (usages, total) = analyze_days(records, min_percentage);
            for usage in usages {
                let categories = usage
                    .categories
                    .iter()
                    .map(|(category, activity)| format!("{category}:{activity}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                output.push_str(&format!(
                    "{}\t{}%\t{}\t{}\n",
                    usage.day,
                    *count_percentage(usage.activity, total) as i32,
                    usage.activity,
                    categories
                ));
            }
        }
    }
    output
}
