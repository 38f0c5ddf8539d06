use std::fmt::Display;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::activity::entities::ActivityRecord;

use super::{
    input::{load_input, InputArgs},
    output::{
        heatmap::render_heatmap,
        pivot::{pivot, Aggregation, Axis},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeatmapRows {
    Week,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeatmapColumns {
    Category,
    Day,
}

impl Display for HeatmapColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeatmapColumns::Category => write!(f, "category"),
            HeatmapColumns::Day => write!(f, "day"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct HeatmapCommand {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long, help = "Row grouping. Shows every view when neither rows nor columns are given")]
    rows: Option<HeatmapRows>,
    #[arg(long, help = "Column grouping")]
    columns: Option<HeatmapColumns>,
    #[arg(
        long,
        help = "How records sharing a cell are combined. Defaults to mean for weekly rows and sum for totals"
    )]
    aggregate: Option<Aggregation>,
    #[arg(long = "no-color", help = "Print without terminal colours")]
    no_color: bool,
}

struct View {
    rows: Option<Axis>,
    columns: Axis,
    aggregation: Aggregation,
}

impl View {
    fn title(&self) -> String {
        let subject = match self.columns {
            Axis::Category => "Apps",
            Axis::Day => "Day",
            Axis::Week => "Week",
        };
        match (self.rows, self.aggregation) {
            (Some(_), Aggregation::Mean) => format!("Activity count per week by {subject}"),
            (Some(_), Aggregation::Sum) => format!("Activity count per week by {subject} (sum)"),
            (None, Aggregation::Sum) => format!("Activity count by {subject}"),
            (None, Aggregation::Mean) => format!("Activity count by {subject} (mean)"),
        }
    }
}

/// The four views shown when nothing narrows the selection.
fn default_views() -> Vec<View> {
    vec![
        View {
            rows: Some(Axis::Week),
            columns: Axis::Category,
            aggregation: Aggregation::Mean,
        },
        View {
            rows: None,
            columns: Axis::Category,
            aggregation: Aggregation::Sum,
        },
        View {
            rows: Some(Axis::Week),
            columns: Axis::Day,
            aggregation: Aggregation::Mean,
        },
        View {
            rows: None,
            columns: Axis::Day,
            aggregation: Aggregation::Sum,
        },
    ]
}

fn selected_views(
    rows: Option<HeatmapRows>,
    columns: Option<HeatmapColumns>,
    aggregate: Option<Aggregation>,
) -> Vec<View> {
    let views = default_views()
        .into_iter()
        .filter(|view| match rows {
            Some(HeatmapRows::Week) => view.rows.is_some(),
            Some(HeatmapRows::None) => view.rows.is_none(),
            None => true,
        })
        .filter(|view| match columns {
            Some(HeatmapColumns::Category) => view.columns == Axis::Category,
            Some(HeatmapColumns::Day) => view.columns == Axis::Day,
            None => true,
        });
    match aggregate {
        Some(aggregation) => views.map(|view| View { aggregation, ..view }).collect(),
        None => views.collect(),
    }
}

fn format_views(records: &[ActivityRecord], views: &[View], colored: bool) -> String {
    views
        .iter()
        .map(|view| {
            let table = pivot(records, view.rows, view.columns, view.aggregation);
            render_heatmap(&table, &view.title(), colored)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Command to process `heatmap` command. Prints activity pivoted by week, app and day.
pub async fn process_heatmap_command(
    HeatmapCommand {
        input,
        rows,
        columns,
        aggregate,
        no_color,
    }: HeatmapCommand,
) -> Result<()> {
    let loaded = load_input(&input).await?;
    let views = selected_views(rows, columns, aggregate);
    print!("{}", format_views(&loaded.records, &views, !no_color));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_views, selected_views, HeatmapColumns, HeatmapRows};
    use crate::{
        activity::{
            load::{load_activity, InputFormat},
            table::DecodeMode,
        },
        cli::output::pivot::{Aggregation, Axis},
    };

    #[test]
    fn view_selection() {
        assert_eq!(selected_views(None, None, None).len(), 4);

        let views = selected_views(Some(HeatmapRows::None), Some(HeatmapColumns::Day), None);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].columns, Axis::Day);
        assert_eq!(views[0].aggregation, Aggregation::Sum);

        let views = selected_views(Some(HeatmapRows::Week), None, Some(Aggregation::Sum));
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.aggregation == Aggregation::Sum));
    }

    #[test]
    fn renders_totals_by_app() {
        let records = load_activity(
            "# 2024/11/25-29\n* GitHub: 月...\n* JIRA: 火.\n# 2024/12/02-06\n* GitHub: 月.",
            InputFormat::Log,
            DecodeMode::First,
        )
        .unwrap()
        .records;
        let views = selected_views(Some(HeatmapRows::None), Some(HeatmapColumns::Category), None);
        assert_eq!(
            format_views(&records, &views, false),
            "Activity count by Apps\n\
             \x20         GitHub  JIRA\n\
             activity       4     1\n"
        );
    }
}
