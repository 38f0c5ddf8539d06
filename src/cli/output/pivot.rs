use std::{fmt::Display, sync::Arc};

use clap::ValueEnum;

use crate::activity::entities::ActivityRecord;

/// Column of the record table a pivot can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Axis {
    Week,
    Category,
    Day,
}

impl Axis {
    fn key(&self, record: &ActivityRecord) -> Arc<str> {
        match self {
            Axis::Week => record.week.to_string().into(),
            Axis::Category => record.category.clone(),
            Axis::Day => record.day.as_str().into(),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Week => write!(f, "week"),
            Axis::Category => write!(f, "category"),
            Axis::Day => write!(f, "day"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Aggregation {
    Sum,
    Mean,
}

impl Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregation::Sum => write!(f, "sum"),
            Aggregation::Mean => write!(f, "mean"),
        }
    }
}

/// Label of the only row of a pivot without a row axis.
pub const TOTAL_ROW: &str = "activity";

#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub rows: Vec<Arc<str>>,
    pub columns: Vec<Arc<str>>,
    /// `cells[row][column]`. Empty cells are 0.
    pub cells: Vec<Vec<f64>>,
}

impl PivotTable {
    pub fn max(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .copied()
            .fold(0., f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Row of `record` among sorted `row_labels`. Without a row axis everything is in the first row.
fn row_index(row_labels: &[Arc<str>], rows: Option<Axis>, record: &ActivityRecord) -> Option<usize> {
    match rows {
        Some(axis) => row_labels.binary_search(&axis.key(record)).ok(),
        None if row_labels.is_empty() => None,
        None => Some(0),
    }
}

/// Groups activity by `rows` and `columns`. Rows are sorted, columns keep the order in which
/// their values first appear in `records`.
pub fn pivot(
    records: &[ActivityRecord],
    rows: Option<Axis>,
    columns: Axis,
    aggregation: Aggregation,
) -> PivotTable {
    let mut row_labels = match rows {
        Some(axis) => records.iter().map(|r| axis.key(r)).collect::<Vec<_>>(),
        None if records.is_empty() => vec![],
        None => vec![TOTAL_ROW.into()],
    };
    row_labels.sort();
    row_labels.dedup();

    let mut column_labels: Vec<Arc<str>> = vec![];
    for record in records {
        let key = columns.key(record);
        if !column_labels.contains(&key) {
            column_labels.push(key);
        }
    }

    let mut sums = vec![vec![0u64; column_labels.len()]; row_labels.len()];
    let mut counts = vec![vec![0u64; column_labels.len()]; row_labels.len()];
    for record in records {
        let Some(row) = row_index(&row_labels, rows, record) else {
            continue;
        };
        let key = columns.key(record);
        let Some(column) = column_labels.iter().position(|v| *v == key) else {
            continue;
        };
        sums[row][column] += record.activity as u64;
        counts[row][column] += 1;
    }

    let cells = sums
        .into_iter()
        .zip(counts)
        .map(|(sums, counts)| {
            sums.into_iter()
                .zip(counts)
                .map(|(sum, count)| match aggregation {
                    Aggregation::Sum => sum as f64,
                    Aggregation::Mean if count == 0 => 0.,
                    Aggregation::Mean => sum as f64 / count as f64,
                })
                .collect()
        })
        .collect();

    PivotTable {
        rows: row_labels,
        columns: column_labels,
        cells,
    }
}
