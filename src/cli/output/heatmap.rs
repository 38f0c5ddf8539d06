use ansi_term::{Colour, Style};

use super::pivot::PivotTable;

// Light to dark, roughly the yellow-green-blue scale the charts used.
const SCALE: [Colour; 5] = [
    Colour::RGB(255, 255, 217),
    Colour::RGB(199, 233, 180),
    Colour::RGB(65, 182, 196),
    Colour::RGB(34, 94, 168),
    Colour::RGB(8, 29, 88),
];

fn format_value(value: f64) -> String {
    if value.fract() == 0. {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn cell_style(value: f64, max: f64) -> Style {
    if max <= 0. {
        return Style::new();
    }
    let index = ((value / max) * (SCALE.len() - 1) as f64).round() as usize;
    let background = SCALE[index.min(SCALE.len() - 1)];
    let foreground = if index >= SCALE.len() / 2 {
        Colour::White
    } else {
        Colour::Black
    };
    foreground.on(background)
}

/// Renders a pivot as an aligned text grid. With `colored` every cell is shaded by its share of
/// the largest cell.
pub fn render_heatmap(table: &PivotTable, title: &str, colored: bool) -> String {
    let mut output = format!("{title}\n");
    if table.is_empty() {
        output.push_str("(no activity)\n");
        return output;
    }

    let values = table
        .cells
        .iter()
        .map(|row| row.iter().map(|v| format_value(*v)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let label_width = table.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let widths = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            values
                .iter()
                .map(|row| row[index].chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    output.push_str(&" ".repeat(label_width));
    for (column, width) in table.columns.iter().zip(widths.iter().copied()) {
        output.push_str(&format!("  {column:>width$}"));
    }
    output.push('\n');

    let max = table.max();
    for ((label, row), cells) in table.rows.iter().zip(&values).zip(&table.cells) {
        output.push_str(&format!("{label:<label_width$}"));
        for ((value, width), cell) in row.iter().zip(widths.iter().copied()).zip(cells) {
            let text = format!("{value:>width$}");
            output.push_str("  ");
            if colored {
                output.push_str(&cell_style(*cell, max).paint(text).to_string());
            } else {
                output.push_str(&text);
            }
        }
        output.push('\n');
    }
    output
}
