// report.rs

use crate::convert::ConversionTable;

pub const NOTE_COLUMN: &str = "Note Value";

/// Column headers in display order: note, dotted, straight, triplet.
pub fn header(table: &ConversionTable) -> [String; 4] {
    let unit = table.mode.unit();
    [
        NOTE_COLUMN.to_string(),
        format!("Dotted ({})", unit),
        format!("Notes ({})", unit),
        format!("Triplet ({})", unit),
    ]
}

pub fn formatted_rows(table: &ConversionTable) -> Vec<[String; 4]> {
    table
        .rows
        .iter()
        .map(|row| {
            [
                row.division.label.to_string(),
                table.format_value(row.dotted),
                table.format_value(row.straight),
                table.format_value(row.triplet),
            ]
        })
        .collect()
}

/// Plain-text table with right-aligned value columns.
pub fn format_table(table: &ConversionTable) -> String {
    let header = header(table);
    let rows = formatted_rows(table);
    let widths = column_widths(&header, &rows);

    let mut out = format!("BPM: {}\n", table.bpm);
    out.push_str(&align_row(&header, &widths));
    out.push('\n');
    out.push_str(&"-".repeat(line_width(&widths)));
    out.push('\n');
    for row in &rows {
        out.push_str(&align_row(row, &widths));
        out.push('\n');
    }
    out
}

pub fn column_widths(header: &[String; 4], rows: &[[String; 4]]) -> [usize; 4] {
    let mut widths = [0; 4];
    for cells in std::iter::once(header).chain(rows.iter()) {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

pub fn line_width(widths: &[usize; 4]) -> usize {
    widths.iter().sum::<usize>() + 3 * 2
}

/// Left-aligns the note label and right-aligns the three values.
pub fn align_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    format!(
        "{:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    )
}
