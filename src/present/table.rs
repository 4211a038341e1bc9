//! Plain-text table rendering

use super::View;

/// Cells longer than this are cut with an ellipsis
const MAX_CELL_WIDTH: usize = 48;

/// Render a view as an aligned text table with a header rule
#[must_use]
pub fn render(view: &View) -> String {
    let headers: Vec<String> = view.headers().iter().map(|h| (*h).to_string()).collect();
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.label.as_str())
                .chain(row.details.iter().map(String::as_str))
                .map(truncate)
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map_or("", String::as_str);
            format!("{cell:<width$}")
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let kept: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{kept}…")
    }
}
