//! Bordered text tables.
//!
//! Widths are counted in `char`s. Wide glyphs (emoji, CJK) are not measured
//! by display width, so such columns may look a little ragged in a terminal.

/// Render `headers` and `rows` as a `+`/`-`/`|` grid.
///
/// Each column is as wide as its longest cell (header included). Rows with
/// fewer cells than the header are padded with empty cells; extra cells are
/// dropped.
pub fn render<H, R, C>(headers: &[H], rows: &[R]) -> String
where
    H: AsRef<str>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let widths = column_widths(headers, rows);
    let border = border_line(&widths);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border.clone());
    lines.push(format_row(headers.iter().map(|h| h.as_ref()), &widths));
    lines.push(border.clone());
    for row in rows {
        lines.push(format_row(row.as_ref().iter().map(|c| c.as_ref()), &widths));
    }
    lines.push(border);

    lines.join("\n")
}

fn column_widths<H, R, C>(headers: &[H], rows: &[R]) -> Vec<usize>
where
    H: AsRef<str>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut widths: Vec<usize> = headers.iter().map(|h| char_len(h.as_ref())).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
            *width = (*width).max(char_len(cell.as_ref()));
        }
    }
    widths
}

fn border_line(widths: &[usize]) -> String {
    let mut out = String::from("+");
    for width in widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('+');
    }
    out
}

fn format_row<'a>(mut cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut out = String::from("|");
    for width in widths {
        let cell = cells.next().unwrap_or("");
        let pad = width - char_len(cell);
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
