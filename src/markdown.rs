//! GFM rendering of reconstructed tables.
//!
//! Spans are already resolved by [`TableGrid`], so a merged cell simply
//! repeats its text in every slot it covers. The header line shows each
//! column's heading group.

use crate::error::TableReadError;
use crate::html::{distinct_text, Element, TableGrid};

/// Characters that have special meaning in Markdown table cells.
const MARKDOWN_SPECIAL_CHARS: &[char] = &['\\', '*', '_', '[', ']', '<', '>', '|', '`'];

/// Minimum column width, enough for a `---` separator.
const MIN_WIDTH: usize = 3;

/// Escape Markdown special characters, including the cell delimiter `|`.
///
/// # Examples
///
/// ```
/// use rs_cfn_spec::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("a|b"), r"a\|b");
/// assert_eq!(escape_markdown("AWS::S3::Bucket"), "AWS::S3::Bucket");
/// assert_eq!(escape_markdown("my_name"), r"my\_name");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Render a `<table>` element as a GFM table.
///
/// # Errors
///
/// Any [`TableReadError`] raised while reconstructing the grid.
pub fn table_to_markdown(table: Element<'_>) -> Result<String, TableReadError> {
    let grid = TableGrid::from_table(table)?;
    Ok(grid_to_markdown(&grid))
}

/// Render an already reconstructed grid as a GFM table.
#[must_use]
pub fn grid_to_markdown(grid: &TableGrid<'_>) -> String {
    let header: Vec<String> = grid
        .headings()
        .iter()
        .map(|group| escape_markdown(&distinct_text(group)))
        .collect();
    let body: Vec<Vec<String>> = grid
        .body()
        .iter()
        .map(|row| row.iter().map(|cell| escape_markdown(&cell.text())).collect())
        .collect();
    let alignments: Vec<Alignment> = (0..grid.columns())
        .map(|column| column_alignment(grid, column))
        .collect();

    let mut widths = vec![MIN_WIDTH; grid.columns()];
    for row in std::iter::once(&header).chain(&body) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_line(&mut output, &header, &widths, &alignments);
    output.push('|');
    for (&width, &align) in widths.iter().zip(&alignments) {
        output.push_str(&format_separator(width, align));
        output.push('|');
    }
    output.push('\n');
    for row in &body {
        push_line(&mut output, row, &widths, &alignments);
    }
    output
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize], alignments: &[Alignment]) {
    output.push('|');
    for ((cell, &width), &align) in cells.iter().zip(widths).zip(alignments) {
        output.push(' ');
        output.push_str(&pad_cell(cell, width, align));
        output.push_str(" |");
    }
    output.push('\n');
}

/// Column alignment from the `align` attribute of its first heading, or of
/// its first body cell when the heading has none.
fn column_alignment(grid: &TableGrid<'_>, column: usize) -> Alignment {
    let heading = grid.headings().get(column).and_then(|group| group.first());
    let cell = grid.body().first().and_then(|row| row.get(column));
    heading
        .into_iter()
        .chain(cell)
        .find_map(|element| element.attr("align"))
        .map_or(Alignment::None, Alignment::from_attr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_attr(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::None,
        }
    }
}

/// Separator cell spanning `width` plus the two padding spaces.
fn format_separator(width: usize, align: Alignment) -> String {
    match align {
        Alignment::None => "-".repeat(width + 2),
        Alignment::Left => format!(":{}", "-".repeat(width + 1)),
        Alignment::Right => format!("{}:", "-".repeat(width + 1)),
        Alignment::Center => format!(":{}:", "-".repeat(width)),
    }
}

fn pad_cell(text: &str, width: usize, align: Alignment) -> String {
    let padding = width.saturating_sub(text.chars().count());
    match align {
        Alignment::Right => format!("{}{text}", " ".repeat(padding)),
        Alignment::Center => {
            let left = padding / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(padding - left))
        }
        Alignment::None | Alignment::Left => format!("{text}{}", " ".repeat(padding)),
    }
}
