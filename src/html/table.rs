//! Logical grids for tables with merged cells.
//!
//! A `<table>` with `colspan`/`rowspan` cells is flattened into the grid a
//! reader sees: every logical slot holds the element that covers it, so a
//! cell spanning three columns appears, by identity, in three slots. The
//! header section yields one heading group per column; the body yields one
//! [`TableRow`] per logical row, pairing every cell with its headings.
//!
//! Each section is rebuilt with one FIFO per logical column. Rows are
//! processed top to bottom; a column whose queue length equals the current
//! row index still needs a cell from this row, a longer queue means a cell
//! from above already covers it.

use super::{Element, Selection};
use crate::error::TableReadError;
use crate::matrix::{self, Matrix};
use crate::queue::Queue;

/// Largest `colspan` honoured, as in the HTML table model.
const MAX_COLSPAN: usize = 1000;

/// Largest `rowspan` honoured, as in the HTML table model.
const MAX_ROWSPAN: usize = 65534;

/// Largest number of logical slots, columns times rows, rebuilt per section.
const MAX_GRID_CELLS: usize = 1 << 22;

/// One logical column of a body row: the cell and the header cells above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn<'a> {
    headings: Vec<Element<'a>>,
    cell: Element<'a>,
}

impl<'a> TableColumn<'a> {
    /// Header cells covering this column, top to bottom. Never empty.
    #[must_use]
    pub fn headings(&self) -> &[Element<'a>] {
        &self.headings
    }

    /// The body cell occupying this column in this row.
    #[must_use]
    pub fn cell(&self) -> Element<'a> {
        self.cell
    }

    /// Whether any heading's text is exactly `text`.
    #[must_use]
    pub fn headings_include(&self, text: &str) -> bool {
        self.headings.iter().any(|heading| heading.text() == text)
    }

    /// Distinct heading texts joined with a space.
    #[must_use]
    pub fn heading_text(&self) -> String {
        distinct_text(&self.headings)
    }
}

/// Text of each element, without repeats or blanks, joined with a space.
/// Spanned header cells appear once.
pub(crate) fn distinct_text(elements: &[Element<'_>]) -> String {
    let mut texts: Vec<String> = Vec::with_capacity(elements.len());
    for element in elements {
        let text = element.text();
        if !text.is_empty() && !texts.contains(&text) {
            texts.push(text);
        }
    }
    texts.join(" ")
}

/// A logical body row, one [`TableColumn`] per column, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow<'a> {
    columns: Vec<TableColumn<'a>>,
}

impl<'a> TableRow<'a> {
    /// Every column of the row. Never empty.
    #[must_use]
    pub fn columns(&self) -> &[TableColumn<'a>] {
        &self.columns
    }

    /// Number of logical columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; a row has at least one column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Body cells left to right; spanned cells repeat.
    pub fn cells(&self) -> impl Iterator<Item = Element<'a>> + '_ {
        self.columns.iter().map(TableColumn::cell)
    }

    /// First column accepted by `predicate`.
    pub fn find_column<P>(&self, mut predicate: P) -> Option<&TableColumn<'a>>
    where
        P: FnMut(&TableColumn<'a>) -> bool,
    {
        self.columns.iter().find(|column| predicate(column))
    }

    /// Like [`TableRow::find_column`], reporting a miss through `or_else`.
    ///
    /// # Errors
    ///
    /// Returns `or_else()` when no column matches.
    pub fn find_column_or_else<P, E, F>(&self, predicate: P, or_else: F) -> Result<&TableColumn<'a>, E>
    where
        P: FnMut(&TableColumn<'a>) -> bool,
        F: FnOnce() -> E,
    {
        self.find_column(predicate).ok_or_else(or_else)
    }

    /// First column with a heading whose text is exactly `heading`.
    #[must_use]
    pub fn column_by_heading(&self, heading: &str) -> Option<&TableColumn<'a>> {
        self.find_column(|column| column.headings_include(heading))
    }
}

/// The reconstructed grid of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid<'a> {
    columns: usize,
    headings: Matrix<Element<'a>>,
    body: Matrix<Element<'a>>,
}

impl<'a> TableGrid<'a> {
    /// Rebuild the logical grid of `table`.
    ///
    /// # Errors
    ///
    /// Fails when a `<thead>` or `<tbody>` is missing or has no rows, when no
    /// row has a cell, or when a row runs out of cells before every column
    /// that needs one is filled. A header narrower than the body fails the
    /// same way instead of being truncated.
    pub fn from_table(table: Element<'a>) -> Result<Self, TableReadError> {
        let head = section_rows(table, "thead")?;
        let body = section_rows(table, "tbody")?;

        let columns = count_columns(head.iter().chain(&body).copied());
        if columns == 0 {
            return Err(TableReadError::NoColumns);
        }

        let headings = reconstruct("thead", &head, columns)?;
        let body = matrix::transpose(&reconstruct("tbody", &body, columns)?)?;

        tracing::debug!(
            columns,
            header_rows = head.len(),
            body_rows = body.len(),
            "table grid rebuilt"
        );
        Ok(Self {
            columns,
            headings,
            body,
        })
    }

    /// Number of logical columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Heading groups, one per column (column-major).
    #[must_use]
    pub fn headings(&self) -> &Matrix<Element<'a>> {
        &self.headings
    }

    /// Body cells, one vector per logical row (row-major).
    #[must_use]
    pub fn body(&self) -> &Matrix<Element<'a>> {
        &self.body
    }

    /// Pair every body row with the heading groups.
    #[must_use]
    pub fn rows(&self) -> Vec<TableRow<'a>> {
        self.body
            .iter()
            .map(|cells| TableRow {
                columns: self
                    .headings
                    .iter()
                    .zip(cells)
                    .map(|(headings, &cell)| TableColumn {
                        headings: headings.clone(),
                        cell,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Reconstruct `table` and hand every logical body row to `processor`.
///
/// The processor gets the row and its 0-based index. Structural errors are
/// converted into the processor's error type; the first processor error is
/// returned as is and stops the read.
///
/// # Errors
///
/// Any [`TableReadError`] from [`TableGrid::from_table`], or the first error
/// returned by `processor`.
///
/// # Example
///
/// ```
/// use rs_cfn_spec::error::TableReadError;
/// use rs_cfn_spec::html::{read_table, Document};
///
/// let doc = Document::parse_fragment(
///     "<table><thead><tr><th>Region</th></tr></thead>\
///      <tbody><tr><td>us-east-1</td></tr></tbody></table>",
/// );
/// let table = doc.find_first(&["table"]).unwrap();
/// let regions = read_table(table, |row, _| {
///     Ok::<_, TableReadError>(row.columns()[0].cell().text())
/// })
/// .unwrap();
/// assert_eq!(regions, vec!["us-east-1"]);
/// ```
pub fn read_table<'a, A, E, F>(table: Element<'a>, mut processor: F) -> Result<Vec<A>, E>
where
    F: FnMut(&TableRow<'a>, usize) -> Result<A, E>,
    E: From<TableReadError>,
{
    let rows = read_table_rows(table)?;
    let read: Vec<A> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| processor(row, index))
        .collect::<Result<_, E>>()?;
    tracing::trace!(rows = read.len(), "table rows processed");
    Ok(read)
}

/// Reconstruct `table` into logical body rows.
///
/// # Errors
///
/// See [`TableGrid::from_table`].
pub fn read_table_rows(table: Element<'_>) -> Result<Vec<TableRow<'_>>, TableReadError> {
    TableGrid::from_table(table).map(|grid| grid.rows())
}

/// Widest row, counting each cell once per unit of `colspan`.
pub fn count_columns<'a, I>(rows: I) -> usize
where
    I: IntoIterator<Item = Element<'a>>,
{
    rows.into_iter()
        .map(|row| cells(row).map(colspan).sum::<usize>())
        .max()
        .unwrap_or(0)
}

fn section_rows<'a>(table: Element<'a>, tag: &'static str) -> Result<Vec<Element<'a>>, TableReadError> {
    let section = table.find_or_else(&[tag], Selection::First, || TableReadError::MissingSection { tag })?;
    section.find_some_or_else(&["tr"], || TableReadError::NoRows {
        section: tag.to_string(),
    })
}

fn cells(row: Element<'_>) -> impl Iterator<Item = Element<'_>> {
    row.child_elements()
        .filter(|cell| matches!(cell.tag(), "td" | "th"))
}

fn span(cell: Element<'_>, attribute: &str, max: usize) -> usize {
    cell.numeric_attr(attribute)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(max))
}

fn colspan(cell: Element<'_>) -> usize {
    span(cell, "colspan", MAX_COLSPAN)
}

fn rowspan(cell: Element<'_>) -> usize {
    span(cell, "rowspan", MAX_ROWSPAN)
}

/// Column-major occupants of one section, `width` columns wide.
fn reconstruct<'a>(section: &str, rows: &[Element<'a>], width: usize) -> Result<Matrix<Element<'a>>, TableReadError> {
    let height = rows.len();
    if width.saturating_mul(height) > MAX_GRID_CELLS {
        return Err(TableReadError::TooLarge {
            section: section.to_string(),
            columns: width,
            rows: height,
            limit: MAX_GRID_CELLS,
        });
    }
    let columns: Vec<Queue<Element<'a>>> = (0..width).map(|_| Queue::dropping(height)).collect();

    for (index, &row) in rows.iter().enumerate() {
        let pending = Queue::dropping(width);
        for cell in cells(row) {
            for _ in 0..colspan(cell) {
                pending.offer(cell);
            }
        }

        let mut cursor = pending.poll();
        let mut placed: Option<Element<'a>> = None;
        for (column_index, column) in columns.iter().enumerate() {
            if column.len() == index {
                let cell = cursor.ok_or_else(|| TableReadError::InsufficientCells {
                    section: section.to_string(),
                    row: index,
                    column: column_index,
                })?;
                for _ in 0..rowspan(cell).min(height - index) {
                    column.offer(cell);
                }
                placed = Some(cell);
                cursor = pending.poll();
            } else if column_index + 1 < width {
                // Covered from above; a colspan remainder of the cell just
                // placed cannot land here.
                while cursor.is_some() && cursor == placed {
                    cursor = pending.poll();
                }
            }
        }
    }

    columns
        .iter()
        .enumerate()
        .map(|(column_index, column)| {
            column.take_all_non_empty_or_else(|| TableReadError::EmptyColumn {
                section: section.to_string(),
                column: column_index,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::Document;

    fn texts(elements: &[Element<'_>]) -> Vec<String> {
        elements.iter().map(|e| e.text()).collect()
    }

    fn table(doc: &Document) -> Element<'_> {
        let Some(table) = doc.find_first(&["table"]) else {
            panic!("expected a table");
        };
        table
    }

    #[test]
    fn test_plain_table() {
        let doc = Document::parse_fragment(
            "<table>
                <thead><tr><th>A</th><th>B</th></tr></thead>
                <tbody><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></tbody>
            </table>",
        );
        let Ok(grid) = TableGrid::from_table(table(&doc)) else {
            panic!("plain table should read");
        };

        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.headings().len(), 2);
        assert_eq!(texts(&grid.body()[0]), vec!["1", "2"]);
        assert_eq!(texts(&grid.body()[1]), vec!["3", "4"]);
    }

    #[test]
    fn test_body_colspan_and_rowspan() {
        let doc = Document::parse_fragment(
            "<table>
                <thead><tr><th>A</th><th>B</th><th>C</th></tr></thead>
                <tbody>
                    <tr><td rowspan=\"2\">x</td><td colspan=\"2\">y</td></tr>
                    <tr><td>p</td><td>q</td></tr>
                </tbody>
            </table>",
        );
        let Ok(grid) = TableGrid::from_table(table(&doc)) else {
            panic!("spanned table should read");
        };

        assert_eq!(texts(&grid.body()[0]), vec!["x", "y", "y"]);
        assert_eq!(texts(&grid.body()[1]), vec!["x", "p", "q"]);
        assert_eq!(grid.body()[0][0], grid.body()[1][0]);
        assert_eq!(grid.body()[0][1], grid.body()[0][2]);
    }

    #[test]
    fn test_rowspan_in_last_column() {
        let doc = Document::parse_fragment(
            "<table>
                <thead><tr><th>A</th><th>B</th></tr></thead>
                <tbody>
                    <tr><td>1</td><td rowspan=\"3\">z</td></tr>
                    <tr><td>2</td></tr>
                    <tr><td>3</td></tr>
                </tbody>
            </table>",
        );
        let Ok(rows) = read_table_rows(table(&doc)) else {
            panic!("table should read");
        };

        let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells().map(|c| c.text()).collect()).collect();
        assert_eq!(cells, vec![vec!["1", "z"], vec!["2", "z"], vec!["3", "z"]]);
    }

    #[test]
    fn test_rowspan_past_last_row_is_clamped() {
        let doc = Document::parse_fragment(
            "<table>
                <thead><tr><th>A</th></tr></thead>
                <tbody><tr><td rowspan=\"9\">only</td></tr></tbody>
            </table>",
        );
        let Ok(grid) = TableGrid::from_table(table(&doc)) else {
            panic!("table should read");
        };

        assert_eq!(grid.body().len(), 1);
    }

    #[test]
    fn test_invalid_spans_count_as_one() {
        let doc = Document::parse_fragment(
            "<table>
                <thead><tr><th colspan=\"0\">A</th><th colspan=\"-3\">B</th><th colspan=\"two\">C</th></tr></thead>
                <tbody><tr><td>1</td><td>2</td><td>3</td></tr></tbody>
            </table>",
        );
        let Ok(grid) = TableGrid::from_table(table(&doc)) else {
            panic!("table should read");
        };

        assert_eq!(grid.columns(), 3);
    }

    #[test]
    fn test_heading_lookup() {
        let doc = Document::parse_fragment(
            "<table>
                <thead>
                    <tr><th rowspan=\"2\">Region</th><th colspan=\"2\">Files</th></tr>
                    <tr><th>Single file</th><th>All files</th></tr>
                </thead>
                <tbody><tr><td>us-east-1</td><td>a</td><td>b</td></tr></tbody>
            </table>",
        );
        let Ok(rows) = read_table_rows(table(&doc)) else {
            panic!("table should read");
        };
        let row = &rows[0];

        let region = row.column_by_heading("Region").map(|c| c.cell().text());
        let single = row.column_by_heading("Single file").map(|c| c.cell().text());
        assert_eq!(region.as_deref(), Some("us-east-1"));
        assert_eq!(single.as_deref(), Some("a"));
        assert_eq!(row.columns()[0].heading_text(), "Region");
        assert_eq!(row.columns()[2].heading_text(), "Files All files");

        let missing = row.find_column_or_else(|c| c.headings_include("Zone"), || "no zone column");
        assert_eq!(missing, Err("no zone column"));
    }

    #[test]
    fn test_processor_error_passes_through() {
        #[derive(Debug, PartialEq)]
        enum RowError {
            Table(TableReadError),
            Rejected(usize),
        }

        impl From<TableReadError> for RowError {
            fn from(err: TableReadError) -> Self {
                Self::Table(err)
            }
        }

        let doc = Document::parse_fragment(
            "<table><thead><tr><th>A</th></tr></thead>
             <tbody><tr><td>1</td></tr><tr><td>2</td></tr></tbody></table>",
        );

        let rejected = read_table(table(&doc), |_, index| {
            if index == 1 {
                Err(RowError::Rejected(index))
            } else {
                Ok(index)
            }
        });
        assert_eq!(rejected, Err(RowError::Rejected(1)));

        let empty = Document::parse_fragment("<table><tbody><tr><td>1</td></tr></tbody></table>");
        let structural = read_table(table(&empty), |_, index| Ok::<_, RowError>(index));
        assert_eq!(
            structural,
            Err(RowError::Table(TableReadError::MissingSection { tag: "thead" }))
        );
    }

    #[test]
    fn test_count_columns() {
        let doc = Document::parse_fragment(
            "<table><tbody>
                <tr><td>a</td><td colspan=\"2\">b</td><td>c</td></tr>
                <tr><td>d</td></tr>
            </tbody></table>",
        );

        assert_eq!(count_columns(doc.find_all(&["tr"])), 4);
        assert_eq!(count_columns(Vec::new()), 0);
    }

    #[test]
    fn test_colspan_into_covered_last_column() {
        let doc = Document::parse_fragment(
            "<table>
                <thead><tr><th>A</th><th>B</th><th>C</th></tr></thead>
                <tbody>
                    <tr><td>1</td><td>2</td><td rowspan=\"2\">r</td></tr>
                    <tr><td colspan=\"3\">x</td></tr>
                </tbody>
            </table>",
        );
        let Ok(grid) = TableGrid::from_table(table(&doc)) else {
            panic!("table should read");
        };

        assert_eq!(texts(&grid.body()[1]), vec!["x", "x", "r"]);
    }

    #[test]
    fn test_oversized_grid_is_rejected_before_reconstruction() {
        let head = "<th colspan=\"1000\">h</th>".repeat(5);
        let body = "<tr><td>b</td></tr>".repeat(MAX_GRID_CELLS / 5000 + 1);
        let doc = Document::parse_fragment(&format!(
            "<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>"
        ));

        let result = TableGrid::from_table(table(&doc));
        assert!(matches!(
            result,
            Err(TableReadError::TooLarge { ref section, columns: 5000, limit: MAX_GRID_CELLS, .. }) if section == "tbody"
        ));
    }
}
