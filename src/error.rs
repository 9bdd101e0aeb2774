//! Error types for rs-cfn-spec.
//!
//! Each layer has its own error so callers can match on the structural cause:
//! [`ParseError`] at the parser boundary, [`TableReadError`] during span
//! reconstruction and [`TransposeError`] for the matrix helper. [`Error`]
//! gathers them, along with the CloudFormation reader's errors, for callers
//! that don't care which layer failed.

/// The HTML byte stream could not be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The bytes are not valid for the encoding the document declares.
    #[error("malformed {encoding} byte stream")]
    MalformedBytes {
        /// WHATWG name of the encoding used for decoding.
        encoding: &'static str,
    },
}

/// Structural violation found while reconstructing a table grid.
///
/// These are deterministic facts about a fixed document, so nothing here is
/// worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableReadError {
    /// No row in the table has any cell.
    #[error("no columns in table")]
    NoColumns,

    /// The table lacks a required section element.
    #[error("table must have a {tag}")]
    MissingSection {
        /// `thead` or `tbody`.
        tag: &'static str,
    },

    /// A section exists but contains no `<tr>`.
    #[error("no rows inside {section}")]
    NoRows {
        /// Tag of the section element.
        section: String,
    },

    /// A physical row ran out of cells before every column that still
    /// needed one received a cell.
    #[error("row {row} of {section} has fewer cells than needed for column {column}")]
    InsufficientCells {
        /// Tag of the section element.
        section: String,
        /// Physical row index within the section.
        row: usize,
        /// Logical column that could not be filled.
        column: usize,
    },

    /// The logical grid of a section would exceed the cell limit.
    #[error("{section} grid of {columns} columns by {rows} rows exceeds {limit} cells")]
    TooLarge {
        /// Tag of the section element.
        section: String,
        /// Logical column count.
        columns: usize,
        /// Physical row count of the section.
        rows: usize,
        /// Largest number of logical slots accepted.
        limit: usize,
    },

    /// A logical column received no cell at all.
    #[error("table {section} has no cells in column {column}")]
    EmptyColumn {
        /// Tag of the section element.
        section: String,
        /// Logical column index.
        column: usize,
    },

    /// The reconstructed grid was not rectangular.
    #[error(transparent)]
    Transpose(#[from] TransposeError),
}

/// Invariant violation in [`crate::matrix::transpose`].
///
/// Unreachable for grids produced by the table reader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransposeError {
    /// The matrix has no rows.
    #[error("cannot transpose an empty matrix")]
    Empty,

    /// Rows differ in length.
    #[error("cannot transpose a matrix with varying minor lengths (expected {expected}, found {found} at row {row})")]
    Ragged {
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
        /// Index of the offending row.
        row: usize,
    },
}

/// Error type for document and table operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    Parse(#[from] ParseError),

    /// Table reconstruction failed.
    #[error("table read failed: {0}")]
    Table(#[from] TableReadError),

    /// The specification index or a specification file could not be read.
    #[error("specification read failed: {0}")]
    Specification(#[from] crate::cloudformation::SpecificationError),
}

/// Result type alias for document and table operations.
pub type Result<T> = std::result::Result<T, Error>;
