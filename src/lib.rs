//! # rs-cfn-spec
//!
//! Span-aware table extraction for semi-structured HTML documentation, built
//! for the AWS CloudFormation resource specification pages.
//!
//! Documentation tables often merge cells with `colspan` and `rowspan`. This
//! library rebuilds the logical grid a reader sees, pairs every body cell with
//! the header cells above it and hands each logical row to a caller-supplied
//! processor.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_cfn_spec::cloudformation::regional_specifications;
//! use rs_cfn_spec::{parse_document, Options};
//!
//! let html = br#"<table>
//!   <thead><tr><th rowspan="2">Region</th><th colspan="2">Files</th></tr>
//!          <tr><th>Single file</th><th>All files</th></tr></thead>
//!   <tbody><tr><td>us-east-1</td>
//!              <td><a href="https://example.com/spec.json">JSON</a></td>
//!              <td><a href="https://example.com/spec.zip">Zip</a></td></tr></tbody>
//! </table>"#;
//!
//! let doc = parse_document(html)?;
//! let regions = regional_specifications(&doc, &Options::default())?;
//! assert_eq!(regions[0].region, "us-east-1");
//! assert_eq!(regions[0].url, "https://example.com/spec.json");
//! # Ok::<(), rs_cfn_spec::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Typed document tree**: elements and trimmed text in an arena, with
//!   parent links and tag-set queries over a lazy traversal
//! - **Span reconstruction**: `colspan`/`rowspan` resolved into a rectangular
//!   grid, with structural errors instead of silent truncation
//! - **Rendering**: reconstructed tables as GFM Markdown
//! - **CloudFormation**: regional specification index reader and the
//!   resource specification JSON schema

mod options;

/// Error types for parsing and table reconstruction.
pub mod error;

/// Typed HTML document tree, queries and table reconstruction.
pub mod html;

/// Lazy depth-first and breadth-first tree traversal.
pub mod traverse;

/// Bounded and unbounded FIFO work queues.
pub mod queue;

/// Rectangular matrix helpers.
pub mod matrix;

/// Charset detection and strict decoding.
pub mod encoding;

/// GFM rendering of reconstructed tables.
pub mod markdown;

/// CloudFormation specification index and schema.
pub mod cloudformation;

// Public API - re-exports
pub use error::{Error, ParseError, Result, TableReadError, TransposeError};
pub use html::{read_table, Document, Element};
pub use options::Options;

/// Decodes raw page bytes and parses them into a [`Document`].
///
/// The charset comes from the page's `<meta>` declaration, UTF-8 otherwise.
///
/// # Errors
///
/// Returns [`ParseError::MalformedBytes`] when the bytes are not valid in
/// that charset.
///
/// # Example
///
/// ```rust
/// use rs_cfn_spec::parse_document;
///
/// let doc = parse_document(b"<table><tr><td>x</td></tr></table>")?;
/// assert!(doc.find_first(&["td"]).is_some());
/// # Ok::<(), rs_cfn_spec::ParseError>(())
/// ```
pub fn parse_document(html: &[u8]) -> std::result::Result<Document, ParseError> {
    Document::parse_bytes(html)
}
