//! AWS CloudFormation resource specifications.
//!
//! The documentation page at [`SPECIFICATION_INDEX_URL`] lists, per region,
//! a link to that region's resource specification JSON. The index is a table
//! whose header merges cells across rows and columns, so it is read with
//! [`read_table`] and a row processor that looks columns up by heading.

mod regional;
mod specification;

pub use regional::RegionalSpecificationData;
pub use specification::{
    Attribute, ItemType, PrimitiveItemType, PrimitiveType, Property, PropertyType, ResourceType,
    Specification, StructType, UpdateType, ValueType, ValueTypeError,
};

use crate::error::TableReadError;
use crate::html::{read_table, Document, Selection};
use crate::Options;

/// Documentation page listing the regional specification files.
pub const SPECIFICATION_INDEX_URL: &str =
    "https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/cfn-resource-specification.html";

/// Failure to read the specification index or a specification file.
#[derive(Debug, thiserror::Error)]
pub enum SpecificationError {
    /// The page has fewer tables than the configured index requires.
    #[error("no table at index {index} in the specification index")]
    NoTable {
        /// Requested 0-based table position.
        index: usize,
    },

    /// The table could not be reconstructed.
    #[error("cannot read regional specifications table: {0}")]
    Table(#[from] TableReadError),

    /// A body row has no column under the expected heading.
    #[error("row {row} has no column headed {heading:?}")]
    MissingColumn {
        /// Heading text that was looked for.
        heading: String,
        /// 0-based logical body row.
        row: usize,
    },

    /// The specification column holds no link.
    #[error("row {row} has no anchor in the specification url column")]
    MissingAnchor {
        /// 0-based logical body row.
        row: usize,
    },

    /// The specification link has no `href`.
    #[error("row {row} has no href on the specification url anchor")]
    MissingHref {
        /// 0-based logical body row.
        row: usize,
    },

    /// The link is relative and no base URL was configured.
    #[error("relative specification url {href:?} and no base url configured")]
    RelativeUrl {
        /// The raw `href` value.
        href: String,
    },

    /// The link or the base URL does not parse.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        /// The text that failed to parse.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },

    /// A specification file is not valid JSON for the schema.
    #[error("invalid specification json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read every region's specification link from the index page.
///
/// # Errors
///
/// Returns [`SpecificationError::NoTable`] when the configured table does not
/// exist, [`SpecificationError::Table`] when it cannot be reconstructed, and
/// the row-level variants for the first row that lacks its region or link.
pub fn regional_specifications(
    document: &Document,
    options: &Options,
) -> Result<Vec<RegionalSpecificationData>, SpecificationError> {
    let table = document.find_or_else(&["table"], Selection::Nth(options.table_index), || {
        SpecificationError::NoTable {
            index: options.table_index,
        }
    })?;

    let data = read_table(table, |row, index| {
        RegionalSpecificationData::from_table_row(row, index, options)
    })?;

    tracing::info!(regions = data.len(), "regional specification data collected");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <html><body>
        <table id="regions">
            <thead>
                <tr><th rowspan="2">Region</th><th colspan="2">Resource specification</th></tr>
                <tr><th>Single file</th><th>All files</th></tr>
            </thead>
            <tbody>
                <tr>
                    <td>us-east-1</td>
                    <td><a href="https://d1uauaxba7bl26.cloudfront.net/latest/gzip/CloudFormationResourceSpecification.json">JSON</a></td>
                    <td><a href="https://d1uauaxba7bl26.cloudfront.net/latest/CloudFormationResourceSpecification.zip">Zip</a></td>
                </tr>
                <tr>
                    <td>eu-west-1</td>
                    <td><a href="/eu-west-1/spec.json">JSON</a></td>
                    <td><a href="/eu-west-1/spec.zip">Zip</a></td>
                </tr>
            </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_reads_every_region() {
        let doc = Document::parse(INDEX);
        let options = Options {
            base_url: Some("https://cfn.example.com/specs/".to_string()),
            ..Options::default()
        };

        let data = match regional_specifications(&doc, &options) {
            Ok(data) => data,
            Err(error) => panic!("index should read: {error}"),
        };

        assert_eq!(data.len(), 2);
        assert_eq!(data[0].region, "us-east-1");
        assert!(data[0].url.ends_with("/latest/gzip/CloudFormationResourceSpecification.json"));
        assert_eq!(data[1].region, "eu-west-1");
        assert_eq!(data[1].url, "https://cfn.example.com/eu-west-1/spec.json");
    }

    #[test]
    fn test_relative_link_without_base_url() {
        let doc = Document::parse(INDEX);
        let result = regional_specifications(&doc, &Options::default());

        assert!(matches!(
            result,
            Err(SpecificationError::RelativeUrl { href }) if href == "/eu-west-1/spec.json"
        ));
    }

    #[test]
    fn test_missing_table() {
        let doc = Document::parse(INDEX);
        let options = Options {
            table_index: 3,
            ..Options::default()
        };

        assert!(matches!(
            regional_specifications(&doc, &options),
            Err(SpecificationError::NoTable { index: 3 })
        ));
    }

    #[test]
    fn test_table_errors_are_wrapped() {
        let doc = Document::parse("<table><tr><td>no sections</td></tr></table>");

        // The parser wraps bare rows in a tbody, so the header is what's missing.
        assert!(matches!(
            regional_specifications(&doc, &Options::default()),
            Err(SpecificationError::Table(TableReadError::MissingSection { tag: "thead" }))
        ));
    }
}
