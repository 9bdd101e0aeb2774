//! One row of the regional specification index.

use serde::Serialize;
use url::Url;

use super::SpecificationError;
use crate::html::{Selection, TableColumn, TableRow};
use crate::Options;

/// A region and the location of its single-file resource specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionalSpecificationData {
    /// Region code, e.g. `us-east-1`.
    pub region: String,
    /// Absolute URL of the specification JSON.
    pub url: String,
}

impl RegionalSpecificationData {
    /// Read a logical row of the index table.
    ///
    /// # Errors
    ///
    /// Reports the first of: no region column, no specification column, no
    /// anchor in it, no `href` on the anchor, or a link that cannot be made
    /// absolute.
    pub fn from_table_row(row: &TableRow<'_>, index: usize, options: &Options) -> Result<Self, SpecificationError> {
        let region = column(row, index, &options.region_heading)?.cell().text();

        let anchor = column(row, index, &options.url_heading)?
            .cell()
            .find_or_else(&["a"], Selection::First, || SpecificationError::MissingAnchor { row: index })?;
        let href = anchor
            .attr("href")
            .ok_or(SpecificationError::MissingHref { row: index })?;

        Ok(Self {
            region,
            url: resolve(href.trim(), options.base_url.as_deref())?,
        })
    }
}

fn column<'r, 'a>(row: &'r TableRow<'a>, index: usize, heading: &str) -> Result<&'r TableColumn<'a>, SpecificationError> {
    row.find_column_or_else(
        |column| column.headings_include(heading),
        || SpecificationError::MissingColumn {
            heading: heading.to_string(),
            row: index,
        },
    )
}

fn invalid(url: &str) -> impl FnOnce(url::ParseError) -> SpecificationError + '_ {
    move |source| SpecificationError::InvalidUrl {
        url: url.to_string(),
        source,
    }
}

/// Absolute form of `href`, joined onto `base` when relative.
fn resolve(href: &str, base: Option<&str>) -> Result<String, SpecificationError> {
    match Url::parse(href) {
        Ok(url) => Ok(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let Some(base) = base else {
                return Err(SpecificationError::RelativeUrl {
                    href: href.to_string(),
                });
            };
            let base = Url::parse(base).map_err(invalid(base))?;
            let joined = base.join(href).map_err(invalid(href))?;
            Ok(joined.into())
        }
        Err(source) => Err(invalid(href)(source)),
    }
}
