//! Configuration for reading the regional specification index.
//!
//! The index page is a plain HTML table; these options say which table to
//! read and which heading texts identify the columns of interest.

/// Where the regional specification links live on the index page.
///
/// All fields are public. Use `Default::default()` for the layout of the
/// published documentation page.
///
/// # Example
///
/// ```rust
/// use rs_cfn_spec::Options;
///
/// let options = Options {
///     table_index: 1,
///     base_url: Some("https://docs.aws.amazon.com/".to_string()),
///     ..Options::default()
/// };
/// assert_eq!(options.region_heading, "Region");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Heading text of the column holding the region code.
    ///
    /// Default: `"Region"`
    pub region_heading: String,

    /// Heading text of the column whose anchor points at the single-file
    /// specification.
    ///
    /// Default: `"Single file"`
    pub url_heading: String,

    /// 0-based position of the table among the page's `<table>` elements.
    ///
    /// Default: `0`
    pub table_index: usize,

    /// URL relative links are resolved against.
    ///
    /// When `None`, relative `href` values are rejected.
    ///
    /// Default: `None`
    pub base_url: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            region_heading: "Region".to_string(),
            url_heading: "Single file".to_string(),
            table_index: 0,
            base_url: None,
        }
    }
}
