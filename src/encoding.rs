//! Charset detection and decoding of raw page bytes.
//!
//! Documentation pages declare their charset in a `<meta>` tag. Decoding is
//! strict: a byte stream that is not valid in its declared encoding is a
//! [`ParseError`], not silently repaired.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

use crate::error::ParseError;

/// Bytes examined for a charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect the declared encoding of an HTML page.
///
/// Checks `<meta charset>`, then `<meta http-equiv="Content-Type">`, in the
/// first 1024 bytes. Unknown labels and missing declarations mean UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);

    [&*META_CHARSET_RE, &*HTTP_EQUIV_CHARSET_RE]
        .into_iter()
        .filter_map(|re| declared_label(re, &head))
        .find_map(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

fn declared_label<'h>(re: &Regex, head: &'h str) -> Option<&'h str> {
    re.captures(head).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Decode HTML bytes with their declared encoding.
///
/// A byte order mark overrides the declaration.
///
/// # Errors
///
/// Returns [`ParseError::MalformedBytes`] naming the encoding used when the
/// input contains sequences that are invalid in it.
///
/// # Examples
///
/// ```
/// use rs_cfn_spec::encoding::decode_strict;
///
/// let html = decode_strict(b"<table></table>").unwrap();
/// assert_eq!(html, "<table></table>");
/// assert!(decode_strict(b"<p>\xff</p>").is_err());
/// ```
pub fn decode_strict(html: &[u8]) -> Result<Cow<'_, str>, ParseError> {
    let (decoded, used, had_errors) = detect_encoding(html).decode(html);
    if had_errors {
        tracing::debug!(encoding = used.name(), "malformed input bytes");
        return Err(ParseError::MalformedBytes {
            encoding: used.name(),
        });
    }
    Ok(decoded)
}
