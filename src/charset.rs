//! Character encoding detection and transcoding
//!
//! Byte inputs go through a three-level detection cascade before
//! tokenization:
//!
//! 1. charset parameter of a caller-supplied Content-Type header
//! 2. `<meta charset>` / `<meta http-equiv="Content-Type">` tags in the
//!    first 1024 bytes of the document
//! 3. UTF-8 default
//!
//! The detected label is resolved through `encoding_rs` and the input is
//! transcoded to UTF-8 before it reaches the tokenizer. String inputs skip
//! this module entirely.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConversionError;

/// Default charset when detection fails
const DEFAULT_CHARSET: &str = "UTF-8";

/// Maximum bytes to scan for meta charset tags
const META_SCAN_LIMIT: usize = 1024;

/// Detect the character encoding of an HTML byte buffer.
///
/// Always returns a charset label, normalized to uppercase; falls back to
/// `UTF-8` when neither the Content-Type header nor the document declares
/// one.
pub(crate) fn detect_charset(content_type: Option<&str>, html: &[u8]) -> String {
    if let Some(ct) = content_type
        && let Some(charset) = charset_from_content_type(ct)
    {
        return charset.to_uppercase();
    }

    if let Some(charset) = charset_from_meta_tags(html) {
        return charset.to_uppercase();
    }

    DEFAULT_CHARSET.to_string()
}

/// Decode an HTML byte buffer to UTF-8 according to a detected charset.
///
/// UTF-8 input is borrowed, not copied. Any other supported charset is
/// transcoded through `encoding_rs`. Fails with
/// [`ConversionError::EncodingError`] when the label is unknown or the bytes
/// are invalid for the charset; malformed input is never silently replaced.
pub(crate) fn decode_to_utf8<'a>(
    html: &'a [u8],
    charset: &str,
) -> Result<Cow<'a, str>, ConversionError> {
    if charset.eq_ignore_ascii_case("UTF-8") {
        return std::str::from_utf8(html).map(Cow::Borrowed).map_err(|e| {
            ConversionError::EncodingError(format!(
                "Invalid UTF-8 at byte position {}: {}",
                e.valid_up_to(),
                e
            ))
        });
    }

    let encoding = encoding_rs::Encoding::for_label(charset.as_bytes()).ok_or_else(|| {
        ConversionError::EncodingError(format!("Unsupported charset '{}'", charset))
    })?;

    encoding
        .decode_without_bom_handling_and_without_replacement(html)
        .ok_or_else(|| {
            ConversionError::EncodingError(format!(
                "Invalid byte sequence for charset '{}'",
                charset
            ))
        })
}

/// Charset parameter of a Content-Type header, e.g.
/// `text/html; charset=UTF-8` or `text/html; charset="ISO-8859-1"`.
fn charset_from_content_type(content_type: &str) -> Option<String> {
    static CHARSET_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = CHARSET_REGEX
        .get_or_init(|| Regex::new(r#"(?i)charset\s*=\s*"?([^";,\s]+)"?"#).ok())
        .as_ref()?;

    regex
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Charset declared by meta tags in the document prefix.
///
/// Understands the HTML5 form (`<meta charset="...">`) and the HTML4 form
/// (`<meta http-equiv="Content-Type" content="...; charset=...">`). Only the
/// first [`META_SCAN_LIMIT`] bytes are scanned; declarations are required to
/// appear early in `<head>` anyway.
fn charset_from_meta_tags(html: &[u8]) -> Option<String> {
    let scan_limit = std::cmp::min(html.len(), META_SCAN_LIMIT);
    // Lossy conversion is fine here: the declarations being matched are ASCII.
    let prefix = String::from_utf8_lossy(&html[..scan_limit]);

    static HTML5_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html5 = HTML5_REGEX
        .get_or_init(|| Regex::new(r#"(?i)<meta\s+charset\s*=\s*"?([^";>\s]+)"?"#).ok())
        .as_ref()?;
    if let Some(caps) = html5.captures(&prefix)
        && let Some(m) = caps.get(1)
    {
        return Some(m.as_str().to_string());
    }

    static HTML4_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let html4 = HTML4_REGEX
        .get_or_init(|| {
            Regex::new(
                r#"(?i)<meta\s+http-equiv\s*=\s*"?Content-Type"?\s+content\s*=\s*"?[^">]*charset\s*=\s*([^";>\s]+)"?"#,
            )
            .ok()
        })
        .as_ref()?;
    if let Some(caps) = html4.captures(&prefix)
        && let Some(m) = caps.get(1)
    {
        return Some(m.as_str().to_string());
    }

    None
}
