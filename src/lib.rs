//! tagdown - HTML to Markdown downgrade engine
//!
//! Converts rich HTML content (scraped pages, CMS exports) to Markdown for
//! storage or display in Markdown-only contexts. Tokenization is delegated
//! to html5ever; this crate assembles the tokens into a parent/child tree
//! and renders the tree bottom-up through a per-tag rule table.
//!
//! # Architecture
//!
//! - `parser`: tree builder over the html5ever token stream
//! - `tree`: arena-owned node tree with ordered text/child segments
//! - `converter`: tree-to-Markdown renderer with a replaceable rule table
//! - `document`: buffered input with memoized parse and charset handling
//! - `charset`: charset detection cascade and UTF-8 transcoding
//! - `error`: conversion error types
//!
//! # Behavior
//!
//! Malformed markup never fails a conversion: unbalanced and mismatched
//! tags are repaired best-effort while building the tree, and unknown tags
//! render as HTML passthrough. The only failure modes are reading the input
//! and decoding it to UTF-8.
//!
//! # Examples
//!
//! One-shot conversion of a string:
//!
//! ```rust
//! let markdown = tagdown::convert("<p>See <a href=\"/docs\">the docs</a>.</p>");
//! assert_eq!(markdown, "See [the docs](/docs).\n");
//! ```
//!
//! Byte input with charset handling and a custom rule:
//!
//! ```rust
//! use tagdown::Document;
//!
//! let mut doc = Document::new(&b"<h2>Caf\xE9</h2>"[..])
//!     .with_content_type("text/html; charset=ISO-8859-1");
//! doc.register("h2", |_, content| format!("{content}\n----\n"));
//! assert_eq!(doc.markdown().expect("supported charset"), "Café\n----\n");
//! ```

// Module declarations
pub mod converter;
pub mod document;
pub mod error;
pub mod parser;
pub mod tree;

mod charset;

// Re-export main types for convenience
pub use converter::{MarkdownConverter, RenderRule};
pub use document::Document;
pub use error::ConversionError;
pub use parser::{parse_html, parse_html_with_charset, parse_str};
pub use tree::{Node, NodeId, Segment, Tree};

/// Convert an HTML string to Markdown in one call.
///
/// Infallible: string input needs no decoding, and both the tree builder
/// and the renderer are total. Use [`Document`] for byte/reader input,
/// charset hints, custom rules, or repeated rendering.
///
/// # Examples
///
/// ```rust
/// assert_eq!(tagdown::convert("<h2>Title</h2>"), "## Title");
/// assert_eq!(tagdown::convert("<p>A <strong>B</strong> C</p>"), "A **B** C\n");
/// ```
pub fn convert(html: &str) -> String {
    MarkdownConverter::new().convert(&parser::parse_str(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_empty() {
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_convert_smoke() {
        let markdown = convert("<h1>Title</h1><p>Body</p>");
        assert!(markdown.contains("# Title"));
        assert!(markdown.contains("Body"));
    }
}
