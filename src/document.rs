//! Document - buffered HTML input with a memoized parse
//!
//! A [`Document`] owns one HTML input, an optional Content-Type hint for
//! charset detection, and a [`MarkdownConverter`]. The input is buffered in
//! full (output is produced in one piece, never streamed) and parsed at most
//! once: the first [`Document::markdown`] or [`Document::parse`] call builds
//! the tree, later calls reuse it, so repeated renderings of the same
//! document return the identical string.
//!
//! # Examples
//!
//! ```rust
//! use tagdown::Document;
//!
//! let mut doc = Document::new("<h1>Hi</h1><p>Welcome <em>back</em>.</p>");
//! let markdown = doc.markdown().expect("UTF-8 input");
//! assert_eq!(markdown, "# HiWelcome **back**.\n");
//!
//! // Same instance, same string
//! assert_eq!(doc.markdown().expect("memoized"), markdown);
//! ```

use std::io::Read;

use crate::converter::MarkdownConverter;
use crate::error::ConversionError;
use crate::parser;
use crate::tree::{Node, Tree};

/// One HTML input and its conversion state.
pub struct Document {
    html: Vec<u8>,
    content_type: Option<String>,
    converter: MarkdownConverter,
    tree: Tree,
    parsed: bool,
}

impl Document {
    /// Create a document over in-memory HTML (a string or bytes).
    pub fn new(html: impl Into<Vec<u8>>) -> Self {
        Document {
            html: html.into(),
            content_type: None,
            converter: MarkdownConverter::new(),
            tree: Tree::new(),
            parsed: false,
        }
    }

    /// Create a document by buffering a reader to the end.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::ReadError`] when the reader fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ConversionError> {
        let mut html = Vec::new();
        reader
            .read_to_end(&mut html)
            .map_err(|e| ConversionError::ReadError(e.to_string()))?;
        Ok(Document::new(html))
    }

    /// Supply the Content-Type header of the input, whose charset parameter
    /// takes priority in charset detection.
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Install a custom rendering rule for a tag name.
    ///
    /// Call before the first conversion; the rule overrides the built-in
    /// table for that tag.
    pub fn register<F>(&mut self, tag: &str, rule: F)
    where
        F: Fn(&Node, &str) -> String + 'static,
    {
        self.converter.register(tag, rule);
    }

    /// Decode the input and build the tree, once.
    ///
    /// Later calls are no-ops; parsing is idempotent per instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::EncodingError`] when the input cannot be
    /// decoded to UTF-8 under the detected charset. Malformed markup is
    /// never an error. A failed parse leaves the document unparsed, so the
    /// call can be retried.
    pub fn parse(&mut self) -> Result<(), ConversionError> {
        if self.parsed {
            return Ok(());
        }
        self.tree = parser::parse_html_with_charset(&self.html, self.content_type.as_deref())?;
        self.parsed = true;
        Ok(())
    }

    /// The document tree. Empty until [`Document::parse`] has run.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Render the document to Markdown, parsing first if needed.
    ///
    /// # Errors
    ///
    /// Only the failure modes of [`Document::parse`]; rendering itself is
    /// total.
    pub fn markdown(&mut self) -> Result<String, ConversionError> {
        self.parse()?;
        Ok(self.converter.convert(&self.tree))
    }
}
