//! Tree builder on top of the html5ever tokenizer
//!
//! Tokenization is delegated to html5ever; this module only assembles the
//! token stream into a [`Tree`]. The builder tracks a single "current open
//! node" cursor, descending on start tags and ascending on end tags:
//!
//! - **start tag**: create a node under the current one and descend into it;
//!   the node is not listed among its parent's children yet
//! - **self-closing tag**: create the node and attach it immediately; there
//!   is no body to descend into
//! - **text**: append the run verbatim to the current node, except a run
//!   that is exactly one newline
//! - **end tag**: attach the current node to its parent and ascend, without
//!   checking that the end tag's name matches
//!
//! Attaching a node appends it to the parent's child list and emits the
//! matching child slot at the current tail of the parent's accumulated text,
//! so interleaved text-element-text sequences come out in document order.
//!
//! html5ever emits character data in fragments (decoded entities and
//! newlines arrive as their own tokens), so the builder coalesces
//! consecutive character tokens into one literal run per gap between tags
//! before deciding anything about it.
//!
//! Malformed nesting never fails. An end tag with nothing open is dropped, a
//! mismatched end tag closes whatever is open, and an element still open at
//! end of input is attached to its parent as a best-effort recovery. These
//! repairs are silent apart from `debug!`/`trace!` logging.
//!
//! # Examples
//!
//! ```rust
//! use tagdown::parser::parse_html;
//!
//! let tree = parse_html(b"<p>Hello</p>").expect("UTF-8 input");
//! let root = tree.node(tree.root());
//! assert_eq!(root.children().len(), 1);
//! assert_eq!(tree.node(root.children()[0]).tag(), "p");
//!
//! // Malformed markup still produces a tree
//! let tree = parse_html(b"<p>unterminated").expect("UTF-8 input");
//! assert_eq!(tree.node(tree.root()).children().len(), 1);
//! ```

use std::collections::HashMap;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use log::{debug, trace};

use crate::charset::{decode_to_utf8, detect_charset};
use crate::error::ConversionError;
use crate::tree::{NodeId, Tree};

/// Token-stream consumer that assembles a [`Tree`].
pub(crate) struct TreeBuilder {
    tree: Tree,
    current: NodeId,
    pending_text: String,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        TreeBuilder {
            tree: Tree::new(),
            current: Tree::ROOT,
            pending_text: String::new(),
        }
    }

    /// Finish the stream: flush trailing text, recover a trailing unclosed
    /// element, then hand the tree over.
    pub(crate) fn finish(mut self) -> Tree {
        self.flush_text();
        if self.current != Tree::ROOT && !self.tree.node(self.current).is_closed() {
            debug!(
                "unterminated <{}> at end of input; attaching to parent",
                self.tree.node(self.current).tag()
            );
            self.tree.attach(self.current);
        }
        self.tree
    }

    /// Commit the buffered character run to the current node.
    ///
    /// A run that is exactly one newline is insignificant whitespace between
    /// sibling tags and is suppressed. Only that exact run; other
    /// whitespace-only runs pass through untouched.
    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        if self.pending_text == "\n" {
            self.pending_text.clear();
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        self.tree.append_text(self.current, &text);
    }

    fn open_element(&mut self, tag: &Tag) {
        self.flush_text();

        let name = tag.name.to_ascii_lowercase().to_string();
        let mut attributes = HashMap::with_capacity(tag.attrs.len());
        for attr in &tag.attrs {
            attributes.insert(
                attr.name.local.to_ascii_lowercase().to_string(),
                attr.value.to_string(),
            );
        }

        let node = self.tree.create(name, attributes, self.current);
        if tag.self_closing {
            self.tree.attach(node);
        } else {
            self.current = node;
        }
    }

    fn close_current(&mut self) {
        self.flush_text();

        let Some(parent) = self.tree.node(self.current).parent() else {
            debug!("end tag with no open element; ignoring");
            return;
        };
        self.tree.attach(self.current);
        self.current = parent;
    }
}

/// Tokenizer state override for elements whose content is raw text.
///
/// The tokenizer only switches into raw-text mode when the sink asks for it,
/// so without these replies the body of a `<script>` would be tokenized as
/// markup.
fn raw_kind(name: &str) -> Option<RawKind> {
    match name {
        "script" => Some(RawKind::ScriptData),
        "style" | "iframe" | "xmp" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "title" | "textarea" => Some(RawKind::Rcdata),
        _ => None,
    }
}

impl TokenSink for TreeBuilder {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    let raw = if tag.self_closing {
                        None
                    } else {
                        raw_kind(&tag.name)
                    };
                    self.open_element(&tag);
                    if let Some(kind) = raw {
                        return TokenSinkResult::RawData(kind);
                    }
                }
                TagKind::EndTag => self.close_current(),
            },
            Token::CharacterTokens(text) => self.pending_text.push_str(&text),
            // Comments and doctypes produce no output, but they do end the
            // surrounding character run.
            Token::DoctypeToken(_) | Token::CommentToken(_) => self.flush_text(),
            Token::ParseError(err) => {
                // Recoverable per the tokenizer; only a failure to acquire or
                // decode the input aborts a conversion.
                trace!("recoverable tokenizer error: {}", err);
            }
            Token::NullCharacterToken | Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

/// Parse a UTF-8 HTML string into a tree.
///
/// Never fails: the tokenizer recovers from malformed markup, and the
/// builder recovers from malformed nesting.
pub fn parse_str(html: &str) -> Tree {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from(html));

    let mut tokenizer = Tokenizer::new(TreeBuilder::new(), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.finish()
}

/// Parse HTML bytes into a tree, detecting the charset from meta tags and
/// transcoding to UTF-8 as needed.
///
/// # Errors
///
/// Returns [`ConversionError::EncodingError`] when the detected charset is
/// unsupported or the bytes are invalid for it. Malformed markup is never an
/// error.
pub fn parse_html(html: &[u8]) -> Result<Tree, ConversionError> {
    parse_html_with_charset(html, None)
}

/// Parse HTML bytes with an optional Content-Type header supplying the
/// charset hint.
///
/// The charset cascade: Content-Type parameter, then meta tags in the
/// document prefix, then UTF-8.
///
/// # Errors
///
/// Returns [`ConversionError::EncodingError`] when the detected charset is
/// unsupported or the bytes are invalid for it.
pub fn parse_html_with_charset(
    html: &[u8],
    content_type: Option<&str>,
) -> Result<Tree, ConversionError> {
    let charset = detect_charset(content_type, html);
    let utf8 = decode_to_utf8(html, &charset)?;
    Ok(parse_str(&utf8))
}
