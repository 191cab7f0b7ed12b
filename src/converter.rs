//! Markdown renderer - transforms the parsed tree to Markdown
//!
//! The renderer walks the tree bottom-up: a node's child slots are resolved
//! first (each child rendered recursively and substituted exactly once, in
//! order), and the tag-specific formatting rule is then applied to the fully
//! resolved content. Rendering is a pure function of the tree (same tree,
//! same string) and it is total: a tag without a rule of its own falls
//! through to a generic `<tag>...</tag>` passthrough rather than failing.
//!
//! # Rule table
//!
//! | tag | rendering |
//! |-----|-----------|
//! | `p`, `br` | content + trailing newline |
//! | `a` | `[content](href)` |
//! | `img` | `![alt](src)` on its own line |
//! | `strong`, `em`, `b` | `**content**` |
//! | `hr` | `---` on its own line |
//! | `blockquote` | content fenced in a triple-backtick block |
//! | `code` | `<code>` passthrough, keeping a `class` attribute when present |
//! | `h1`..`h6` | ATX heading at the matching level |
//! | root | content verbatim |
//! | anything else | `<tag>content</tag>` |
//!
//! Inline `<code>` stays an HTML tag instead of backticks so that a language
//! hint in its `class` attribute survives the conversion.
//!
//! # Custom rules
//!
//! [`MarkdownConverter::register`] installs a caller-supplied rule for one
//! tag name, consulted before the built-in table:
//!
//! ```rust
//! use tagdown::converter::MarkdownConverter;
//! use tagdown::parser::parse_str;
//!
//! let mut converter = MarkdownConverter::new();
//! converter.register("em", |_, content| format!("*{content}*"));
//!
//! let tree = parse_str("<p><em>really</em></p>");
//! assert_eq!(converter.convert(&tree), "*really*\n");
//! ```

use std::collections::HashMap;

use crate::tree::{Node, NodeId, Segment, Tree};

/// A per-tag rendering rule.
///
/// Receives the node (for its tag and attributes) and the node's fully
/// resolved content, and returns the rendered string.
pub type RenderRule = Box<dyn Fn(&Node, &str) -> String>;

/// Tree-to-Markdown renderer with a replaceable per-tag rule table.
///
/// # Examples
///
/// ```rust
/// use tagdown::converter::MarkdownConverter;
/// use tagdown::parser::parse_str;
///
/// let tree = parse_str("<h2>Title</h2>");
/// let converter = MarkdownConverter::new();
/// assert_eq!(converter.convert(&tree), "## Title");
/// ```
pub struct MarkdownConverter {
    rules: HashMap<String, RenderRule>,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    /// Create a converter with the built-in rule table and no custom rules.
    pub fn new() -> Self {
        MarkdownConverter {
            rules: HashMap::new(),
        }
    }

    /// Install a custom rendering rule for a tag name, overriding the
    /// built-in rule for that tag (and only that tag).
    pub fn register<F>(&mut self, tag: &str, rule: F)
    where
        F: Fn(&Node, &str) -> String + 'static,
    {
        self.rules.insert(tag.to_ascii_lowercase(), Box::new(rule));
    }

    /// Render a whole tree to Markdown.
    ///
    /// Pure and total; the root's own rule emits its content verbatim, so
    /// the output is exactly the concatenated renderings of the top-level
    /// content.
    pub fn convert(&self, tree: &Tree) -> String {
        self.render_node(tree, tree.root())
    }

    fn render_node(&self, tree: &Tree, id: NodeId) -> String {
        let node = tree.node(id);

        let mut content = String::new();
        for segment in node.segments() {
            match segment {
                Segment::Text(run) => content.push_str(run),
                Segment::Child(slot) => {
                    content.push_str(&self.render_node(tree, node.children()[*slot]));
                }
            }
        }

        if let Some(rule) = self.rules.get(node.tag()) {
            return rule(node, &content);
        }
        default_rule(node, &content)
    }
}

/// Built-in rule table.
fn default_rule(node: &Node, content: &str) -> String {
    // <code> keeps its language hint: Markdown backticks would lose the
    // class attribute, so the tag passes through as HTML.
    if node.tag() == "code"
        && let Some(class) = node.attr("class")
        && !class.is_empty()
    {
        return format!("<code class=\"{}\">{}</code>", class, content);
    }

    match node.tag() {
        "a" => format!("[{}]({})", content, node.attr("href").unwrap_or_default()),
        "img" => format!(
            "\n![{}]({})\n",
            node.attr("alt").unwrap_or_default(),
            node.attr("src").unwrap_or_default()
        ),
        "p" | "br" => format!("{}\n", content),
        "strong" | "em" | "b" => format!("**{}**", content),
        "hr" => "\n---\n".to_string(),
        "blockquote" => format!("\n```\n{}\n```\n", content),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = usize::from(node.tag().as_bytes()[1] - b'0');
            format!("{} {}", "#".repeat(level), content)
        }
        // Synthetic root: no wrapping. A resolved content of exactly one
        // newline means the document held nothing but a suppressed break.
        "" => {
            if content == "\n" {
                String::new()
            } else {
                content.to_string()
            }
        }
        tag => format!("<{}>{}</{}>", tag, content, tag),
    }
}
