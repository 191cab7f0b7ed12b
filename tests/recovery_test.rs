//! Best-effort recovery tests
//!
//! Conversion must never fail or panic on structurally invalid markup:
//! unbalanced tags, mismatched end tags, and truncated documents all produce
//! deterministic output. Property tests sweep generated malformations.

use proptest::prelude::*;
use tagdown::{Document, convert, parse_str};

#[test]
fn test_mismatched_end_tag_closes_open_element() {
    // </i> has no matching <i>; it closes the open <p> instead
    assert_eq!(convert("<p>text</i>"), "text\n");
}

#[test]
fn test_stray_end_tag_at_top_level_is_ignored() {
    assert_eq!(convert("</div>text"), "text");
}

#[test]
fn test_unterminated_trailing_element_rendered_once() {
    let markdown = convert("<p>once");
    assert_eq!(markdown, "once\n");
    assert_eq!(markdown.matches("once").count(), 1);
}

#[test]
fn test_unterminated_emphasis_inside_paragraph() {
    // <strong> never closes; the recovery attaches it to <p>, and <p> itself
    // stays detached from the root, so its subtree drops out
    assert_eq!(convert("<p>A <strong>B"), "");
}

#[test]
fn test_crossed_inline_tags() {
    // <b><i>x</b></i>: </b> closes <i>, </i> closes <b>
    assert_eq!(convert("<b><i>x</i></b>"), "**<i>x</i>**");
    let crossed = convert("<b><i>x</b></i>");
    assert!(!crossed.is_empty());
}

#[test]
fn test_truncated_document_keeps_leading_content() {
    let markdown = convert("<h1>Title</h1><p>cut off");
    assert!(markdown.contains("# Title"));
    assert!(markdown.contains("cut off"));
}

proptest! {
    // Conversion is total over arbitrary input text.
    #[test]
    fn prop_convert_never_panics(html in "[a-zA-Z0-9<>/&; \n]{0,200}") {
        let _ = convert(&html);
    }

    // Unclosed block tags still surface their text content.
    #[test]
    fn prop_unclosed_tag_keeps_content(
        tag in prop::sample::select(vec!["p", "h1", "h3", "blockquote", "div"]),
        content in "[a-zA-Z][a-zA-Z0-9 ]{0,40}",
    ) {
        let html = format!("<{tag}>{content}");
        let markdown = convert(&html);
        prop_assert!(markdown.contains(content.as_str()), "output: {markdown:?}");
    }

    // Stray end tags never fail and never invent content.
    #[test]
    fn prop_stray_end_tags_are_inert(
        tag in prop::sample::select(vec!["p", "div", "em", "span"]),
        count in 1usize..5,
        content in "[a-zA-Z ]{1,30}",
    ) {
        let mut html = String::new();
        for _ in 0..count {
            html.push_str(&format!("</{tag}>"));
        }
        html.push_str(&content);
        prop_assert_eq!(convert(&html), content);
    }

    // A document instance renders the same string every time.
    #[test]
    fn prop_markdown_is_idempotent(html in "[a-zA-Z0-9<>/ ]{0,120}") {
        let mut doc = Document::new(html.clone());
        let first = doc.markdown().expect("ASCII input");
        let second = doc.markdown().expect("memoized");
        prop_assert_eq!(first, second);
    }

    // The builder and the one-shot path agree.
    #[test]
    fn prop_document_matches_convert(html in "[a-zA-Z0-9<>/ ]{0,120}") {
        let mut doc = Document::new(html.clone());
        prop_assert_eq!(doc.markdown().expect("ASCII input"), convert(&html));
    }

    // Well-formed single paragraphs render with the paragraph rule. Content
    // is non-empty: an empty <p></p> renders a bare "\n", which the root
    // maps to the empty string.
    #[test]
    fn prop_paragraph_rule(content in "[a-zA-Z0-9 ,.]{1,60}") {
        let html = format!("<p>{content}</p>");
        prop_assert_eq!(convert(&html), format!("{content}\n"));
    }
}

#[test]
fn test_parse_str_is_total_on_pathological_brackets() {
    for html in ["<", ">", "<<<<", "</", "<!", "<a", "< p>x", "<p <p>>"] {
        let tree = parse_str(html);
        let _ = tree.node(tree.root());
    }
}
