//! Tree data model for parsed HTML
//!
//! Nodes live in an arena owned by [`Tree`]; relationships are expressed as
//! [`NodeId`] indices rather than pointers, so parent back-references never
//! form an ownership cycle. A node's content is an ordered list of
//! [`Segment`]s: literal text runs interleaved with child slots. The child
//! slot plays the role of a placeholder marker, recording where the child's
//! rendering must be substituted relative to the surrounding text, but as a
//! typed segment it cannot collide with marker-shaped substrings in the
//! input text.
//!
//! Invariants maintained by the builder:
//!
//! - every non-root node appears in exactly one parent's `children` list, at
//!   the position named by its `Child` segment in that parent
//! - the number of `Child` segments equals `children.len()`, and each child
//!   index appears exactly once, in order
//! - the root (index 0, empty tag) is never attached anywhere

use std::collections::HashMap;

/// Index of a node within the [`Tree`] that produced it.
///
/// Ids are not transferable between trees; indexing another tree with a
/// foreign id is a logic error (and may panic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One ordered piece of a node's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal text run, accumulated verbatim from character tokens.
    Text(String),
    /// The slot for the child at this index of the node's children.
    Child(usize),
}

/// A single element node: tag name, attributes, ordered content, and tree
/// links.
#[derive(Debug)]
pub struct Node {
    tag: String,
    attributes: HashMap<String, String>,
    segments: Vec<Segment>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    closed: bool,
}

impl Node {
    /// Lowercase element name; empty string for the synthetic root.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by lowercase name, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes (lowercase names, original-case values).
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Child ids in document order of closing.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Enclosing node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered content segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Arena-owned tree rooted at a synthetic node with an empty tag.
///
/// The tree is built once by the parser and then only read; all mutation is
/// crate-internal.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Id of the synthetic root node.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new() -> Self {
        Tree {
            nodes: vec![Node {
                tag: String::new(),
                attributes: HashMap::new(),
                segments: Vec::new(),
                children: Vec::new(),
                parent: None,
                closed: false,
            }],
        }
    }

    /// Root node id (always [`Tree::ROOT`]).
    pub fn root(&self) -> NodeId {
        Tree::ROOT
    }

    /// Node lookup by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached node under `parent` and return its id. The node is
    /// not listed in the parent's children until [`Tree::attach`] runs.
    pub(crate) fn create(
        &mut self,
        tag: String,
        attributes: HashMap<String, String>,
        parent: NodeId,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag,
            attributes,
            segments: Vec::new(),
            children: Vec::new(),
            parent: Some(parent),
            closed: false,
        });
        id
    }

    /// Append literal text to a node, merging with a trailing text run.
    pub(crate) fn append_text(&mut self, id: NodeId, text: &str) {
        let segments = &mut self.nodes[id.0].segments;
        if let Some(Segment::Text(run)) = segments.last_mut() {
            run.push_str(text);
        } else {
            segments.push(Segment::Text(text.to_string()));
        }
    }

    /// Attach a node to its parent: record it as the next child and emit the
    /// matching child slot at the current tail of the parent's content.
    ///
    /// No-op for the root and for nodes already attached (the `closed`
    /// guard, which keeps end-of-stream recovery from double-attaching).
    pub(crate) fn attach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        if self.nodes[id.0].closed {
            return;
        }
        self.nodes[id.0].closed = true;

        let slot = self.nodes[parent.0].children.len();
        self.nodes[parent.0].children.push(id);
        self.nodes[parent.0].segments.push(Segment::Child(slot));
    }
}
