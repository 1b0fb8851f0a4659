//! Arena-backed document tree.

use std::fmt;

use crate::node::{NodeKind, NodeValue};

/// Index of a node inside its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct NodeData {
    value: NodeValue,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl NodeData {
    const fn new(value: NodeValue) -> Self {
        Self {
            value,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }
}

/// A document tree.
///
/// All nodes live in one arena owned by the document and refer to each other
/// by [`NodeId`]. The root is always a [`NodeValue::Document`] node.
///
/// Nodes are created detached with [`create`](Self::create) and linked with
/// [`append_child`](Self::append_child). Read access goes through the
/// borrowed [`Node`] handle returned by [`root`](Self::root) and
/// [`node`](Self::node).
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create a document containing only its root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeValue::Document)],
        }
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes[0].first_child.is_none()
    }

    /// Id of the root node.
    #[must_use]
    pub const fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Handle to the root node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            doc: self,
            id: self.root_id(),
        }
    }

    /// Handle to the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_> {
        assert!(id.0 < self.nodes.len(), "node {id} is not in this document");
        Node { doc: self, id }
    }

    /// Allocate a new detached node.
    pub fn create(&mut self, value: NodeValue) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(value));
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` already has a parent or is the root.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none() && child != self.root_id(),
            "node {child} is already attached"
        );
        let prev = self.nodes[parent.0].last_child;
        {
            let data = &mut self.nodes[child.0];
            data.parent = Some(parent);
            data.prev_sibling = prev;
            data.next_sibling = None;
        }
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
    }

    /// Create a node and attach it as the last child of `parent`.
    pub fn push(&mut self, parent: NodeId, value: NodeValue) -> NodeId {
        let id = self.create(value);
        self.append_child(parent, id);
        id
    }

    /// Mutable access to a node's attributes.
    pub fn value_mut(&mut self, id: NodeId) -> &mut NodeValue {
        &mut self.nodes[id.0].value
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed handle to a node of a [`Document`].
///
/// Handles are cheap to copy; the tree cannot change while any of them is
/// alive.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id.0]
    }

    fn wrap(&self, id: Option<NodeId>) -> Option<Node<'a>> {
        id.map(|id| Node { doc: self.doc, id })
    }

    /// Id of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Document this node belongs to.
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.doc
    }

    /// Category and attributes.
    #[must_use]
    pub fn value(&self) -> &'a NodeValue {
        &self.data().value
    }

    /// Category tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.data().value.kind()
    }

    #[must_use]
    pub fn parent(&self) -> Option<Node<'a>> {
        self.wrap(self.data().parent)
    }

    #[must_use]
    pub fn first_child(&self) -> Option<Node<'a>> {
        self.wrap(self.data().first_child)
    }

    #[must_use]
    pub fn last_child(&self) -> Option<Node<'a>> {
        self.wrap(self.data().last_child)
    }

    #[must_use]
    pub fn next_sibling(&self) -> Option<Node<'a>> {
        self.wrap(self.data().next_sibling)
    }

    #[must_use]
    pub fn prev_sibling(&self) -> Option<Node<'a>> {
        self.wrap(self.data().prev_sibling)
    }

    /// Whether the node has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.data().first_child.is_some()
    }

    /// Iterate over the direct children in document order.
    #[must_use]
    pub fn children(&self) -> Children<'a> {
        Children {
            next: self.first_child(),
        }
    }

    /// Iterate over the ancestors, nearest first.
    #[must_use]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// The document node this node hangs from.
    ///
    /// Returns `None` for detached subtrees whose topmost ancestor is not a
    /// document node.
    #[must_use]
    pub fn owner_document(&self) -> Option<Node<'a>> {
        let top = self.ancestors().last().unwrap_or(*self);
        (top.kind() == NodeKind::Document).then_some(top)
    }

    /// Literal text of this node and its descendants, concatenated in
    /// document order.
    ///
    /// Only [`NodeValue::Text`] and [`NodeValue::String`] nodes contribute.
    #[must_use]
    pub fn text(&self, source: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        self.collect_text(source, &mut out);
        out
    }

    fn collect_text(&self, source: &[u8], out: &mut Vec<u8>) {
        match self.value() {
            NodeValue::Text { segment, .. } => out.extend_from_slice(segment.value(source)),
            NodeValue::String { value } => out.extend_from_slice(value.as_bytes()),
            _ => {
                for child in self.children() {
                    child.collect_text(source, out);
                }
            }
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", self.value())
            .finish()
    }
}

/// Iterator over the children of a node.
#[derive(Clone)]
pub struct Children<'a> {
    next: Option<Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next_sibling();
        Some(node)
    }
}

/// Iterator over the ancestors of a node.
#[derive(Clone)]
pub struct Ancestors<'a> {
    next: Option<Node<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;
    use pretty_assertions::assert_eq;

    fn kinds<'a>(nodes: impl Iterator<Item = Node<'a>>) -> Vec<NodeKind> {
        nodes.map(|n| n.kind()).collect()
    }

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
        assert_eq!(doc.root().kind(), NodeKind::Document);
        assert!(doc.root().parent().is_none());
    }

    #[test]
    fn test_append_links_siblings() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.push(root, NodeValue::Paragraph);
        let b = doc.push(root, NodeValue::ThematicBreak);
        let c = doc.push(root, NodeValue::Blockquote);

        let root = doc.root();
        assert_eq!(
            kinds(root.children()),
            vec![
                NodeKind::Paragraph,
                NodeKind::ThematicBreak,
                NodeKind::Blockquote
            ]
        );
        assert_eq!(root.first_child().map(|n| n.id()), Some(a));
        assert_eq!(root.last_child().map(|n| n.id()), Some(c));

        let b = doc.node(b);
        assert_eq!(b.prev_sibling().map(|n| n.id()), Some(a));
        assert_eq!(b.next_sibling().map(|n| n.id()), Some(c));
        assert_eq!(b.parent(), Some(root));
        assert!(doc.node(c).next_sibling().is_none());
    }

    #[test]
    fn test_detached_node() {
        let mut doc = Document::new();
        let footnote = doc.create(NodeValue::FootnoteList);
        assert!(doc.node(footnote).parent().is_none());
        assert!(doc.node(footnote).owner_document().is_none());
        assert!(doc.is_empty());

        doc.append_child(doc.root_id(), footnote);
        assert_eq!(doc.node(footnote).owner_document(), Some(doc.root()));
    }

    #[test]
    #[should_panic(expected = "already attached")]
    fn test_append_attached_node_panics() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let para = doc.push(root, NodeValue::Paragraph);
        doc.append_child(root, para);
    }

    #[test]
    fn test_ancestors() {
        let mut doc = Document::new();
        let list = doc.push(doc.root_id(), NodeValue::List { ordered: false });
        let item = doc.push(list, NodeValue::ListItem { offset: 2 });
        let block = doc.push(item, NodeValue::TextBlock);

        assert_eq!(
            kinds(doc.node(block).ancestors()),
            vec![NodeKind::ListItem, NodeKind::List, NodeKind::Document]
        );
        assert_eq!(doc.node(block).owner_document(), Some(doc.root()));
    }

    #[test]
    fn test_text_concatenates_descendants() {
        let source = b"Hello world";
        let mut doc = Document::new();
        let para = doc.push(doc.root_id(), NodeValue::Paragraph);
        doc.push(para, NodeValue::text(Segment::new(0, 5)));
        let strong = doc.push(para, NodeValue::Emphasis { level: 2 });
        doc.push(
            strong,
            NodeValue::String {
                value: " & ".to_owned(),
            },
        );
        doc.push(para, NodeValue::text(Segment::new(6, 11)));

        assert_eq!(doc.node(para).text(source), b"Hello & world".to_vec());
        assert_eq!(doc.root().text(source), b"Hello & world".to_vec());
    }

    #[test]
    fn test_value_mut() {
        let mut doc = Document::new();
        let text = doc.push(doc.root_id(), NodeValue::text(Segment::new(0, 1)));
        if let NodeValue::Text {
            soft_line_break, ..
        } = doc.value_mut(text)
        {
            *soft_line_break = true;
        }
        assert!(matches!(
            doc.node(text).value(),
            NodeValue::Text {
                soft_line_break: true,
                ..
            }
        ));
    }
}
