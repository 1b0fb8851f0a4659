//! Document tree for the wiki markup renderer.
//!
//! A [`Document`] owns every node in an arena. Each node carries a
//! [`NodeValue`] (its category and attributes) and links to its parent,
//! children and siblings. Textual attributes are [`Segment`]s into the source
//! buffer the tree was built from.
//!
//! The tree is built by a producer (see the `mdwiki-markdown` crate) and then
//! only read: consumers borrow it through [`Node`] handles and traverse it
//! with [`walk`].
//!
//! # Example
//!
//! ```
//! use mdwiki_tree::{Document, NodeKind, NodeValue, Segment, WalkStatus, walk};
//!
//! let source = b"Hello";
//! let mut doc = Document::new();
//! let para = doc.push(doc.root_id(), NodeValue::Paragraph);
//! doc.push(para, NodeValue::text(Segment::new(0, 5)));
//!
//! let mut kinds = Vec::new();
//! walk(doc.root(), |node, entering| {
//!     if entering {
//!         kinds.push(node.kind());
//!     }
//!     Ok::<_, ()>(WalkStatus::Continue)
//! })
//! .unwrap();
//!
//! assert_eq!(kinds, [NodeKind::Document, NodeKind::Paragraph, NodeKind::Text]);
//! assert_eq!(doc.root().text(source), b"Hello");
//! ```

mod document;
mod node;
mod segment;
mod walk;

pub use document::{Ancestors, Children, Document, Node, NodeId};
pub use node::{AutoLinkKind, NodeKind, NodeValue};
pub use segment::Segment;
pub use walk::{WalkStatus, walk};
