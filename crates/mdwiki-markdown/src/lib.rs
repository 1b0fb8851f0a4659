//! Markdown front end for mdwiki.
//!
//! Parses CommonMark (plus the extensions selected in [`ParseOptions`]) with
//! `pulldown-cmark` and builds an [`mdwiki_tree::Document`] whose text nodes
//! point into the returned source buffer.
//!
//! # Example
//!
//! ```
//! use mdwiki_markdown::{ParseOptions, parse};
//! use mdwiki_tree::NodeKind;
//!
//! let parsed = parse("# Title\n\nBody", &ParseOptions::default());
//! let kinds: Vec<_> = parsed.document().root().children().map(|n| n.kind()).collect();
//! assert_eq!(kinds, [NodeKind::Heading, NodeKind::Paragraph]);
//! ```

mod builder;
mod layout;
mod options;

use mdwiki_tree::Document;

pub use options::ParseOptions;

/// A parsed document together with the buffer its segments point into.
///
/// The buffer starts with the markdown text itself. Text the parser had to
/// rewrite (for example code lines with tabs expanded) is appended after it.
#[derive(Debug)]
pub struct ParsedDocument {
    source: Vec<u8>,
    document: Document,
}

impl ParsedDocument {
    fn new(source: Vec<u8>, document: Document) -> Self {
        Self { source, document }
    }

    /// Buffer the document's segments resolve against.
    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Document) {
        (self.source, self.document)
    }
}

/// Parse `markdown` into a document tree.
///
/// Parsing never fails: any input is valid markdown.
#[must_use]
pub fn parse(markdown: &str, options: &ParseOptions) -> ParsedDocument {
    let parsed = builder::TreeBuilder::new(markdown).build(*options);
    tracing::debug!(
        bytes = markdown.len(),
        nodes = parsed.document.len(),
        "Parsed markdown"
    );
    parsed
}
