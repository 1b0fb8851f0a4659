//! Per-render state handed to every routine.

use std::collections::HashMap;
use std::fmt;

use mdwiki_tree::{Node, NodeKind, NodeValue, Segment};

use crate::error::RenderError;
use crate::sink::Sink;

/// Footnote index to label map for one document.
///
/// Built once before the walk so each reference site resolves its label
/// without scanning the document again.
#[derive(Debug, Default)]
pub(crate) struct FootnoteIndex<'d> {
    labels: HashMap<usize, &'d str>,
}

impl<'d> FootnoteIndex<'d> {
    /// Collect footnote definitions from the document `root` belongs to.
    ///
    /// Footnote lists are scanned from the end of the document backwards;
    /// when several definitions share an index, the first one found wins.
    pub(crate) fn build(root: Node<'d>) -> Self {
        let mut labels = HashMap::new();
        let Some(document) = root.owner_document() else {
            return Self { labels };
        };

        let mut child = document.last_child();
        while let Some(list) = child {
            if list.kind() == NodeKind::FootnoteList {
                for footnote in list.children() {
                    if let NodeValue::Footnote { label, index, .. } = footnote.value() {
                        labels.entry(*index).or_insert(label.as_str());
                    }
                }
            }
            child = list.prev_sibling();
        }

        Self { labels }
    }

    pub(crate) fn label(&self, index: usize) -> Option<&'d str> {
        self.labels.get(&index).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}

/// State of a single render: the output sink, the source buffer node
/// segments resolve against, and document-wide lookups.
///
/// A context lives for exactly one call to
/// [`WikiRenderer::render`](crate::WikiRenderer::render) and is never shared.
pub struct RenderContext<'r> {
    sink: Sink<'r>,
    source: &'r [u8],
    footnotes: FootnoteIndex<'r>,
}

impl<'r> RenderContext<'r> {
    pub(crate) fn new(sink: Sink<'r>, source: &'r [u8], footnotes: FootnoteIndex<'r>) -> Self {
        Self {
            sink,
            source,
            footnotes,
        }
    }

    /// Source buffer the tree's segments point into.
    #[must_use]
    pub fn source(&self) -> &'r [u8] {
        self.source
    }

    /// Label of the footnote definition with the given index.
    #[must_use]
    pub fn footnote_label(&self, index: usize) -> Option<&'r str> {
        self.footnotes.label(index)
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.write_bytes(s.as_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), RenderError> {
        Ok(self.sink.write_bytes(bytes)?)
    }

    /// Write formatted output; lets routines use `write!(ctx, ...)`.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), RenderError> {
        Ok(self.sink.write_fmt(args)?)
    }

    pub fn newline(&mut self) -> Result<(), RenderError> {
        self.write_bytes(b"\n")
    }

    /// Write the source text a segment points to.
    pub fn write_segment(&mut self, segment: Segment) -> Result<(), RenderError> {
        let bytes = segment.value(self.source);
        self.write_bytes(bytes)
    }

    /// Write literal lines verbatim.
    pub fn write_lines(&mut self, lines: &[Segment]) -> Result<(), RenderError> {
        for line in lines {
            self.write_segment(*line)?;
        }
        Ok(())
    }

    /// Flush the sink, returning the number of bytes written.
    pub(crate) fn finish(self) -> Result<usize, RenderError> {
        Ok(self.sink.finish()?)
    }
}
