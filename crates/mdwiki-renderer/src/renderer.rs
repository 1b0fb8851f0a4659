//! Registry-driven tree walker.

use std::io::Write;

use mdwiki_tree::{Node, WalkStatus, walk};

use crate::context::{FootnoteIndex, RenderContext};
use crate::error::RenderError;
use crate::registry::Registry;
use crate::sink::{DEFAULT_CAPACITY, Sink};

/// Renders a document tree to Atlassian wiki markup.
///
/// Walks the tree depth-first and, for every node, calls the routine its
/// [`Registry`] holds for the node's kind and the current phase. Kinds
/// without an entry emit nothing, but their children are still visited.
///
/// The renderer holds no per-render state and can be shared between
/// threads; each call to [`render`](Self::render) builds its own context.
///
/// # Example
///
/// ```
/// use mdwiki_renderer::WikiRenderer;
/// use mdwiki_tree::{Document, NodeValue, Segment};
///
/// let source = b"Title";
/// let mut doc = Document::new();
/// let heading = doc.push(doc.root_id(), NodeValue::Heading { level: 1 });
/// doc.push(heading, NodeValue::text(Segment::new(0, 5)));
///
/// let output = WikiRenderer::new().render_to_string(source, doc.root()).unwrap();
/// assert_eq!(output, "h1.Title\n\n");
/// ```
#[derive(Clone)]
pub struct WikiRenderer {
    registry: Registry,
    buffer_capacity: usize,
}

impl WikiRenderer {
    /// Create a renderer with the wiki markup registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Registry::wiki(),
            buffer_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Use a custom registry instead of the wiki markup table.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the size of the output buffer in bytes.
    ///
    /// A capacity of zero passes every write straight to the writer.
    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Render the tree under `root` to `writer`.
    ///
    /// `source` is the buffer the tree's segments point into. Returns the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Write`] on the first failed write. The walk is
    /// abandoned at that point; output already handed to `writer` is not
    /// retracted.
    pub fn render<W: Write>(
        &self,
        writer: &mut W,
        source: &[u8],
        root: Node<'_>,
    ) -> Result<usize, RenderError> {
        let footnotes = FootnoteIndex::build(root);
        tracing::debug!(
            nodes = root.document().len(),
            footnotes = footnotes.len(),
            "Rendering document"
        );

        let sink = Sink::new(writer, self.buffer_capacity);
        let mut ctx = RenderContext::new(sink, source, footnotes);

        let status = walk(root, |node, entering| {
            let Some(handlers) = self.registry.get(node.kind()) else {
                if entering {
                    tracing::trace!(kind = ?node.kind(), node = %node.id(), "No routine registered");
                }
                return Ok(WalkStatus::Continue);
            };
            match handlers.get(entering) {
                Some(routine) => routine(&mut ctx, node),
                None => Ok(WalkStatus::Continue),
            }
        })?;

        if status == WalkStatus::Stop {
            tracing::debug!("Render stopped early");
        }

        let written = ctx.finish()?;
        tracing::debug!(bytes = written, "Rendered document");
        Ok(written)
    }

    /// Render the tree under `root` into a string.
    ///
    /// Invalid UTF-8 copied from `source` is replaced with U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns an error if a registered routine fails.
    pub fn render_to_string(&self, source: &[u8], root: Node<'_>) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.render(&mut buf, source, root)?;
        Ok(String::from_utf8(buf)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }
}

impl Default for WikiRenderer {
    fn default() -> Self {
        Self::new()
    }
}
