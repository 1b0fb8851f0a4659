//! Node kind to emission routine table.

use std::collections::HashMap;

use mdwiki_tree::{Node, NodeKind, WalkStatus};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::routines::{block, footnote, inline, list, table};

/// Emission routine invoked on a node's entry or exit visit.
pub type RenderFn = fn(&mut RenderContext<'_>, Node<'_>) -> Result<WalkStatus, RenderError>;

/// Routines for one node kind. Either phase may have none.
#[derive(Clone, Copy, Default)]
pub struct Handlers {
    /// Called before the node's children.
    pub enter: Option<RenderFn>,
    /// Called after the node's children.
    pub exit: Option<RenderFn>,
}

impl Handlers {
    /// Structural node: known, but emits nothing.
    pub const NONE: Self = Self {
        enter: None,
        exit: None,
    };

    #[must_use]
    pub const fn new(enter: RenderFn, exit: RenderFn) -> Self {
        Self {
            enter: Some(enter),
            exit: Some(exit),
        }
    }

    #[must_use]
    pub const fn enter(enter: RenderFn) -> Self {
        Self {
            enter: Some(enter),
            exit: None,
        }
    }

    #[must_use]
    pub const fn exit(exit: RenderFn) -> Self {
        Self {
            enter: None,
            exit: Some(exit),
        }
    }

    /// Same routine for both phases, for markup that opens and closes with
    /// the same literal.
    #[must_use]
    pub const fn both(routine: RenderFn) -> Self {
        Self::new(routine, routine)
    }

    /// Routine for the given phase.
    #[must_use]
    pub const fn get(&self, entering: bool) -> Option<RenderFn> {
        if entering { self.enter } else { self.exit }
    }
}

/// Immutable mapping from node kind to [`Handlers`].
///
/// Built once, then handed to a [`WikiRenderer`](crate::WikiRenderer).
/// Kinds without an entry are skipped by the renderer without output; their
/// children are still visited.
///
/// [`Registry::default`] is the wiki markup table. Individual kinds can be
/// overridden with [`register`](Self::register):
///
/// ```
/// use mdwiki_renderer::{Handlers, Registry};
/// use mdwiki_tree::{NodeKind, WalkStatus};
///
/// let registry = Registry::default().register(
///     NodeKind::ThematicBreak,
///     Handlers::enter(|ctx, _| {
///         ctx.write_str("\n\\\\\n")?;
///         Ok(WalkStatus::Continue)
///     }),
/// );
/// assert!(registry.get(NodeKind::ThematicBreak).is_some());
/// ```
#[derive(Clone)]
pub struct Registry {
    handlers: HashMap<NodeKind, Handlers>,
}

impl Registry {
    /// Registry with no entries; every node is skipped.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Atlassian wiki markup table.
    #[must_use]
    pub fn wiki() -> Self {
        Self::empty()
            // Structure
            .register(NodeKind::Document, Handlers::NONE)
            .register(NodeKind::TextBlock, Handlers::NONE)
            .register(NodeKind::Table, Handlers::NONE)
            // Blocks
            .register(
                NodeKind::Heading,
                Handlers::new(block::heading_enter, block::heading_exit),
            )
            .register(NodeKind::Paragraph, Handlers::both(block::paragraph))
            .register(NodeKind::Blockquote, Handlers::both(block::blockquote))
            .register(
                NodeKind::CodeBlock,
                Handlers::new(block::code_block_enter, block::code_block_exit),
            )
            .register(
                NodeKind::FencedCodeBlock,
                Handlers::new(block::fenced_code_block_enter, block::code_block_exit),
            )
            .register(
                NodeKind::HtmlBlock,
                Handlers::new(block::html_block_enter, block::code_block_exit),
            )
            .register(
                NodeKind::ThematicBreak,
                Handlers::enter(block::thematic_break),
            )
            .register(
                NodeKind::DefinitionTerm,
                Handlers::enter(block::definition_term),
            )
            .register(
                NodeKind::DefinitionDescription,
                Handlers::enter(block::definition_description),
            )
            // Lists
            .register(NodeKind::List, Handlers::enter(list::list_enter))
            .register(
                NodeKind::ListItem,
                Handlers::new(list::list_item_enter, list::list_item_exit),
            )
            // Tables
            .register(
                NodeKind::TableHeader,
                Handlers::new(table::header_row_enter, table::header_row_exit),
            )
            .register(
                NodeKind::TableRow,
                Handlers::new(table::row_enter, table::row_exit),
            )
            .register(
                NodeKind::TableCell,
                Handlers::new(table::cell_enter, table::cell_exit),
            )
            // Footnotes
            .register(NodeKind::Footnote, Handlers::enter(footnote::definition))
            .register(NodeKind::FootnoteLink, Handlers::enter(footnote::reference))
            .register(NodeKind::FootnoteList, Handlers::enter(footnote::list))
            // Inlines
            .register(NodeKind::Emphasis, Handlers::both(inline::emphasis))
            .register(
                NodeKind::Strikethrough,
                Handlers::both(inline::strikethrough),
            )
            .register(
                NodeKind::CodeSpan,
                Handlers::new(inline::code_span_enter, inline::code_span_exit),
            )
            .register(
                NodeKind::Link,
                Handlers::new(inline::link_enter, inline::link_exit),
            )
            .register(NodeKind::AutoLink, Handlers::enter(inline::autolink))
            .register(NodeKind::Image, Handlers::enter(inline::image))
            .register(NodeKind::Text, Handlers::enter(inline::text))
            .register(NodeKind::String, Handlers::enter(inline::string))
            .register(NodeKind::RawHtml, Handlers::enter(inline::raw_html))
            .register(
                NodeKind::TaskCheckBox,
                Handlers::enter(inline::task_checkbox),
            )
    }

    /// Add or replace the handlers for `kind`.
    #[must_use]
    pub fn register(mut self, kind: NodeKind, handlers: Handlers) -> Self {
        self.handlers.insert(kind, handlers);
        self
    }

    /// Remove the entry for `kind`, so nodes of that kind are skipped.
    #[must_use]
    pub fn unregister(mut self, kind: NodeKind) -> Self {
        self.handlers.remove(&kind);
        self
    }

    /// Add every entry of `other`, replacing entries for the same kinds.
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        self.handlers.extend(other.iter());
        self
    }

    /// Handlers registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: NodeKind) -> Option<&Handlers> {
        self.handlers.get(&kind)
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, Handlers)> + '_ {
        self.handlers.iter().map(|(kind, handlers)| (*kind, *handlers))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::wiki()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut RenderContext<'_>, _: Node<'_>) -> Result<WalkStatus, RenderError> {
        Ok(WalkStatus::Continue)
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::empty();
        assert!(registry.is_empty());
        assert!(registry.get(NodeKind::Heading).is_none());
    }

    #[test]
    fn test_wiki_registry_covers_categories() {
        let registry = Registry::wiki();
        for kind in [
            NodeKind::Document,
            NodeKind::Heading,
            NodeKind::Paragraph,
            NodeKind::Emphasis,
            NodeKind::Strikethrough,
            NodeKind::CodeSpan,
            NodeKind::CodeBlock,
            NodeKind::FencedCodeBlock,
            NodeKind::Blockquote,
            NodeKind::List,
            NodeKind::ListItem,
            NodeKind::Link,
            NodeKind::AutoLink,
            NodeKind::Image,
            NodeKind::Table,
            NodeKind::TableRow,
            NodeKind::TableHeader,
            NodeKind::TableCell,
            NodeKind::Footnote,
            NodeKind::FootnoteLink,
            NodeKind::FootnoteList,
            NodeKind::DefinitionTerm,
            NodeKind::DefinitionDescription,
            NodeKind::HtmlBlock,
            NodeKind::RawHtml,
            NodeKind::TextBlock,
            NodeKind::Text,
            NodeKind::String,
            NodeKind::ThematicBreak,
            NodeKind::TaskCheckBox,
        ] {
            assert!(registry.get(kind).is_some(), "{kind:?} not registered");
        }
        assert_eq!(registry.len(), 30);
        assert!(registry.get(NodeKind::DefinitionList).is_none());
    }

    #[test]
    fn test_symmetric_handlers_share_routine() {
        let registry = Registry::wiki();
        for kind in [
            NodeKind::Emphasis,
            NodeKind::Strikethrough,
            NodeKind::Blockquote,
        ] {
            let handlers = registry.get(kind).copied().unwrap_or_default();
            let (Some(enter), Some(exit)) = (handlers.enter, handlers.exit) else {
                panic!("{kind:?} should have both phases");
            };
            assert!(std::ptr::fn_addr_eq(enter, exit));
        }
    }

    #[test]
    fn test_structural_kinds_have_no_routines() {
        let registry = Registry::wiki();
        let handlers = registry.get(NodeKind::Table).copied().unwrap();
        assert!(handlers.get(true).is_none());
        assert!(handlers.get(false).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let registry = Registry::wiki().register(NodeKind::Heading, Handlers::exit(noop));
        let handlers = registry.get(NodeKind::Heading).copied().unwrap();
        assert!(handlers.enter.is_none());
        assert!(handlers.exit.is_some());
    }

    #[test]
    fn test_unregister_and_merge() {
        let partial = Registry::wiki().unregister(NodeKind::Text);
        assert!(partial.get(NodeKind::Text).is_none());

        let extra = Registry::empty().register(NodeKind::DefinitionList, Handlers::enter(noop));
        let merged = partial.merge(&extra);
        assert!(merged.get(NodeKind::DefinitionList).is_some());
        assert_eq!(merged.len(), 30);
        assert_eq!(extra.iter().count(), 1);
    }
}
