//! Footnote routines.
//!
//! Definitions become anchors named after their label; references link to
//! those anchors.

use mdwiki_tree::{Node, NodeValue, WalkStatus};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::markup;

type Status = Result<WalkStatus, RenderError>;

pub(crate) fn definition(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::Footnote {
        label,
        blank_previous_lines,
        ..
    } = node.value()
    {
        if *blank_previous_lines {
            ctx.newline()?;
        }
        write!(ctx, "{{anchor:{label}}}{label}: ")?;
    }
    Ok(WalkStatus::Continue)
}

/// References without a matching definition produce no output.
pub(crate) fn reference(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::FootnoteLink { index } = node.value() {
        match ctx.footnote_label(*index) {
            Some(label) => write!(ctx, "[#{label}]")?,
            None => tracing::debug!(index, node = %node.id(), "Unresolved footnote reference"),
        }
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn list(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.newline()?;
    ctx.write_str(markup::HORIZONTAL_RULE)?;
    Ok(WalkStatus::Continue)
}
