//! Table routines. Header cells are separated by `||`, body cells by `|`.

use mdwiki_tree::{Node, NodeKind, WalkStatus};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::markup;

type Status = Result<WalkStatus, RenderError>;

pub(crate) fn header_row_enter(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::TABLE_HEADER_CELL)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn header_row_exit(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::TABLE_HEADER_CELL)?;
    ctx.newline()?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn row_enter(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::TABLE_CELL)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn row_exit(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::TABLE_CELL)?;
    ctx.newline()?;
    Ok(WalkStatus::Continue)
}

/// Empty cells get a space so the separators around them stay apart.
pub(crate) fn cell_enter(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if !node.has_children() {
        ctx.write_str(" ")?;
    }
    Ok(WalkStatus::Continue)
}

/// Separator between cells; the row closes the last one.
pub(crate) fn cell_exit(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if node.next_sibling().is_some() {
        let in_body = node
            .parent()
            .is_some_and(|row| row.kind() == NodeKind::TableRow);
        ctx.write_str(if in_body {
            markup::TABLE_CELL
        } else {
            markup::TABLE_HEADER_CELL
        })?;
    }
    Ok(WalkStatus::Continue)
}
