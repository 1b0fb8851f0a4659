//! List routines.
//!
//! Wiki lists encode nesting in the marker itself: a third-level bullet is
//! `***`. The marker character comes from the nearest list only.

use mdwiki_tree::{Node, NodeKind, NodeValue, WalkStatus};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::markup;

type Status = Result<WalkStatus, RenderError>;

/// A list nested in an item starts on its own line.
pub(crate) fn list_enter(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if node
        .parent()
        .is_some_and(|parent| parent.kind() == NodeKind::ListItem)
    {
        ctx.newline()?;
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn list_item_enter(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    let list = node.parent();
    let marker = match list.map(|list| list.value()) {
        Some(NodeValue::List { ordered: true }) => markup::ORDERED_ITEM,
        _ => markup::BULLET_ITEM,
    };
    let offset = match node.value() {
        NodeValue::ListItem { offset } => *offset,
        _ => 0,
    };

    ctx.write_str(&marker.repeat(depth(list)))?;
    ctx.write_str(&" ".repeat(offset))?;
    Ok(WalkStatus::Continue)
}

/// Items holding a nested list already end on that list's last line.
pub(crate) fn list_item_exit(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    let has_nested_list = node
        .children()
        .any(|child| child.kind() == NodeKind::List);
    if !has_nested_list {
        ctx.newline()?;
    }
    Ok(WalkStatus::Continue)
}

/// Nesting depth of the items of `list`, counting list items up the
/// ancestor chain. Every item's parent is a list, so the walk steps two
/// levels at a time.
fn depth(list: Option<Node<'_>>) -> usize {
    let mut depth = 1;
    let mut ancestor = list.and_then(|list| list.parent());
    while let Some(item) = ancestor.filter(|node| node.kind() == NodeKind::ListItem) {
        depth += 1;
        ancestor = item.parent().and_then(|list| list.parent());
    }
    depth
}
