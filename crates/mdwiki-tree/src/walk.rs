//! Depth-first traversal with enter and exit visits.

use crate::document::Node;

/// Traversal control returned by a visitor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WalkStatus {
    /// Keep walking.
    #[default]
    Continue,
    /// Do not descend into the children of the node just entered.
    ///
    /// The node's exit visit still happens and the walk resumes at its next
    /// sibling.
    SkipChildren,
    /// End the walk without error.
    Stop,
}

enum Visit<'a> {
    Enter(Node<'a>),
    Exit(Node<'a>),
}

/// Walk the subtree rooted at `root` in document order.
///
/// The visitor is called with `entering = true` before a node's children and
/// with `entering = false` after them. Returning [`WalkStatus::SkipChildren`]
/// from an entry visit skips the children; [`WalkStatus::Stop`] ends the
/// walk. The first error returned by the visitor aborts the walk and is
/// passed to the caller.
///
/// The traversal keeps its own stack, so arbitrarily deep trees do not
/// exhaust the call stack.
///
/// # Errors
///
/// Returns the first error produced by `visitor`.
pub fn walk<'a, E, F>(root: Node<'a>, mut visitor: F) -> Result<WalkStatus, E>
where
    F: FnMut(Node<'a>, bool) -> Result<WalkStatus, E>,
{
    let mut stack = vec![Visit::Enter(root)];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(node) => {
                let status = visitor(node, true)?;
                if status == WalkStatus::Stop {
                    return Ok(WalkStatus::Stop);
                }
                stack.push(Visit::Exit(node));
                if status == WalkStatus::Continue {
                    // Last child first, so the first child is popped next.
                    let mut child = node.last_child();
                    while let Some(c) = child {
                        stack.push(Visit::Enter(c));
                        child = c.prev_sibling();
                    }
                }
            }
            Visit::Exit(node) => {
                if visitor(node, false)? == WalkStatus::Stop {
                    return Ok(WalkStatus::Stop);
                }
            }
        }
    }

    Ok(WalkStatus::Continue)
}
