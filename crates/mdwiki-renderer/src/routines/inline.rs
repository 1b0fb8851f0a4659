//! Inline routines: emphasis, code spans, links, images, text and inline
//! HTML.

use mdwiki_tree::{AutoLinkKind, Node, NodeValue, WalkStatus};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::markup;
use crate::substitution::html_to_wiki;

type Status = Result<WalkStatus, RenderError>;

/// Level 2 is strong, anything else is light emphasis.
pub(crate) fn emphasis(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    let marker = match node.value() {
        NodeValue::Emphasis { level: 2 } => markup::STRONG,
        _ => markup::EMPHASIS,
    };
    ctx.write_str(marker)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn strikethrough(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::DELETED)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn code_span_enter(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::MONOSPACE_START)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn code_span_exit(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::MONOSPACE_END)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn link_enter(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str("[")?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn link_exit(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::Link { destination, .. } = node.value() {
        write!(ctx, "|{destination}]")?;
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn autolink(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::AutoLink { url, kind } = node.value() {
        let scheme = match kind {
            AutoLinkKind::Email => markup::MAILTO,
            AutoLinkKind::Url => "",
        };
        write!(ctx, "[{scheme}{url}]")?;
    }
    Ok(WalkStatus::Continue)
}

/// Alt text is dropped; wiki images only carry the target.
pub(crate) fn image(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::Image { destination, .. } = node.value() {
        write!(ctx, "!{destination}!")?;
    }
    Ok(WalkStatus::SkipChildren)
}

/// Any line break after the text becomes a blank line.
pub(crate) fn text(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::Text {
        segment,
        soft_line_break,
        hard_line_break,
    } = node.value()
    {
        ctx.write_segment(*segment)?;
        if *soft_line_break || *hard_line_break {
            ctx.newline()?;
            ctx.newline()?;
        }
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn string(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::String { value } = node.value() {
        ctx.write_str(value)?;
    }
    Ok(WalkStatus::Continue)
}

/// Known formatting tags become wiki markup, the rest is kept as written.
pub(crate) fn raw_html(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    let NodeValue::RawHtml { segments } = node.value() else {
        return Ok(WalkStatus::Continue);
    };
    let source = ctx.source();
    for segment in segments {
        let fragment = segment.value(source);
        match std::str::from_utf8(fragment).ok().and_then(html_to_wiki) {
            Some(wiki) => ctx.write_str(wiki)?,
            None => ctx.write_bytes(fragment)?,
        }
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn task_checkbox(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::TaskCheckBox { checked } = node.value() {
        let marker = if *checked {
            markup::TASK_CHECKED
        } else {
            markup::TASK_UNCHECKED
        };
        ctx.write_str(marker)?;
    }
    Ok(WalkStatus::Continue)
}
