//! Block-level routines: headings, paragraphs, code, quotes, rules, embedded
//! HTML blocks and definition lists.

use mdwiki_tree::{Node, NodeKind, NodeValue, WalkStatus};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::markup;

type Status = Result<WalkStatus, RenderError>;

/// Parents that lay out their paragraphs themselves.
const SELF_SPACED_PARENTS: &[NodeKind] = &[NodeKind::ListItem, NodeKind::Footnote];

pub(crate) fn heading_enter(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    if let NodeValue::Heading { level } = node.value() {
        write!(ctx, "h{level}.")?;
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn heading_exit(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.newline()?;
    ctx.newline()?;
    Ok(WalkStatus::Continue)
}

/// Line break around a paragraph, on both visits.
pub(crate) fn paragraph(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    let self_spaced = node
        .parent()
        .is_some_and(|parent| SELF_SPACED_PARENTS.contains(&parent.kind()));
    if !self_spaced {
        ctx.newline()?;
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn blockquote(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::QUOTE)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn code_block_enter(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    ctx.write_str(markup::CODE)?;
    ctx.write_lines(node.value().lines())?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn fenced_code_block_enter(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    let value = node.value();
    match value.language(ctx.source()) {
        Some(lang) => {
            ctx.write_str("{code:")?;
            ctx.write_bytes(lang)?;
            ctx.write_str("}")?;
        }
        None => ctx.write_str(markup::CODE)?,
    }
    ctx.write_lines(value.lines())?;
    Ok(WalkStatus::Continue)
}

/// Closes code, fenced code and embedded HTML blocks.
pub(crate) fn code_block_exit(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.write_str(markup::CODE)?;
    ctx.newline()?;
    Ok(WalkStatus::Continue)
}

/// Embedded HTML is shown as an HTML code block, untouched.
pub(crate) fn html_block_enter(ctx: &mut RenderContext<'_>, node: Node<'_>) -> Status {
    ctx.write_str(markup::CODE_HTML)?;
    let text = node.text(ctx.source());
    ctx.write_bytes(&text)?;
    ctx.write_lines(node.value().lines())?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn thematic_break(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.newline()?;
    ctx.write_str(markup::HORIZONTAL_RULE)?;
    ctx.newline()?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn definition_term(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.newline()?;
    ctx.write_str(markup::DEFINITION_TERM)?;
    Ok(WalkStatus::Continue)
}

pub(crate) fn definition_description(ctx: &mut RenderContext<'_>, _: Node<'_>) -> Status {
    ctx.newline()?;
    ctx.write_str(markup::DEFINITION_DESCRIPTION)?;
    Ok(WalkStatus::Continue)
}

#[cfg(test)]
mod tests {
    use mdwiki_tree::{Document, NodeValue, Segment};
    use pretty_assertions::assert_eq;

    use crate::test_support::{markdown, render};

    #[test]
    fn test_heading_levels() {
        for level in 1..=6u8 {
            let source = "Title";
            let mut doc = Document::new();
            let heading = doc.push(doc.root_id(), NodeValue::Heading { level });
            doc.push(heading, NodeValue::text(Segment::new(0, 5)));
            assert_eq!(render(&doc, source), format!("h{level}.Title\n\n"));
        }
    }

    #[test]
    fn test_paragraph_breaks_on_both_visits() {
        let mut doc = Document::new();
        let para = doc.push(doc.root_id(), NodeValue::Paragraph);
        doc.push(para, NodeValue::text(Segment::new(0, 2)));
        assert_eq!(render(&doc, "hi"), "\nhi\n");
    }

    #[test]
    fn test_paragraph_in_list_item_and_footnote() {
        let mut doc = Document::new();
        let item = doc.create(NodeValue::ListItem { offset: 0 });
        let para = doc.push(item, NodeValue::Paragraph);
        doc.push(para, NodeValue::text(Segment::new(0, 1)));
        let list = doc.push(doc.root_id(), NodeValue::List { ordered: false });
        doc.append_child(list, item);

        let footnotes = doc.push(doc.root_id(), NodeValue::FootnoteList);
        let note = doc.push(
            footnotes,
            NodeValue::Footnote {
                label: "n".to_owned(),
                index: 1,
                blank_previous_lines: false,
            },
        );
        let para = doc.push(note, NodeValue::Paragraph);
        doc.push(para, NodeValue::text(Segment::new(1, 2)));

        assert_eq!(render(&doc, "ab"), "*a\n\n----{anchor:n}n: b");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            markdown("> This is a blockquote"),
            "{quote}\nThis is a blockquote\n{quote}"
        );
    }

    #[test]
    fn test_fenced_code_block() {
        let source = "go\nfmt.Println(\"Hello World\")\n";
        let mut doc = Document::new();
        doc.push(
            doc.root_id(),
            NodeValue::FencedCodeBlock {
                info: Some(Segment::new(0, 2)),
                lines: vec![Segment::new(3, source.len())],
            },
        );
        assert_eq!(
            render(&doc, source),
            "{code:go}fmt.Println(\"Hello World\")\n{code}\n"
        );
    }

    #[test]
    fn test_fenced_code_block_without_language() {
        assert_eq!(
            markdown("```\nHello World\n```\n"),
            "{code}Hello World\n{code}"
        );
    }

    #[test]
    fn test_code_block_is_verbatim() {
        assert_eq!(
            markdown("    <i>not html</i>\n    *x*\n"),
            "{code}<i>not html</i>\n*x*\n{code}"
        );
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(
            markdown("```html\n<div>\n  <p>This is an HTML block.</p>\n</div>\n"),
            "{code:html}<div>\n  <p>This is an HTML block.</p>\n</div>\n{code}"
        );
    }

    #[test]
    fn test_html_block() {
        let output = markdown("<div>\n  <p>This is a raw HTML block.</p>\n</div>\n");
        assert_eq!(
            output,
            "{code:html}<div>\n  <p>This is a raw HTML block.</p>\n</div>\n{code}"
        );
    }

    #[test]
    fn test_html_block_is_not_substituted() {
        let input = "<table><tr><th>Month</th></tr><tr><td><i>January</i></td></tr></table>";
        assert_eq!(
            markdown(&format!("{input}\n")),
            format!("{{code:html}}{input}\n{{code}}")
        );
    }

    #[test]
    fn test_thematic_break() {
        assert_eq!(
            markdown("Text above the thematic break.\n\n---\n\nText below the thematic break."),
            "Text above the thematic break.\n\n----\n\nText below the thematic break."
        );
    }

    #[test]
    fn test_definition_list() {
        let source = "TermDesc";
        let mut doc = Document::new();
        let list = doc.push(doc.root_id(), NodeValue::DefinitionList);
        let term = doc.push(list, NodeValue::DefinitionTerm);
        doc.push(term, NodeValue::text(Segment::new(0, 4)));
        let desc = doc.push(list, NodeValue::DefinitionDescription);
        doc.push(desc, NodeValue::text(Segment::new(4, 8)));
        assert_eq!(render(&doc, source), "\n-  Term\n--  Desc");
    }
}
