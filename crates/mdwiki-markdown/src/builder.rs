//! Event stream to document tree.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use linkify::{LinkFinder, LinkKind};
use mdwiki_tree::{AutoLinkKind, Document, NodeId, NodeKind, NodeValue, Segment};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Parser, Tag};

use crate::ParsedDocument;
use crate::layout;
use crate::options::ParseOptions;

/// How an open stack entry relates to the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    /// Node opened by a start tag.
    Element,
    /// List item or blockquote; moves the content column.
    Container,
    /// Opened implicitly around the inline content of a tight list item.
    TextBlock,
    /// Start tag without a node of its own; children go to the parent.
    Transparent,
    /// Everything up to the matching end tag is dropped.
    Opaque,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    id: NodeId,
    role: Role,
}

/// Builds a [`Document`] from the `pulldown-cmark` event stream of one
/// markdown text.
pub(crate) struct TreeBuilder<'m> {
    markdown: &'m str,
    /// Text the parser produced that is not a slice of `markdown`; segments
    /// into it start at `markdown.len()`.
    appended: Vec<u8>,
    doc: Document,
    stack: Vec<Frame>,
    /// Content columns of the open list items and blockquotes.
    content_columns: Vec<usize>,
    /// Normalised footnote label to index, in order of first reference.
    footnote_indices: HashMap<String, usize>,
    /// Footnote definitions in source order, still detached.
    definitions: Vec<(String, NodeId)>,
    /// End of the last inline text segment taken from the markdown.
    text_end: usize,
    /// Split bare URLs and email addresses out of text.
    autolinks: bool,
    /// Inline text not yet pushed. The parser splits text at escapes,
    /// entities and unmatched delimiters; contiguous pieces are joined here.
    pending: Option<(NodeId, Segment)>,
}

impl<'m> TreeBuilder<'m> {
    pub(crate) fn new(markdown: &'m str) -> Self {
        let doc = Document::new();
        let root = Frame {
            id: doc.root_id(),
            role: Role::Element,
        };
        Self {
            markdown,
            appended: Vec::new(),
            doc,
            stack: vec![root],
            content_columns: Vec::new(),
            footnote_indices: HashMap::new(),
            definitions: Vec::new(),
            text_end: 0,
            autolinks: false,
            pending: None,
        }
    }

    pub(crate) fn build(mut self, options: ParseOptions) -> ParsedDocument {
        let markdown = self.markdown;
        self.autolinks = options.autolinks;
        for (event, range) in Parser::new_ext(markdown, options.to_pulldown()).into_offset_iter() {
            self.event(event, range);
        }
        self.flush_text();
        self.attach_footnotes();

        let mut source = Vec::with_capacity(markdown.len() + self.appended.len());
        source.extend_from_slice(markdown.as_bytes());
        source.extend_from_slice(&self.appended);
        ParsedDocument::new(source, self.doc)
    }

    fn event(&mut self, event: Event<'_>, range: Range<usize>) {
        if !matches!(event, Event::Text(_)) {
            self.flush_text();
        }
        if self.top().role == Role::Opaque {
            match event {
                Event::Start(_) => self.push_frame(self.top().id, Role::Opaque),
                Event::End(_) => self.end(),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start(tag, range),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(&text, range),
            Event::Code(code) => {
                let span = self.push_inline(NodeValue::CodeSpan);
                self.push_text(span, &code);
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                let parent = self.inline_parent();
                self.push_text(parent, &math);
            }
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => {
                let segment = self.segment(&html);
                self.push_inline(NodeValue::RawHtml {
                    segments: vec![segment],
                });
            }
            Event::FootnoteReference(label) => {
                let index = self.footnote_index(&label);
                self.push_inline(NodeValue::FootnoteLink { index });
            }
            Event::SoftBreak => self.line_break(false),
            Event::HardBreak => self.line_break(true),
            Event::Rule => {
                self.close_text_block();
                let parent = self.top().id;
                self.doc.push(parent, NodeValue::ThematicBreak);
            }
            Event::TaskListMarker(checked) => {
                self.push_inline(NodeValue::TaskCheckBox { checked });
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>, range: Range<usize>) {
        if is_inline(&tag) {
            self.inline_parent();
        } else {
            self.close_text_block();
        }

        match tag {
            Tag::Paragraph => self.open(NodeValue::Paragraph),
            Tag::Heading { level, .. } => self.open(NodeValue::Heading {
                level: heading_level(level),
            }),
            Tag::BlockQuote(_) => {
                let column = layout::blockquote_content_column(self.markdown, range.start);
                self.open_container(NodeValue::Blockquote, column);
            }
            Tag::CodeBlock(CodeBlockKind::Indented) => {
                self.open(NodeValue::CodeBlock { lines: Vec::new() });
            }
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
                let info = (!info.is_empty()).then(|| self.segment(&info));
                self.open(NodeValue::FencedCodeBlock {
                    info,
                    lines: Vec::new(),
                });
            }
            Tag::HtmlBlock => self.open(NodeValue::HtmlBlock { lines: Vec::new() }),
            Tag::List(start) => self.open(NodeValue::List {
                ordered: start.is_some(),
            }),
            Tag::Item => {
                let column = layout::list_item_content_column(self.markdown, range.start);
                let offset = column.saturating_sub(self.content_column());
                self.open_container(NodeValue::ListItem { offset }, column);
            }
            Tag::FootnoteDefinition(label) => self.open_footnote(&label, range.start),
            Tag::DefinitionList => self.open(NodeValue::DefinitionList),
            Tag::DefinitionListTitle => self.open(NodeValue::DefinitionTerm),
            Tag::DefinitionListDefinition => self.open(NodeValue::DefinitionDescription),
            Tag::Table(_) => self.open(NodeValue::Table),
            Tag::TableHead => self.open(NodeValue::TableHeader),
            Tag::TableRow => self.open(NodeValue::TableRow),
            Tag::TableCell => self.open(NodeValue::TableCell),
            Tag::Emphasis => self.open(NodeValue::Emphasis { level: 1 }),
            Tag::Strong => self.open(NodeValue::Emphasis { level: 2 }),
            Tag::Strikethrough => self.open(NodeValue::Strikethrough),
            Tag::Superscript | Tag::Subscript => {
                self.push_frame(self.top().id, Role::Transparent);
            }
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => match link_type {
                LinkType::Autolink | LinkType::Email => {
                    let kind = if link_type == LinkType::Email {
                        AutoLinkKind::Email
                    } else {
                        AutoLinkKind::Url
                    };
                    let parent = self.top().id;
                    let id = self.doc.push(
                        parent,
                        NodeValue::AutoLink {
                            url: dest_url.into_string(),
                            kind,
                        },
                    );
                    self.push_frame(id, Role::Opaque);
                }
                _ => self.open(NodeValue::Link {
                    destination: dest_url.into_string(),
                    title: title.into_string(),
                }),
            },
            Tag::Image {
                dest_url, title, ..
            } => self.open(NodeValue::Image {
                destination: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::MetadataBlock(_) => self.push_frame(self.top().id, Role::Opaque),
        }
    }

    fn end(&mut self) {
        self.close_text_block();
        if self.stack.len() <= 1 {
            tracing::debug!("Unbalanced end tag ignored");
            return;
        }
        if let Some(Frame {
            role: Role::Container,
            ..
        }) = self.stack.pop()
        {
            self.content_columns.pop();
        }
    }

    /// Inline text keeps its source form: escapes and entity references are
    /// written out as typed, not decoded.
    fn text(&mut self, text: &CowStr<'_>, range: Range<usize>) {
        let top = self.top().id;
        if matches!(
            self.doc.node(top).kind(),
            NodeKind::CodeBlock | NodeKind::FencedCodeBlock | NodeKind::HtmlBlock
        ) {
            self.push_line(top, text);
            return;
        }
        let parent = self.inline_parent();
        let segment = self.raw_segment(range);
        if let Some((id, pending)) = &mut self.pending
            && *id == parent
            && pending.stop == segment.start
        {
            pending.stop = segment.stop;
            return;
        }
        self.flush_text();
        self.pending = Some((parent, segment));
    }

    fn flush_text(&mut self) {
        let Some((parent, segment)) = self.pending.take() else {
            return;
        };
        if self.autolinks && !self.in_link() {
            self.push_linkified(parent, segment);
        } else {
            self.doc.push(parent, NodeValue::text(segment));
        }
    }

    /// Push `segment` as text, with every bare URL or email address in it
    /// turned into an autolink.
    fn push_linkified(&mut self, parent: NodeId, segment: Segment) {
        let markdown = self.markdown;
        let Some(text) = markdown.get(segment.start..segment.stop) else {
            self.doc.push(parent, NodeValue::text(segment));
            return;
        };

        let mut start = segment.start;
        for link in LinkFinder::new().links(text) {
            let kind = match link.kind() {
                LinkKind::Email => AutoLinkKind::Email,
                _ => AutoLinkKind::Url,
            };
            let link_start = segment.start + link.start();
            if link_start > start {
                self.doc
                    .push(parent, NodeValue::text(Segment::new(start, link_start)));
            }
            self.doc.push(
                parent,
                NodeValue::AutoLink {
                    url: link.as_str().to_owned(),
                    kind,
                },
            );
            start = segment.start + link.end();
        }
        if start < segment.stop {
            self.doc
                .push(parent, NodeValue::text(Segment::new(start, segment.stop)));
        }
    }

    /// Whether text goes into link text, which is never linkified again.
    fn in_link(&self) -> bool {
        self.stack.iter().any(|frame| {
            matches!(
                self.doc.node(frame.id).kind(),
                NodeKind::Link | NodeKind::Image
            )
        })
    }

    fn html(&mut self, html: &CowStr<'_>) {
        let top = self.top().id;
        if self.doc.node(top).kind() == NodeKind::HtmlBlock {
            self.push_line(top, html);
        } else {
            let segment = self.segment(html);
            self.push_inline(NodeValue::RawHtml {
                segments: vec![segment],
            });
        }
    }

    /// Record a line break on the text before it, creating an empty text
    /// node to carry it when there is none.
    fn line_break(&mut self, hard: bool) {
        let parent = self.inline_parent();
        let last_text = self
            .doc
            .node(parent)
            .last_child()
            .filter(|node| node.kind() == NodeKind::Text)
            .map(|node| node.id());
        let id = match last_text {
            Some(id) => id,
            None => self.doc.push(parent, NodeValue::text(Segment::default())),
        };
        if let NodeValue::Text {
            soft_line_break,
            hard_line_break,
            ..
        } = self.doc.value_mut(id)
        {
            if hard {
                *hard_line_break = true;
            } else {
                *soft_line_break = true;
            }
        }
    }

    fn open(&mut self, value: NodeValue) {
        let parent = self.top().id;
        let id = self.doc.push(parent, value);
        self.push_frame(id, Role::Element);
    }

    fn open_container(&mut self, value: NodeValue, content_column: usize) {
        let parent = self.top().id;
        let id = self.doc.push(parent, value);
        self.push_frame(id, Role::Container);
        self.content_columns.push(content_column);
    }

    /// Footnote definitions are built detached and attached at the end.
    fn open_footnote(&mut self, label: &str, pos: usize) {
        let id = self.doc.create(NodeValue::Footnote {
            label: label.to_owned(),
            index: 0,
            blank_previous_lines: layout::previous_line_is_blank(self.markdown, pos),
        });
        self.definitions.push((normalize_label(label), id));
        self.push_frame(id, Role::Element);
    }

    fn push_frame(&mut self, id: NodeId, role: Role) {
        self.stack.push(Frame { id, role });
    }

    fn top(&self) -> Frame {
        self.stack.last().copied().unwrap_or(Frame {
            id: self.doc.root_id(),
            role: Role::Element,
        })
    }

    fn content_column(&self) -> usize {
        self.content_columns.last().copied().unwrap_or(0)
    }

    /// Parent for inline content. Inline content directly inside a list
    /// item goes into a text block.
    fn inline_parent(&mut self) -> NodeId {
        let top = self.top();
        if top.role == Role::Container && self.doc.node(top.id).kind() == NodeKind::ListItem {
            let id = self.doc.push(top.id, NodeValue::TextBlock);
            self.push_frame(id, Role::TextBlock);
            return id;
        }
        top.id
    }

    fn close_text_block(&mut self) {
        if self.top().role == Role::TextBlock {
            self.stack.pop();
        }
    }

    fn push_inline(&mut self, value: NodeValue) -> NodeId {
        let parent = self.inline_parent();
        self.doc.push(parent, value)
    }

    fn push_text(&mut self, parent: NodeId, text: &str) {
        let value = match self.source_segment(text) {
            Some(segment) => NodeValue::text(segment),
            None => NodeValue::String {
                value: text.to_owned(),
            },
        };
        self.doc.push(parent, value);
    }

    fn push_line(&mut self, block: NodeId, text: &str) {
        let segment = self.segment(text);
        match self.doc.value_mut(block) {
            NodeValue::CodeBlock { lines }
            | NodeValue::FencedCodeBlock { lines, .. }
            | NodeValue::HtmlBlock { lines } => lines.push(segment),
            _ => {}
        }
    }

    /// Segment for `text`, appending it to the source buffer when the
    /// parser did not borrow it from the markdown.
    fn segment(&mut self, text: &str) -> Segment {
        if let Some(segment) = self.source_segment(text) {
            return segment;
        }
        let start = self.markdown.len() + self.appended.len();
        self.appended.extend_from_slice(text.as_bytes());
        Segment::new(start, start + text.len())
    }

    /// Segment for the inline text event at `range`. The parser starts the
    /// text of an escaped character after its backslash; the backslash is
    /// taken back in unless it belongs to the previous text.
    fn raw_segment(&mut self, range: Range<usize>) -> Segment {
        let bytes = self.markdown.as_bytes();
        let stop = range.end.min(bytes.len());
        let mut start = range.start.min(stop);
        let escaped = start > self.text_end
            && bytes[start - 1] == b'\\'
            && bytes.get(start).is_some_and(u8::is_ascii_punctuation);
        if escaped {
            start -= 1;
        }
        self.text_end = stop;
        Segment::new(start, stop)
    }

    /// Location of `text` in the markdown, if it is a slice of it.
    fn source_segment(&self, text: &str) -> Option<Segment> {
        let base = self.markdown.as_ptr().addr();
        let start = text.as_ptr().addr().checked_sub(base)?;
        let stop = start + text.len();
        (stop <= self.markdown.len()).then(|| Segment::new(start, stop))
    }

    fn footnote_index(&mut self, label: &str) -> usize {
        let next = self.footnote_indices.len() + 1;
        *self
            .footnote_indices
            .entry(normalize_label(label))
            .or_insert(next)
    }

    /// Gather the referenced definitions, ordered by index, into one
    /// footnote list at the end of the document.
    fn attach_footnotes(&mut self) {
        let mut notes = Vec::new();
        let mut seen = HashSet::new();
        for (label, id) in std::mem::take(&mut self.definitions) {
            let Some(&index) = self.footnote_indices.get(&label) else {
                tracing::debug!(%label, "Dropping unreferenced footnote definition");
                continue;
            };
            if !seen.insert(index) {
                tracing::debug!(%label, "Dropping duplicate footnote definition");
                continue;
            }
            if let NodeValue::Footnote { index: slot, .. } = self.doc.value_mut(id) {
                *slot = index;
            }
            notes.push((index, id));
        }
        if notes.is_empty() {
            return;
        }

        notes.sort_unstable_by_key(|&(index, _)| index);
        let root = self.doc.root_id();
        let list = self.doc.push(root, NodeValue::FootnoteList);
        for (_, id) in notes {
            self.doc.append_child(list, id);
        }
    }
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript
            | Tag::Link { .. }
            | Tag::Image { .. }
    )
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Footnote labels match case-insensitively.
fn normalize_label(label: &str) -> String {
    label.to_lowercase()
}
