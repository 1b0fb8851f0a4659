//! Node categories and their attributes.

use crate::segment::Segment;

/// Kind of an autolink target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoLinkKind {
    /// Web address (`<https://example.com>`).
    Url,
    /// Email address (`<user@example.com>`).
    Email,
}

/// Category tag of a node, without its attributes.
///
/// This is the key the renderer dispatches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Document,
    Heading,
    Paragraph,
    Emphasis,
    Strikethrough,
    CodeSpan,
    CodeBlock,
    FencedCodeBlock,
    Blockquote,
    List,
    ListItem,
    Link,
    AutoLink,
    Image,
    Table,
    TableRow,
    TableHeader,
    TableCell,
    Footnote,
    FootnoteLink,
    FootnoteList,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    HtmlBlock,
    RawHtml,
    TextBlock,
    Text,
    String,
    ThematicBreak,
    TaskCheckBox,
}

/// A node's category together with the attributes that category carries.
///
/// Textual attributes are [`Segment`]s into the source buffer, except where a
/// producer had to synthesise text that does not appear verbatim in the
/// source ([`NodeValue::String`]) or where the value is naturally owned
/// (link destinations, footnote labels).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeValue {
    /// Root of a document.
    Document,
    /// ATX or setext heading.
    Heading {
        /// Heading level (1-6).
        level: u8,
    },
    Paragraph,
    /// Emphasis span; level 1 is light emphasis, level 2 is strong.
    Emphasis { level: u8 },
    Strikethrough,
    /// Inline code; the code itself is held by the text children.
    CodeSpan,
    /// Indented code block.
    CodeBlock {
        /// Literal lines, line terminators included.
        lines: Vec<Segment>,
    },
    /// Fenced code block.
    FencedCodeBlock {
        /// Info string after the opening fence, if any.
        info: Option<Segment>,
        /// Literal lines, line terminators included.
        lines: Vec<Segment>,
    },
    Blockquote,
    /// Bullet or ordered list.
    List { ordered: bool },
    /// List item.
    ListItem {
        /// Width between the item's container content column and the
        /// item's own content column.
        offset: usize,
    },
    /// Inline link; the link text is held by the children.
    Link { destination: String, title: String },
    /// Autolink. Carries no children.
    AutoLink { url: String, kind: AutoLinkKind },
    /// Image; the children hold the alt text.
    Image { destination: String, title: String },
    Table,
    /// Body row of a table.
    TableRow,
    /// Header row of a table.
    TableHeader,
    TableCell,
    /// Footnote definition.
    Footnote {
        /// Reference label, as written after the caret.
        label: String,
        /// 1-based index shared with the references to this footnote.
        index: usize,
        /// Whether a blank line precedes the definition in the source.
        blank_previous_lines: bool,
    },
    /// Footnote reference site.
    FootnoteLink { index: usize },
    /// Container of every footnote definition.
    FootnoteList,
    /// Container of definition terms and descriptions.
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    /// Block of raw embedded markup.
    HtmlBlock { lines: Vec<Segment> },
    /// Inline raw markup fragment.
    RawHtml { segments: Vec<Segment> },
    /// Inline container used by tight list items instead of a paragraph.
    TextBlock,
    /// Literal text from the source.
    Text {
        segment: Segment,
        soft_line_break: bool,
        hard_line_break: bool,
    },
    /// Literal text not backed by the source.
    String { value: String },
    ThematicBreak,
    /// Task list checkbox.
    TaskCheckBox { checked: bool },
}

impl NodeValue {
    /// Plain text node for `segment` with no trailing line break.
    #[must_use]
    pub const fn text(segment: Segment) -> Self {
        Self::Text {
            segment,
            soft_line_break: false,
            hard_line_break: false,
        }
    }

    /// Category tag of this value.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Heading { .. } => NodeKind::Heading,
            Self::Paragraph => NodeKind::Paragraph,
            Self::Emphasis { .. } => NodeKind::Emphasis,
            Self::Strikethrough => NodeKind::Strikethrough,
            Self::CodeSpan => NodeKind::CodeSpan,
            Self::CodeBlock { .. } => NodeKind::CodeBlock,
            Self::FencedCodeBlock { .. } => NodeKind::FencedCodeBlock,
            Self::Blockquote => NodeKind::Blockquote,
            Self::List { .. } => NodeKind::List,
            Self::ListItem { .. } => NodeKind::ListItem,
            Self::Link { .. } => NodeKind::Link,
            Self::AutoLink { .. } => NodeKind::AutoLink,
            Self::Image { .. } => NodeKind::Image,
            Self::Table => NodeKind::Table,
            Self::TableRow => NodeKind::TableRow,
            Self::TableHeader => NodeKind::TableHeader,
            Self::TableCell => NodeKind::TableCell,
            Self::Footnote { .. } => NodeKind::Footnote,
            Self::FootnoteLink { .. } => NodeKind::FootnoteLink,
            Self::FootnoteList => NodeKind::FootnoteList,
            Self::DefinitionList => NodeKind::DefinitionList,
            Self::DefinitionTerm => NodeKind::DefinitionTerm,
            Self::DefinitionDescription => NodeKind::DefinitionDescription,
            Self::HtmlBlock { .. } => NodeKind::HtmlBlock,
            Self::RawHtml { .. } => NodeKind::RawHtml,
            Self::TextBlock => NodeKind::TextBlock,
            Self::Text { .. } => NodeKind::Text,
            Self::String { .. } => NodeKind::String,
            Self::ThematicBreak => NodeKind::ThematicBreak,
            Self::TaskCheckBox { .. } => NodeKind::TaskCheckBox,
        }
    }

    /// Literal lines of a code or embedded block, empty for other values.
    #[must_use]
    pub fn lines(&self) -> &[Segment] {
        match self {
            Self::CodeBlock { lines }
            | Self::FencedCodeBlock { lines, .. }
            | Self::HtmlBlock { lines } => lines,
            _ => &[],
        }
    }

    /// Language of a fenced code block: the info string up to the first
    /// whitespace.
    ///
    /// Returns `None` for other values and for fences without an info string.
    #[must_use]
    pub fn language<'s>(&self, source: &'s [u8]) -> Option<&'s [u8]> {
        let Self::FencedCodeBlock {
            info: Some(info), ..
        } = self
        else {
            return None;
        };
        let info = info.value(source);
        let end = info
            .iter()
            .position(u8::is_ascii_whitespace)
            .unwrap_or(info.len());
        let lang = &info[..end];
        (!lang.is_empty()).then_some(lang)
    }
}
