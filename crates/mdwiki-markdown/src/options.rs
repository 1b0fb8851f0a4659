//! Markdown extension switches.

use pulldown_cmark::Options;

/// Markdown extensions recognised by [`parse`](crate::parse).
///
/// CommonMark itself is always enabled. Every extension defaults to on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParseOptions {
    /// GFM pipe tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// `- [x]` task list items.
    pub tasklists: bool,
    /// `[^label]` footnote references and definitions.
    pub footnotes: bool,
    /// Definition lists (`Term` followed by `: description`).
    pub definition_lists: bool,
    /// Bare URLs (`https://...`) and email addresses in text become
    /// autolinks.
    pub autolinks: bool,
}

impl ParseOptions {
    /// Plain CommonMark, every extension disabled.
    #[must_use]
    pub const fn commonmark() -> Self {
        Self {
            tables: false,
            strikethrough: false,
            tasklists: false,
            footnotes: false,
            definition_lists: false,
            autolinks: false,
        }
    }

    pub(crate) fn to_pulldown(self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.definition_lists {
            options.insert(Options::ENABLE_DEFINITION_LIST);
        }
        options
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: true,
            definition_lists: true,
            autolinks: true,
        }
    }
}
