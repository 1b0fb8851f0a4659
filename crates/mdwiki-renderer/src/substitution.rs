//! Inline HTML tag to wiki markup substitution.
//!
//! Inline raw HTML arrives as one fragment per tag (`<em>`, `</em>`, ...).
//! Simple formatting tags have a direct wiki equivalent; everything else is
//! kept verbatim.

use crate::markup;

/// Map an inline HTML tag to its wiki markup equivalent.
///
/// Returns `None` for fragments outside the supported set, which callers
/// write unchanged. The match is exact: no case folding, no attributes,
/// no self-closing variants.
#[must_use]
pub fn html_to_wiki(fragment: &str) -> Option<&'static str> {
    Some(match fragment {
        "<br>" => markup::NEWLINE,

        // Citation
        "<cite>" | "</cite>" => markup::CITATION,

        // Monospace
        "<code>" | "<kbd>" => markup::MONOSPACE_START,
        "</code>" | "</kbd>" => markup::MONOSPACE_END,

        // Deleted / inserted
        "<del>" | "</del>" | "<s>" | "</s>" => markup::DELETED,
        "<ins>" | "</ins>" => markup::INSERTED,

        // Emphasis
        "<em>" | "</em>" | "<dfn>" | "</dfn>" | "<i>" | "</i>" => markup::EMPHASIS,
        "<strong>" | "</strong>" => markup::STRONG,

        // Quotation
        "<q>" | "</q>" => markup::QUOTATION,

        // Sub/superscript
        "<sub>" | "</sub>" => markup::SUBSCRIPT,
        "<sup>" | "</sup>" => markup::SUPERSCRIPT,

        // Unsupported tag - keep as-is
        _ => return None,
    })
}
