//! Wiki markup literals.

pub(crate) const NEWLINE: &str = "\n";

pub(crate) const EMPHASIS: &str = "_";
pub(crate) const STRONG: &str = "*";
pub(crate) const CITATION: &str = "??";
pub(crate) const INSERTED: &str = "+";
pub(crate) const DELETED: &str = "-";
pub(crate) const MONOSPACE_START: &str = "{{";
pub(crate) const MONOSPACE_END: &str = "}}";
pub(crate) const QUOTATION: &str = "\"";
pub(crate) const SUBSCRIPT: &str = "~";
pub(crate) const SUPERSCRIPT: &str = "^";

pub(crate) const HORIZONTAL_RULE: &str = "----";
pub(crate) const QUOTE: &str = "{quote}";
pub(crate) const CODE: &str = "{code}";
pub(crate) const CODE_HTML: &str = "{code:html}";

pub(crate) const BULLET_ITEM: &str = "*";
pub(crate) const ORDERED_ITEM: &str = "#";

pub(crate) const TABLE_CELL: &str = "|";
pub(crate) const TABLE_HEADER_CELL: &str = "||";

pub(crate) const TASK_CHECKED: &str = "[x] ";
pub(crate) const TASK_UNCHECKED: &str = "[  ] ";

pub(crate) const DEFINITION_TERM: &str = "-  ";
pub(crate) const DEFINITION_DESCRIPTION: &str = "--  ";

pub(crate) const MAILTO: &str = "mailto:";
