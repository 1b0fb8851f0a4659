//! Column arithmetic on raw source lines.
//!
//! The event stream does not say where an item's content starts, so list
//! item offsets are recovered from the source text around the item's start.

const TAB_STOP: usize = 4;

/// Byte offset of the start of the line containing `pos`.
pub(crate) fn line_start(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text.as_bytes()[..pos]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1)
}

/// Whether the line before the one containing `pos` is blank.
///
/// The first line of the text has no previous line.
pub(crate) fn previous_line_is_blank(text: &str, pos: usize) -> bool {
    let start = line_start(text, pos);
    if start == 0 {
        return false;
    }
    let previous = line_start(text, start - 1);
    text.as_bytes()[previous..start - 1]
        .iter()
        .all(u8::is_ascii_whitespace)
}

/// Column of the content of the list item whose marker is at or after `pos`
/// on the same line.
///
/// The content column is the marker's column plus the marker width plus the
/// padding that follows it. Padding of more than four columns, or an item
/// with nothing after its marker, counts as one column.
pub(crate) fn list_item_content_column(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let start = line_start(text, pos);
    let mut i = pos.min(bytes.len());
    while matches!(bytes.get(i), Some(b' ' | b'\t' | b'>')) {
        i += 1;
    }
    let marker_end = list_marker_end(bytes, i);
    let marker_end_column = width(&bytes[start..marker_end]);

    let mut end = marker_end;
    let mut padding = 0;
    while let Some(&b) = bytes.get(end).filter(|&&b| b == b' ' || b == b'\t') {
        padding += if b == b'\t' {
            TAB_STOP - (marker_end_column + padding) % TAB_STOP
        } else {
            1
        };
        end += 1;
    }

    let empty = matches!(bytes.get(end), None | Some(b'\n' | b'\r'));
    if empty || padding == 0 || padding > TAB_STOP {
        padding = 1;
    }
    marker_end_column + padding
}

/// Column of the content of the blockquote whose `>` is at or after `pos`
/// on the same line.
pub(crate) fn blockquote_content_column(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    let start = line_start(text, pos);
    let mut i = pos.min(bytes.len());
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'>') {
        i += 1;
        if bytes.get(i) == Some(&b' ') {
            i += 1;
        }
    }
    width(&bytes[start..i])
}

/// End of a bullet (`-`, `*`, `+`) or ordered (`1.`, `1)`) marker at `i`.
fn list_marker_end(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(b'-' | b'*' | b'+') => i + 1,
        Some(b) if b.is_ascii_digit() => {
            let mut end = i;
            while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                end += 1;
            }
            if matches!(bytes.get(end), Some(b'.' | b')')) {
                end + 1
            } else {
                end
            }
        }
        _ => i,
    }
}

/// Display width of a line prefix, with tabs expanded to the next stop.
fn width(prefix: &[u8]) -> usize {
    prefix.iter().fold(0, |column, &b| {
        if b == b'\t' {
            column + TAB_STOP - column % TAB_STOP
        } else {
            column + 1
        }
    })
}
