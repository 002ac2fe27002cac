//! Line matchers for section headers and key lines.
//!
//! These operate on a single line's bytes with no I/O. Matching is ASCII
//! case-insensitive. On a hit they return the byte offset where the payload
//! begins: just past `]` for a section header, just past the `=`/`:`
//! separator for a key line. The `check_*` functions validate caller-supplied
//! names against the same rules the matchers assume.

use crate::error::{Error, Result};

/// Whitespace the scanners skip: space and tab.
pub const fn is_space(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Comment openers: `;` and `#`.
pub const fn is_comment(byte: u8) -> bool {
    byte == b';' || byte == b'#'
}

fn skip_space(line: &[u8], mut pos: usize) -> usize {
    while pos < line.len() && is_space(line[pos]) {
        pos += 1;
    }
    pos
}

/// Whether the line's first significant byte opens a section header.
pub fn is_section_header(line: &[u8]) -> bool {
    let pos = skip_space(line, 0);
    pos < line.len() && line[pos] == b'['
}

/// Whether the line is empty or whitespace only.
pub fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&b| is_space(b))
}

/// Match `line` against the header of `section`.
///
/// Leading whitespace before `[` is allowed; everything between the
/// brackets is the name, compared case-insensitively with no trimming.
/// Returns the offset just past `]`.
pub fn match_section(line: &[u8], section: &[u8]) -> Option<usize> {
    let mut pos = skip_space(line, 0);
    if pos >= line.len() || line[pos] != b'[' {
        return None;
    }
    pos += 1;

    let end = pos + section.len();
    if end >= line.len() || !line[pos..end].eq_ignore_ascii_case(section) {
        return None;
    }
    (line[end] == b']').then_some(end + 1)
}

/// Match `line` against a key line for `key`.
///
/// Leading whitespace before the key is allowed; between the key and the
/// separator only whitespace is tolerated. Returns the offset just past
/// the `=`/`:` separator.
pub fn match_key(line: &[u8], key: &[u8]) -> Option<usize> {
    let start = skip_space(line, 0);

    let end = start + key.len();
    if end > line.len() || !line[start..end].eq_ignore_ascii_case(key) {
        return None;
    }

    let pos = skip_space(line, end);
    if pos < line.len() && (line[pos] == b'=' || line[pos] == b':') {
        Some(pos + 1)
    } else {
        None
    }
}

/// Split an arbitrary key line into its key name and raw value text.
///
/// Returns `None` for blank, comment, header, and junk lines (no separator
/// or empty key). The key is right-trimmed; the raw value starts just past
/// the separator, undecoded.
pub fn split_key_line(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let start = skip_space(line, 0);
    if start >= line.len() {
        return None;
    }
    let first = line[start];
    if first == b'[' || is_comment(first) {
        return None;
    }

    let mut pos = start;
    while pos < line.len() && line[pos] != b'=' && line[pos] != b':' {
        pos += 1;
    }
    if pos >= line.len() {
        return None;
    }

    let mut end = pos;
    while end > start && is_space(line[end - 1]) {
        end -= 1;
    }
    if end == start {
        return None;
    }
    Some((&line[start..end], &line[pos + 1..]))
}

/// Validate a caller-supplied section name.
pub fn check_section(section: &str) -> Result<()> {
    if section.is_empty() {
        return Err(Error::InvalidArgument("section name is empty"));
    }
    if section.contains(']') {
        return Err(Error::BadValue(format!(
            "section name {section:?} contains ']'"
        )));
    }
    if section.contains('\n') || section.contains('\r') {
        return Err(Error::BadValue(format!(
            "section name {section:?} contains a line break"
        )));
    }
    Ok(())
}

/// Validate a caller-supplied key name.
pub fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("key name is empty"));
    }
    let first = key.as_bytes()[0];
    if is_space(first) || is_comment(first) || first == b'[' {
        return Err(Error::BadValue(format!(
            "key name {key:?} starts with a reserved character"
        )));
    }
    if key.contains('=') || key.contains(':') {
        return Err(Error::BadValue(format!(
            "key name {key:?} contains a separator"
        )));
    }
    if key.contains('\n') || key.contains('\r') {
        return Err(Error::BadValue(format!(
            "key name {key:?} contains a line break"
        )));
    }
    Ok(())
}

/// Validate a caller-supplied value: one line only.
pub fn check_value(value: &str) -> Result<()> {
    if value.contains('\n') || value.contains('\r') {
        return Err(Error::BadValue("value contains a line break".to_string()));
    }
    Ok(())
}

/// Validate a caller-supplied comment: one line only.
pub fn check_comment(comment: &str) -> Result<()> {
    if comment.contains('\n') || comment.contains('\r') {
        return Err(Error::BadValue(
            "comment contains a line break".to_string(),
        ));
    }
    Ok(())
}
