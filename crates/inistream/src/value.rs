//! Value lexer: decodes the raw text after a key's separator.

use crate::scan::{is_comment, is_space};

/// Decode a raw value into its content bytes.
///
/// `raw` is everything after the `=`/`:` separator. Leading whitespace is
/// skipped; what follows selects the form:
///
/// - **Quoted** (`"..."`): bytes up to the closing quote, with `\\`, `\"`,
///   `\n`, `\r`, `\t` decoded. An unknown escape passes through as its two
///   original bytes, a lone trailing backslash is dropped, and a missing
///   closing quote ends the value at end of input without error.
/// - **Unquoted**: bytes up to the first `;` or `#` or end of input.
///   Trailing whitespace before the cut point is trimmed; interior
///   whitespace is kept byte for byte.
///
/// With `limit = Some(n)` the output is capped at `n - 1` bytes and decoding
/// stops once the cap is reached.
pub fn decode_value(raw: &[u8], limit: Option<usize>) -> Vec<u8> {
    let max = limit.map(|n| n.saturating_sub(1));
    let room = |out: &Vec<u8>| max.is_none_or(|m| out.len() < m);
    let mut out = Vec::new();

    let mut pos = 0;
    while pos < raw.len() && is_space(raw[pos]) {
        pos += 1;
    }

    if pos < raw.len() && raw[pos] == b'"' {
        pos += 1;
        while pos < raw.len() && room(&out) {
            match raw[pos] {
                b'\\' => {
                    pos += 1;
                    if pos >= raw.len() {
                        break;
                    }
                    match raw[pos] {
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        b'\\' => out.push(b'\\'),
                        b'"' => out.push(b'"'),
                        other => {
                            out.push(b'\\');
                            if room(&out) {
                                out.push(other);
                            }
                        }
                    }
                }
                b'"' => break,
                byte => out.push(byte),
            }
            pos += 1;
        }
    } else {
        // Whitespace is held back until a content byte proves it interior,
        // which trims a trailing run for free.
        let mut run_start = pos;
        let mut in_run = false;
        while pos < raw.len() && !is_comment(raw[pos]) && room(&out) {
            if is_space(raw[pos]) {
                if !in_run {
                    run_start = pos;
                    in_run = true;
                }
            } else {
                if in_run {
                    while run_start < pos && room(&out) {
                        out.push(raw[run_start]);
                        run_start += 1;
                    }
                    in_run = false;
                }
                if room(&out) {
                    out.push(raw[pos]);
                }
            }
            pos += 1;
        }
    }

    out
}
