//! Read path: locate a section and key in a streaming pass, decode the
//! value.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::line::LineReader;
use crate::options::IniOptions;
use crate::scan::{
    check_key, check_section, is_section_header, match_key, match_section, split_key_line,
};
use crate::value::decode_value;

/// Locate `[section]` then `key`, decode the raw value with an optional
/// output bound.
fn locate_value(
    path: &Path,
    section: &str,
    key: &str,
    options: IniOptions,
    limit: Option<usize>,
) -> Result<Vec<u8>> {
    check_section(section)?;
    check_key(key)?;

    let file = File::open(path)?;
    let mut reader = LineReader::new(BufReader::new(file), options.line_limit);

    seek_section(&mut reader, section)?;
    let offset = seek_key(&mut reader, key)?;
    let value = decode_value(&reader.line()[offset..], limit);
    debug!("Read '{key}' from [{section}]: {} bytes", value.len());
    Ok(value)
}

/// Advance the reader until the header of `section` matches.
fn seek_section<R: BufRead>(reader: &mut LineReader<R>, section: &str) -> Result<()> {
    while reader.advance()? {
        if match_section(reader.line(), section.as_bytes()).is_some() {
            trace!("Matched section [{section}]");
            return Ok(());
        }
    }
    Err(Error::SectionNotFound(section.to_string()))
}

/// Advance the reader until a key line for `key` matches, stopping at the
/// next section header. On success the reader's current line is the matched
/// key line and the returned offset points just past the separator.
fn seek_key<R: BufRead>(reader: &mut LineReader<R>, key: &str) -> Result<usize> {
    while reader.advance()? {
        let line = reader.line();
        if is_section_header(line) {
            break;
        }
        if let Some(offset) = match_key(line, key.as_bytes()) {
            trace!("Matched key '{key}'");
            return Ok(offset);
        }
    }
    Err(Error::KeyNotFound(key.to_string()))
}

pub(crate) fn read_key_impl(
    path: &Path,
    section: &str,
    key: &str,
    options: IniOptions,
) -> Result<String> {
    let value = locate_value(path, section, key, options, None)?;
    Ok(String::from_utf8_lossy(&value).into_owned())
}

pub(crate) fn read_key_into_impl(
    path: &Path,
    section: &str,
    key: &str,
    buf: &mut [u8],
    options: IniOptions,
) -> Result<usize> {
    if buf.is_empty() {
        return Err(Error::InvalidArgument("output buffer is empty"));
    }
    let value = locate_value(path, section, key, options, Some(buf.len()))?;
    buf[..value.len()].copy_from_slice(&value);
    Ok(value.len())
}

/// Lazy iterator over the key/value pairs of one section.
///
/// Returned by [`section_entries`](crate::section_entries) and
/// [`IniFile::entries`](crate::IniFile::entries). The section locate runs
/// eagerly in the constructor, so a missing section surfaces there rather
/// than on the first `next` call. Iteration yields decoded values in file
/// order, skips blank, comment, and junk lines, and stops at the next
/// section header or end of file.
#[derive(Debug)]
pub struct SectionEntries {
    reader: LineReader<BufReader<File>>,
    done: bool,
}

impl SectionEntries {
    pub(crate) fn open(path: &Path, section: &str, options: IniOptions) -> Result<Self> {
        check_section(section)?;

        let file = File::open(path)?;
        let mut reader = LineReader::new(BufReader::new(file), options.line_limit);
        seek_section(&mut reader, section)?;
        Ok(Self {
            reader,
            done: false,
        })
    }
}

impl Iterator for SectionEntries {
    type Item = Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.reader.advance() {
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
                Ok(false) => break,
                Ok(true) => {}
            }
            let line = self.reader.line();
            if is_section_header(line) {
                break;
            }
            if let Some((key, raw)) = split_key_line(line) {
                let key = String::from_utf8_lossy(key).into_owned();
                let value = String::from_utf8_lossy(&decode_value(raw, None)).into_owned();
                return Some(Ok((key, value)));
            }
        }
        self.done = true;
        None
    }
}
