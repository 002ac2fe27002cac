//! Rewrite engine: stream the file into a sibling temp file, splice in the
//! updated or inserted key line, swap the temp file into place.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::VERSION;
use crate::error::{Error, Result};
use crate::line::{LineReader, LineWriter};
use crate::options::IniOptions;
use crate::scan::{
    check_comment, check_key, check_section, check_value, is_blank, is_section_header, match_key,
    match_section,
};
use crate::swap::TempFile;

pub(crate) fn write_key_impl(
    path: &Path,
    section: &str,
    key: &str,
    value: &str,
    comment: Option<&str>,
    options: IniOptions,
) -> Result<()> {
    check_section(section)?;
    check_key(key)?;
    check_value(value)?;
    if let Some(comment) = comment {
        check_comment(comment)?;
    }

    let source = match File::open(path) {
        Ok(file) => Some(file),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(err.into()),
    };

    let (temp, file) = TempFile::sibling_of(path)?;
    let mut out = LineWriter::new(BufWriter::new(&file), options.line_limit);
    match source {
        None => {
            debug!("Creating {} with [{section}] {key}", path.display());
            create_fresh(&mut out, section, key, value, comment)?;
        }
        Some(existing) => {
            let mut reader = LineReader::new(BufReader::new(existing), options.line_limit);
            update_existing(
                &mut reader,
                &mut out,
                section,
                key,
                value,
                comment,
                options.line_limit,
            )?;
        }
    }
    out.flush()?;
    drop(out);

    file.sync_all()?;
    drop(file);
    temp.persist(path)?;
    debug!("Swapped rewritten {} into place", path.display());
    Ok(())
}

/// Copy lines from `reader` into `out`, replacing the target key line or
/// inserting a new one where it belongs.
fn update_existing<R: BufRead, W: Write>(
    reader: &mut LineReader<R>,
    out: &mut LineWriter<W>,
    section: &str,
    key: &str,
    value: &str,
    comment: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    // Seek the section, copying every line through, the matched header
    // included.
    let mut in_section = false;
    while reader.advance()? {
        refuse_truncated(reader, limit)?;
        let line = reader.line();
        let hit = match_section(line, section.as_bytes()).is_some();
        out.write_raw(line)?;
        if hit {
            in_section = true;
            break;
        }
    }
    if !in_section {
        debug!("Section [{section}] not found, appending it");
        out.write_line("")?;
        out.write_line(&format!("[{section}]"))?;
        write_value(out, key, value, comment)?;
        return Ok(());
    }

    // Seek the key inside the section. Blank lines are held back until the
    // next content line resolves where they belong, so an inserted key
    // lands with its section rather than after the gap before the next
    // header.
    let mut held_blanks: Vec<Vec<u8>> = Vec::new();
    loop {
        if !reader.advance()? {
            debug!("Key '{key}' not found in [{section}], appending it");
            write_value(out, key, value, comment)?;
            for blank in &held_blanks {
                out.write_raw(blank)?;
            }
            return Ok(());
        }
        refuse_truncated(reader, limit)?;
        let line = reader.line();
        if is_blank(line) {
            held_blanks.push(line.to_vec());
            continue;
        }
        if is_section_header(line) {
            debug!("Key '{key}' not found in [{section}], inserting before the next section");
            write_value(out, key, value, comment)?;
            for blank in &held_blanks {
                out.write_raw(blank)?;
            }
            out.write_raw(line)?;
            break;
        }
        if match_key(line, key.as_bytes()).is_some() {
            debug!("Updating '{key}' in [{section}] in place");
            for blank in &held_blanks {
                out.write_raw(blank)?;
            }
            write_value(out, key, value, None)?;
            break;
        }
        for blank in held_blanks.drain(..) {
            out.write_raw(&blank)?;
        }
        out.write_raw(line)?;
    }

    // Copy the remainder through untouched.
    while reader.advance()? {
        refuse_truncated(reader, limit)?;
        out.write_raw(reader.line())?;
    }
    Ok(())
}

/// The copy-through path never truncates: an overlong source line in
/// bounded mode aborts the rewrite before the swap.
fn refuse_truncated<R: BufRead>(reader: &LineReader<R>, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(capacity) if reader.truncated() => Err(Error::LineTooLong { capacity }),
        _ => Ok(()),
    }
}

/// Emit a key line, preceded by its comment block when one is supplied.
fn write_value<W: Write>(
    out: &mut LineWriter<W>,
    key: &str,
    value: &str,
    comment: Option<&str>,
) -> io::Result<()> {
    if let Some(comment) = comment {
        out.write_line("")?;
        out.write_line(&format!("# {comment}"))?;
    }
    out.write_line(&format!("{key} = {value}"))
}

/// Write the generated header block, the section header, and the first key
/// of a brand-new file.
fn create_fresh<W: Write>(
    out: &mut LineWriter<W>,
    section: &str,
    key: &str,
    value: &str,
    comment: Option<&str>,
) -> io::Result<()> {
    out.write_line(&format!(
        "# Auto-generated configuration file (inistream {VERSION})."
    ))?;
    out.write_line("# Edit with any text editor; comments start with ';' or '#'.")?;
    out.write_line("# Unquoted values are trimmed and cut at inline comments.")?;
    out.write_line("# Quoted values (\"...\") keep whitespace and support the")?;
    out.write_line("# escapes \\\\ \\\" \\n \\r \\t. Names are case-insensitive.")?;
    out.write_line("")?;
    out.write_line(&format!("[{section}]"))?;
    write_value(out, key, value, comment)
}
