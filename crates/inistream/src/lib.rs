//! Streaming reader and crash-safe rewriter for INI-style configuration
//! files.
//!
//! The engine never builds a document model. Reads scan the file one line at
//! a time until the requested `[section]` and `key` match, decode that one
//! value, and stop. Writes stream the file into a sibling temp file, splice
//! in the updated or inserted key line, fsync, and atomically rename the
//! temp file over the original. Memory stays flat at one line regardless of
//! file size, and no reader ever observes a half-written file.
//!
//! # Format
//!
//! - `[section]` headers group the `key = value` (or `key : value`) lines
//!   that follow them, up to the next header.
//! - Section and key names match ASCII case-insensitively.
//! - Comments start with `;` or `#` and run to end of line. An unquoted
//!   value ends at an inline comment; inside quotes the comment characters
//!   are literal text.
//! - Quoted values (`"..."`) keep their whitespace and decode the escapes
//!   `\\`, `\"`, `\n`, `\r`, `\t`. Unquoted values lose leading and trailing
//!   whitespace.
//!
//! # Example
//!
//! ```
//! use inistream::{read_key, write_key};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("app.ini");
//!
//! // Creates the file, the section, and the key in one call.
//! write_key(&path, "network", "port", "8080", Some("listen port"))?;
//! // A second write to the same key updates it in place.
//! write_key(&path, "network", "port", "9090", None)?;
//!
//! assert_eq!(read_key(&path, "network", "port")?, "9090");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Concurrency
//!
//! The atomic rename protects concurrent readers: they see the target file
//! fully old or fully new, never a mix. Writers are not serialized against
//! each other; when two writers race on one path the last rename wins and
//! the other update is silently lost. Callers that need write serialization
//! must add their own locking.

#![warn(missing_docs)]

use std::path::{Path, PathBuf};

mod error;
mod line;
mod options;
mod reader;
mod scan;
mod swap;
mod value;
mod writer;

pub use error::{Error, Result, error_string, status};
pub use options::{DEFAULT_LINE_CAPACITY, IniOptions};
pub use reader::SectionEntries;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const fn decimal(text: &str) -> u32 {
    let bytes = text.as_bytes();
    let mut value = 0;
    let mut i = 0;
    while i < bytes.len() {
        value = value * 10 + (bytes[i] - b'0') as u32;
        i += 1;
    }
    value
}

/// Crate version encoded as `MAJOR * 1_000_000 + MINOR * 10_000 + PATCH`.
///
/// Version `1.2.3` encodes as `1_020_003`. Evaluated at compile time from
/// the crate manifest.
#[must_use]
pub const fn version() -> u32 {
    decimal(env!("CARGO_PKG_VERSION_MAJOR")) * 1_000_000
        + decimal(env!("CARGO_PKG_VERSION_MINOR")) * 10_000
        + decimal(env!("CARGO_PKG_VERSION_PATCH"))
}

/// Read the value of `key` in `[section]` from the file at `path`.
///
/// The value is decoded per the format rules and returned with non-UTF-8
/// bytes replaced. A missing section or key is [`Error::SectionNotFound`] /
/// [`Error::KeyNotFound`]; a missing or unreadable file is [`Error::Io`].
///
/// ```
/// use inistream::{read_key, write_key};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("app.ini");
/// write_key(&path, "paths", "log", r#""C:\\logs\\app.log""#, None)?;
///
/// assert_eq!(read_key(&path, "Paths", "LOG")?, r"C:\logs\app.log");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_key(path: impl AsRef<Path>, section: &str, key: &str) -> Result<String> {
    reader::read_key_impl(path.as_ref(), section, key, IniOptions::new())
}

/// Read the value of `key` in `[section]` into a caller-supplied buffer.
///
/// At most `buf.len() - 1` value bytes are decoded into the front of `buf`;
/// the byte count is returned. A value longer than that is silently cut
/// short, so an 11-byte value read through an 8-byte buffer yields 7 bytes.
/// On any error `buf` is left untouched.
///
/// ```
/// use inistream::{read_key_into, write_key};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("app.ini");
/// write_key(&path, "net", "host", "example.net", None)?;
///
/// let mut buf = [0u8; 8];
/// let n = read_key_into(&path, "net", "host", &mut buf)?;
/// assert_eq!(&buf[..n], b"example");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_key_into(
    path: impl AsRef<Path>,
    section: &str,
    key: &str,
    buf: &mut [u8],
) -> Result<usize> {
    reader::read_key_into_impl(path.as_ref(), section, key, buf, IniOptions::new())
}

/// Set `key` in `[section]` to `value`, creating the file, the section, or
/// the key as needed.
///
/// The whole file is streamed through a temp file in the target's directory
/// and swapped into place by an atomic rename; unrelated lines are copied
/// through unchanged. An existing key is updated in place. A key that does
/// not yet exist is inserted at the end of its section, and `comment` (when
/// supplied) is written as a `# comment` line above it. Updates never touch
/// the comment.
///
/// `value` is written verbatim: pass the surrounding `"` quotes yourself
/// when the value needs them (leading/trailing whitespace, `;`/`#`, or
/// escape sequences).
pub fn write_key(
    path: impl AsRef<Path>,
    section: &str,
    key: &str,
    value: &str,
    comment: Option<&str>,
) -> Result<()> {
    writer::write_key_impl(path.as_ref(), section, key, value, comment, IniOptions::new())
}

/// Iterate the key/value pairs of `[section]` in file order.
///
/// The section is located eagerly, so a missing section fails here rather
/// than on the first iteration step. Blank, comment, and junk lines are
/// skipped; iteration ends at the next section header or end of file.
///
/// ```
/// use inistream::{section_entries, write_key};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("app.ini");
/// write_key(&path, "limits", "open_files", "1024", None)?;
/// write_key(&path, "limits", "max_body", "65536", None)?;
///
/// let pairs = section_entries(&path, "limits")?.collect::<inistream::Result<Vec<_>>>()?;
/// assert_eq!(pairs[0], ("open_files".to_string(), "1024".to_string()));
/// assert_eq!(pairs[1], ("max_body".to_string(), "65536".to_string()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn section_entries(path: impl AsRef<Path>, section: &str) -> Result<SectionEntries> {
    SectionEntries::open(path.as_ref(), section, IniOptions::new())
}

/// A path bound to a set of [`IniOptions`], for repeated operations on one
/// file.
///
/// The handle holds no file descriptor and caches nothing: every method
/// opens, scans, and closes the file on its own, exactly like the free
/// functions. It exists so bounded-line mode does not have to be threaded
/// through every call site.
///
/// ```
/// use inistream::{IniFile, IniOptions, DEFAULT_LINE_CAPACITY};
///
/// let dir = tempfile::tempdir()?;
/// let file = IniFile::with_options(
///     dir.path().join("bounded.ini"),
///     IniOptions::new().with_line_limit(DEFAULT_LINE_CAPACITY),
/// );
///
/// file.write("server", "workers", "4", None)?;
/// assert_eq!(file.read("server", "workers")?, "4");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct IniFile {
    path: PathBuf,
    options: IniOptions,
}

impl IniFile {
    /// Bind `path` with the default options (unbounded lines).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: IniOptions::new(),
        }
    }

    /// Bind `path` with explicit options.
    pub fn with_options(path: impl Into<PathBuf>, options: IniOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// The file path this handle operates on.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The options every operation of this handle uses.
    #[must_use]
    pub const fn options(&self) -> IniOptions {
        self.options
    }

    /// Read the value of `key` in `[section]`. See [`read_key`].
    pub fn read(&self, section: &str, key: &str) -> Result<String> {
        reader::read_key_impl(&self.path, section, key, self.options)
    }

    /// Read the value of `key` in `[section]` into `buf`. See
    /// [`read_key_into`].
    pub fn read_into(&self, section: &str, key: &str, buf: &mut [u8]) -> Result<usize> {
        reader::read_key_into_impl(&self.path, section, key, buf, self.options)
    }

    /// Set `key` in `[section]` to `value`. See [`write_key`].
    pub fn write(
        &self,
        section: &str,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<()> {
        writer::write_key_impl(&self.path, section, key, value, comment, self.options)
    }

    /// Iterate the key/value pairs of `[section]`. See [`section_entries`].
    pub fn entries(&self, section: &str) -> Result<SectionEntries> {
        SectionEntries::open(&self.path, section, self.options)
    }
}
