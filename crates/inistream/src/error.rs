//! Error types and the signed status-code plane.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for INI operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or rewriting an INI file.
///
/// Every variant projects onto the signed status plane of the classic C
/// API via [`Error::code`]; [`error_string`] renders those codes back into
/// human-readable text.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required argument was empty or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An argument contains bytes the INI format cannot carry on one line.
    #[error("bad value: {0}")]
    BadValue(String),

    /// The requested section does not exist in the file.
    #[error("section not found: [{0}]")]
    SectionNotFound(String),

    /// The requested key does not exist within its section.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Bounded mode: a line exceeded the configured capacity.
    #[error("line exceeds the configured capacity of {capacity} bytes")]
    LineTooLong {
        /// Configured per-line capacity in bytes.
        capacity: usize,
    },

    /// Every candidate temp file name already existed on disk.
    #[error("temp file already exists: {path}")]
    TempFileExists {
        /// Last candidate path tried.
        path: PathBuf,
    },
}

impl Error {
    /// Project this error onto the classic signed status plane.
    ///
    /// OS-level failures map below [`status::OS_ERROR_OFFSET`] so the
    /// original errno survives the round trip through [`error_string`].
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Io(err) => err
                .raw_os_error()
                .map_or(status::ERR, |errno| -(errno + status::OS_ERROR_OFFSET)),
            Self::InvalidArgument(_) => status::NULL_ARG,
            Self::BadValue(_) => status::BAD_VALUE,
            Self::SectionNotFound(_) | Self::KeyNotFound(_) => status::NOT_FOUND,
            Self::LineTooLong { .. } => status::BUFFER_FULL,
            Self::TempFileExists { .. } => status::TEMP_FILE_EXISTS,
        }
    }
}

/// Status codes of the classic C API.
///
/// Negative values are failures; `0` and above is success. Codes at or
/// below `-OS_ERROR_OFFSET` carry an OS errno: `code = -(errno + 1000)`.
pub mod status {
    /// Success.
    pub const OK: i32 = 0;
    /// Unspecified failure.
    pub const ERR: i32 = -1;
    /// Required argument missing or empty.
    pub const NULL_ARG: i32 = -2;
    /// Argument carries bytes the format cannot represent.
    pub const BAD_VALUE: i32 = -3;
    /// Scan hit end of file: section or key not found.
    pub const NOT_FOUND: i32 = -4;
    /// Line does not fit the configured capacity.
    pub const BUFFER_FULL: i32 = -5;
    /// Output formatting failed.
    pub const FORMAT: i32 = -6;
    /// Temp file name collision on every attempt.
    pub const TEMP_FILE_EXISTS: i32 = -7;
    /// OS errno `e` is reported as `-(e + OS_ERROR_OFFSET)`.
    pub const OS_ERROR_OFFSET: i32 = 1000;
}

/// Render a status code as human-readable text.
///
/// | Code | Text |
/// |------|------|
/// | `>= 0` | `No Error` |
/// | `-1` | `Operation Failed` |
/// | `-2` | `Invalid Argument` |
/// | `-3` | `Bad Value` |
/// | `-4` | `End of File` |
/// | `-5` | `Buffer Full` |
/// | `-6` | `Format Error` |
/// | `-7` | `Temp File Exists` |
/// | `<= -1000` | OS error message for errno `-code - 1000` |
/// | other | `Unknown Error` |
#[must_use]
pub fn error_string(code: i32) -> String {
    if code >= status::OK {
        return "No Error".to_string();
    }
    if code <= -status::OS_ERROR_OFFSET {
        return io::Error::from_raw_os_error(-code - status::OS_ERROR_OFFSET).to_string();
    }
    match code {
        status::ERR => "Operation Failed",
        status::NULL_ARG => "Invalid Argument",
        status::BAD_VALUE => "Bad Value",
        status::NOT_FOUND => "End of File",
        status::BUFFER_FULL => "Buffer Full",
        status::FORMAT => "Format Error",
        status::TEMP_FILE_EXISTS => "Temp File Exists",
        _ => "Unknown Error",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_the_classic_plane() {
        assert_eq!(Error::InvalidArgument("section").code(), status::NULL_ARG);
        assert_eq!(Error::BadValue("key".to_string()).code(), status::BAD_VALUE);
        assert_eq!(
            Error::SectionNotFound("net".to_string()).code(),
            status::NOT_FOUND
        );
        assert_eq!(Error::KeyNotFound("port".to_string()).code(), status::NOT_FOUND);
        assert_eq!(Error::LineTooLong { capacity: 256 }.code(), status::BUFFER_FULL);
        assert_eq!(
            Error::TempFileExists {
                path: PathBuf::from("/tmp/x")
            }
            .code(),
            status::TEMP_FILE_EXISTS
        );
    }

    #[test]
    fn test_io_errors_carry_their_errno() {
        let err = Error::from(io::Error::from_raw_os_error(2));
        assert_eq!(err.code(), -1002);

        // Synthetic errors without an errno fall back to the generic code.
        let err = Error::from(io::Error::other("boom"));
        assert_eq!(err.code(), status::ERR);
    }

    #[test]
    fn test_error_string_covers_the_named_codes() {
        assert_eq!(error_string(0), "No Error");
        assert_eq!(error_string(7), "No Error");
        assert_eq!(error_string(-1), "Operation Failed");
        assert_eq!(error_string(-2), "Invalid Argument");
        assert_eq!(error_string(-3), "Bad Value");
        assert_eq!(error_string(-4), "End of File");
        assert_eq!(error_string(-5), "Buffer Full");
        assert_eq!(error_string(-6), "Format Error");
        assert_eq!(error_string(-7), "Temp File Exists");
    }

    #[test]
    fn test_error_string_is_total() {
        assert_eq!(error_string(-8), "Unknown Error");
        assert_eq!(error_string(-999), "Unknown Error");
    }

    #[test]
    fn test_os_plane_renders_the_errno_message() {
        let expected = io::Error::from_raw_os_error(2).to_string();
        assert_eq!(error_string(-1002), expected);
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::SectionNotFound("protocol".to_string());
        assert_eq!(err.to_string(), "section not found: [protocol]");

        let err = Error::LineTooLong { capacity: 64 };
        assert!(err.to_string().contains("64"));
    }
}
