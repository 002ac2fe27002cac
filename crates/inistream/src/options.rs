//! Options controlling how lines are read and rewritten.

/// Per-line capacity of the classic C implementation, in bytes.
///
/// Line content is limited to one byte less than the capacity. Pass this to
/// [`IniOptions::with_line_limit`] to reproduce the historical behavior;
/// the default is unbounded.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// Options for reading and rewriting INI files.
///
/// The default configuration grows line buffers as needed. An explicit
/// line limit restores the bounded behavior of the classic implementation:
/// reads truncate overlong lines to `limit - 1` content bytes, and rewrites
/// refuse to copy an overlong line through (see
/// [`Error::LineTooLong`](crate::Error::LineTooLong)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IniOptions {
    /// Per-line capacity in bytes, or `None` for unbounded lines.
    pub line_limit: Option<usize>,
}

impl IniOptions {
    /// Create options with unbounded line handling.
    #[must_use]
    pub const fn new() -> Self {
        Self { line_limit: None }
    }

    /// Bound every line to `limit` bytes (content to `limit - 1`).
    #[must_use]
    pub const fn with_line_limit(mut self, limit: usize) -> Self {
        self.line_limit = Some(limit);
        self
    }

    /// Remove the per-line bound.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.line_limit = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(IniOptions::default().line_limit, None);
        assert_eq!(IniOptions::new(), IniOptions::default());
    }

    #[test]
    fn test_builder_sets_and_clears_the_limit() {
        let options = IniOptions::new().with_line_limit(DEFAULT_LINE_CAPACITY);
        assert_eq!(options.line_limit, Some(256));
        assert_eq!(options.unbounded().line_limit, None);
    }
}
