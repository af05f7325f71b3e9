//! Source positions attached to reader forms.

use std::fmt;

/// Where a form starts in the source: 1-indexed line and column.
///
/// Errors raised by the resolver report the position of the offending form.
/// [`Span::default`] is the unknown position used by synthesized nodes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub line: u32,
    pub col: u32,
}

impl Span {
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Whether this is the unknown position.
    pub fn is_unknown(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("?")
        } else {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}
