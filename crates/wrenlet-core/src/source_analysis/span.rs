// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Byte ranges into a [`SourceBuffer`](super::SourceBuffer).

use std::ops::Range;

/// A half-open byte range `start..start + len`.
///
/// Tokens, lexical errors and diagnostics all describe their location with a
/// `Span`; it converts directly into a [`miette::SourceSpan`] for reporting.
///
/// # Examples
///
/// ```
/// use wrenlet_core::source_analysis::Span;
///
/// let span = Span::new(4, 3);
/// assert_eq!(span.end(), 7);
/// assert_eq!(span.as_range(), 4..7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    len: usize,
}

impl Span {
    /// Creates a span of `len` bytes beginning at `start`.
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Creates a span from a start and an exclusive end offset.
    #[must_use]
    pub const fn between(start: usize, end: usize) -> Self {
        assert!(start <= end, "span end precedes its start");
        Self::new(start, end - start)
    }

    /// An empty span at `offset`.
    #[must_use]
    pub const fn empty(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `offset` lies inside the span.
    #[must_use]
    pub const fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self::between(self.start.min(other.start), self.end().max(other.end()))
    }

    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start..self.end()
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::between(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len).into()
    }
}
