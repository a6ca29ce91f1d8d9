// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Immutable source text with precomputed line starts.
//!
//! A [`SourceBuffer`] owns the bytes of one file together with the path (or
//! any other identifier) it was loaded from. Construction scans the text once
//! and records the offset at which every line begins, so line and column
//! queries are a binary search rather than a rescan.
//!
//! Offsets are byte offsets. Columns are byte columns, 1-based.
//!
//! ```
//! use wrenlet_core::source_analysis::SourceBuffer;
//!
//! let source = SourceBuffer::new("main.wren", "var a = 1\nvar b = 2");
//! assert_eq!(source.line_at(10), 2);
//! assert_eq!(source.column_at(14), 5);
//! assert_eq!(source.substring(14, 1), "b");
//! ```

use std::borrow::Cow;
use std::fmt;

use ecow::EcoString;

/// The text of one source file.
///
/// Passing an offset outside `0..=length()` to any query is a caller error
/// and panics.
pub struct SourceBuffer {
    id: EcoString,
    text: Vec<u8>,
    /// Offset of the first byte of every line. Always starts with `0`.
    line_starts: Vec<usize>,
}

impl fmt::Debug for SourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceBuffer")
            .field("id", &self.id)
            .field("length", &self.text.len())
            .field("lines", &self.line_starts.len())
            .finish_non_exhaustive()
    }
}

impl SourceBuffer {
    /// Creates a buffer for `text`, identified by `id` in diagnostics.
    #[must_use]
    pub fn new(id: impl Into<EcoString>, text: impl Into<Vec<u8>>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(
                text.iter()
                    .enumerate()
                    .filter(|&(_, &c)| c == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self {
            id: id.into(),
            text,
            line_starts,
        }
    }

    /// The identifier (usually a path) this buffer was created with.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw bytes of the source.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.text
    }

    /// The source as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// The byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= length()`.
    #[must_use]
    pub fn index(&self, offset: usize) -> u8 {
        assert!(
            offset < self.text.len(),
            "offset {offset} out of range for source of length {}",
            self.text.len()
        );
        self.text[offset]
    }

    /// Number of bytes in the source.
    #[must_use]
    pub fn length(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines. An empty source has one (empty) line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The 1-based line containing `offset`.
    ///
    /// `offset == length()` is valid and names the end-of-file position.
    ///
    /// # Panics
    ///
    /// Panics if `offset > length()`.
    #[must_use]
    pub fn line_at(&self, offset: usize) -> usize {
        self.check_offset(offset);
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// The 1-based byte column of `offset` within its line.
    ///
    /// # Panics
    ///
    /// Panics if `offset > length()`.
    #[must_use]
    pub fn column_at(&self, offset: usize) -> usize {
        offset - self.line_start(self.line_at(offset)) + 1
    }

    /// Offset of the first byte of the 1-based `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is `0` or greater than [`line_count`](Self::line_count).
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        assert!(
            (1..=self.line_count()).contains(&line),
            "line {line} out of range (source has {} lines)",
            self.line_count()
        );
        self.line_starts[line - 1]
    }

    /// The offset named by a 1-based line and column; inverse of
    /// [`line_at`](Self::line_at) and [`column_at`](Self::column_at).
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the source.
    #[must_use]
    pub fn offset_at(&self, line: usize, column: usize) -> usize {
        assert!(column >= 1, "columns are 1-based");
        let offset = self.line_start(line) + column - 1;
        self.check_offset(offset);
        offset
    }

    /// The text of the 1-based `line`, without its line feed.
    ///
    /// # Panics
    ///
    /// Panics if `line` is out of range.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Cow<'_, str> {
        let start = self.line_start(line);
        let end = self
            .line_starts
            .get(line)
            .map_or(self.text.len(), |&next| next - 1);
        String::from_utf8_lossy(&self.text[start..end])
    }

    /// The `length` bytes starting at `start`, as text.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the source.
    #[must_use]
    pub fn substring(&self, start: usize, length: usize) -> Cow<'_, str> {
        let end = start
            .checked_add(length)
            .filter(|&end| end <= self.text.len());
        let Some(end) = end else {
            panic!(
                "range {start}+{length} out of range for source of length {}",
                self.text.len()
            );
        };
        String::from_utf8_lossy(&self.text[start..end])
    }

    fn check_offset(&self, offset: usize) {
        assert!(
            offset <= self.text.len(),
            "offset {offset} out of range for source of length {}",
            self.text.len()
        );
    }
}
