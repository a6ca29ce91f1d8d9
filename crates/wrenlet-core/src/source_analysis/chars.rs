// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Byte classification used by the lexer.
//!
//! Source text is scanned one byte at a time. Names, numbers and
//! punctuation are all ASCII, so these predicates only ever answer `true`
//! for ASCII bytes; everything else falls through to an error token or is
//! carried verbatim inside strings and comments.

/// Returns `true` for `a-z`, `A-Z` and `_`.
#[must_use]
pub const fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Returns `true` for `0-9`.
#[must_use]
pub const fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Returns `true` for bytes that may continue a name.
#[must_use]
pub const fn is_alphanumeric(c: u8) -> bool {
    is_alpha(c) || is_digit(c)
}

/// Returns `true` for `0-9`, `a-f` and `A-F`.
#[must_use]
pub const fn is_hex_digit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

/// Returns `true` for whitespace that never produces a token.
///
/// Line feeds are significant and are not included.
#[must_use]
pub const fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r')
}

/// Returns `true` for UTF-8 continuation bytes (`10xxxxxx`).
#[must_use]
pub const fn is_continuation(c: u8) -> bool {
    c & 0b1100_0000 == 0b1000_0000
}

/// Number of bytes in the UTF-8 sequence introduced by `lead`.
///
/// Invalid lead bytes count as a single byte.
#[must_use]
pub const fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
