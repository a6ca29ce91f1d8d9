// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for wrenlet source code.
//!
//! The lexer is pull-based: [`Lexer::read_token`] scans exactly one token
//! each time it is called, so the parser drives it with one token of
//! lookahead and no token vector is ever built.
//!
//! # Rules
//!
//! After skipping blanks and comments, the first rule that matches the next
//! byte owns it:
//!
//! 1. end of input gives `eof`, repeatedly
//! 2. inside a string interpolation, `(` and `)` adjust the open paren depth;
//!    the `)` that balances the `%(` resumes the string instead of producing
//!    a `)` token
//! 3. punctuators, longest match first (`.` `..` `...`, `<` `<<` `<=`, ...);
//!    a line feed is a `line` token
//! 4. `_name` and `__name` are fields and static fields
//! 5. `"` starts a string; `%(` inside it opens an interpolation
//! 6. `0x` hex numbers, then decimal digit runs
//! 7. names and keywords
//! 8. anything else is a one-character `error` token
//!
//! Block comments nest. Unterminated strings and block comments stop at end
//! of input without affecting the token stream; a [`LexError`] is recorded
//! for them (and for error tokens) in [`Lexer::errors`].
//!
//! # Example
//!
//! ```
//! use wrenlet_core::source_analysis::{Lexer, SourceBuffer, TokenKind};
//!
//! let source = SourceBuffer::new("example", "a...b");
//! let kinds: Vec<_> = Lexer::new(&source).map(|t| t.kind()).collect();
//! assert_eq!(kinds, [TokenKind::Name, TokenKind::DotDotDot, TokenKind::Name]);
//! ```

use tracing::trace;

use super::{LexError, SourceBuffer, Span, Token, TokenKind, chars};

/// A node in the maximal-munch table: the kind produced if scanning stops
/// here, and the bytes that extend it to a longer punctuator.
struct Munch {
    kind: TokenKind,
    longer: &'static [(u8, Munch)],
}

/// Punctuators keyed by their first byte.
static PUNCTUATORS: &[(u8, Munch)] = &[
    (b'(', Munch { kind: TokenKind::LeftParen, longer: &[] }),
    (b')', Munch { kind: TokenKind::RightParen, longer: &[] }),
    (b'[', Munch { kind: TokenKind::LeftBracket, longer: &[] }),
    (b']', Munch { kind: TokenKind::RightBracket, longer: &[] }),
    (b'{', Munch { kind: TokenKind::LeftBrace, longer: &[] }),
    (b'}', Munch { kind: TokenKind::RightBrace, longer: &[] }),
    (b':', Munch { kind: TokenKind::Colon, longer: &[] }),
    (b',', Munch { kind: TokenKind::Comma, longer: &[] }),
    (b'*', Munch { kind: TokenKind::Star, longer: &[] }),
    (b'/', Munch { kind: TokenKind::Slash, longer: &[] }),
    (b'%', Munch { kind: TokenKind::Percent, longer: &[] }),
    (b'+', Munch { kind: TokenKind::Plus, longer: &[] }),
    (b'-', Munch { kind: TokenKind::Minus, longer: &[] }),
    (b'~', Munch { kind: TokenKind::Tilde, longer: &[] }),
    (b'^', Munch { kind: TokenKind::Caret, longer: &[] }),
    (b'?', Munch { kind: TokenKind::Question, longer: &[] }),
    (b'\n', Munch { kind: TokenKind::Line, longer: &[] }),
    (
        b'|',
        Munch {
            kind: TokenKind::Pipe,
            longer: &[(b'|', Munch { kind: TokenKind::PipePipe, longer: &[] })],
        },
    ),
    (
        b'&',
        Munch {
            kind: TokenKind::Amp,
            longer: &[(b'&', Munch { kind: TokenKind::AmpAmp, longer: &[] })],
        },
    ),
    (
        b'!',
        Munch {
            kind: TokenKind::Bang,
            longer: &[(b'=', Munch { kind: TokenKind::BangEqual, longer: &[] })],
        },
    ),
    (
        b'=',
        Munch {
            kind: TokenKind::Equal,
            longer: &[(b'=', Munch { kind: TokenKind::EqualEqual, longer: &[] })],
        },
    ),
    (
        b'.',
        Munch {
            kind: TokenKind::Dot,
            longer: &[(
                b'.',
                Munch {
                    kind: TokenKind::DotDot,
                    longer: &[(b'.', Munch { kind: TokenKind::DotDotDot, longer: &[] })],
                },
            )],
        },
    ),
    (
        b'<',
        Munch {
            kind: TokenKind::Less,
            longer: &[
                (b'<', Munch { kind: TokenKind::LessLess, longer: &[] }),
                (b'=', Munch { kind: TokenKind::LessEqual, longer: &[] }),
            ],
        },
    ),
    (
        b'>',
        Munch {
            kind: TokenKind::Greater,
            longer: &[
                (b'>', Munch { kind: TokenKind::GreaterGreater, longer: &[] }),
                (b'=', Munch { kind: TokenKind::GreaterEqual, longer: &[] }),
            ],
        },
    ),
];

/// A lexer that tokenizes one [`SourceBuffer`].
///
/// Call [`read_token`](Self::read_token) for each token, or use the
/// [`Iterator`] impl, which stops before `eof`. A lexer is single-use; several
/// lexers may read the same buffer at once.
pub struct Lexer<'src> {
    source: &'src SourceBuffer,
    /// Offset where the token being scanned began.
    start: usize,
    /// Offset of the next unread byte.
    current: usize,
    /// One entry per open `%(`: the number of unbalanced `(` inside it,
    /// counting the one that opened it.
    interpolations: Vec<u32>,
    errors: Vec<LexError>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("source", &self.source.id())
            .field("current", &self.current)
            .field("interpolations", &self.interpolations)
            .finish_non_exhaustive()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src SourceBuffer) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            interpolations: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// The buffer being scanned.
    #[must_use]
    pub fn source(&self) -> &'src SourceBuffer {
        self.source
    }

    /// Lexical errors seen so far, in source order.
    #[must_use]
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Takes the recorded lexical errors, leaving the list empty.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Scans and returns the next token.
    ///
    /// Once the input is exhausted every call returns an `eof` token at the
    /// end offset.
    pub fn read_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.current;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };
        self.advance();

        if let Some(depth) = self.interpolations.last_mut() {
            match c {
                b'(' => *depth += 1,
                b')' => {
                    *depth -= 1;
                    if *depth == 0 {
                        self.interpolations.pop();
                        return self.read_string();
                    }
                }
                _ => {}
            }
        }

        if let Some(kind) = self.read_punctuator(c) {
            return self.make_token(kind);
        }

        match c {
            b'_' => self.read_field(),
            b'"' => self.read_string(),
            b'0' if self.peek() == Some(b'x') => self.read_hex_number(),
            c if chars::is_digit(c) => self.read_number(),
            c if chars::is_alpha(c) => self.read_name(),
            c => self.read_unexpected(c),
        }
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    fn peek(&self) -> Option<u8> {
        self.peek_n(0)
    }

    fn peek_n(&self, n: usize) -> Option<u8> {
        self.source.bytes().get(self.current + n).copied()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.length()
    }

    /// Moves past the next byte. Does nothing at end of input.
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// Consumes the next byte if it is `expected`.
    fn match_char(&mut self, expected: u8) -> bool {
        self.match_where(|c| c == expected)
    }

    /// Consumes the next byte if it satisfies `predicate`.
    fn match_where(&mut self, predicate: impl Fn(u8) -> bool) -> bool {
        match self.peek() {
            Some(c) if predicate(c) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token::new(self.source, kind, self.start, self.current - self.start)
    }

    fn record(&mut self, error: LexError) {
        trace!(source = self.source.id(), %error, start = error.span.start(), "lexical error");
        self.errors.push(error);
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Skips blanks, line comments and (nested) block comments.
    ///
    /// Line comments stop before their line feed, which is significant.
    fn skip_whitespace(&mut self) {
        loop {
            match (self.peek(), self.peek_n(1)) {
                (Some(c), _) if chars::is_blank(c) => self.advance(),
                (Some(b'/'), Some(b'/')) => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.advance();
                    }
                }
                (Some(b'/'), Some(b'*')) => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.current;
        self.advance();
        self.advance();

        let mut nesting = 1_usize;
        while nesting > 0 {
            match (self.peek(), self.peek_n(1)) {
                (None, _) => {
                    self.record(LexError::unterminated_block_comment(Span::between(
                        start,
                        self.current,
                    )));
                    return;
                }
                (Some(b'/'), Some(b'*')) => {
                    self.advance();
                    self.advance();
                    nesting += 1;
                }
                (Some(b'*'), Some(b'/')) => {
                    self.advance();
                    self.advance();
                    nesting -= 1;
                }
                _ => self.advance(),
            }
        }
    }

    // ========================================================================
    // Token rules
    // ========================================================================

    /// Extends the punctuator starting with `first` as far as the table allows.
    fn read_punctuator(&mut self, first: u8) -> Option<TokenKind> {
        let mut munch = &PUNCTUATORS.iter().find(|(c, _)| *c == first)?.1;
        while let Some((_, longer)) = munch.longer.iter().find(|(c, _)| self.match_char(*c)) {
            munch = longer;
        }
        Some(munch.kind)
    }

    /// Reads `_name` or `__name`; the first `_` is already consumed.
    fn read_field(&mut self) -> Token<'src> {
        let kind = if self.match_char(b'_') {
            TokenKind::StaticField
        } else {
            TokenKind::Field
        };
        while self.match_where(chars::is_alphanumeric) {}
        self.make_token(kind)
    }

    /// Reads a string literal, or the part of one that follows an
    /// interpolated expression.
    fn read_string(&mut self) -> Token<'src> {
        while let Some(c) = self.peek() {
            self.advance();
            match c {
                // Escapes are passed through unvalidated.
                b'\\' => self.advance(),
                b'%' if self.match_char(b'(') => {
                    self.interpolations.push(1);
                    return self.make_token(TokenKind::Interpolation);
                }
                b'"' => return self.make_token(TokenKind::String),
                _ => {}
            }
        }

        self.record(LexError::unterminated_string(Span::between(
            self.start,
            self.current,
        )));
        self.make_token(TokenKind::String)
    }

    /// Reads `0x` followed by hex digits; the `0` is already consumed.
    fn read_hex_number(&mut self) -> Token<'src> {
        self.advance();
        while self.match_where(chars::is_hex_digit) {}
        self.make_token(TokenKind::Number)
    }

    fn read_number(&mut self) -> Token<'src> {
        while self.match_where(chars::is_digit) {}
        self.make_token(TokenKind::Number)
    }

    fn read_name(&mut self) -> Token<'src> {
        while self.match_where(chars::is_alphanumeric) {}
        let text = &self.source.bytes()[self.start..self.current];
        let kind = std::str::from_utf8(text)
            .ok()
            .and_then(TokenKind::keyword)
            .unwrap_or(TokenKind::Name);
        self.make_token(kind)
    }

    /// Produces an error token covering the whole character starting with
    /// `lead`, so token text always falls on character boundaries.
    fn read_unexpected(&mut self, lead: u8) -> Token<'src> {
        for _ in 1..chars::utf8_width(lead) {
            if !self.match_where(chars::is_continuation) {
                break;
            }
        }
        let bytes = &self.source.bytes()[self.start..self.current];
        let c = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.record(LexError::unexpected_char(
            c,
            Span::between(self.start, self.current),
        ));
        self.make_token(TokenKind::Error)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.read_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

/// Lexes `source` into a vector of tokens, excluding `eof`.
#[must_use]
pub fn lex(source: &SourceBuffer) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}

/// Lexes `source` into a vector of tokens ending with a single `eof`.
#[must_use]
pub fn lex_with_eof(source: &SourceBuffer) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.read_token();
        tokens.push(token);
        if token.is(TokenKind::Eof) {
            break;
        }
    }
    tokens
}
