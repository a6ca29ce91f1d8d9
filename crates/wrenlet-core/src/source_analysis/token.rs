// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for wrenlet lexical analysis.
//!
//! A [`Token`] is a [`TokenKind`] plus a byte range into the
//! [`SourceBuffer`] it was read from. Tokens do not copy their text; they
//! borrow the buffer and extract text and positions on demand, so a token can
//! never outlive the source it points into.

use std::borrow::Cow;
use std::fmt;

use super::{SourceBuffer, Span};

/// The kind of token, not including its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Punctuators ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `..` (exclusive range)
    DotDot,
    /// `...` (inclusive range)
    DotDotDot,
    /// `,`
    Comma,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `|`
    Pipe,
    /// `||`
    PipePipe,
    /// `^`
    Caret,
    /// `&`
    Amp,
    /// `&&`
    AmpAmp,
    /// `?`
    Question,
    /// `!`
    Bang,
    /// `~`
    Tilde,
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `<<`
    LessLess,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `>>`
    GreaterGreater,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,

    // === Keywords ===
    Break,
    Class,
    Construct,
    Else,
    False,
    For,
    Foreign,
    If,
    Import,
    In,
    Is,
    Null,
    Return,
    Static,
    Super,
    This,
    True,
    Var,
    While,

    // === Names and literals ===
    /// A bare identifier: `foo`, `List`
    Name,
    /// An instance field: `_count`
    Field,
    /// A static (class-level) field: `__instances`
    StaticField,
    /// A decimal or `0x` hexadecimal integer: `42`, `0xff`
    Number,
    /// A complete string literal, or the tail of an interpolated one
    /// (from the closing `)` of the last interpolation to the closing `"`).
    String,
    /// A string segment that ends in `%(`, opening an interpolated expression.
    Interpolation,

    // === Structure ===
    /// A significant line feed.
    Line,
    /// A byte sequence no rule recognises. Spans one character.
    Error,
    /// End of input. Returned repeatedly once reached.
    Eof,
}

/// Keyword spellings. Everything else matching the name rule is a
/// [`TokenKind::Name`].
static KEYWORDS: &[(&str, TokenKind)] = &[
    ("break", TokenKind::Break),
    ("class", TokenKind::Class),
    ("construct", TokenKind::Construct),
    ("else", TokenKind::Else),
    ("false", TokenKind::False),
    ("for", TokenKind::For),
    ("foreign", TokenKind::Foreign),
    ("if", TokenKind::If),
    ("import", TokenKind::Import),
    ("in", TokenKind::In),
    ("is", TokenKind::Is),
    ("null", TokenKind::Null),
    ("return", TokenKind::Return),
    ("static", TokenKind::Static),
    ("super", TokenKind::Super),
    ("this", TokenKind::This),
    ("true", TokenKind::True),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
];

impl TokenKind {
    /// Looks up the keyword spelled `text`.
    ///
    /// ```
    /// use wrenlet_core::source_analysis::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
    /// assert_eq!(TokenKind::keyword("While"), None);
    /// ```
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|&(_, kind)| kind)
    }

    /// Returns `true` for reserved words.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Break
                | Self::Class
                | Self::Construct
                | Self::Else
                | Self::False
                | Self::For
                | Self::Foreign
                | Self::If
                | Self::Import
                | Self::In
                | Self::Is
                | Self::Null
                | Self::Return
                | Self::Static
                | Self::Super
                | Self::This
                | Self::True
                | Self::Var
                | Self::While
        )
    }

    /// Returns `true` for every operator usable between two operands.
    ///
    /// These are also the operators a class may overload with an infix
    /// method definition such as `+(other) { ... }`.
    #[must_use]
    pub const fn is_infix_operator(self) -> bool {
        matches!(
            self,
            Self::PipePipe
                | Self::AmpAmp
                | Self::EqualEqual
                | Self::BangEqual
                | Self::Is
                | Self::Less
                | Self::LessEqual
                | Self::Greater
                | Self::GreaterEqual
                | Self::Pipe
                | Self::Caret
                | Self::Amp
                | Self::LessLess
                | Self::GreaterGreater
                | Self::DotDot
                | Self::DotDotDot
                | Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Percent
        )
    }

    /// Returns `true` for unary prefix operators.
    #[must_use]
    pub const fn is_prefix_operator(self) -> bool {
        matches!(self, Self::Minus | Self::Bang | Self::Tilde)
    }

    /// The fixed spelling of this kind, if it has one.
    #[must_use]
    pub fn as_str(self) -> Option<&'static str> {
        let text = match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::DotDot => "..",
            Self::DotDotDot => "...",
            Self::Comma => ",",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Pipe => "|",
            Self::PipePipe => "||",
            Self::Caret => "^",
            Self::Amp => "&",
            Self::AmpAmp => "&&",
            Self::Question => "?",
            Self::Bang => "!",
            Self::Tilde => "~",
            Self::Equal => "=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::LessLess => "<<",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::GreaterGreater => ">>",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            keyword if keyword.is_keyword() => {
                return KEYWORDS
                    .iter()
                    .find(|&&(_, kind)| kind == keyword)
                    .map(|&(spelling, _)| spelling);
            }
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.as_str() {
            return write!(f, "'{text}'");
        }
        let description = match self {
            Self::Name => "name",
            Self::Field => "field",
            Self::StaticField => "static field",
            Self::Number => "number",
            Self::String => "string",
            Self::Interpolation => "string interpolation",
            Self::Line => "newline",
            Self::Error => "error",
            Self::Eof => "end of input",
            _ => unreachable!("kinds without a spelling are listed above"),
        };
        f.write_str(description)
    }
}

/// A token: a kind and the range of source bytes it covers.
///
/// Tokens are small `Copy` values borrowing their [`SourceBuffer`].
#[derive(Clone, Copy)]
pub struct Token<'src> {
    kind: TokenKind,
    start: usize,
    length: usize,
    source: &'src SourceBuffer,
}

impl<'src> Token<'src> {
    /// Creates a token covering `length` bytes of `source` from `start`.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of `source`.
    #[must_use]
    pub fn new(source: &'src SourceBuffer, kind: TokenKind, start: usize, length: usize) -> Self {
        assert!(
            start + length <= source.length(),
            "token {start}+{length} out of range for source of length {}",
            source.length()
        );
        Self {
            kind,
            start,
            length,
            source,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte offset of the first byte.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of bytes covered. Zero for `eof`.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Exclusive end offset.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.length)
    }

    /// The buffer this token points into.
    #[must_use]
    pub fn source(&self) -> &'src SourceBuffer {
        self.source
    }

    /// The source text of the token.
    #[must_use]
    pub fn text(&self) -> Cow<'src, str> {
        self.source.substring(self.start, self.length)
    }

    /// 1-based line of the first byte.
    #[must_use]
    pub fn line(&self) -> usize {
        self.source.line_at(self.start)
    }

    /// 1-based column of the first byte.
    #[must_use]
    pub fn column(&self) -> usize {
        self.source.column_at(self.start)
    }

    /// 1-based line of the end position.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.source.line_at(self.end())
    }

    /// 1-based column of the end position.
    #[must_use]
    pub fn end_column(&self) -> usize {
        self.source.column_at(self.end())
    }

    /// Returns `true` if the token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.start == other.start
            && self.length == other.length
            && std::ptr::eq(self.source, other.source)
    }
}

impl Eq for Token<'_> {}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?} @ {}..{})",
            self.kind,
            self.text(),
            self.start,
            self.end()
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
