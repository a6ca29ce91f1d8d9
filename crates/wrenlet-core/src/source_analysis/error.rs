// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical error reports.
//!
//! The token stream never carries messages: an unrecognised character is an
//! [`TokenKind::Error`](super::TokenKind::Error) token, and unterminated
//! literals simply stop at end of input. Alongside the tokens the lexer
//! records a [`LexError`] for each of these so callers that want to report
//! them can, with [`miette`] integration for rendering.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A lexical error encountered during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic(code(wrenlet::lex))]
pub struct LexError {
    #[source]
    pub kind: LexErrorKind,
    #[label("here")]
    pub span: Span,
}

impl LexError {
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Creates an "unexpected character" error.
    #[must_use]
    pub fn unexpected_char(c: char, span: Span) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter(c), span)
    }

    /// Creates an "unterminated string" error spanning the partial literal.
    #[must_use]
    pub fn unterminated_string(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedString, span)
    }

    /// Creates an "unterminated block comment" error spanning the comment.
    #[must_use]
    pub fn unterminated_block_comment(span: Span) -> Self {
        Self::new(LexErrorKind::UnterminatedBlockComment, span)
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated block comment")]
    UnterminatedBlockComment,
}
