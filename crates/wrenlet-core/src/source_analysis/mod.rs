// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Reading wrenlet source text.
//!
//! This module contains the source buffer, the lexer and the parser.
//!
//! # Source buffers
//!
//! A [`SourceBuffer`] owns the raw bytes of one script together with an
//! identifier used in messages. Tokens and syntax tree nodes borrow from it,
//! so the buffer must outlive everything produced from it.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts a buffer into a stream of [`Token`]s on demand.
//! Line feeds are tokens because they end statements.
//!
//! ```
//! use wrenlet_core::source_analysis::{SourceBuffer, TokenKind, lex};
//!
//! let source = SourceBuffer::new("main.wren", "x + 1");
//! let kinds: Vec<_> = lex(&source).iter().map(|t| t.kind()).collect();
//! assert_eq!(kinds, [TokenKind::Name, TokenKind::Plus, TokenKind::Number]);
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts a buffer into a
//! [`Module`](crate::ast::Module). Each of the fourteen precedence levels has
//! its own recursive descent function (see the `parser` module for the full
//! table).
//!
//! # Error Handling
//!
//! Neither stage stops at bad input. The lexer turns stray bytes into
//! [`TokenKind::Error`] tokens and records a [`LexError`]; the parser records
//! a [`Problem`] and leaves a placeholder node where the broken construct
//! was. Both carry a [`Span`] into the buffer for diagnostics.

mod chars;
mod error;
mod lexer;
mod parser;
mod source_buffer;
mod span;
mod token;

#[cfg(test)]
mod lexer_property_tests;

pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, lex, lex_with_eof};
pub use parser::{Parsed, Parser, Problem, parse};
pub use source_buffer::SourceBuffer;
pub use span::Span;
pub use token::{Token, TokenKind};
