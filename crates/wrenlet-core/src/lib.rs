// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Wrenlet front end.
//!
//! This crate turns wrenlet source text into a syntax tree:
//! - Source buffers with line and column lookup
//! - Lexical analysis (tokenization, including string interpolation)
//! - Parsing (recursive descent with error recovery)
//! - The syntax tree and an S-expression dump of it
//!
//! Nothing here evaluates or resolves names. Parsing never stops early:
//! malformed input produces a tree with placeholders and a list of problems.

#![doc = include_str!("../../../README.md")]

pub mod ast;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Body, Expr, Module, Stmt};
    pub use crate::source_analysis::{Parsed, Problem, SourceBuffer, Span, Token, TokenKind, parse};
}
