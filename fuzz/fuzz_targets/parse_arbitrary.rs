// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for parser crash safety testing.
//!
//! This target feeds arbitrary byte sequences to the lexer and parser and
//! asserts that neither panics. Malformed input must come back as a tree
//! plus problems and lexical errors.
//!
//! # Success Criteria
//!
//! The front end passes fuzzing if:
//! - It never panics on any input (including invalid UTF-8)
//! - Every problem and lexical error points inside the input
//! - The token stream ends with `eof` at the end of the input

#![no_main]

use libfuzzer_sys::fuzz_target;
use wrenlet_core::source_analysis::{SourceBuffer, TokenKind, lex_with_eof, parse};

fuzz_target!(|data: &[u8]| {
    let source = SourceBuffer::new("fuzz", data.to_vec());

    let tokens = lex_with_eof(&source);
    let last = tokens.last().expect("lex_with_eof always yields eof");
    assert!(last.is(TokenKind::Eof));
    assert_eq!(last.start(), data.len());

    let parsed = parse(&source);
    for problem in &parsed.problems {
        assert!(problem.span().end() <= data.len());
    }
    for error in &parsed.lex_errors {
        assert!(error.span.end() <= data.len());
    }
});
