// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the wrenlet lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated inputs:
//!
//! 1. **Lexer never panics**: arbitrary text or bytes always produce tokens
//! 2. **Token spans within input**: every token lies inside the buffer
//! 3. **Token spans are ordered**: tokens never overlap or go backwards
//! 4. **EOF is sticky**: once reached, every further read returns `eof`
//! 5. **Lexer is deterministic**: same input always produces same tokens
//! 6. **Maximal munch**: punctuators take the longest spelling available
//! 7. **Interpolation balance**: nested parens never close `%(` early
//! 8. **Line/column round trip**: every offset maps to a position and back
//! 9. **Only blanks between tokens**: for comment-free input
//! 10. **Valid fragments lex cleanly**: the seed corpus has no errors

use proptest::prelude::*;

use super::lexer::{Lexer, lex, lex_with_eof};
use super::source_buffer::SourceBuffer;
use super::token::TokenKind;

// ============================================================================
// Generators
// ============================================================================

/// Every punctuator spelling.
const PUNCTUATORS: &[&str] = &[
    "(", ")", "[", "]", "{", "}", ":", ".", "..", "...", ",", "*", "/", "%", "+", "-", "|", "||",
    "^", "&", "&&", "?", "!", "~", "=", "<", "<=", "<<", ">", ">=", ">>", "==", "!=",
];

/// Known-valid fragments that should lex without errors.
const VALID_FRAGMENTS: &[&str] = &[
    "42",
    "0xCAFE",
    "\"hello\"",
    "\"a %(b) c\"",
    "\"esc \\\" quote\"",
    "name",
    "_field",
    "__static",
    "class Foo is Bar {}",
    "var x = a..b",
    "a /* nested /* comment */ */ b",
    "a // trailing comment",
    "list.map { |x| x * 2 }",
];

fn punctuator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PUNCTUATORS)
}

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(std::string::ToString::to_string)
}

// ============================================================================
// Property tests
// ============================================================================

/// Default is 512 cases; override via `PROPTEST_CASES` env var for nightly runs.
fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: Lexer never panics on arbitrary string input.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,500}") {
        let source = SourceBuffer::new("prop", input);
        let _tokens = lex_with_eof(&source);
    }

    /// Property 1b: Lexer never panics on arbitrary bytes.
    #[test]
    fn lexer_never_panics_on_bytes(input in prop::collection::vec(any::<u8>(), 0..300)) {
        let source = SourceBuffer::new("prop", input);
        let _tokens = lex_with_eof(&source);
    }

    /// Property 2: All token spans are within input bounds.
    #[test]
    fn token_spans_within_input(input in "\\PC{0,500}") {
        let source = SourceBuffer::new("prop", input.as_str());
        for token in lex_with_eof(&source) {
            prop_assert!(
                token.end() <= input.len(),
                "Token {:?} ends past input length {} for input {:?}",
                token,
                input.len(),
                input,
            );
        }
    }

    /// Property 3: Token spans are non-overlapping and ordered, and only
    /// `eof` is empty.
    #[test]
    fn token_spans_non_overlapping(input in "\\PC{0,500}") {
        let source = SourceBuffer::new("prop", input.as_str());
        let tokens = lex(&source);
        for token in &tokens {
            prop_assert!(token.length() > 0, "Empty token {:?} for input {:?}", token, input);
        }
        for window in tokens.windows(2) {
            prop_assert!(
                window[1].start() >= window[0].end(),
                "Overlapping tokens {:?} and {:?} for input {:?}",
                window[0],
                window[1],
                input,
            );
        }
    }

    /// Property 4: Reading past `eof` keeps returning `eof` at the end.
    #[test]
    fn eof_is_idempotent(input in "\\PC{0,200}", extra in 1usize..5) {
        let source = SourceBuffer::new("prop", input.as_str());
        let mut lexer = Lexer::new(&source);
        while !lexer.read_token().is(TokenKind::Eof) {}
        let errors = lexer.errors().len();
        for _ in 0..extra {
            let token = lexer.read_token();
            prop_assert_eq!(token.kind(), TokenKind::Eof);
            prop_assert_eq!(token.start(), input.len());
            prop_assert_eq!(token.length(), 0);
        }
        prop_assert_eq!(lexer.errors().len(), errors);
    }

    /// Property 5: Lexer is deterministic: same input, same tokens.
    #[test]
    fn lexer_deterministic(input in "\\PC{0,200}") {
        let source = SourceBuffer::new("prop", input.as_str());
        let first = lex_with_eof(&source);
        let second = lex_with_eof(&source);
        prop_assert_eq!(first, second);
    }

    /// Property 6: Blank-separated punctuators lex back to themselves.
    #[test]
    fn punctuators_round_trip(spellings in prop::collection::vec(punctuator(), 1..20)) {
        let text = spellings.join(" ");
        let source = SourceBuffer::new("prop", text.as_str());
        let texts: Vec<String> = lex(&source).iter().map(|t| t.text().into_owned()).collect();
        prop_assert_eq!(texts, spellings);
    }

    /// Property 6b: A run of dots lexes greedily into `...` tokens.
    #[test]
    fn dot_runs_are_maximal(count in 1usize..30) {
        let text = ".".repeat(count);
        let source = SourceBuffer::new("prop", text.as_str());
        let kinds: Vec<TokenKind> = lex(&source).iter().map(|t| t.kind()).collect();
        prop_assert_eq!(kinds.len(), count.div_ceil(3));
        let (last, full) = kinds.split_last().expect("at least one token");
        prop_assert!(full.iter().all(|&kind| kind == TokenKind::DotDotDot));
        let expected_last = match count % 3 {
            1 => TokenKind::Dot,
            2 => TokenKind::DotDot,
            _ => TokenKind::DotDotDot,
        };
        prop_assert_eq!(*last, expected_last);
    }

    /// Property 7: Parens nested inside an interpolation stay balanced.
    #[test]
    fn interpolation_parens_balance(depth in 0usize..20) {
        let text = format!("\"%({}a{})\"", "(".repeat(depth), ")".repeat(depth));
        let source = SourceBuffer::new("prop", text.as_str());
        let kinds: Vec<TokenKind> = lex(&source).iter().map(|t| t.kind()).collect();

        let mut expected = vec![TokenKind::Interpolation];
        expected.extend(std::iter::repeat_n(TokenKind::LeftParen, depth));
        expected.push(TokenKind::Name);
        expected.extend(std::iter::repeat_n(TokenKind::RightParen, depth));
        expected.push(TokenKind::String);
        prop_assert_eq!(kinds, expected);
    }

    /// Property 8: line/column of every offset round-trips to the offset,
    /// and every line starts at column 1.
    #[test]
    fn line_column_round_trip(input in "[a-z \n]{0,200}") {
        let source = SourceBuffer::new("prop", input.as_str());
        for offset in 0..=input.len() {
            let line = source.line_at(offset);
            let column = source.column_at(offset);
            prop_assert_eq!(source.column_at(source.line_start(line)), 1);
            prop_assert_eq!(source.offset_at(line, column), offset);
        }
    }

    /// Property 9: Without comments or strings, only blanks sit between
    /// tokens.
    #[test]
    fn gaps_are_blank(input in "[a-z0-9_ +*().,<>=!\t\n-]{0,200}") {
        let source = SourceBuffer::new("prop", input.as_str());
        let mut offset = 0;
        for token in lex_with_eof(&source) {
            let gap = &input[offset..token.start()];
            prop_assert!(
                gap.chars().all(|c| c == ' ' || c == '\t'),
                "Gap {:?} before {:?} in input {:?}",
                gap,
                token,
                input,
            );
            offset = token.end();
        }
    }

    /// Property 10: Known-valid fragments produce no errors.
    #[test]
    fn valid_fragments_lex_cleanly(input in valid_fragment()) {
        let source = SourceBuffer::new("prop", input.as_str());
        let mut lexer = Lexer::new(&source);
        let tokens: Vec<_> = lexer.by_ref().collect();
        prop_assert!(
            tokens.iter().all(|t| !t.is(TokenKind::Error)),
            "Valid input {:?} produced error tokens: {:?}",
            input,
            tokens,
        );
        prop_assert!(lexer.errors().is_empty(), "Valid input {:?} produced lex errors", input);
    }
}
