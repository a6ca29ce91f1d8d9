// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for wrenlet source code.
//!
//! The parser pulls tokens from a [`Lexer`] on demand with one token of
//! lookahead and builds a [`Module`]. It is designed to be run on anything a
//! user might type, so it never stops early.
//!
//! # Error policy
//!
//! - **A tree is always produced.** Malformed input yields problems, never a
//!   `Result::Err` or a panic.
//! - **`consume` always advances.** When the next token is not the expected
//!   kind it is recorded as a [`Problem`] and consumed anyway; parsing picks
//!   up right after it. There are no synchronization points, so one missing
//!   token can cascade into further problems in the same construct.
//! - **Missing expressions** become an [`Expr::Null`] placeholder holding the
//!   token that could not start an expression.
//!
//! # Newlines
//!
//! A `line` token terminates statements and class members. Where a newline
//! is purely cosmetic (after an opening bracket, after a comma or an infix
//! operator) the parser discards any run of them.
//!
//! # Precedence
//!
//! From loosest to tightest:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | assignment | `=` | Right |
//! | conditional | `?:` | Right |
//! | logical or | `\|\|` | Left |
//! | logical and | `&&` | Left |
//! | equality | `==` `!=` | Left |
//! | type test | `is` | Left |
//! | comparison | `<` `<=` `>` `>=` | Left |
//! | bitwise or | `\|` | Left |
//! | bitwise xor | `^` | Left |
//! | bitwise and | `&` | Left |
//! | shift | `<<` `>>` | Left |
//! | range | `..` `...` | Left |
//! | term | `+` `-` | Left |
//! | factor | `*` `/` `%` | Left |
//!
//! Prefix `-` `!` `~` bind tighter still, then `.name` calls and `[...]`
//! subscripts.
//!
//! # Usage
//!
//! ```
//! use wrenlet_core::source_analysis::{SourceBuffer, parse};
//!
//! let source = SourceBuffer::new("example", "var a = 1\nvar b = a + 2");
//! let parsed = parse(&source);
//!
//! assert!(parsed.problems.is_empty());
//! assert_eq!(parsed.module.statements.len(), 2);
//! ```

use std::fmt;

use ecow::EcoString;
use tracing::{debug, trace};

use crate::ast::{Expr, Module, Stmt};
use crate::source_analysis::{LexError, Lexer, SourceBuffer, Span, Token, TokenKind};

// Submodules with additional impl blocks for Parser
mod declarations;
mod expressions;


/// Maximum number of nested statements and expressions before the parser
/// gives up on a construct.
///
/// Every level costs a chain of stack frames through the precedence levels.
/// `stacker::maybe_grow` extends the stack on the heap as a second line of
/// defence, so the limit mainly keeps adversarial input cheap.
const MAX_NESTING_DEPTH: usize = 64;

/// Remaining stack below which a new segment is allocated.
const STACK_RED_ZONE: usize = 32 * 1024;

/// Size of each heap-allocated stack segment.
const STACK_SEGMENT: usize = 256 * 1024;

/// A syntax problem: a message and the token it was reported at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem<'src> {
    pub message: EcoString,
    pub token: Token<'src>,
}

impl<'src> Problem<'src> {
    #[must_use]
    pub fn new(message: impl Into<EcoString>, token: Token<'src>) -> Self {
        Self {
            message: message.into(),
            token,
        }
    }

    /// The source range of the offending token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.token.span()
    }
}

impl fmt::Display for Problem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.token.source().id(),
            self.token.line(),
            self.token.column(),
            self.message
        )
    }
}

/// The result of [`parse`]: the tree plus everything that went wrong.
#[derive(Debug)]
pub struct Parsed<'src> {
    pub module: Module<'src>,
    /// Syntax problems in the order they were found.
    pub problems: Vec<Problem<'src>>,
    /// Lexical errors reported by the lexer.
    pub lex_errors: Vec<LexError>,
}

impl Parsed<'_> {
    /// Returns `true` if there were no syntax problems and no lexical errors.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty() && self.lex_errors.is_empty()
    }
}

/// Parses a whole source buffer.
///
/// This always returns a module, however malformed the input is.
///
/// ```
/// use wrenlet_core::source_analysis::{SourceBuffer, parse};
///
/// let source = SourceBuffer::new("broken", "var = 1");
/// let parsed = parse(&source);
///
/// assert_eq!(parsed.problems[0].message, "Expect variable name.");
/// assert_eq!(parsed.module.statements.len(), 1);
/// ```
#[must_use]
pub fn parse(source: &SourceBuffer) -> Parsed<'_> {
    let mut parser = Parser::new(Lexer::new(source));
    let module = parser.parse_module();
    let (problems, lex_errors) = parser.finish();

    debug!(
        path = source.id(),
        statements = module.statements.len(),
        problems = problems.len(),
        lex_errors = lex_errors.len(),
        "parsed module"
    );

    Parsed {
        module,
        problems,
        lex_errors,
    }
}

/// The parser state.
///
/// A parser is single-use: create one per [`Lexer`], call
/// [`parse_module`](Self::parse_module) once, then collect the problems.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    /// The lookahead token, read lazily.
    current: Option<Token<'src>>,
    /// The most recently consumed token.
    previous: Option<Token<'src>>,
    problems: Vec<Problem<'src>>,
    /// Current statement/expression nesting depth.
    depth: usize,
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("lexer", &self.lexer)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("problems", &self.problems.len())
            .finish_non_exhaustive()
    }
}

impl<'src> Parser<'src> {
    /// Creates a parser reading from `lexer`.
    #[must_use]
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = Some(lexer.read_token());
        Self {
            lexer,
            current,
            previous: None,
            problems: Vec::new(),
            depth: 0,
        }
    }

    /// Syntax problems recorded so far.
    #[must_use]
    pub fn problems(&self) -> &[Problem<'src>] {
        &self.problems
    }

    /// Lexical errors the lexer has recorded so far.
    #[must_use]
    pub fn lex_errors(&self) -> &[LexError] {
        self.lexer.errors()
    }

    /// Consumes the parser, returning its problems and the lexical errors.
    #[must_use]
    pub fn finish(mut self) -> (Vec<Problem<'src>>, Vec<LexError>) {
        (self.problems, self.lexer.take_errors())
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the lookahead token, reading it if necessary.
    pub(super) fn lookahead(&mut self) -> Token<'src> {
        *self.current.get_or_insert_with(|| self.lexer.read_token())
    }

    /// Returns the kind of the lookahead token.
    pub(super) fn peek(&mut self) -> TokenKind {
        self.lookahead().kind()
    }

    /// Consumes and returns the lookahead token.
    pub(super) fn consume_next(&mut self) -> Token<'src> {
        let token = self.lookahead();
        self.previous = Some(token);
        self.current = None;
        token
    }

    /// Consumes the next token if it has the given kind.
    pub(super) fn match_kind(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.peek() == kind {
            Some(self.consume_next())
        } else {
            None
        }
    }

    /// Consumes the next token if its kind is one of `kinds`.
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token<'src>> {
        if kinds.contains(&self.peek()) {
            Some(self.consume_next())
        } else {
            None
        }
    }

    /// Consumes the next token, recording `message` as a problem if it is
    /// not of the expected kind. The token is returned either way.
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> Token<'src> {
        let token = self.consume_next();
        if token.kind() != kind {
            self.error(message);
        }
        token
    }

    /// Consumes a run of newlines. Returns `true` if there was at least one.
    pub(super) fn match_line(&mut self) -> bool {
        if self.match_kind(TokenKind::Line).is_none() {
            return false;
        }
        while self.match_kind(TokenKind::Line).is_some() {}
        true
    }

    /// Discards newlines where they carry no meaning.
    pub(super) fn ignore_line(&mut self) {
        self.match_line();
    }

    /// Requires at least one newline.
    pub(super) fn consume_line(&mut self, message: &str) {
        self.consume(TokenKind::Line, message);
        self.ignore_line();
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Records a problem at the lookahead token if one has been read, or
    /// else at the token just consumed.
    pub(super) fn error(&mut self, message: impl Into<EcoString>) {
        let token = match self.current.or(self.previous) {
            Some(token) => token,
            None => self.lookahead(),
        };
        let problem = Problem::new(message, token);
        trace!(%problem, "syntax problem");
        self.problems.push(problem);
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Past [`MAX_NESTING_DEPTH`] a problem is recorded and `placeholder` is
    /// built from the lookahead token instead; nothing is consumed.
    pub(super) fn nested<T>(
        &mut self,
        placeholder: fn(Token<'src>) -> T,
        parse: impl FnOnce(&mut Self) -> T,
    ) -> T {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            if self.depth >= MAX_NESTING_DEPTH {
                let token = self.lookahead();
                self.error("Expression nested too deeply.");
                return placeholder(token);
            }
            self.depth += 1;
            let result = parse(self);
            self.depth -= 1;
            result
        })
    }

    /// Placeholder for a statement that could not be parsed.
    pub(super) fn missing_statement(token: Token<'src>) -> Stmt<'src> {
        Stmt::Expression(Expr::Null(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BodyContent, ClassStmt, MapEntry, dump_module};

    /// Parses `text` and asserts there were no problems.
    fn parse_ok(source: &SourceBuffer) -> Module<'_> {
        let parsed = parse(source);
        assert!(
            parsed.problems.is_empty(),
            "Expected no problems, got: {:?}",
            parsed.problems
        );
        parsed.module
    }

    /// Parses `text` and returns the problem messages.
    fn messages(text: &str) -> Vec<String> {
        let source = SourceBuffer::new("test", text);
        parse(&source)
            .problems
            .iter()
            .map(|p| p.message.to_string())
            .collect()
    }

    /// The first problem reported for `text`, for input that cascades.
    fn first_message(text: &str) -> String {
        messages(text).into_iter().next().unwrap_or_default()
    }

    fn dump(text: &str) -> String {
        let source = SourceBuffer::new("test", text);
        dump_module(&parse(&source).module)
    }

    #[test]
    fn parse_empty_input() {
        let source = SourceBuffer::new("test", "");
        assert!(parse_ok(&source).is_empty());

        let source = SourceBuffer::new("test", "\n\n  // nothing\n");
        assert!(parse_ok(&source).is_empty());
    }

    #[test]
    fn parse_precedence() {
        let source = SourceBuffer::new("test", "1 + 2 * 3");
        let module = parse_ok(&source);
        let Stmt::Expression(Expr::Infix {
            left,
            operator,
            right,
        }) = &module.statements[0]
        else {
            panic!("Expected infix, got {:?}", module.statements[0]);
        };
        assert_eq!(operator.kind(), TokenKind::Plus);
        assert!(matches!(**left, Expr::Num(_)));
        let Expr::Infix { operator, .. } = &**right else {
            panic!("Expected infix right operand, got {right:?}");
        };
        assert_eq!(operator.kind(), TokenKind::Star);
    }

    #[test]
    fn parse_left_associative() {
        assert_eq!(dump("a - b - c"), "(- (- a b) c)");
        assert_eq!(dump("1..2..3"), "(.. (.. 1 2) 3)");
    }

    #[test]
    fn parse_precedence_levels() {
        assert_eq!(dump("a || b && c"), "(|| a (&& b c))");
        assert_eq!(dump("a == b is C"), "(== a (is b C))");
        assert_eq!(dump("a is B < c"), "(is a (< B c))");
        assert_eq!(dump("a < b | c"), "(< a (| b c))");
        assert_eq!(dump("a | b ^ c & d"), "(| a (^ b (& c d)))");
        assert_eq!(dump("a & b << c"), "(& a (<< b c))");
        assert_eq!(dump("a >> b...c"), "(>> a (... b c))");
        assert_eq!(dump("a..b + c"), "(.. a (+ b c))");
        assert_eq!(dump("a + b % c"), "(+ a (% b c))");
        assert_eq!(dump("-a * b"), "(* (- a) b)");
        assert_eq!(dump("!a.b"), "(! (call a b))");
    }

    #[test]
    fn parse_assignment_is_right_associative() {
        let source = SourceBuffer::new("test", "a = b = c");
        let module = parse_ok(&source);
        let Stmt::Expression(Expr::Assignment { target, value, .. }) = &module.statements[0]
        else {
            panic!("Expected assignment, got {:?}", module.statements[0]);
        };
        assert!(matches!(**target, Expr::Call { .. }));
        assert!(matches!(**value, Expr::Assignment { .. }));
    }

    #[test]
    fn parse_assignment_target_is_unchecked() {
        assert_eq!(dump("1 + 2 = 3"), "(= (+ 1 2) 3)");
    }

    #[test]
    fn parse_conditional() {
        assert_eq!(dump("a ? b : c ? d : e"), "(? a b (? c d e))");
        assert_eq!(dump("a ? b ? c : d : e"), "(? a (? b c d) e)");
        assert_eq!(dump("a ? b : c = d"), "(? a b (= c d))");
        assert_eq!(
            messages("a ? b c"),
            [
                "Expect ':' after then branch of conditional operator.",
                "Expect expression.",
            ]
        );
    }

    #[test]
    fn parse_newline_after_operator_is_ignored() {
        assert_eq!(dump("1 +\n  2"), "(+ 1 2)");
    }

    #[test]
    fn parse_two_var_statements() {
        let source = SourceBuffer::new("test", "var a = 1\nvar b = 2");
        let module = parse_ok(&source);
        let names: Vec<_> = module
            .statements
            .iter()
            .map(|statement| match statement {
                Stmt::Var { name, .. } => name.text().into_owned(),
                other => panic!("Expected var, got {other:?}"),
            })
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn parse_missing_newline_between_statements() {
        let source = SourceBuffer::new("test", "var a = 1 var b = 2");
        let parsed = parse(&source);
        assert_eq!(parsed.problems.len(), 1);
        assert_eq!(parsed.problems[0].message, "Expect newline.");
        assert_eq!(parsed.problems[0].token.kind(), TokenKind::Var);
        // The second `var` was swallowed as the separator.
        assert_eq!(dump_module(&parsed.module), "(var a 1)\n(= b 2)");
    }

    #[test]
    fn parse_class_end_to_end() {
        let source = SourceBuffer::new("test", "class Foo {\n  bar() { return 1 }\n}");
        let module = parse_ok(&source);
        assert_eq!(module.statements.len(), 1);

        let Stmt::Class(ClassStmt {
            foreign_keyword,
            name,
            superclass,
            methods,
            ..
        }) = &module.statements[0]
        else {
            panic!("Expected class, got {:?}", module.statements[0]);
        };
        assert!(foreign_keyword.is_none());
        assert_eq!(name.text(), "Foo");
        assert!(superclass.is_none());
        assert_eq!(methods.len(), 1);

        let method = &methods[0];
        assert_eq!(method.name.text(), "bar");
        assert_eq!(method.parameters, Some(vec![]));
        let body = method.body.as_ref().expect("method has a body");
        let BodyContent::Expression(element) = &body.content else {
            panic!("Expected single-expression body, got {:?}", body.content);
        };
        let Stmt::Return {
            value: Some(Expr::Num(number)),
            ..
        } = &**element
        else {
            panic!("Expected return of a number, got {element:?}");
        };
        assert_eq!(number.text(), "1");
    }

    #[test]
    fn parse_class_members() {
        assert_eq!(
            dump("class A {\n  [i] { 1 }\n  -{ 2 }\n  !{ 3 }\n  ==(o) { 4 }\n}"),
            "(class A (method [ (i) (body |i| 1)) (method - (body 2)) \
             (method ! (body 3)) (method == (o) (body |o| 4)))"
        );
    }

    #[test]
    fn parse_class_errors() {
        assert_eq!(first_message("class {}"), "Expect class name.");
        assert_eq!(first_message("class A is {}"), "Expect name of superclass.");
        assert_eq!(first_message("foreign A {}"), "Expect 'class' after 'foreign'.");
        assert_eq!(first_message("class A"), "Expect '{' after class name.");
        assert_eq!(
            messages("class A {\n  foo {}\n"),
            ["Expect '}' after class body."]
        );
        assert_eq!(
            first_message("class A {\n  foo {} bar {}\n}"),
            "Expect newline after definition in class."
        );
        assert_eq!(first_message("class A {\n  1\n}"), "Expect method name.");
        assert_eq!(
            messages("class A {\n  !(x) {}\n}"),
            ["A parameter list is not allowed for this method."]
        );
        assert_eq!(
            first_message("class A {\n  foo 1\n}"),
            "Expect '{' before method body."
        );
        assert_eq!(
            messages("class A {\n  foo(a, 1) {}\n}"),
            ["Expect parameter name."]
        );
    }

    #[test]
    fn parse_import() {
        assert_eq!(dump("import \"a\""), "(import \"a\")");
        assert_eq!(
            dump("import \"a\" for\n  B,\n  C"),
            "(import \"a\" for B C)"
        );
        assert_eq!(messages("import a"), ["Expect import path."]);
        assert_eq!(
            messages("import \"a\" for 1"),
            ["Expect imported variable name."]
        );
    }

    #[test]
    fn parse_control_flow() {
        assert_eq!(dump("if (a) b"), "(if a b)");
        assert_eq!(
            dump("while (a) {\n  b\n}"),
            "(while a (block b))"
        );
        assert_eq!(first_message("if a) b"), "Expect '(' after 'if'.");
        assert_eq!(first_message("if (a b"), "Expect ')' after if condition.");
        assert_eq!(first_message("for i in a) b"), "Expect '(' after 'for'.");
        assert_eq!(
            first_message("for (i in a b"),
            "Expect ')' after loop expression."
        );
        assert_eq!(first_message("while a) b"), "Expect '(' after 'while'.");
        assert_eq!(messages("for (1 in a) b"), ["Expect for loop variable name."]);
        assert_eq!(messages("for (i of a) b"), ["Expect 'in' after loop variable."]);
        assert_eq!(first_message("while (a b"), "Expect ')' after while condition.");
    }

    #[test]
    fn parse_return_without_value() {
        assert_eq!(dump("return"), "(return)");
        assert_eq!(dump("return\nfoo"), "(return)\nfoo");
        assert_eq!(dump("f { return }"), "(call _ f (body (return)))");
    }

    #[test]
    fn parse_block_statement_errors() {
        assert_eq!(messages("{\n  a b\n}"), ["Expect newline after statement."]);
        assert_eq!(messages("{\n  a\n"), ["Expect '}' after block."]);
    }

    #[test]
    fn parse_bodies() {
        assert_eq!(dump("f {}"), "(call _ f (body (do)))");
        assert_eq!(dump("f {\n}"), "(call _ f (body (do)))");
        assert_eq!(dump("f { |a, b| a }"), "(call _ f (body |a b| a))");
        assert_eq!(dump("f { 1\n}"), "(call _ f (body 1))");
        assert_eq!(first_message("f { 1 2 }"), "Expect '}' at end of block.");
        assert_eq!(messages("f {\n  1\n"), ["Expect '}' at end of block."]);
        assert_eq!(messages("f { |a b }"), ["Expect '|' after block parameters."]);
    }

    #[test]
    fn parse_getter_and_empty_call_differ() {
        let source = SourceBuffer::new("test", "a.b\na.b()");
        let module = parse_ok(&source);
        let arguments: Vec<_> = module
            .statements
            .iter()
            .map(|statement| match statement {
                Stmt::Expression(Expr::Call { arguments, .. }) => arguments.clone(),
                other => panic!("Expected call, got {other:?}"),
            })
            .collect();
        assert_eq!(arguments, [None, Some(vec![])]);
    }

    #[test]
    fn parse_call_chains() {
        assert_eq!(dump("a.b.c"), "(call (call a b) c)");
        assert_eq!(dump("a[1][2]"), "(subscript (subscript a 1) 2)");
        assert_eq!(
            dump("a.b(1) { 2 }.c"),
            "(call (call a b (args 1) (body 2)) c)"
        );
        assert_eq!(dump("f(\n  1,\n  2)"), "(call _ f (args 1 2))");
        assert_eq!(messages("a."), ["Expect method name after '.'."]);
        assert_eq!(messages("f(1"), ["Expect ')' after arguments."]);
        assert_eq!(messages("a[1"), ["Expect ']' after subscript arguments."]);
    }

    #[test]
    fn parse_super_calls() {
        assert_eq!(dump("super(1)"), "(super (args 1))");
        assert_eq!(dump("super.foo { 1 }"), "(super foo (body 1))");
        assert_eq!(messages("super.1"), ["Expect method name after 'super.'."]);
    }

    #[test]
    fn parse_list_literals() {
        assert_eq!(dump("[\n  1,\n  2,\n]"), "(list 1 2)");
        assert_eq!(messages("[1, 2"), ["Expect ']' after list elements."]);
    }

    #[test]
    fn parse_map_with_many_entries() {
        let source = SourceBuffer::new("test", "var m = {\n  \"a\": 1,\n  \"b\": 2,\n  \"c\": 3,\n}");
        let module = parse_ok(&source);
        let Stmt::Var {
            initializer: Some(Expr::Map { entries, .. }),
            ..
        } = &module.statements[0]
        else {
            panic!("Expected map initializer, got {:?}", module.statements[0]);
        };
        let keys: Vec<_> = entries
            .iter()
            .map(|MapEntry { key, .. }| match key {
                Expr::String(token) => token.text().into_owned(),
                other => panic!("Expected string key, got {other:?}"),
            })
            .collect();
        assert_eq!(keys, ["\"a\"", "\"b\"", "\"c\""]);
    }

    #[test]
    fn parse_map_errors() {
        assert_eq!(first_message("var m = {1 2}"), "Expect ':' after map key.");
        assert_eq!(messages("var m = {1: 2"), ["Expect '}' after map entries."]);
        assert_eq!(dump("var m = {}"), "(var m (map))");
    }

    #[test]
    fn parse_interpolation() {
        let source = SourceBuffer::new("test", "\"a %(b) c %(d + 1) e\"");
        let module = parse_ok(&source);
        let Stmt::Expression(Expr::Interpolation {
            strings,
            expressions,
        }) = &module.statements[0]
        else {
            panic!("Expected interpolation, got {:?}", module.statements[0]);
        };
        assert_eq!(strings.len(), expressions.len() + 1);
        assert_eq!(strings.len(), 3);
        assert_eq!(
            strings.iter().map(|s| s.kind()).collect::<Vec<_>>(),
            [
                TokenKind::Interpolation,
                TokenKind::Interpolation,
                TokenKind::String
            ]
        );
    }

    #[test]
    fn parse_nested_interpolation() {
        assert_eq!(
            dump("\"%(\"%(a)\")\""),
            "(interp \"%( (interp \"%( a )\") )\")"
        );
    }

    #[test]
    fn parse_missing_expression_yields_placeholder() {
        let source = SourceBuffer::new("test", "var a = )");
        let parsed = parse(&source);
        assert_eq!(parsed.problems[0].message, "Expect expression.");
        assert_eq!(parsed.problems[0].token.kind(), TokenKind::RightParen);
        let Stmt::Var {
            initializer: Some(Expr::Null(token)),
            ..
        } = &parsed.module.statements[0]
        else {
            panic!("Expected placeholder, got {:?}", parsed.module.statements[0]);
        };
        assert_eq!(token.kind(), TokenKind::RightParen);
    }

    #[test]
    fn parse_consume_always_advances() {
        // The stray `]` is reported and skipped; parsing carries on.
        let source = SourceBuffer::new("test", "(1]\nvar b");
        let parsed = parse(&source);
        assert_eq!(parsed.problems.len(), 1);
        assert_eq!(parsed.problems[0].message, "Expect ')' after expression.");
        assert_eq!(parsed.problems[0].token.text(), "]");
        assert_eq!(dump_module(&parsed.module), "(group 1)\n(var b)");
    }

    #[test]
    fn parse_unexpected_eof() {
        let source = SourceBuffer::new("test", "var");
        let parsed = parse(&source);
        assert_eq!(parsed.problems[0].message, "Expect variable name.");
        assert_eq!(parsed.problems[0].token.kind(), TokenKind::Eof);
    }

    #[test]
    fn parse_deep_nesting_is_reported() {
        let text = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        let source = SourceBuffer::new("test", text);
        let parsed = parse(&source);
        assert!(
            parsed
                .problems
                .iter()
                .any(|p| p.message == "Expression nested too deeply.")
        );
    }

    #[test]
    fn parse_deep_nesting_within_limit() {
        let text = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        let source = SourceBuffer::new("test", text);
        parse_ok(&source);
    }

    #[test]
    fn parse_deep_prefix_and_assignment_chains() {
        for text in [
            "-".repeat(1000) + "a",
            "a = ".repeat(1000) + "a",
            "a ? ".repeat(1000) + "a",
            "if (a) ".repeat(1000) + "a",
        ] {
            let source = SourceBuffer::new("test", text);
            let parsed = parse(&source);
            assert!(!parsed.problems.is_empty());
        }
    }

    #[test]
    fn parse_deep_class_in_method_body() {
        for text in [
            "class A {\n  f {\n".repeat(5_000),
            "foreign class A {\n  f {\n".repeat(5_000),
        ] {
            let source = SourceBuffer::new("test", text);
            let parsed = parse(&source);
            assert!(
                parsed
                    .problems
                    .iter()
                    .any(|p| p.message == "Expression nested too deeply.")
            );
        }
    }

    #[test]
    fn parse_class_in_method_body_within_limit() {
        let text = "class A {\n  f {\n".repeat(10) + &"}\n}\n".repeat(10);
        let source = SourceBuffer::new("test", text);
        let module = parse_ok(&source);
        assert_eq!(module.statements.len(), 1);
    }

    #[test]
    fn parse_collects_lex_errors() {
        let source = SourceBuffer::new("test", "var a = \"open");
        let parsed = parse(&source);
        assert!(parsed.problems.is_empty());
        assert_eq!(parsed.lex_errors.len(), 1);
        assert!(!parsed.is_clean());
    }

    #[test]
    fn problem_display_has_position() {
        let source = SourceBuffer::new("main.wren", "var a = 1\nvar = 2");
        let parsed = parse(&source);
        assert_eq!(
            parsed.problems[0].to_string(),
            "main.wren:2:5: Expect variable name."
        );
        assert_eq!(parsed.problems[0].span(), Span::new(14, 1));
    }

    #[test]
    fn parser_finish_returns_problems() {
        let source = SourceBuffer::new("test", "@\nvar");
        let mut parser = Parser::new(Lexer::new(&source));
        let module = parser.parse_module();
        assert_eq!(module.statements.len(), 2);
        assert!(!parser.problems().is_empty());
        assert_eq!(parser.lex_errors().len(), 1);
        let (problems, lex_errors) = parser.finish();
        assert_eq!(problems[0].message, "Expect expression.");
        assert_eq!(lex_errors.len(), 1);
    }
}
