// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for wrenlet.
//!
//! Precedence climbing from assignment down to primaries:
//!
//! - Assignment (`=`) and the conditional operator (`?:`), both right
//!   associative
//! - Twelve left-associative infix levels, driven by [`INFIX_LEVELS`]
//! - Prefix operators (`-`, `!`, `~`)
//! - Call chains (`.name(args) { block }`, `[args]`)
//! - Literals, groupings, collections, `super` and string interpolation

use crate::ast::{Body, Expr, MapEntry};
use crate::source_analysis::{Token, TokenKind};

use super::Parser;

/// The left-associative infix operators, loosest level first.
const INFIX_LEVELS: &[&[TokenKind]] = &[
    &[TokenKind::PipePipe],
    &[TokenKind::AmpAmp],
    &[TokenKind::EqualEqual, TokenKind::BangEqual],
    &[TokenKind::Is],
    &[
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
    ],
    &[TokenKind::Pipe],
    &[TokenKind::Caret],
    &[TokenKind::Amp],
    &[TokenKind::LessLess, TokenKind::GreaterGreater],
    &[TokenKind::DotDot, TokenKind::DotDotDot],
    &[TokenKind::Plus, TokenKind::Minus],
    &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
];

/// Arguments and block argument following a call's name.
type CallTail<'src> = (Option<Vec<Expr<'src>>>, Option<Box<Body<'src>>>);

impl<'src> Parser<'src> {
    // ========================================================================
    // Expression Parsing
    // ========================================================================

    /// Parses any expression.
    ///
    /// Entry point for expression parsing. Each call is one nesting level;
    /// see [`Parser::nested`].
    pub(super) fn expression(&mut self) -> Expr<'src> {
        self.nested(Expr::Null, Self::assignment)
    }

    /// `assignment: conditional ( "=" assignment )?`
    ///
    /// Any expression is accepted as the target.
    fn assignment(&mut self) -> Expr<'src> {
        let target = self.conditional();
        let Some(equal) = self.match_kind(TokenKind::Equal) else {
            return target;
        };

        let value = self.nested(Expr::Null, Self::assignment);
        Expr::Assignment {
            target: Box::new(target),
            equal,
            value: Box::new(value),
        }
    }

    /// `conditional: logicalOr ( "?" conditional ":" assignment )?`
    fn conditional(&mut self) -> Expr<'src> {
        let condition = self.infix(0);
        let Some(question) = self.match_kind(TokenKind::Question) else {
            return condition;
        };

        let then_branch = self.nested(Expr::Null, Self::conditional);
        let colon = self.consume(
            TokenKind::Colon,
            "Expect ':' after then branch of conditional operator.",
        );
        let else_branch = self.nested(Expr::Null, Self::assignment);

        Expr::Conditional {
            condition: Box::new(condition),
            question,
            then_branch: Box::new(then_branch),
            colon,
            else_branch: Box::new(else_branch),
        }
    }

    /// Parses the infix level at `level` in [`INFIX_LEVELS`]; past the last
    /// level this is a prefix expression.
    ///
    /// Newlines after an operator are ignored so long expressions can wrap.
    fn infix(&mut self, level: usize) -> Expr<'src> {
        let Some(operators) = INFIX_LEVELS.get(level) else {
            return self.prefix();
        };

        let mut left = self.infix(level + 1);
        while let Some(operator) = self.match_any(operators) {
            self.ignore_line();
            let right = self.infix(level + 1);
            left = Expr::Infix {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        left
    }

    /// `prefix: ( "-" | "!" | "~" ) prefix | call`
    fn prefix(&mut self) -> Expr<'src> {
        if !self.peek().is_prefix_operator() {
            return self.call();
        }
        let operator = self.consume_next();

        let operand = self.nested(Expr::Null, Self::prefix);
        Expr::Prefix {
            operator,
            operand: Box::new(operand),
        }
    }

    /// `call: primary ( "[" arguments "]" | "." Name callTail )*`
    fn call(&mut self) -> Expr<'src> {
        let mut expr = self.primary();

        loop {
            if let Some(left_bracket) = self.match_kind(TokenKind::LeftBracket) {
                let arguments = self.argument_list();
                let right_bracket = self.consume(
                    TokenKind::RightBracket,
                    "Expect ']' after subscript arguments.",
                );
                expr = Expr::Subscript {
                    receiver: Box::new(expr),
                    left_bracket,
                    arguments,
                    right_bracket,
                };
            } else if self.match_kind(TokenKind::Dot).is_some() {
                let name = self.consume(TokenKind::Name, "Expect method name after '.'.");
                expr = self.method_call(Some(expr), name);
            } else {
                break;
            }
        }

        expr
    }

    /// Builds a call to `name` on `receiver`, parsing its arguments.
    fn method_call(&mut self, receiver: Option<Expr<'src>>, name: Token<'src>) -> Expr<'src> {
        let (arguments, block_argument) = self.finish_call();
        Expr::Call {
            receiver: receiver.map(Box::new),
            name,
            arguments,
            block_argument,
        }
    }

    /// Parses the optional argument list and block argument of a call.
    ///
    /// Syntax:
    /// ```text
    /// callTail: ( "(" arguments? ")" )? ( "{" ( "|" parameters "|" )? body )?
    /// ```
    ///
    /// No parentheses at all gives `None` (a getter); `()` gives an empty
    /// list.
    fn finish_call(&mut self) -> CallTail<'src> {
        let arguments = if self.match_kind(TokenKind::LeftParen).is_some() {
            if self.match_kind(TokenKind::RightParen).is_some() {
                Some(Vec::new())
            } else {
                let arguments = self.argument_list();
                self.consume(TokenKind::RightParen, "Expect ')' after arguments.");
                Some(arguments)
            }
        } else {
            None
        };

        let block_argument = if self.match_kind(TokenKind::LeftBrace).is_some() {
            let parameters = self.match_kind(TokenKind::Pipe).map(|_| {
                let parameters = self.parameter_list();
                self.consume(TokenKind::Pipe, "Expect '|' after block parameters.");
                parameters
            });
            Some(Box::new(self.finish_body(parameters)))
        } else {
            None
        };

        (arguments, block_argument)
    }

    /// `arguments: expression ( "," "\n"* expression )*`
    fn argument_list(&mut self) -> Vec<Expr<'src>> {
        let mut arguments = Vec::new();

        self.ignore_line();
        loop {
            arguments.push(self.expression());
            if self.match_kind(TokenKind::Comma).is_none() {
                break;
            }
            self.ignore_line();
        }

        arguments
    }

    /// `parameters: Name ( "," "\n"* Name )*`
    pub(super) fn parameter_list(&mut self) -> Vec<Token<'src>> {
        let mut parameters = Vec::new();

        loop {
            parameters.push(self.consume(TokenKind::Name, "Expect parameter name."));
            if self.match_kind(TokenKind::Comma).is_none() {
                break;
            }
            self.ignore_line();
        }

        parameters
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    /// Parses a primary expression.
    ///
    /// A bare name is a call with no receiver, so `foo`, `foo(1)` and
    /// `foo { ... }` all parse here. Anything that cannot start an
    /// expression is reported and left in place; the result is then an
    /// [`Expr::Null`] holding that token.
    fn primary(&mut self) -> Expr<'src> {
        let token = self.lookahead();
        match token.kind() {
            TokenKind::LeftParen => {
                self.consume_next();
                self.grouping(token)
            }
            TokenKind::LeftBracket => {
                self.consume_next();
                self.list_literal(token)
            }
            TokenKind::LeftBrace => {
                self.consume_next();
                self.map_literal(token)
            }
            TokenKind::Name => {
                self.consume_next();
                self.method_call(None, token)
            }
            TokenKind::Super => {
                self.consume_next();
                self.super_call(token)
            }
            TokenKind::True | TokenKind::False => Expr::Bool(self.consume_next()),
            TokenKind::Null => Expr::Null(self.consume_next()),
            TokenKind::This => Expr::This(self.consume_next()),
            TokenKind::Field => Expr::Field(self.consume_next()),
            TokenKind::StaticField => Expr::StaticField(self.consume_next()),
            TokenKind::Number => Expr::Num(self.consume_next()),
            TokenKind::String => Expr::String(self.consume_next()),
            TokenKind::Interpolation => self.string_interpolation(),
            _ => {
                self.error("Expect expression.");
                Expr::Null(token)
            }
        }
    }

    /// `grouping: "(" expression ")"`
    fn grouping(&mut self, left_paren: Token<'src>) -> Expr<'src> {
        let expression = self.expression();
        let right_paren = self.consume(TokenKind::RightParen, "Expect ')' after expression.");
        Expr::Grouping {
            left_paren,
            expression: Box::new(expression),
            right_paren,
        }
    }

    /// `list: "[" ( expression ( "," expression )* ","? )? "]"`
    fn list_literal(&mut self, left_bracket: Token<'src>) -> Expr<'src> {
        let mut elements = Vec::new();

        self.ignore_line();
        while self.peek() != TokenKind::RightBracket {
            elements.push(self.expression());

            self.ignore_line();
            if self.match_kind(TokenKind::Comma).is_none() {
                break;
            }
            self.ignore_line();
        }

        let right_bracket =
            self.consume(TokenKind::RightBracket, "Expect ']' after list elements.");
        Expr::List {
            left_bracket,
            elements,
            right_bracket,
        }
    }

    /// `map: "{" ( entry ( "," entry )* ","? )? "}"` where
    /// `entry: expression ":" expression`
    fn map_literal(&mut self, left_brace: Token<'src>) -> Expr<'src> {
        let mut entries = Vec::new();

        self.ignore_line();
        while self.peek() != TokenKind::RightBrace {
            let key = self.expression();
            self.consume(TokenKind::Colon, "Expect ':' after map key.");
            let value = self.expression();
            entries.push(MapEntry { key, value });

            self.ignore_line();
            if self.match_kind(TokenKind::Comma).is_none() {
                break;
            }
            self.ignore_line();
        }

        let right_brace = self.consume(TokenKind::RightBrace, "Expect '}' after map entries.");
        Expr::Map {
            left_brace,
            entries,
            right_brace,
        }
    }

    /// `super: "super" ( "." Name )? callTail`
    fn super_call(&mut self, keyword: Token<'src>) -> Expr<'src> {
        let name = self
            .match_kind(TokenKind::Dot)
            .map(|_| self.consume(TokenKind::Name, "Expect method name after 'super.'."));
        let (arguments, block_argument) = self.finish_call();
        Expr::Super {
            keyword,
            name,
            arguments,
            block_argument,
        }
    }

    /// `interpolation: ( Interpolation expression )+ String`
    ///
    /// The lexer guarantees the closing `string` token for well-formed input;
    /// it is only missing when the literal runs into end of input.
    fn string_interpolation(&mut self) -> Expr<'src> {
        let mut strings = Vec::new();
        let mut expressions = Vec::new();

        while let Some(segment) = self.match_kind(TokenKind::Interpolation) {
            strings.push(segment);
            expressions.push(self.expression());
        }
        strings.push(self.consume(TokenKind::String, "Expect end of string interpolation."));

        Expr::Interpolation {
            strings,
            expressions,
        }
    }
}
