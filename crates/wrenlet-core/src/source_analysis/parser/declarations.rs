// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration and statement parsing for wrenlet.
//!
//! This module handles everything above the expression grammar:
//! - The module loop and its newline separators
//! - `class` / `foreign class` definitions and their methods
//! - `import` and `var` definitions
//! - Control flow statements and `{ ... }` blocks
//! - Method and block-argument bodies

use crate::ast::{Body, BodyContent, ClassStmt, Method, Module, Stmt};
use crate::source_analysis::{Token, TokenKind};

use super::Parser;

impl<'src> Parser<'src> {
    // ========================================================================
    // Module
    // ========================================================================

    /// Parses a whole file.
    ///
    /// Syntax:
    /// ```text
    /// module: "\n"* ( definition ( "\n"+ definition )* )? "\n"* eof
    /// ```
    pub fn parse_module(&mut self) -> Module<'src> {
        self.ignore_line();

        let mut statements = Vec::new();
        while self.peek() != TokenKind::Eof {
            statements.push(self.definition());
            if self.peek() == TokenKind::Eof {
                break;
            }
            self.consume_line("Expect newline.");
        }

        self.consume(TokenKind::Eof, "Expect end of input.");
        Module { statements }
    }

    /// Parses a definition: a class, an import, a variable or a statement.
    pub(super) fn definition(&mut self) -> Stmt<'src> {
        if let Some(keyword) = self.match_kind(TokenKind::Class) {
            return self.nested(Self::missing_statement, |p| {
                Stmt::Class(p.finish_class(None, keyword))
            });
        }

        if let Some(foreign) = self.match_kind(TokenKind::Foreign) {
            let keyword = self.consume(TokenKind::Class, "Expect 'class' after 'foreign'.");
            return self.nested(Self::missing_statement, |p| {
                Stmt::Class(p.finish_class(Some(foreign), keyword))
            });
        }

        if let Some(keyword) = self.match_kind(TokenKind::Import) {
            return self.finish_import(keyword);
        }

        if let Some(keyword) = self.match_kind(TokenKind::Var) {
            let name = self.consume(TokenKind::Name, "Expect variable name.");
            let initializer = self
                .match_kind(TokenKind::Equal)
                .map(|_| self.expression());
            return Stmt::Var {
                keyword,
                name,
                initializer,
            };
        }

        self.statement()
    }

    /// Parses the rest of an import after the `import` keyword.
    ///
    /// Syntax:
    /// ```text
    /// import: "import" String ( "for" "\n"* Name ( "," "\n"* Name )* )?
    /// ```
    fn finish_import(&mut self, keyword: Token<'src>) -> Stmt<'src> {
        let path = self.consume(TokenKind::String, "Expect import path.");

        let variables = self.match_kind(TokenKind::For).map(|_| {
            self.ignore_line();
            let mut variables = Vec::new();
            loop {
                variables.push(self.consume(TokenKind::Name, "Expect imported variable name."));
                if self.match_kind(TokenKind::Comma).is_none() {
                    break;
                }
                self.ignore_line();
            }
            variables
        });

        Stmt::Import {
            keyword,
            path,
            variables,
        }
    }

    // ========================================================================
    // Class Definition Parsing
    // ========================================================================

    /// Parses the rest of a class definition after the `class` keyword.
    ///
    /// Syntax:
    /// ```text
    /// class: "foreign"? "class" Name ( "is" Name )? "{" "\n"* ( method "\n"+ )* method? "}"
    /// ```
    ///
    /// The newline after the last method is optional.
    fn finish_class(
        &mut self,
        foreign_keyword: Option<Token<'src>>,
        keyword: Token<'src>,
    ) -> ClassStmt<'src> {
        let name = self.consume(TokenKind::Name, "Expect class name.");

        let superclass = self
            .match_kind(TokenKind::Is)
            .map(|_| self.consume(TokenKind::Name, "Expect name of superclass."));

        self.consume(TokenKind::LeftBrace, "Expect '{' after class name.");
        self.ignore_line();

        let mut methods = Vec::new();
        loop {
            if self.match_kind(TokenKind::RightBrace).is_some() {
                break;
            }
            if self.peek() == TokenKind::Eof {
                self.consume(TokenKind::RightBrace, "Expect '}' after class body.");
                break;
            }

            methods.push(self.method());

            if self.match_kind(TokenKind::RightBrace).is_some() {
                break;
            }
            self.consume_line("Expect newline after definition in class.");
        }

        ClassStmt {
            foreign_keyword,
            keyword,
            name,
            superclass,
            methods,
        }
    }

    /// Parses one method definition.
    ///
    /// The modifiers are accepted in any combination here; rejecting
    /// combinations such as `static construct` is left to later stages.
    ///
    /// Syntax:
    /// ```text
    /// method: "foreign"? "static"? "construct"? signature body?
    /// signature:
    ///   | "[" parameters "]"
    ///   | infixOperator ( "(" parameters? ")" )?
    ///   | ( "!" | "~" )
    ///   | Name ( "(" parameters? ")" )?
    /// ```
    fn method(&mut self) -> Method<'src> {
        let foreign_keyword = self.match_kind(TokenKind::Foreign);
        let static_keyword = self.match_kind(TokenKind::Static);
        let construct_keyword = self.match_kind(TokenKind::Construct);

        let mut parameters = None;
        let allow_parameters;
        let name = if let Some(left_bracket) = self.match_kind(TokenKind::LeftBracket) {
            parameters = Some(self.parameter_list());
            self.consume(TokenKind::RightBracket, "Expect ']' after parameters.");
            allow_parameters = false;
            left_bracket
        } else if self.peek().is_infix_operator() {
            allow_parameters = true;
            self.consume_next()
        } else if let Some(operator) = self.match_any(&[TokenKind::Bang, TokenKind::Tilde]) {
            allow_parameters = false;
            operator
        } else {
            allow_parameters = true;
            self.consume(TokenKind::Name, "Expect method name.")
        };

        if self.match_kind(TokenKind::LeftParen).is_some() {
            // The list is parsed even where it is not allowed so that the
            // rest of the method lines up.
            if !allow_parameters {
                self.error("A parameter list is not allowed for this method.");
            }

            self.ignore_line();
            let list = if self.match_kind(TokenKind::RightParen).is_some() {
                Vec::new()
            } else {
                let list = self.parameter_list();
                self.ignore_line();
                self.consume(TokenKind::RightParen, "Expect ')' after parameters.");
                list
            };
            parameters = Some(list);
        }

        let body = if foreign_keyword.is_none() {
            self.consume(TokenKind::LeftBrace, "Expect '{' before method body.");
            Some(self.finish_body(parameters.clone()))
        } else {
            None
        };

        Method {
            foreign_keyword,
            static_keyword,
            construct_keyword,
            name,
            parameters,
            body,
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Parses a statement one nesting level deeper.
    pub(super) fn statement(&mut self) -> Stmt<'src> {
        self.nested(Self::missing_statement, Self::parse_statement)
    }

    fn parse_statement(&mut self) -> Stmt<'src> {
        if let Some(keyword) = self.match_kind(TokenKind::Break) {
            return Stmt::Break { keyword };
        }

        if let Some(keyword) = self.match_kind(TokenKind::If) {
            self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.");
            self.ignore_line();
            let condition = self.expression();
            self.consume(TokenKind::RightParen, "Expect ')' after if condition.");
            let then_branch = Box::new(self.statement());
            let else_branch = self
                .match_kind(TokenKind::Else)
                .map(|_| Box::new(self.statement()));
            return Stmt::If {
                keyword,
                condition,
                then_branch,
                else_branch,
            };
        }

        if let Some(keyword) = self.match_kind(TokenKind::For) {
            self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.");
            let variable = self.consume(TokenKind::Name, "Expect for loop variable name.");
            self.consume(TokenKind::In, "Expect 'in' after loop variable.");
            self.ignore_line();
            let iterator = self.expression();
            self.consume(TokenKind::RightParen, "Expect ')' after loop expression.");
            let body = Box::new(self.statement());
            return Stmt::For {
                keyword,
                variable,
                iterator,
                body,
            };
        }

        if let Some(keyword) = self.match_kind(TokenKind::While) {
            self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.");
            self.ignore_line();
            let condition = self.expression();
            self.consume(TokenKind::RightParen, "Expect ')' after while condition.");
            let body = Box::new(self.statement());
            return Stmt::While {
                keyword,
                condition,
                body,
            };
        }

        if let Some(keyword) = self.match_kind(TokenKind::Return) {
            let value = match self.peek() {
                TokenKind::Line | TokenKind::RightBrace | TokenKind::Eof => None,
                _ => Some(self.expression()),
            };
            return Stmt::Return { keyword, value };
        }

        if let Some(left_brace) = self.match_kind(TokenKind::LeftBrace) {
            return self.finish_block(left_brace);
        }

        Stmt::Expression(self.expression())
    }

    /// Parses the rest of a block statement after its `{`.
    fn finish_block(&mut self, left_brace: Token<'src>) -> Stmt<'src> {
        self.ignore_line();

        let mut statements = Vec::new();
        while !matches!(self.peek(), TokenKind::RightBrace | TokenKind::Eof) {
            statements.push(self.definition());

            // The newline after the last statement is optional.
            if self.peek() == TokenKind::RightBrace {
                break;
            }
            self.consume_line("Expect newline after statement.");
        }

        let right_brace = self.consume(TokenKind::RightBrace, "Expect '}' after block.");
        Stmt::Block {
            left_brace,
            statements,
            right_brace,
        }
    }

    // ========================================================================
    // Bodies
    // ========================================================================

    /// Parses the rest of a method or block-argument body after its `{`.
    ///
    /// Syntax:
    /// ```text
    /// body:
    ///   | "}"
    ///   | element "\n"* "}"
    ///   | "\n"+ ( definition "\n"+ )* "}"
    /// ```
    ///
    /// `element` is a `return`, `break`, `if`, `for` or `while` statement, or
    /// else an expression.
    pub(super) fn finish_body(&mut self, parameters: Option<Vec<Token<'src>>>) -> Body<'src> {
        if self.match_kind(TokenKind::RightBrace).is_some() {
            return Body {
                parameters,
                content: BodyContent::Statements(Vec::new()),
            };
        }

        if !self.match_line() {
            let element = match self.peek() {
                TokenKind::Return
                | TokenKind::Break
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While => self.statement(),
                _ => Stmt::Expression(self.expression()),
            };
            self.ignore_line();
            self.consume(TokenKind::RightBrace, "Expect '}' at end of block.");
            return Body {
                parameters,
                content: BodyContent::Expression(Box::new(element)),
            };
        }

        let mut statements = Vec::new();
        if self.match_kind(TokenKind::RightBrace).is_none() {
            loop {
                if self.peek() == TokenKind::Eof {
                    self.consume(TokenKind::RightBrace, "Expect '}' at end of block.");
                    break;
                }

                statements.push(self.definition());
                self.consume_line("Expect newline after statement.");

                if self.match_kind(TokenKind::RightBrace).is_some() {
                    break;
                }
            }
        }

        Body {
            parameters,
            content: BodyContent::Statements(statements),
        }
    }
}
