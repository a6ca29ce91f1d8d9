// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) for wrenlet.
//!
//! The tree is a closed set of sum types: every statement is a [`Stmt`] and
//! every expression an [`Expr`], with [`Method`] and [`Body`] as the two
//! composite shapes shared between them. Nodes hold the [`Token`]s they were
//! built from (names, operators and keywords) rather than copies of their
//! text, so positions are always available for diagnostics and the whole
//! tree borrows the [`SourceBuffer`](crate::source_analysis::SourceBuffer)
//! it was parsed from.
//!
//! # Example
//!
//! ```
//! use wrenlet_core::ast::{Expr, Stmt};
//! use wrenlet_core::source_analysis::{SourceBuffer, TokenKind, parse};
//!
//! let source = SourceBuffer::new("example", "1 + 2 * 3");
//! let parsed = parse(&source);
//! assert!(parsed.problems.is_empty());
//!
//! let Stmt::Expression(Expr::Infix { operator, right, .. }) = &parsed.module.statements[0] else {
//!     panic!("expected an infix expression");
//! };
//! assert_eq!(operator.kind(), TokenKind::Plus);
//! assert!(matches!(**right, Expr::Infix { .. }));
//! ```

mod dump;

pub use dump::{dump_body, dump_expr, dump_module, dump_stmt};

use crate::source_analysis::Token;

/// The root of a parsed file: its top-level definitions in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module<'src> {
    pub statements: Vec<Stmt<'src>>,
}

impl Module<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A statement or definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt<'src> {
    /// `class Name is Super { methods }`, optionally `foreign`.
    Class(ClassStmt<'src>),

    /// `import "path" for A, B`
    Import {
        keyword: Token<'src>,
        path: Token<'src>,
        /// Names after `for`; `None` when there is no `for` clause.
        variables: Option<Vec<Token<'src>>>,
    },

    /// `var name = initializer`
    Var {
        keyword: Token<'src>,
        name: Token<'src>,
        initializer: Option<Expr<'src>>,
    },

    /// `if (condition) then_branch else else_branch`
    If {
        keyword: Token<'src>,
        condition: Expr<'src>,
        then_branch: Box<Stmt<'src>>,
        else_branch: Option<Box<Stmt<'src>>>,
    },

    /// `for (variable in iterator) body`
    For {
        keyword: Token<'src>,
        variable: Token<'src>,
        iterator: Expr<'src>,
        body: Box<Stmt<'src>>,
    },

    /// `while (condition) body`
    While {
        keyword: Token<'src>,
        condition: Expr<'src>,
        body: Box<Stmt<'src>>,
    },

    /// `return value`; the value is absent when the line ends after `return`.
    Return {
        keyword: Token<'src>,
        value: Option<Expr<'src>>,
    },

    /// `break`
    Break { keyword: Token<'src> },

    /// `{ statements }` in statement position.
    Block {
        left_brace: Token<'src>,
        statements: Vec<Stmt<'src>>,
        right_brace: Token<'src>,
    },

    /// An expression evaluated for its effect.
    Expression(Expr<'src>),
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStmt<'src> {
    /// Present for `foreign class`.
    pub foreign_keyword: Option<Token<'src>>,
    pub keyword: Token<'src>,
    pub name: Token<'src>,
    pub superclass: Option<Token<'src>>,
    pub methods: Vec<Method<'src>>,
}

/// A method definition inside a class body.
///
/// The name is a `name` token for ordinary methods, an operator token for
/// operator overloads (`+(other)`, `-`, `!`), or the `[` token for subscript
/// operators (`[index]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method<'src> {
    pub foreign_keyword: Option<Token<'src>>,
    pub static_keyword: Option<Token<'src>>,
    pub construct_keyword: Option<Token<'src>>,
    pub name: Token<'src>,
    /// `None` for getters (no parameter list at all).
    pub parameters: Option<Vec<Token<'src>>>,
    /// `None` for foreign methods, which have no body.
    pub body: Option<Body<'src>>,
}

/// The body of a method or block argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body<'src> {
    /// Block parameters (`{ |a, b| ... }`), or the method's parameters.
    pub parameters: Option<Vec<Token<'src>>>,
    pub content: BodyContent<'src>,
}

/// What a [`Body`] contains: exactly one of the two forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyContent<'src> {
    /// A body written on one line, `{ value }`, whose single element is its
    /// result.
    ///
    /// The element is usually [`Stmt::Expression`]; `return`, `break`, `if`,
    /// `for` and `while` are accepted there as well.
    Expression(Box<Stmt<'src>>),

    /// A newline-separated statement sequence. Empty for `{}`.
    Statements(Vec<Stmt<'src>>),
}

impl BodyContent<'_> {
    /// Returns `true` for a body with nothing in it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Statements(statements) if statements.is_empty())
    }
}

/// A `key: value` pair in a map literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry<'src> {
    pub key: Expr<'src>,
    pub value: Expr<'src>,
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr<'src> {
    /// `[a, b, c]`
    List {
        left_bracket: Token<'src>,
        elements: Vec<Expr<'src>>,
        right_bracket: Token<'src>,
    },

    /// `{key: value, ...}`
    Map {
        left_brace: Token<'src>,
        entries: Vec<MapEntry<'src>>,
        right_brace: Token<'src>,
    },

    /// `(expression)`
    Grouping {
        left_paren: Token<'src>,
        expression: Box<Expr<'src>>,
        right_paren: Token<'src>,
    },

    /// `this`
    This(Token<'src>),

    /// `null`. Also stands in for an expression that failed to parse, in
    /// which case it holds the offending token.
    Null(Token<'src>),

    /// `true` or `false`
    Bool(Token<'src>),

    /// A number literal.
    Num(Token<'src>),

    /// A string literal without interpolation.
    String(Token<'src>),

    /// `_field`
    Field(Token<'src>),

    /// `__field`
    StaticField(Token<'src>),

    /// `target = value`. The target is not checked for being assignable.
    Assignment {
        target: Box<Expr<'src>>,
        equal: Token<'src>,
        value: Box<Expr<'src>>,
    },

    /// `condition ? then_branch : else_branch`
    Conditional {
        condition: Box<Expr<'src>>,
        question: Token<'src>,
        then_branch: Box<Expr<'src>>,
        colon: Token<'src>,
        else_branch: Box<Expr<'src>>,
    },

    /// `left operator right`
    Infix {
        left: Box<Expr<'src>>,
        operator: Token<'src>,
        right: Box<Expr<'src>>,
    },

    /// `-operand`, `!operand`, `~operand`
    Prefix {
        operator: Token<'src>,
        operand: Box<Expr<'src>>,
    },

    /// A method call: `receiver.name(arguments) { block }`.
    ///
    /// A bare `name` has no receiver. `arguments` is `None` for a getter call
    /// (no parentheses) and `Some(vec![])` for an explicit `()`.
    Call {
        receiver: Option<Box<Expr<'src>>>,
        name: Token<'src>,
        arguments: Option<Vec<Expr<'src>>>,
        block_argument: Option<Box<Body<'src>>>,
    },

    /// `super`, `super.name`, with optional arguments and block.
    Super {
        keyword: Token<'src>,
        name: Option<Token<'src>>,
        arguments: Option<Vec<Expr<'src>>>,
        block_argument: Option<Box<Body<'src>>>,
    },

    /// `receiver[arguments]`
    Subscript {
        receiver: Box<Expr<'src>>,
        left_bracket: Token<'src>,
        arguments: Vec<Expr<'src>>,
        right_bracket: Token<'src>,
    },

    /// `"a %(b) c"`: string segments interleaved with expressions.
    ///
    /// There is always exactly one more string than there are expressions.
    Interpolation {
        strings: Vec<Token<'src>>,
        expressions: Vec<Expr<'src>>,
    },
}
