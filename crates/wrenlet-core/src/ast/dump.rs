// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Compact S-expression rendering of syntax trees.
//!
//! The output is meant for humans and tests: every node becomes a
//! parenthesised form headed by its kind (`(var a 1)`, `(+ 1 (* 2 3))`),
//! leaves print their source text, and a placeholder left behind by a syntax
//! error prints as `<error>`.
//!
//! | Node | Form |
//! |------|------|
//! | bare getter call | `name` |
//! | call | `(call receiver-or-_ name (args ...)? body?)` |
//! | body | `(body \|params\|? element)` or `(body \|params\|? (do ...))` |
//! | method | `(method foreign? static? construct? name (params)? body?)` |

use crate::source_analysis::{Token, TokenKind};

use super::{Body, BodyContent, ClassStmt, Expr, MapEntry, Method, Module, Stmt};

/// Renders a module, one top-level statement per line.
#[must_use]
pub fn dump_module(module: &Module<'_>) -> String {
    let mut out = String::new();
    for (i, statement) in module.statements.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        stmt(&mut out, statement);
    }
    out
}

#[must_use]
pub fn dump_stmt(statement: &Stmt<'_>) -> String {
    let mut out = String::new();
    stmt(&mut out, statement);
    out
}

#[must_use]
pub fn dump_expr(expression: &Expr<'_>) -> String {
    let mut out = String::new();
    expr(&mut out, expression);
    out
}

#[must_use]
pub fn dump_body(body: &Body<'_>) -> String {
    let mut out = String::new();
    body_form(&mut out, body);
    out
}

fn token(out: &mut String, token: &Token<'_>) {
    out.push_str(&token.text());
}

/// Writes ` a b c` for a list of name tokens.
fn names(out: &mut String, tokens: &[Token<'_>]) {
    for t in tokens {
        out.push(' ');
        token(out, t);
    }
}

fn exprs(out: &mut String, expressions: &[Expr<'_>]) {
    for e in expressions {
        out.push(' ');
        expr(out, e);
    }
}

fn stmt(out: &mut String, statement: &Stmt<'_>) {
    match statement {
        Stmt::Class(class) => class_form(out, class),
        Stmt::Import {
            path, variables, ..
        } => {
            out.push_str("(import ");
            token(out, path);
            if let Some(variables) = variables {
                out.push_str(" for");
                names(out, variables);
            }
            out.push(')');
        }
        Stmt::Var {
            name, initializer, ..
        } => {
            out.push_str("(var ");
            token(out, name);
            if let Some(initializer) = initializer {
                out.push(' ');
                expr(out, initializer);
            }
            out.push(')');
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            out.push_str("(if ");
            expr(out, condition);
            out.push(' ');
            stmt(out, then_branch);
            if let Some(else_branch) = else_branch {
                out.push(' ');
                stmt(out, else_branch);
            }
            out.push(')');
        }
        Stmt::For {
            variable,
            iterator,
            body,
            ..
        } => {
            out.push_str("(for ");
            token(out, variable);
            out.push(' ');
            expr(out, iterator);
            out.push(' ');
            stmt(out, body);
            out.push(')');
        }
        Stmt::While {
            condition, body, ..
        } => {
            out.push_str("(while ");
            expr(out, condition);
            out.push(' ');
            stmt(out, body);
            out.push(')');
        }
        Stmt::Return { value, .. } => {
            out.push_str("(return");
            if let Some(value) = value {
                out.push(' ');
                expr(out, value);
            }
            out.push(')');
        }
        Stmt::Break { .. } => out.push_str("(break)"),
        Stmt::Block { statements, .. } => {
            out.push_str("(block");
            for s in statements {
                out.push(' ');
                stmt(out, s);
            }
            out.push(')');
        }
        Stmt::Expression(expression) => expr(out, expression),
    }
}

fn class_form(out: &mut String, class: &ClassStmt<'_>) {
    out.push('(');
    if class.foreign_keyword.is_some() {
        out.push_str("foreign ");
    }
    out.push_str("class ");
    token(out, &class.name);
    if let Some(superclass) = &class.superclass {
        out.push_str(" is ");
        token(out, superclass);
    }
    for method in &class.methods {
        out.push(' ');
        method_form(out, method);
    }
    out.push(')');
}

fn method_form(out: &mut String, method: &Method<'_>) {
    out.push_str("(method");
    for keyword in [
        method.foreign_keyword,
        method.static_keyword,
        method.construct_keyword,
    ]
    .iter()
    .flatten()
    {
        out.push(' ');
        token(out, keyword);
    }
    out.push(' ');
    token(out, &method.name);
    if let Some(parameters) = &method.parameters {
        out.push_str(" (");
        out.push_str(&parameter_text(parameters));
        out.push(')');
    }
    if let Some(body) = &method.body {
        out.push(' ');
        body_form(out, body);
    }
    out.push(')');
}

fn parameter_text(parameters: &[Token<'_>]) -> String {
    parameters
        .iter()
        .map(|p| p.text().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

fn body_form(out: &mut String, body: &Body<'_>) {
    out.push_str("(body ");
    if let Some(parameters) = &body.parameters {
        out.push('|');
        out.push_str(&parameter_text(parameters));
        out.push_str("| ");
    }
    match &body.content {
        BodyContent::Expression(element) => stmt(out, element),
        BodyContent::Statements(statements) => {
            out.push_str("(do");
            for s in statements {
                out.push(' ');
                stmt(out, s);
            }
            out.push(')');
        }
    }
    out.push(')');
}

fn call_tail(
    out: &mut String,
    arguments: Option<&[Expr<'_>]>,
    block_argument: Option<&Body<'_>>,
) {
    if let Some(arguments) = arguments {
        out.push_str(" (args");
        exprs(out, arguments);
        out.push(')');
    }
    if let Some(block) = block_argument {
        out.push(' ');
        body_form(out, block);
    }
}

fn expr(out: &mut String, expression: &Expr<'_>) {
    match expression {
        Expr::List { elements, .. } => {
            out.push_str("(list");
            exprs(out, elements);
            out.push(')');
        }
        Expr::Map { entries, .. } => {
            out.push_str("(map");
            for MapEntry { key, value } in entries {
                out.push_str(" (");
                expr(out, key);
                out.push(' ');
                expr(out, value);
                out.push(')');
            }
            out.push(')');
        }
        Expr::Grouping { expression, .. } => {
            out.push_str("(group ");
            expr(out, expression);
            out.push(')');
        }
        Expr::Null(t) if !t.is(TokenKind::Null) => out.push_str("<error>"),
        Expr::This(t)
        | Expr::Null(t)
        | Expr::Bool(t)
        | Expr::Num(t)
        | Expr::String(t)
        | Expr::Field(t)
        | Expr::StaticField(t) => token(out, t),
        Expr::Assignment { target, value, .. } => {
            out.push_str("(= ");
            expr(out, target);
            out.push(' ');
            expr(out, value);
            out.push(')');
        }
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            out.push_str("(? ");
            expr(out, condition);
            out.push(' ');
            expr(out, then_branch);
            out.push(' ');
            expr(out, else_branch);
            out.push(')');
        }
        Expr::Infix {
            left,
            operator,
            right,
        } => {
            out.push('(');
            token(out, operator);
            out.push(' ');
            expr(out, left);
            out.push(' ');
            expr(out, right);
            out.push(')');
        }
        Expr::Prefix { operator, operand } => {
            out.push('(');
            token(out, operator);
            out.push(' ');
            expr(out, operand);
            out.push(')');
        }
        Expr::Call {
            receiver: None,
            name,
            arguments: None,
            block_argument: None,
        } => token(out, name),
        Expr::Call {
            receiver,
            name,
            arguments,
            block_argument,
        } => {
            out.push_str("(call ");
            match receiver {
                Some(receiver) => expr(out, receiver),
                None => out.push('_'),
            }
            out.push(' ');
            token(out, name);
            call_tail(out, arguments.as_deref(), block_argument.as_deref());
            out.push(')');
        }
        Expr::Super {
            name,
            arguments,
            block_argument,
            ..
        } => {
            out.push_str("(super");
            if let Some(name) = name {
                out.push(' ');
                token(out, name);
            }
            call_tail(out, arguments.as_deref(), block_argument.as_deref());
            out.push(')');
        }
        Expr::Subscript {
            receiver,
            arguments,
            ..
        } => {
            out.push_str("(subscript ");
            expr(out, receiver);
            exprs(out, arguments);
            out.push(')');
        }
        Expr::Interpolation {
            strings,
            expressions,
        } => {
            out.push_str("(interp");
            for (i, segment) in strings.iter().enumerate() {
                out.push(' ');
                token(out, segment);
                if let Some(e) = expressions.get(i) {
                    out.push(' ');
                    expr(out, e);
                }
            }
            out.push(')');
        }
    }
}
