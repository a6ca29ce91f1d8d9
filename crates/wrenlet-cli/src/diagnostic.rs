// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics rendered with miette.
//!
//! Converts parser problems and lexical errors from wrenlet-core into
//! miette reports with the offending source line and a label under the
//! token that caused them.

// Suppress unused_assignments for struct fields used by derive macros
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use wrenlet_core::source_analysis::{LexError, Problem, SourceBuffer};

/// How much a diagnostic matters to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Where a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexical,
    Syntax,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
        }
    }
}

/// A syntax or lexical diagnostic with source context.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(wrenlet::check))]
pub struct SyntaxDiagnostic {
    pub severity: Severity,
    pub stage: Stage,
    /// Human-readable message
    pub message: String,
    /// 1-based line of the span start
    pub line: usize,
    /// 1-based column of the span start
    pub column: usize,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{label}")]
    pub span: SourceSpan,
    /// Label text (interpolated by miette derive macro)
    pub label: String,
}

impl SyntaxDiagnostic {
    /// Builds a diagnostic for a parser problem. Problems are always errors.
    pub fn from_problem(problem: &Problem<'_>, source: &SourceBuffer) -> Self {
        Self::new(
            Severity::Error,
            Stage::Syntax,
            problem.message.to_string(),
            problem.span().start(),
            problem.span().len(),
            source,
        )
    }

    /// Builds a diagnostic for a lexical error.
    ///
    /// Lexical errors do not stop parsing, so they are warnings unless
    /// `strict` is set.
    pub fn from_lex_error(error: &LexError, source: &SourceBuffer, strict: bool) -> Self {
        let severity = if strict {
            Severity::Error
        } else {
            Severity::Warning
        };
        Self::new(
            severity,
            Stage::Lexical,
            error.kind.to_string(),
            error.span.start(),
            error.span.len(),
            source,
        )
    }

    fn new(
        severity: Severity,
        stage: Stage,
        message: String,
        offset: usize,
        len: usize,
        source: &SourceBuffer,
    ) -> Self {
        Self {
            severity,
            stage,
            message,
            line: source.line_at(offset),
            column: source.column_at(offset),
            src: NamedSource::new(source.id(), source.text().into_owned()),
            span: (offset, len).into(),
            label: format!("{} here", severity.as_str()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The diagnostic as one JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.src.name(),
            "line": self.line,
            "column": self.column,
            "offset": self.span.offset(),
            "length": self.span.len(),
            "severity": self.severity.as_str(),
            "stage": self.stage.as_str(),
            "message": self.message,
        })
    }
}

/// Collects every diagnostic for one parsed buffer, problems first.
pub fn collect(
    parsed: &wrenlet_core::source_analysis::Parsed<'_>,
    source: &SourceBuffer,
    strict: bool,
) -> Vec<SyntaxDiagnostic> {
    parsed
        .problems
        .iter()
        .map(|problem| SyntaxDiagnostic::from_problem(problem, source))
        .chain(
            parsed
                .lex_errors
                .iter()
                .map(|error| SyntaxDiagnostic::from_lex_error(error, source, strict)),
        )
        .collect()
}
