// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `wrenlet tokens`: print the token stream of one file.
//!
//! Each token is printed on its own line as `line:column kind "text"`,
//! ending with the `eof` token. Lexical errors are reported on stderr
//! afterwards and never change the exit status.

use std::io::{self, Write};

use camino::Utf8Path;
use miette::{IntoDiagnostic, Result};
use tracing::{info, instrument};
use wrenlet_core::source_analysis::{Lexer, SourceBuffer, TokenKind};

use super::load_source;
use crate::diagnostic::SyntaxDiagnostic;

#[instrument(skip_all, fields(path = %path))]
pub fn tokens(path: &str) -> Result<()> {
    let source = load_source(Utf8Path::new(path))?;

    let mut stdout = io::stdout().lock();
    let diagnostics = write_tokens(&source, &mut stdout).into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    for diagnostic in diagnostics {
        eprintln!("{:?}", miette::Report::new(diagnostic));
    }
    Ok(())
}

/// Writes one line per token and returns the lexical errors met on the way.
fn write_tokens(source: &SourceBuffer, out: &mut impl Write) -> io::Result<Vec<SyntaxDiagnostic>> {
    let mut lexer = Lexer::new(source);
    let mut count = 0_usize;
    loop {
        let token = lexer.read_token();
        writeln!(
            out,
            "{}:{} {:?} {:?}",
            token.line(),
            token.column(),
            token.kind(),
            token.text()
        )?;
        count += 1;
        if token.is(TokenKind::Eof) {
            break;
        }
    }
    info!(tokens = count, errors = lexer.errors().len(), "lexed file");

    Ok(lexer
        .errors()
        .iter()
        .map(|error| SyntaxDiagnostic::from_lex_error(error, source, false))
        .collect())
}
