// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `wrenlet check`: parse every script under a path and report problems.
//!
//! Text output renders each diagnostic with miette on stderr. JSON output
//! writes one object per diagnostic to stdout, one per line, so the result
//! can be piped into other tools. Either way the command fails when any
//! diagnostic is an error.

use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info, instrument};
use wrenlet_core::source_analysis::parse;

use super::{find_source_files, load_source};
use crate::diagnostic::{self, SyntaxDiagnostic};

/// How `check` prints diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Rendered reports with source context
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[instrument(skip_all, fields(path = %path, format = ?format, strict = strict))]
pub fn check(path: &str, format: OutputFormat, strict: bool) -> Result<()> {
    let source_path = Utf8PathBuf::from(path);
    let files = find_source_files(&source_path)?;
    if files.is_empty() {
        miette::bail!("No .wren source files found in '{path}'");
    }
    info!(count = files.len(), "Found source files");

    let mut stdout = io::stdout().lock();
    let mut errors = 0;
    for file in &files {
        let source = load_source(file)?;
        let parsed = parse(&source);
        let diagnostics = diagnostic::collect(&parsed, &source, strict);
        debug!(file = %file, diagnostics = diagnostics.len(), "checked file");

        errors += match format {
            OutputFormat::Text => report_text(diagnostics),
            OutputFormat::Json => write_json(&diagnostics, &mut stdout).into_diagnostic()?,
        };
    }
    stdout.flush().into_diagnostic()?;

    if errors > 0 {
        miette::bail!("Found {errors} error(s) in {} file(s)", files.len());
    }
    if format == OutputFormat::Text {
        eprintln!("Checked {} file(s), no errors", files.len());
    }
    Ok(())
}

/// Renders diagnostics to stderr and returns how many are errors.
pub(super) fn report_text(diagnostics: Vec<SyntaxDiagnostic>) -> usize {
    let mut errors = 0;
    for diagnostic in diagnostics {
        if diagnostic.is_error() {
            errors += 1;
        }
        eprintln!("{:?}", miette::Report::new(diagnostic));
    }
    errors
}

/// Writes diagnostics as JSON lines and returns how many are errors.
fn write_json(diagnostics: &[SyntaxDiagnostic], out: &mut impl Write) -> io::Result<usize> {
    let mut errors = 0;
    for diagnostic in diagnostics {
        if diagnostic.is_error() {
            errors += 1;
        }
        writeln!(out, "{}", diagnostic.to_json())?;
    }
    Ok(errors)
}
