// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `wrenlet parse`: print the syntax tree of one file.
//!
//! The tree is printed even when the file has problems; placeholders left
//! by syntax errors show up as `<error>`.

use camino::Utf8Path;
use miette::Result;
use tracing::{info, instrument};
use wrenlet_core::ast::dump_module;
use wrenlet_core::source_analysis::parse as parse_source;

use super::check::report_text;
use super::load_source;
use crate::diagnostic;

#[instrument(skip_all, fields(path = %path, strict = strict))]
pub fn parse(path: &str, strict: bool) -> Result<()> {
    let source = load_source(Utf8Path::new(path))?;
    let parsed = parse_source(&source);
    info!(statements = parsed.module.statements.len(), "parsed file");

    let tree = dump_module(&parsed.module);
    if !tree.is_empty() {
        println!("{tree}");
    }

    let errors = report_text(diagnostic::collect(&parsed, &source, strict));
    if errors > 0 {
        miette::bail!("Found {errors} error(s) in '{path}'");
    }
    Ok(())
}
