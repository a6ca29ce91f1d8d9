// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations, plus the file loading they share.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use tracing::debug;
use wrenlet_core::source_analysis::SourceBuffer;

pub mod check;
pub mod parse;
pub mod tokens;

/// File extension of wrenlet scripts.
const SOURCE_EXTENSION: &str = "wren";

/// Reads a file into a [`SourceBuffer`] named after its path.
///
/// The bytes are taken as-is; invalid UTF-8 is left for the lexer to report.
pub fn load_source(path: &Utf8Path) -> Result<SourceBuffer> {
    let bytes = fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{path}'"))?;
    debug!(path = %path, bytes = bytes.len(), "loaded source");
    Ok(SourceBuffer::new(path.as_str(), bytes))
}

/// Find all `.wren` source files at the given path.
///
/// A file is returned as-is whatever its extension, so a single script can
/// be checked without renaming it. A directory is searched recursively.
pub fn find_source_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        collect_wren_files_recursive(path, &mut files)?;
        files.sort();
    } else {
        miette::bail!("Path '{}' does not exist", path);
    }

    Ok(files)
}

/// Recursively collect all `.wren` files from a directory tree.
///
/// Symlinks are skipped to avoid potential infinite recursion from circular links.
fn collect_wren_files_recursive(dir: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read directory '{dir}'"))?
    {
        let entry = entry.into_diagnostic()?;
        let file_type = entry.file_type().into_diagnostic()?;
        if file_type.is_symlink() {
            continue;
        }
        let entry_path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|_| miette::miette!("Non-UTF-8 path"))?;

        if file_type.is_dir() {
            collect_wren_files_recursive(&entry_path, files)?;
        } else if file_type.is_file() && entry_path.extension() == Some(SOURCE_EXTENSION) {
            files.push(entry_path);
        }
    }
    Ok(())
}
