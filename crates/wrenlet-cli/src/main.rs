// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Wrenlet command-line interface.
//!
//! This is the main entry point for the `wrenlet` command.

use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod diagnostic;

use commands::check::OutputFormat;

/// Wrenlet: lex, parse and check wrenlet scripts
#[derive(Debug, Parser)]
#[command(name = "wrenlet")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: info, -vv: debug, -vvv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token stream of a source file
    Tokens {
        /// Source file to tokenize
        path: String,
    },

    /// Print the syntax tree of a source file
    Parse {
        /// Source file to parse
        path: String,

        /// Treat lexical errors as failures
        #[arg(long)]
        strict: bool,
    },

    /// Check source files for syntax errors
    Check {
        /// Source file or directory to check
        #[arg(default_value = ".")]
        path: String,

        /// Output format for diagnostics
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Treat lexical errors as failures
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Tokens { path } => commands::tokens::tokens(&path),
        Command::Parse { path, strict } => commands::parse::parse(&path, strict),
        Command::Check {
            path,
            format,
            strict,
        } => commands::check::check(&path, format, strict),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "wrenlet=warn,wrenlet_core=warn",
        1 => "wrenlet=info,wrenlet_core=info",
        2 => "wrenlet=debug,wrenlet_core=debug",
        _ => "wrenlet=trace,wrenlet_core=trace",
    }
}
