//! rarec CLI - Command-line interface for the rewrite-rule table compiler
//!
//! Reads one or more rule-source files, compiles every rule the target can
//! encode, and writes the rendered rewrite table to stdout. Diagnostics
//! (skipped-rule notices, debug output) go to stderr only, so the table
//! text can be redirected into generated headers directly.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rarec_core::{CompileOptions, compile_files};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Verbosity level
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity {
    /// Suppress skip notices
    Quiet,
    /// Skip notices only
    Normal,
    /// Per-file progress
    Verbose,
    /// Debug output
    Debug,
    /// Trace output
    Trace,
}

impl Verbosity {
    fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

/// Compile declarative rewrite rules into a rewrite-table encoding
#[derive(Parser, Debug)]
#[command(name = "rarec")]
#[command(version)]
#[command(about = "Compiles rewrite rules into a compact rewrite-table encoding")]
struct Args {
    /// Rule-source file(s), processed in order
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Emit bare tuples instead of REWRITE(...)/REWRITE_COND(...) macros
    #[arg(long)]
    no_macro: bool,

    /// Do not emit the trailing identifier-enumeration block
    #[arg(long)]
    no_enum_variants: bool,

    /// Verbosity level
    #[arg(short, long, value_enum, default_value = "normal")]
    verbosity: Verbosity,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics must never interleave with the table on stdout.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.verbosity.level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let options = CompileOptions {
        macro_wrap: !args.no_macro,
        emit_enum_variants: !args.no_enum_variants,
    };

    let output = compile_files(&args.files, &options).context("rule compilation failed")?;
    print!("{output}");
    Ok(())
}
