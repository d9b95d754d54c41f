//! clfix CLI binary entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use closurefix::cli::{run_analyze, run_fix};
use closurefix::output::{render, ErrorResponse};

/// Closure-stub synthesis for Go syntax trees.
#[derive(Parser)]
#[command(name = "clfix")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a closure synthesis without touching any file.
    Analyze {
        /// Syntax tree interchange document (JSON) from the parser
        #[arg(long)]
        tree: PathBuf,

        /// Target location: line:col (1-indexed)
        #[arg(long)]
        at: String,
    },

    /// Plan a closure synthesis and report (or apply) the edit.
    Run {
        /// Syntax tree interchange document (JSON) from the parser
        #[arg(long)]
        tree: PathBuf,

        /// Target location: line:col (1-indexed)
        #[arg(long)]
        at: String,

        /// Write the modified source (default: dry-run)
        #[arg(long)]
        apply: bool,

        /// Output path for the modified source
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { tree, at } => run_analyze(&tree, &at),
        Commands::Run {
            tree,
            at,
            apply,
            out,
        } => run_fix(&tree, &at, apply, out.as_deref()),
    };

    match result {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render(&ErrorResponse::from_error(&err)));
            ExitCode::from(err.error_code().code())
        }
    }
}
