//! SiteForge CLI - component tree site generator.
//!
//! Provides commands for:
//! - `compile`: Compile one page of a project to HTML, PHP or React
//! - `export`: Export every page of a project plus scaffold files
//! - `validate`: Check project name, page paths and component trees

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CompileArgs, ExportArgs, ValidateArgs};
use output::Output;

/// SiteForge - compile visual page designs into static sites.
#[derive(Parser)]
#[command(name = "siteforge", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a single page.
    Compile(CompileArgs),
    /// Export a whole project to a directory.
    Export(ExportArgs),
    /// Validate a project document.
    Validate(ValidateArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compile(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
