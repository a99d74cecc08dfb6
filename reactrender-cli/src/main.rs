//! reactrender — render component-bearing templates from the command line.
//!
//! # Usage
//!
//! ```text
//! reactrender render <template> [--templates-dir DIR] [--data FILE] [--rendering MODE]
//!                               [--socket PATH] [--cache-dir DIR] [--trace] [--path PATH]
//! reactrender config init [--force]
//! reactrender config show
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{config::ConfigCommand, render::RenderArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "reactrender",
    version,
    about = "Render templates with server- and client-side component helpers",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template to stdout.
    Render(RenderArgs),

    /// Manage the reactrender config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}

/// Log to stderr so stdout carries only rendered markup.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
