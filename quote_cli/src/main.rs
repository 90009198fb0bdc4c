//! # Moldquote CLI
//!
//! Terminal host for the quote engine: prices a part from typed geometry or
//! from the blueprint analyzer, lists the catalogs, and manages the saved
//! quote history.
//!
//! ```text
//! moldquote quote --file housing.step --material PC --quantity 5000 --cavities 2
//! moldquote quote --volume 12.5 --length 60 --width 40 --height 20 --wall 2 --save
//! moldquote history list
//! ```

mod args;
mod commands;
mod report;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands};

fn main() -> miette::Result<()> {
    let Cli { global, command } = Cli::parse();
    init_logging(global.verbose);

    let result = match command {
        Commands::Quote(args) => commands::quote(args, &global),
        Commands::Materials => commands::materials(&global),
        Commands::Machines => commands::machines(&global),
        Commands::Catalog => commands::catalog(&global),
        Commands::History(cmd) => commands::history(cmd, &global),
    };

    // Structured error for scripts consuming --json output
    if let (Err(e), true) = (&result, global.json) {
        if let Ok(json) = serde_json::to_string_pretty(e) {
            eprintln!("{json}");
        }
    }

    result.into_diagnostic()
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
