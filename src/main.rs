//! csexplain CLI entry point.

use clap::Parser;
use csexplain::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    csexplain::init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Explain(args) => cli::run_explain(args),
        Commands::Features(args) => cli::run_features(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
