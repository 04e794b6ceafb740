//! Main entry point for the tablediff CLI

use clap::Parser;
use tablediff::cli::Cli;
use tablediff::commands::execute;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
