pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::scan::ScanOptions;

#[derive(Debug, Parser)]
#[command(
    name = "staybot",
    about = "Staybot operator CLI",
    long_about = "Apply migrations, load sample bookings, inspect configuration, and check assistant replies for booking directives.",
    after_help = "Examples:\n  staybot migrate\n  staybot config\n  staybot scan --file reply.txt --catalog data/houses.json\n  echo '<HOUSE_LIST_DATA>{\"guests\": 2}</HOUSE_LIST_DATA>' | staybot scan"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations")]
    Migrate,
    #[command(about = "Apply migrations and load sample bookings into an empty table")]
    Seed,
    #[command(about = "Show effective configuration with source attribution and redaction")]
    Config,
    #[command(about = "Detect, decode, and validate the directive in an assistant reply")]
    Scan {
        #[arg(long, help = "Read the reply from this file instead of stdin")]
        file: Option<PathBuf>,
        #[arg(long, help = "Rank house-list directives against this catalog file")]
        catalog: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => commands::config::run(),
        Command::Scan { file, catalog } => commands::scan::run(ScanOptions { file, catalog }),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
