mod commands;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "qaminer",
    version,
    about = "Record extraction for radiotherapy QA reports (Delta4, SNC Patient, ArcCHECK)"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one record per QA report PDF
    Extract {
        /// Paths to PDF files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Read ambiguous dates such as 01/02/2020 as day/month/year
        #[arg(long)]
        day_first: bool,

        /// JSON options file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default), json or rows
        #[arg(short, long, default_value = "table", value_parser = ["table", "json", "rows"])]
        output: String,
    },
    /// Print the reconstructed line sequence of a PDF, for diagnosing layouts
    Lines {
        /// Path to PDF file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        output: String,
    },
    /// List the supported report variants
    Variants {
        /// Also print identifiers and export columns
        #[arg(long)]
        details: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            files,
            day_first,
            config,
            output,
        } => commands::extract::run(files, day_first, config, &output),
        Commands::Lines { input_file, output } => commands::lines::run(input_file, &output),
        Commands::Variants { details } => commands::variants::list(details),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
