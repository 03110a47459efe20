use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConsoleFormat {
    /// Human-readable colored summary
    Text,
    /// Machine-readable JSON summary
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "edustat")]
#[command(about = "Statistics and reporting for a semester-long AI-assisted learning intervention", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full analysis pipeline: load data, compute statistics,
    /// render figures, write the summary report
    Run {
        /// Configuration file (defaults to ./edustat.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the three input CSV files
        #[arg(long)]
        data_root: Option<PathBuf>,

        /// Directory for figures and the report (overrides the config paths)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Console output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ConsoleFormat,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
    /// Write a default edustat.toml in the working directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
