use anyhow::Result;
use clap::Parser;
use edustat::cli::{Cli, Commands};
use edustat::commands::run::RunConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data_root,
            output_dir,
            format,
            verbosity,
        } => {
            init_logging(verbosity);
            edustat::commands::run::handle_run(RunConfig {
                config,
                data_root,
                output_dir,
                format,
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            edustat::commands::init::init_config(force)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
