use anyhow::Result;
use clap::Parser;
use erst::cli::{self, Cli, Commands};
use erst::{util, Config};
use std::fs::{self, OpenOptions};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = util::resolve_data_dir(cli.data_dir);

    init_logging(&data_dir);

    let config = Config::load(data_dir);

    match cli.command {
        Commands::Debug(args) => cli::debug::run(args, &config).await,
        Commands::Search(args) => cli::search::run(args, &config),
    }
}

/// Log to <data_dir>/logs/erst.log, or stderr when that file can't be opened
fn init_logging(data_dir: &Path) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    let log_file = fs::create_dir_all(util::logs_dir(data_dir)).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(util::log_file_path(data_dir))
    });

    match log_file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false) // Disable ANSI colors in log file
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}
