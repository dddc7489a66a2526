//! melian-feed CLI
//!
//! Fetch catalog lists and records from the command line

use clap::Parser;
use melian_feed::cli::{Cli, Runner};
use melian_feed::LogLevel;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let runner = Runner::new(cli);

    let settings = match runner.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    let level = if runner.cli().verbose {
        LogLevel::Debug
    } else {
        settings.log_level
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::from(level).into()),
        )
        .init();

    if let Err(e) = runner.run(settings).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
