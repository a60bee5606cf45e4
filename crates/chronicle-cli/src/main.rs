//! chronicle - archive a guild's channel history and audit log to JSON.
//!
//! This is a thin wrapper over `chronicle-core`: it loads the config file,
//! picks the HTTP or snapshot remote from the source URL and reports progress
//! on the terminal.

mod cli;
mod config;
mod output;
mod source;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chronicle_core::RunReport;

use cli::Cli;
use config::{FileConfig, Overrides};
use output::ConsoleProgress;
use source::CliRemote;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match archive(cli).await {
        Ok(report) if report.has_failures() => {
            output::error("Some channels or audit actions could not be archived.");
            ExitCode::from(2)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}

async fn archive(cli: Cli) -> Result<RunReport> {
    let (config, source) = FileConfig::load(&cli.config)
        .and_then(|file| {
            file.resolve(Overrides {
                output_dir: cli.output,
                source: cli.source,
            })
        })
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    info!(source = %source, output = %config.output_dir().display(), "Starting archival");

    let remote = CliRemote::from_source(&source)?;
    let progress = ConsoleProgress::new(config.output_dir());

    progress.begin(if source.is_local() {
        "Opening snapshot... "
    } else {
        "Connecting to Discord bot... "
    });
    let report = chronicle_core::run(&remote, &config, &progress)
        .await
        .with_context(|| format!("Failed to archive guild {}", config.community_id))?;

    output::field("guild", &format!("{} ({})", report.community.name, report.community.id));
    for phase in report.phases() {
        output::summary(phase);
    }

    Ok(report)
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
