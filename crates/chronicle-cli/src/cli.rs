//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Archive a guild's channel history and audit log to JSON files.
#[derive(Parser, Debug)]
#[command(name = "chronicle")]
#[command(author, version = env!("CHRONICLE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Output directory (overrides `output_dir` in the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source to archive from: an API base URL or a file:// snapshot
    /// (overrides `source` in the config)
    #[arg(long)]
    pub source: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["chronicle"]);
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["chronicle", "-vv", "--source", "file:///tmp/snap", "-o", "out"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.source.as_deref(), Some("file:///tmp/snap"));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
    }
}
