use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Console front end for the notification queue",
    long_about = "Reads one notification per line from stdin and renders the visible slot.\n\n\
                  Line format: <severity>[@<duration>] <message> [| <label>[=<target>]]...\n\
                  Commands: close, quit."
)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Auto-dismiss delay for success/info notifications (e.g. "2s").
    #[arg(long, value_parser = parse_duration)]
    pub soft_timeout: Option<Duration>,

    /// Auto-dismiss delay for every other severity (e.g. "10s").
    #[arg(long, value_parser = parse_duration)]
    pub hard_timeout: Option<Duration>,

    /// Pause between two notifications (e.g. "500ms").
    #[arg(long, value_parser = parse_duration)]
    pub settle_delay: Option<Duration>,

    /// Emit logs as JSON (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "snackbar=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
