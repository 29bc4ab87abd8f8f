use std::path::PathBuf;
use std::time::Duration;

use snackbar::Result;
use snackbar::Snackbar;
use snackbar::config::Config;
use snackbar::error::{ConfigError, Error as SnackbarError};
use snackbar::telemetry::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};

use super::cli::Cli;
use super::input::{Line, parse_line};
use super::render::run_renderer;

const DEFAULT_CONFIG: &str = "snackbar.toml";

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = apply_cli_overrides(Config::from_env_and_file(&config_path)?, &cli)?;

    let filter = cli.log_filter.as_deref().or(config.log.filter.as_deref());
    init_tracing(filter, cli.json_logs || config.log.json)?;

    info!(
        soft_timeout = %humantime::format_duration(config.timing.soft_timeout),
        hard_timeout = %humantime::format_duration(config.timing.hard_timeout),
        settle_delay = %humantime::format_duration(config.timing.settle_delay),
        "snackbar ready, reading notifications from stdin"
    );

    let (notifier, driver) = Snackbar::spawn(config.timing);
    let renderer = tokio::spawn(run_renderer(notifier.subscribe()));

    let interrupted = tokio::select! {
        biased;
        _ = signal::ctrl_c() => {
            info!("shutdown signal received");
            true
        }
        res = feed_stdin(&notifier) => {
            res?;
            false
        }
    };

    if !interrupted {
        tokio::select! {
            _ = signal::ctrl_c() => info!("shutdown signal received while draining"),
            () = drain(&notifier, config.timing.hard_timeout) => {}
        }
    }

    notifier.shutdown();
    if let Err(err) = driver.await {
        warn!(error = %err, "snackbar driver terminated unexpectedly");
    }
    if let Err(err) = renderer.await {
        warn!(error = %err, "renderer task terminated unexpectedly");
    }

    Ok(())
}

/// Forward stdin lines until EOF or `quit`.
async fn feed_stdin(notifier: &Snackbar) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|source| SnackbarError::Stdin { source })?
    {
        match parse_line(&line) {
            Ok(Line::Notify(request)) => notifier.enqueue(request),
            Ok(Line::Close) => notifier.close(),
            Ok(Line::Quit) => break,
            Ok(Line::Blank) => {}
            Err(err) => warn!(error = %err, %line, "ignoring malformed line"),
        }
    }
    Ok(())
}

/// Let the queue run dry. A notification still open after `patience` is
/// closed by hand, which is what ends sticky ones.
async fn drain(notifier: &Snackbar, patience: Duration) {
    loop {
        tokio::select! {
            () = notifier.wait_idle() => return,
            () = tokio::time::sleep(patience) => {
                info!("closing notification left open after input ended");
                notifier.close();
            }
        }
    }
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Result<Config> {
    let overrides = [
        ("cli.soft_timeout", cli.soft_timeout, &mut config.timing.soft_timeout),
        ("cli.hard_timeout", cli.hard_timeout, &mut config.timing.hard_timeout),
        ("cli.settle_delay", cli.settle_delay, &mut config.timing.settle_delay),
    ];
    for (field, value, slot) in overrides {
        let Some(value) = value else { continue };
        if value.is_zero() {
            return Err(SnackbarError::from(ConfigError::InvalidField {
                field,
                message: "duration must be greater than zero".to_string(),
            }));
        }
        *slot = value;
    }
    if config.timing.soft_timeout > config.timing.hard_timeout {
        return Err(SnackbarError::from(ConfigError::InvalidField {
            field: "cli.soft_timeout",
            message: "soft timeout must not exceed hard timeout".to_string(),
        }));
    }
    Ok(config)
}
