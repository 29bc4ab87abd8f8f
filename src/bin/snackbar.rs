#[path = "snackbar/app.rs"]
mod app;
#[path = "snackbar/cli.rs"]
mod cli;
#[path = "snackbar/input.rs"]
mod input;
#[path = "snackbar/render.rs"]
mod render;

use std::error::Error as StdError;

fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse_args();
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to build tokio runtime: {err}");
            return std::process::ExitCode::from(1);
        }
    };

    let result = runtime.block_on(app::run(cli));
    // A pending stdin read lives on a blocking thread and must not hold up exit.
    runtime.shutdown_background();

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            std::process::ExitCode::from(1)
        }
    }
}

fn report_error(err: &snackbar::error::Error) {
    eprintln!("Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
