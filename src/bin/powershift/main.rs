use anyhow::{Context, Result};
use clap::Parser;
use commands::{handle_command, Application};
use powershift::OcError;
use terminal::{LogWriter, Terminal};
use tracing::metadata::LevelFilter;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod commands;
mod terminal;

#[tokio::main]
async fn main() {
    let app = Application::parse();
    let terminal = Terminal::new();

    if let Err(err) = init_logging(terminal.log_writer()) {
        eprintln!("Unable to initialize logging: {:#}", err);
        std::process::exit(1);
    }

    let result = handle_command(app, &terminal).await;

    match result {
        Ok(_) => debug!("Command completed successfully"),
        Err(err) => {
            debug!("Command failed: {:?}", err);
            terminal.println(format!("Failed: {:#}", err));
            std::process::exit(exit_code(&err));
        }
    }
}

/// Pass on the exit code of a failed `oc` invocation, use 1 for anything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<OcError>()
        .and_then(OcError::exit_code)
        .unwrap_or(1)
}

/// Initialize logging for the application.
///
/// Everything at level info and higher is logged to stderr. Users are able to
/// influence this by exporting the `RUST_LOG` environment variable, for
/// example `RUST_LOG=powershift=debug` shows every download and cache
/// decision.
fn init_logging(writer: LogWriter) -> Result<()> {
    // The filter layer controls which log levels to display.
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let log_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(writer);

    Registry::default()
        .with(filter_layer)
        .with(log_layer)
        .try_init()
        .context("unable to initialize logger")?;

    Ok(())
}
