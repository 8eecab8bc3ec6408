//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so stdout only ever carries the rendered envelope.
//! `RUST_LOG` takes precedence over `--log-level`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

pub fn init_logging(log_level: &str, log_format: LogFormat) {
    let subscriber = tracing_subscriber::registry().with(build_filter(log_level));

    match log_format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true);
            let _ = subscriber.with(fmt_layer).try_init();
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false);
            let _ = subscriber.with(fmt_layer).try_init();
        }
    }
}
