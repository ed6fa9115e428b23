//! Logging setup utilities for the relay binaries.

use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given targets.
///
/// Every target gets the same level, e.g. `relay_server=debug,relay_server_bin=debug`.
fn default_directive(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `targets` - Crate / binary names to enable (e.g. `["relay-server", "relay_server"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
/// * `log_file` - Optional file that receives a copy of every event (without ANSI colors)
///
/// # Errors
///
/// Returns an error if the log file cannot be opened. In that case no subscriber
/// is installed, so callers may retry without a file.
///
/// # Examples
///
/// ```no_run
/// use relay_shared::logger::setup_logger;
///
/// setup_logger(&["relay-server", "relay_server"], "debug", None).unwrap();
/// ```
pub fn setup_logger(
    targets: &[&str],
    default_log_level: &str,
    log_file: Option<&Path>,
) -> io::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(targets, default_log_level).into()),
        )
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}
