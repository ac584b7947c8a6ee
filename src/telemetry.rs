/*!
 * Telemetry
 * Structured logging setup for hosts of the accessor runtime
 *
 * The runtime itself only emits `tracing` events:
 * - trace: nested-modification skips and hook vetoes
 * - debug: completed mutations with field name and element count
 * - warn: invariant violations in warn mode and failed rollback steps
 */

use crate::core::config::TelemetryConfig;
use crate::core::errors::{AccessorError, AccessorResult};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

/// Initialize tracing from the environment
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - ACCESSOR_TRACE_JSON: Enable JSON output (default: false)
/// - ACCESSOR_LOG_FILE: Append to this file instead of stderr
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    if let Err(e) = init_with(&TelemetryConfig::from_env()) {
        eprintln!("accessor tracing not initialized: {}", e);
    }
}

/// Initialize tracing with explicit settings
///
/// Fails if the filter is invalid, the log file cannot be opened, or a
/// global subscriber is already installed.
pub fn init_with(config: &TelemetryConfig) -> AccessorResult<()> {
    let env_filter = EnvFilter::try_new(&config.filter).map_err(|e| {
        AccessorError::Configuration(format!("invalid log filter '{}': {}", config.filter, e).into())
    })?;

    let (writer, ansi) = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AccessorError::Configuration(
                        format!("cannot open log file {}: {}", path.display(), e).into(),
                    )
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_current_span(true)
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_ansi(ansi)
            .compact()
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| AccessorError::Configuration(format!("tracing already initialized: {}", e).into()))?;

    info!(json = config.json, file = ?config.log_file, "Accessor tracing initialized");
    Ok(())
}
