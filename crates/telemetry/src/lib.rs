//! Telemetry facade: installs the global `tracing` subscriber.

use bookshop_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the level filter; `RUST_LOG` wins over the configured level.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.log_level).map_err(|err| {
            anyhow::anyhow!("invalid telemetry.log_level '{}': {}", settings.log_level, err)
        }),
    }
}

/// Initialize the tracing/logging pipeline.
///
/// Calling it twice is harmless: the second subscriber is rejected and the
/// first one stays installed.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!(target: "bookshop-telemetry", "tracing subscriber already installed");
        return Ok(());
    }

    tracing::info!(
        target: "bookshop-telemetry",
        format = ?settings.log_format,
        level = %settings.log_level,
        "telemetry initialized"
    );

    Ok(())
}
