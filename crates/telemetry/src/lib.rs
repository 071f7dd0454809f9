//! Logging and tracing bootstrap for LIBRIS.

use libris_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing pipeline. `RUST_LOG` wins over the configured
/// filter so operators can turn verbosity up without editing config files.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    let result = match settings.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    result.map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::info!(format = ?settings.log_format, "telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_installs_once_and_rejects_a_second_subscriber() {
        let settings = TelemetrySettings::default();
        assert!(init(&settings).is_ok());
        // The global subscriber slot is taken now.
        assert!(init(&settings).is_err());
    }
}
