// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Output encoding of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines, for interactive runs.
    #[default]
    Text,
    /// One JSON object per event, for cron jobs feeding a log shipper.
    Json,
}

/// Initializes the global `tracing` subscriber.
///
/// Logs go to stderr so stdout stays reserved for progress and reports.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(format: LogFormat) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_log::LogTracer::init()?;
    match format {
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact();
            let subscriber = Registry::default().with(filter).with(fmt_layer);
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339());
            let subscriber = Registry::default().with(filter).with(fmt_layer);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
