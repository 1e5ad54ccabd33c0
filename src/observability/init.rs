//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to the trace resource.
pub const SERVICE_NAME: &str = "zpokedex";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "zpokedex-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter` at `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that exports to
/// `<data dir>/zpokedex-otlp.json`.
///
/// Tracing is optional. If the data directory cannot be created the plugin
/// runs without a subscriber, and an invalid filter falls back to `info`.
/// Calling this more than once is harmless; only the first call installs.
///
/// # Example
///
/// ```rust,no_run
/// use zpokedex::observability::init_tracing;
/// use zpokedex::Config;
///
/// let config = Config {
///     trace_level: Some("zpokedex=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = config
        .trace_level
        .as_deref()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
