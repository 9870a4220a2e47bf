//! Subscriber assembly: formatter, filter and optional OTLP layer.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::{
    ServerConfig,
    observability::{LogFormat, LoggingConfig},
};

use super::ObservabilityError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Transport crates log at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: [&str; 5] = ["h2", "hyper", "tower", "tonic", "opentelemetry"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        let tracer = provider.tracer(config.observability.otel_service_name.clone());

        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(otel_layer)
        .with(env_filter(&config.logging))
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    }
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(config)))
}

fn default_directives(config: &LoggingConfig) -> String {
    let sql_level = if config.log_sql { "debug" } else { "warn" };

    let mut directives = vec![config.log_level.clone(), format!("sqlx={sql_level}")];

    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(log_sql: bool) -> LoggingConfig {
        LoggingConfig {
            log_level: "debug".to_string(),
            log_format: LogFormat::Compact,
            log_sql,
            slow_request_threshold_ms: 500,
        }
    }

    #[test]
    fn sql_statements_are_quiet_by_default() {
        let directives = default_directives(&logging(false));

        assert!(directives.starts_with("debug,sqlx=warn"), "got {directives}");
        assert!(directives.contains("hyper=warn"), "got {directives}");
    }

    #[test]
    fn log_sql_raises_sqlx_to_debug() {
        assert!(
            default_directives(&logging(true)).contains("sqlx=debug"),
            "sqlx statements should be logged"
        );
    }
}
