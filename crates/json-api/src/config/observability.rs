//! Logging & Tracing Config

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line events.
    Compact,

    /// One JSON object per event, including the active span list.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default level for the server's own targets
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log every SQL statement sqlx executes
    #[arg(long, env = "LOG_SQL", default_value_t = false)]
    pub log_sql: bool,

    /// Requests slower than this are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 500)]
    pub slow_request_threshold_ms: u64,
}

/// OpenTelemetry trace export settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export spans over OTLP
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces from incoming `traceparent` headers
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC endpoint
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// OTLP export timeout in seconds
    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otel_exporter_otlp_timeout_seconds: u64,

    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "coupons-json")]
    pub otel_service_name: String,

    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub otel_service_version: String,

    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub otel_deployment_environment: String,

    /// Fraction of root traces sampled, clamped to [0.0, 1.0]
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub otel_trace_sample_ratio: f64,
}
