//! Logging, tracing and metrics for the JSON API.

use thiserror::Error;

mod init;
mod logging;
mod metrics;
mod otel;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::{metrics_handler, record_auth_rejection, record_coupon_use};
pub(crate) use request::request_logging;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("OTLP span exporter could not be built: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("a global tracing subscriber is already installed: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
