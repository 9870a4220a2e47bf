//! Prometheus metrics and the `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 11] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    coupon_uses_total: IntCounter,
    auth_rejections_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<C>(registry: &Registry, collector: prometheus::Result<C>) -> Option<C>
where
    C: Collector + Clone + 'static,
{
    let collector = collector
        .inspect_err(|source| error!("failed to create metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(collector.clone()))
        .inspect_err(|source| error!("failed to register metric: {source}"))
        .ok()?;

    Some(collector)
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new_custom(Some("coupons_json".to_string()), None)
        .inspect_err(|source| error!("failed to create metrics registry: {source}"))
        .ok()?;

    let requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests by method, route and status."),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        IntGauge::new("http_requests_in_flight", "HTTP requests currently being served."),
    )?;

    let coupon_uses_total = register(
        &registry,
        IntCounter::new("coupon_uses_total", "Coupon uses tracked through the API."),
    )?;

    let auth_rejections_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new("auth_rejections_total", "Rejected bearer tokens by reason."),
            &["reason"],
        ),
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        coupon_uses_total,
        auth_rejections_total,
    })
}

/// Holds the in-flight gauge up for the lifetime of a request.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static Metrics>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let metrics = metrics();

        if let Some(metrics) = metrics {
            metrics.requests_in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

pub(crate) fn record_coupon_use() {
    if let Some(metrics) = metrics() {
        metrics.coupon_uses_total.inc();
    }
}

/// `reason` is one of a fixed set of labels, never caller input.
pub(crate) fn record_auth_rejection(reason: &'static str) {
    if let Some(metrics) = metrics() {
        metrics
            .auth_rejections_total
            .with_label_values(&[reason])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    if let Ok(content_type) = HeaderValue::from_str(encoder.format_type()) {
        res.headers_mut().insert(CONTENT_TYPE, content_type);
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
