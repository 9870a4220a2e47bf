//! Per-request span, access log and HTTP metrics.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, field, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use coupons_app::auth::AuthenticatedSession;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Operational endpoints scraped often enough to drown the access log.
const UNLOGGED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNLOGGED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, req.uri().path());
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.route,
        remote_addr = %req.remote_addr(),
        user_uuid = field::Empty,
        status = field::Empty,
        duration_ms = field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    // Only present when the bearer middleware ran and accepted the token.
    if let Ok(session) = depot.obtain::<AuthenticatedSession>() {
        span.record("user_uuid", field::display(session.user_uuid));
    }

    let status = request_ids::response_status_or_ok(res.status_code);
    let elapsed = started.elapsed();

    metrics::observe_request(&method, &names.route, status.as_u16(), elapsed.as_secs_f64());

    span.in_scope(|| log_completion(&span, status, elapsed));
}

fn log_completion(span: &Span, status: StatusCode, elapsed: Duration) {
    let status_code = status.as_u16();
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("status", status_code);
    span.record("duration_ms", duration_ms);

    if status.is_server_error() {
        error!(status = status_code, duration_ms, "request failed");
    } else if status.is_client_error() {
        warn!(status = status_code, duration_ms, "request rejected");
    } else {
        info!(status = status_code, duration_ms, "request completed");
    }

    if duration_ms > threshold_ms {
        warn!(duration_ms, threshold_ms, "slow request");
    }
}
