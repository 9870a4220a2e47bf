//! Process-global observability runtime settings.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::ServerConfig;

const DEFAULT_SLOW_REQUEST_THRESHOLD_MS: u64 = 500;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(DEFAULT_SLOW_REQUEST_THRESHOLD_MS);
static OTEL_PARENT_PROPAGATION_ENABLED: AtomicBool = AtomicBool::new(false);

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    let observability = &config.observability;

    SLOW_REQUEST_THRESHOLD_MS.store(config.logging.slow_request_threshold_ms, Ordering::Relaxed);

    // Parent extraction needs the global propagator, which only exists with OTLP export on.
    OTEL_PARENT_PROPAGATION_ENABLED.store(
        observability.otel_enabled && observability.otel_parent_propagation_enabled,
        Ordering::Relaxed,
    );
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed)
}

pub(super) fn otel_parent_propagation_enabled() -> bool {
    OTEL_PARENT_PROPAGATION_ENABLED.load(Ordering::Relaxed)
}
