//! W3C trace context extraction from incoming headers.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract_with(propagator, headers))
}

/// Extract against an empty base so requests without trace headers start a
/// new trace.
fn extract_with(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    let context = propagator.extract_with_context(&Context::new(), &RequestHeaders(headers));
    let valid = context.span().span_context().is_valid();

    valid.then_some(context)
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::HeaderValue;

    use super::*;

    #[test]
    fn traceparent_header_becomes_the_parent() {
        let mut headers = HeaderMap::new();

        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );

        let context = extract_with(&TraceContextPropagator::new(), &headers);

        assert_eq!(
            context.map(|context| context.span().span_context().trace_id().to_string()),
            Some("4bf92f3577b34da6a3ce929d0e0e4736".to_string())
        );
    }

    #[test]
    fn missing_headers_start_a_new_trace() {
        let context = extract_with(&TraceContextPropagator::new(), &HeaderMap::new());

        assert!(context.is_none(), "no parent expected");
    }
}
