//! Route templates for span names and metric labels.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Placeholder for an id segment, named after the collection it follows so
/// templates read like the router's own paths.
fn placeholder(previous: Option<&str>) -> &'static str {
    match previous {
        Some("coupons" | "saved-coupons") => "{coupon}",
        Some("stores" | "store") => "{store}",
        Some("categories" | "category") => "{category}",
        Some("notifications") => "{notification}",
        _ => "{id}",
    }
}

/// Rewrite id segments so that metric labels stay low-cardinality.
fn route_template(path: &str) -> String {
    let mut previous = None;
    let mut segments = Vec::new();

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        if Uuid::parse_str(segment).is_ok() {
            segments.push(placeholder(previous));
        } else {
            segments.push(segment);
        }

        previous = Some(segment);
    }

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "0194f3a2-6b1c-7d2e-9f00-1234567890ab";

    #[test]
    fn ids_are_named_after_their_collection() {
        let names = request_span_name("GET", &format!("/api/coupons/store/{ID}"));

        assert_eq!(names.route, "/api/coupons/store/{store}");
        assert_eq!(names.otel_span_name, "GET /api/coupons/store/{store}");

        assert_eq!(
            route_template(&format!("/api/user/notifications/{ID}/read")),
            "/api/user/notifications/{notification}/read"
        );
        assert_eq!(
            route_template(&format!("/api/user/saved-coupons/{ID}")),
            "/api/user/saved-coupons/{coupon}"
        );
    }

    #[test]
    fn static_routes_keep_their_segments() {
        assert_eq!(route_template("/api/coupons/expiring-soon"), "/api/coupons/expiring-soon");
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn unknown_collections_fall_back_to_id() {
        assert_eq!(route_template(&format!("/api/other/{ID}")), "/api/other/{id}");
    }
}
