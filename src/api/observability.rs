use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Path segments whose next segment is a drama slug or a numeric id.
const KEYED_COLLECTIONS: &[&str] = &[
    "dramas",
    "episodes",
    "seasons",
    "reviews",
    "categories",
    "tags",
    "languages",
    "content-ratings",
    "actors",
    "directors",
    "users",
];

/// Collapses slugs and ids so `/api/v1/dramas/moon-lovers` and
/// `/api/v1/dramas/42` share the `/api/v1/dramas/{key}` series.
fn route_label(path: &str) -> String {
    let mut label = String::with_capacity(path.len());
    let mut previous = "";
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        label.push('/');
        if KEYED_COLLECTIONS.contains(&previous) {
            label.push_str("{key}");
        } else {
            label.push_str(segment);
        }
        previous = segment;
    }
    if label.is_empty() {
        label.push('/');
    }
    label
}

/// Which router served the request: public catalog, account, back office or system.
fn api_area(path: &str) -> &'static str {
    match path.trim_start_matches('/').split('/').nth(1) {
        Some("v1") => "catalog",
        Some("auth") => "account",
        Some("admin") => "admin",
        Some("system") => "system",
        _ => "other",
    }
}

/// Wraps each request in a span and records request count and latency
/// per API area and keyed route. `user_id` is filled in later by the
/// identity middleware.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let route = route_label(&uri);
    let area = api_area(&uri);

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri,
        route = %route,
        area = area,
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        let outcome = match status {
            500.. => "error",
            400..=499 => "client_error",
            _ => "success",
        };

        let labels = [
            ("method", method.clone()),
            ("area", area.to_string()),
            ("route", route),
            ("status", status.to_string()),
        ];

        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms = duration_ms,
            status_code = status,
            user_agent = %user_agent,
            outcome = %outcome,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    #[test]
    fn test_route_label_collapses_keys() {
        assert_eq!(route_label("/api/v1/dramas/moon-lovers"), "/api/v1/dramas/{key}");
        assert_eq!(route_label("/api/v1/dramas/42/seasons"), "/api/v1/dramas/{key}/seasons");
        assert_eq!(
            route_label("/api/admin/users/7/wallet/credit"),
            "/api/admin/users/{key}/wallet/credit"
        );
        assert_eq!(route_label("/api/v1/home"), "/api/v1/home");
        assert_eq!(route_label(""), "/");
    }

    #[test]
    fn test_api_area() {
        assert_eq!(api_area("/api/v1/dramas"), "catalog");
        assert_eq!(api_area("/api/auth/login"), "account");
        assert_eq!(api_area("/api/admin/dashboard"), "admin");
        assert_eq!(api_area("/api/system/health/live"), "system");
        assert_eq!(api_area("/favicon.ico"), "other");
    }

    #[tokio::test]
    async fn test_security_headers_are_set() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(security_headers_middleware))
            .layer(middleware::from_fn(logging_middleware));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    }
}
