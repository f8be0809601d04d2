use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::warn;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var.
/// Enabled unless the variable is `false` or `0`.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED
        .get_or_init(|| parse_enabled(std::env::var("OBSERVABILITY_ENABLED").ok().as_deref()))
}

fn parse_enabled(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) => v != "false" && v != "0",
        None => true,
    }
}

/// Initialize Prometheus metrics exporter with upkeep task.
/// Returns None if observability is disabled or the recorder cannot be installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let installed = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )
        .and_then(|builder| builder.install_recorder());

    let handle = match installed {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder; metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Label for requests no route matched. Raw paths are never used as
/// labels so unknown URLs cannot create new series.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Route template of the request, e.g. `/tax/tipos/{id}`.
pub fn path_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned())
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = path_label(&req);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router for metrics server
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Auth metrics helpers

pub fn track_login_success(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_logins_total", "role" => role.to_string(), "status" => "success").increment(1);
}

pub fn track_login_failure(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_logins_total", "status" => "failure", "reason" => reason.to_string())
        .increment(1);
}

pub fn track_token_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_tokens_issued_total").increment(1);
}

/// Requests stopped by the gate or the policy.
pub fn track_request_rejected(reason: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_requests_rejected_total", "reason" => reason.to_string()).increment(1);
}

pub fn track_user_registered(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_registered_total", "role" => role.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_parse_enabled() {
        assert!(parse_enabled(None));
        assert!(parse_enabled(Some("true")));
        assert!(parse_enabled(Some("1")));
        assert!(!parse_enabled(Some("false")));
        assert!(!parse_enabled(Some(" FALSE ")));
        assert!(!parse_enabled(Some("0")));
    }

    #[test]
    fn test_path_label_without_matched_route() {
        let req = Request::builder()
            .uri("/some/random/path")
            .body(Body::empty())
            .unwrap();
        assert_eq!(path_label(&req), UNMATCHED_PATH);
    }
}
