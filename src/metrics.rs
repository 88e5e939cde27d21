use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

fn parse_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim().to_lowercase();
            v != "false" && v != "0"
        }
        None => true,
    }
}

/// `OBSERVABILITY_ENABLED`, read once. Anything but `false`/`0` enables it.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED
        .get_or_init(|| parse_flag(std::env::var("OBSERVABILITY_ENABLED").ok().as_deref()))
}

/// Installs the Prometheus recorder and spawns its upkeep task.
/// Returns `Ok(None)` when observability is disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let status = response.status().as_u16();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());
    counter!("http_requests_by_status", "status_category" => status_category(status))
        .increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

fn status_category(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Router served on `METRICS_PORT`.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_user_registered() {
    if is_observability_enabled() {
        counter!("users_registered_total").increment(1);
    }
}

pub fn track_login_success(role: &str) {
    if is_observability_enabled() {
        counter!("user_logins_total", "role" => role.to_string(), "status" => "success")
            .increment(1);
    }
}

pub fn track_login_failure(reason: &'static str) {
    if is_observability_enabled() {
        counter!("user_logins_total", "status" => "failure", "reason" => reason).increment(1);
    }
}

pub fn track_jwt_issued() {
    if is_observability_enabled() {
        counter!("jwt_tokens_issued_total").increment(1);
    }
}

pub fn track_exam_created(subjects: usize) {
    if is_observability_enabled() {
        counter!("exams_created_total").increment(1);
        histogram!("exam_subjects_per_exam").record(subjects as f64);
    }
}

/// One increment per saved record, labelled by status.
pub fn track_attendance_saved(present: usize, absent: usize, late: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("attendance_records_saved_total", "status" => "present").increment(present as u64);
    counter!("attendance_records_saved_total", "status" => "absent").increment(absent as u64);
    counter!("attendance_records_saved_total", "status" => "late").increment(late as u64);
}

pub fn track_marks_saved(count: usize) {
    if is_observability_enabled() {
        counter!("marks_saved_total").increment(count as u64);
    }
}

pub fn track_points_awarded(points: i32, badge: bool) {
    if !is_observability_enabled() {
        return;
    }
    counter!("points_awarded_total").increment(points.max(0) as u64);
    if badge {
        counter!("badges_awarded_total").increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults_to_enabled() {
        assert!(parse_flag(None));
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("yes")));
    }

    #[test]
    fn test_flag_disabled_values() {
        assert!(!parse_flag(Some("false")));
        assert!(!parse_flag(Some("FALSE")));
        assert!(!parse_flag(Some(" 0 ")));
    }

    #[test]
    fn test_status_category() {
        assert_eq!(status_category(201), "2xx");
        assert_eq!(status_category(302), "3xx");
        assert_eq!(status_category(404), "4xx");
        assert_eq!(status_category(503), "5xx");
        assert_eq!(status_category(101), "other");
    }
}
