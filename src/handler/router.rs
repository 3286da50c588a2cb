//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, body size
//! checks, endpoint dispatch, and per-request access logging. Generic over
//! the body type so tests can drive it with `Full<Bytes>` requests.

use chrono::Local;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::query;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let http_version = version_label(req.version());

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let user_agent = header_string(&req, "user-agent");
    let origin = header_string(&req, "origin");
    let content_length = header_string(&req, "content-length");

    let allow_origin = state.cors.allow_origin(origin.as_deref());

    let body = req.into_body();

    let response = match (&method, path.as_str()) {
        (&Method::POST, "/query") => {
            if let Some(resp) =
                check_body_size(content_length.as_deref(), state.config.http.max_body_size)
            {
                resp
            } else {
                match body.collect().await {
                    Ok(collected) => {
                        query::handle_query(
                            &collected.to_bytes(),
                            &state,
                            allow_origin.as_deref(),
                        )
                        .await
                    }
                    Err(e) => {
                        logger::log_warning(&format!("Failed to read request body: {e}"));
                        http::bad_request("Failed to read request body")
                    }
                }
            }
        }
        (&Method::GET, "/health") => health_response(&state, allow_origin.as_deref()),
        (&Method::OPTIONS, _) => http::build_options_response(allow_origin.as_deref()),
        (_, "/query") => http::build_405_response("POST, OPTIONS"),
        (_, "/health") => http::build_405_response("GET, OPTIONS"),
        _ => http::build_404_response(),
    };

    if state.config.logging.access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// `GET /health` liveness probe
fn health_response(state: &Arc<AppState>, allow_origin: Option<&str>) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "status": "ok",
        "timestamp": Local::now().to_rfc3339(),
    });
    http::json_response(
        StatusCode::OK,
        &body,
        &state.config.http.server_name,
        allow_origin,
    )
}

/// Extract a header as an owned string, skipping non-UTF-8 values
fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(content_length: Option<&str>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = content_length?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

/// Map hyper's version enum to the access-log label
fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SimulationMode};
    use crate::handler::query::QueryResponse;
    use chrono::{DateTime, Local};

    fn test_config() -> Config {
        let mut cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        cfg.simulation.mode = SimulationMode::None;
        cfg.logging.access_log = false;
        cfg
    }

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(test_config()))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().expect("valid addr")
    }

    fn query_request(body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri("/query")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(body.to_string())))
            .expect("valid request")
    }

    async fn send(
        state: &Arc<AppState>,
        req: Request<Full<Bytes>>,
    ) -> (StatusCode, hyper::HeaderMap, Bytes) {
        let resp = handle_request(req, Arc::clone(state), peer())
            .await
            .expect("handler is infallible");
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        (status, headers, body)
    }

    #[tokio::test]
    async fn valid_query_returns_canned_report() {
        let state = test_state();
        let before = Local::now();
        let (status, _, body) = send(&state, query_request(r#"{"input": "hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        let resp: QueryResponse = serde_json::from_slice(&body).expect("response parses");
        assert!(resp.action_logged);
        assert_eq!(resp.output, state.report.body());

        let ts = DateTime::parse_from_rfc3339(&resp.timestamp).expect("timestamp parses");
        assert!(ts >= before.fixed_offset());
    }

    #[tokio::test]
    async fn output_is_independent_of_input() {
        let state = test_state();
        let (_, _, first) = send(&state, query_request(r#"{"input": "alpha"}"#)).await;
        let (_, _, second) = send(&state, query_request(r#"{"input": ""}"#)).await;

        let first: QueryResponse = serde_json::from_slice(&first).expect("parses");
        let second: QueryResponse = serde_json::from_slice(&second).expect("parses");
        assert_eq!(first.output, second.output);
    }

    #[tokio::test]
    async fn empty_input_is_accepted() {
        let state = test_state();
        let (status, _, _) = send(&state, query_request(r#"{"input": ""}"#)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_input_field_is_a_client_error() {
        let state = test_state();
        let (status, _, body) = send(&state, query_request(r#"{"question": "hello"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: serde_json::Value = serde_json::from_slice(&body).expect("error body is json");
        assert!(err.get("error").is_some());
    }

    #[tokio::test]
    async fn non_json_body_is_a_client_error() {
        let state = test_state();
        let (status, _, _) = send(&state, query_request("not json at all")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_on_query_is_method_not_allowed() {
        let state = test_state();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/query")
            .body(Full::new(Bytes::new()))
            .expect("valid request");
        let (status, headers, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers.get("allow").unwrap(), "POST, OPTIONS");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let state = test_state();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/reports/42")
            .body(Full::new(Bytes::new()))
            .expect("valid request");
        let (status, _, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_ok_with_timestamp() {
        let state = test_state();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Full::new(Bytes::new()))
            .expect("valid request");
        let (status, _, body) = send(&state, req).await;
        assert_eq!(status, StatusCode::OK);

        let health: serde_json::Value = serde_json::from_slice(&body).expect("parses");
        assert_eq!(health["status"], "ok");
        DateTime::parse_from_rfc3339(health["timestamp"].as_str().unwrap())
            .expect("timestamp parses");
    }

    #[tokio::test]
    async fn preflight_gets_permissive_cors_by_default() {
        let state = test_state();
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/query")
            .header("origin", "http://localhost:3000")
            .body(Full::new(Bytes::new()))
            .expect("valid request");
        let (status, headers, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    }

    #[tokio::test]
    async fn allow_listed_origin_is_echoed() {
        let mut cfg = test_config();
        cfg.http.cors_allowed_origins = vec!["http://localhost:5173".to_string()];
        let state = Arc::new(AppState::new(cfg));

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/query")
            .header("origin", "http://localhost:5173")
            .body(Full::new(Bytes::new()))
            .expect("valid request");
        let (_, headers, _) = send(&state, req).await;
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn oversized_content_length_is_rejected() {
        let state = test_state();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/query")
            .header("content-length", "999999999")
            .body(Full::new(Bytes::from(r#"{"input": "x"}"#)))
            .expect("valid request");
        let (status, _, _) = send(&state, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
