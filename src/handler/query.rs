//! Query endpoint module
//!
//! The single business endpoint: accept a free-form input, pretend to
//! process it, and answer with the canned report. The response is a pure
//! function of wall-clock time; `input` is deserialized (so schema errors
//! surface as 400s) but deliberately never read by response construction.

use chrono::Local;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Incoming query. No length or content validation is performed.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub input: String,
}

/// Outgoing report envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub output: String,
    pub timestamp: String,
    pub action_logged: bool,
}

/// Parse a raw request body into a `QueryRequest`.
pub fn parse_query_request(body: &[u8]) -> Result<QueryRequest, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Build the response envelope around a fixed output body.
///
/// `timestamp` is the local clock at construction time, RFC 3339.
/// `action_logged` is always true; no code path records anything else.
pub fn build_query_response(output: &str) -> QueryResponse {
    QueryResponse {
        output: output.to_string(),
        timestamp: Local::now().to_rfc3339(),
        action_logged: true,
    }
}

/// Handle `POST /query`: validate the body, run the configured latency
/// simulation, then answer with the fixed report.
pub async fn handle_query(
    body: &[u8],
    state: &Arc<AppState>,
    allow_origin: Option<&str>,
) -> Response<Full<Bytes>> {
    let request = match parse_query_request(body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_warning(&format!("Rejected malformed query body: {e}"));
            return http::bad_request(&format!("Invalid request body: {e}"));
        }
    };

    logger::log_query_received(request.input.len(), state.config.logging.access_log);

    state.latency.apply().await;

    let response = build_query_response(state.report.body());
    http::json_response(
        StatusCode::OK,
        &response,
        &state.config.http.server_name,
        allow_origin,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local};

    #[test]
    fn parses_a_valid_body() {
        let req = parse_query_request(br#"{"input": "hello"}"#).expect("should parse");
        assert_eq!(req.input, "hello");
    }

    #[test]
    fn empty_input_is_valid() {
        let req = parse_query_request(br#"{"input": ""}"#).expect("should parse");
        assert_eq!(req.input, "");
    }

    #[test]
    fn missing_input_field_is_rejected() {
        assert!(parse_query_request(br#"{"query": "hello"}"#).is_err());
        assert!(parse_query_request(b"not json").is_err());
        assert!(parse_query_request(b"").is_err());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let req =
            parse_query_request(br#"{"input": "hi", "session": 42}"#).expect("should parse");
        assert_eq!(req.input, "hi");
    }

    #[test]
    fn response_always_reports_action_logged() {
        let resp = build_query_response("report body");
        assert!(resp.action_logged);
        assert_eq!(resp.output, "report body");
    }

    #[test]
    fn response_timestamp_is_rfc3339_and_not_in_the_past() {
        let before = Local::now();
        let resp = build_query_response("x");
        let ts = DateTime::parse_from_rfc3339(&resp.timestamp).expect("timestamp should parse");
        assert!(ts >= before.fixed_offset());
    }
}
