//! Shared HTTP response helpers for the GraphQL client.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing) and decoding of the GraphQL response envelope, so the client
//! stays focused on request construction.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
    #[serde(default)]
    extensions: Option<Extensions>,
}

#[derive(Deserialize)]
struct Extensions {
    #[serde(default)]
    code: Option<String>,
}

/// Reject 429 responses before the body is read.
///
/// Returns the response unchanged otherwise. The `Retry-After` header is
/// parsed as seconds, falling back to 60 s if absent or unparseable.
pub fn check_rate_limit(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status() == 429 {
        return Err(ClientError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Decode a GraphQL response body into its `data` object.
///
/// GraphQL errors win over the HTTP status: the remote API reports
/// validation and not-found failures as `errors` with a 200 or 400 status.
/// A non-success status without an error body becomes [`ClientError::Api`].
pub fn decode_envelope(status: u16, body: &str) -> Result<Value, ClientError> {
    let parsed: Result<Envelope, _> = serde_json::from_str(body);
    let success = (200..300).contains(&status);

    match parsed {
        Ok(envelope) if !envelope.errors.is_empty() => {
            let codes = envelope
                .errors
                .iter()
                .filter_map(|e| e.extensions.as_ref().and_then(|x| x.code.clone()))
                .collect();
            let messages = envelope.errors.into_iter().map(|e| e.message).collect();
            Err(ClientError::Graphql { messages, codes })
        }
        Ok(_) if !success => Err(ClientError::Api {
            status,
            message: body.to_string(),
        }),
        Ok(Envelope {
            data: Some(data), ..
        }) if !data.is_null() => Ok(data),
        Ok(_) => Err(ClientError::Parse("response has no data".to_string())),
        Err(_) if !success => Err(ClientError::Api {
            status,
            message: body.to_string(),
        }),
        Err(e) => Err(ClientError::Parse(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mock_response(status: u16) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body("")
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_missing_header() {
        let resp = mock_response(429);
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        let resp = mock_response_with_retry_after(429, "not-a-number");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[test]
    fn check_rate_limit_with_header() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_rate_limit(resp).unwrap_err();
        assert!(matches!(
            err,
            ClientError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[test]
    fn check_rate_limit_passes_other_statuses() {
        assert!(check_rate_limit(mock_response(200)).is_ok());
        assert!(check_rate_limit(mock_response(500)).is_ok());
    }

    #[test]
    fn decode_data() {
        let data = decode_envelope(200, r#"{"data":{"organization":{"id":"org-1"}}}"#).unwrap();
        assert_eq!(data["organization"]["id"], "org-1");
    }

    #[test]
    fn decode_graphql_errors_with_codes() {
        let body = r#"{
            "data": null,
            "errors": [
                {"message": "Entity not found: Issue", "extensions": {"code": "INVALID_INPUT"}},
                {"message": "second"}
            ]
        }"#;
        let err = decode_envelope(400, body).unwrap_err();
        match err {
            ClientError::Graphql { messages, codes } => {
                assert_eq!(messages, vec!["Entity not found: Issue", "second"]);
                assert_eq!(codes, vec!["INVALID_INPUT"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_non_success_without_errors() {
        let err = decode_envelope(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 502, .. }));

        let err = decode_envelope(401, r#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 401, .. }));
    }

    #[test]
    fn decode_missing_data() {
        let err = decode_envelope(200, r#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));

        let err = decode_envelope(200, "not json").unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
