//! The authentication decision function.

use base64::{Engine as _, engine::general_purpose};

use crate::edge::event::{EdgeRequest, EdgeResponse, HeaderEntry, Headers, Verdict};
use crate::services::credentials::Credentials;

const AUTHORIZATION: &str = "authorization";
const WWW_AUTHENTICATE: &str = "www-authenticate";

/// Why a request was denied. Surfaces only in logs and the diagnostic body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingAuthorizationHeader,
    CredentialMismatch,
}

impl DenyReason {
    fn as_str(self) -> &'static str {
        match self {
            DenyReason::MissingAuthorizationHeader => "missing authorization header",
            DenyReason::CredentialMismatch => {
                "authorization header does not match the expected credentials"
            }
        }
    }
}

/// The exact `Authorization` value a client must present for `credentials`.
pub fn challenge_for(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", general_purpose::STANDARD.encode(pair))
}

/// Decides whether `request` may pass to the origin.
///
/// The comparison is an exact string match against the computed challenge
/// value. No base64 decoding, padding normalization or whitespace trimming
/// is applied; the client presents the byte-exact value or is denied. Only
/// the first recorded `authorization` value is consulted. On admission the
/// `authorization` entry is stripped before the request is returned.
pub fn evaluate(credentials: &Credentials, mut request: EdgeRequest) -> Verdict {
    let expected = challenge_for(credentials);

    let received = match request.headers.first_value(AUTHORIZATION) {
        Some(value) => value.to_owned(),
        None => {
            tracing::warn!(reason = "missing_authorization_header", "request denied");
            return Verdict::Deny(deny(DenyReason::MissingAuthorizationHeader, None));
        }
    };

    if received != expected {
        tracing::warn!(reason = "credential_mismatch", "request denied");
        return Verdict::Deny(deny(DenyReason::CredentialMismatch, Some(&received)));
    }

    request.headers.remove(AUTHORIZATION);
    tracing::debug!("request admitted");
    Verdict::Forward(request)
}

/// Builds the terminal 401. The shape is a contract with the CDN layer:
/// `status` must be the literal string `"401"` and the challenge header
/// must be exactly `WWW-Authenticate: Basic`.
fn deny(reason: DenyReason, received: Option<&str>) -> EdgeResponse {
    let mut headers = Headers::default();
    headers.set(
        WWW_AUTHENTICATE,
        HeaderEntry::new("WWW-Authenticate", "Basic"),
    );

    // Diagnostic only. The body reports what the client sent, never the
    // expected challenge value.
    let body = match received {
        Some(value) => format!("{} (received: {})", reason.as_str(), value),
        None => reason.as_str().to_string(),
    };

    EdgeResponse {
        status: "401".to_string(),
        status_description: "Unauthorized".to_string(),
        headers,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials {
            username: "kromid".to_string(),
            password: "kromid".to_string(),
        }
    }

    fn request_with_headers(headers: serde_json::Value) -> EdgeRequest {
        serde_json::from_value(json!({
            "clientIp": "203.0.113.178",
            "headers": headers,
            "method": "GET",
            "querystring": "",
            "uri": "/index.html"
        }))
        .unwrap()
    }

    #[test]
    fn challenge_has_the_basic_scheme_shape() {
        assert_eq!(challenge_for(&credentials()), "Basic a3JvbWlkOmtyb21pZA==");
    }

    #[test]
    fn matching_challenge_is_forwarded_with_header_stripped() {
        let request = request_with_headers(json!({
            "authorization": [{ "key": "Authorization", "value": "Basic a3JvbWlkOmtyb21pZA==" }],
            "host": [{ "key": "Host", "value": "example.cloudfront.net" }]
        }));

        let expected = {
            let mut stripped = request.clone();
            stripped.headers.remove("authorization");
            stripped
        };

        match evaluate(&credentials(), request) {
            Verdict::Forward(forwarded) => assert_eq!(forwarded, expected),
            Verdict::Deny(response) => panic!("expected admission, got deny: {}", response.body),
        }
    }

    #[test]
    fn missing_header_is_denied() {
        let request = request_with_headers(json!({
            "host": [{ "key": "Host", "value": "example.cloudfront.net" }]
        }));

        match evaluate(&credentials(), request) {
            Verdict::Deny(response) => {
                assert_eq!(response.status, "401");
                assert_eq!(response.status_description, "Unauthorized");
                assert_eq!(response.headers.first_value("www-authenticate"), Some("Basic"));
            }
            Verdict::Forward(_) => panic!("expected a deny"),
        }
    }

    #[test]
    fn mismatched_value_is_denied() {
        let request = request_with_headers(json!({
            "authorization": [{ "key": "Authorization", "value": "Basic d3Jvbmc=" }]
        }));

        match evaluate(&credentials(), request) {
            Verdict::Deny(response) => {
                assert_eq!(response.status, "401");
                assert_eq!(response.headers.first_value("www-authenticate"), Some("Basic"));
            }
            Verdict::Forward(_) => panic!("expected a deny"),
        }
    }

    #[test]
    fn single_character_difference_is_denied() {
        let mut value = challenge_for(&credentials());
        value.pop();
        value.push('A');

        let request = request_with_headers(json!({
            "authorization": [{ "key": "Authorization", "value": value }]
        }));

        assert!(matches!(evaluate(&credentials(), request), Verdict::Deny(_)));
    }

    #[test]
    fn only_the_first_value_is_consulted() {
        let expected = challenge_for(&credentials());

        let correct_second = request_with_headers(json!({
            "authorization": [
                { "key": "Authorization", "value": "Basic d3Jvbmc=" },
                { "key": "Authorization", "value": expected }
            ]
        }));
        assert!(matches!(evaluate(&credentials(), correct_second), Verdict::Deny(_)));

        let correct_first = request_with_headers(json!({
            "authorization": [
                { "key": "Authorization", "value": expected },
                { "key": "Authorization", "value": "junk" }
            ]
        }));
        assert!(matches!(evaluate(&credentials(), correct_first), Verdict::Forward(_)));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = request_with_headers(json!({
            "Authorization": [{ "key": "Authorization", "value": "Basic a3JvbWlkOmtyb21pZA==" }]
        }));

        match evaluate(&credentials(), request) {
            Verdict::Forward(forwarded) => {
                assert_eq!(forwarded.headers.first_value("authorization"), None);
            }
            Verdict::Deny(_) => panic!("expected admission"),
        }
    }

    #[test]
    fn deny_body_never_echoes_the_expected_challenge() {
        let request = request_with_headers(json!({
            "authorization": [{ "key": "Authorization", "value": "Basic d3Jvbmc=" }]
        }));

        match evaluate(&credentials(), request) {
            Verdict::Deny(response) => {
                assert!(!response.body.contains(&challenge_for(&credentials())));
                assert!(response.body.contains("Basic d3Jvbmc="));
            }
            Verdict::Forward(_) => panic!("expected a deny"),
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let request = request_with_headers(json!({
            "authorization": [{ "key": "Authorization", "value": "Basic a3JvbWlkOmtyb21pZA==" }]
        }));

        let first = evaluate(&credentials(), request.clone());
        let second = evaluate(&credentials(), request);
        assert_eq!(first, second);
    }
}
