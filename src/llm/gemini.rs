use std::env;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GEMINI_MODEL, GEMINI_API_BASE, PROBE_PROMPT};

use super::errors::LLMError;
use super::http_client::{HttpClient, ReqwestClient};

/// A client for Google's Gemini text generation API, used to probe whether a
/// single API key is accepted.
#[derive(Debug, Clone)]
pub struct GeminiClient<T: HttpClient = ReqwestClient> {
    pub client: T,
}

impl<T: HttpClient + Default> Default for GeminiClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpClient + Default> GeminiClient<T> {
    /// Creates a new GeminiClient instance
    pub fn new() -> Self {
        Self {
            client: T::default(),
        }
    }
}

/// A text part in a request to the Gemini API
#[derive(Serialize, Deserialize, Clone)]
struct GeminiPart {
    text: String,
}

/// Content for requests to and responses from the Gemini API
#[derive(Serialize, Deserialize, Clone)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

/// The request body for the probe request
#[derive(Serialize, Clone)]
struct GeminiRequestBody {
    contents: Vec<GeminiContent>,
}

/// One of several response candidates.
#[derive(Serialize, Deserialize, Clone)]
struct GeminiResponseCandidate {
    content: GeminiContent,
}

/// Text generation response from the Gemini API.
#[derive(Serialize, Deserialize, Clone)]
struct GeminiResponseBody {
    candidates: Vec<GeminiResponseCandidate>,
}

/// Google's standard error envelope, returned alongside non-2xx statuses.
#[derive(Serialize, Deserialize, Clone)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Serialize, Deserialize, Clone)]
struct GeminiErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<i64>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

/// The categorized result of probing a key. Every failure mode maps to a
/// variant here; nothing escapes `check_key` as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCheckOutcome {
    /// 200 with a well-formed body; carries the model's reply text
    Valid { reply: String },
    /// 200 but the body did not have the expected shape; carries the raw body
    MalformedReply { body: String },
    /// 400, usually a malformed key or request
    BadRequest { detail: String },
    /// 403, usually an invalid or under-privileged key
    Forbidden { detail: String },
    /// 429
    RateLimited { detail: String },
    /// Any other HTTP status
    UnexpectedStatus { status: u16, body: String },
    /// The request hit the client timeout
    TimedOut,
    /// The endpoint could not be reached at all
    Unreachable,
    /// Any other transport failure
    Failed { message: String },
}

impl From<LLMError> for KeyCheckOutcome {
    fn from(error: LLMError) -> Self {
        match error {
            LLMError::Timeout => KeyCheckOutcome::TimedOut,
            LLMError::Network => KeyCheckOutcome::Unreachable,
            LLMError::Deserialization(body) => KeyCheckOutcome::MalformedReply { body },
            LLMError::Generic(message) => KeyCheckOutcome::Failed { message },
        }
    }
}

impl<T: HttpClient> GeminiClient<T> {
    /// Probe the API with `api_key` and return the categorized outcome.
    ///
    /// Exactly one request is made, with the key passed as a query parameter
    /// and a fixed prompt as the payload. There are no retries; every failure
    /// is folded into a `KeyCheckOutcome` variant.
    pub async fn check_key(&self, api_key: &str) -> KeyCheckOutcome {
        let model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let url = format!("{GEMINI_API_BASE}/models/{model}:generateContent?key={api_key}");

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let request_body = GeminiRequestBody {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: PROBE_PROMPT.to_string(),
                }],
            }],
        };

        log::info!("Sending probe request to the Gemini API (model: {model})");

        let response = match self.client.post_json(&url, headers, &request_body).await {
            Ok(response) => response,
            Err(e) => return LLMError::from(e).into(),
        };

        let status = response.status();
        log::debug!("Gemini API returned status {status}");

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return LLMError::from(e).into(),
        };

        match status {
            StatusCode::OK => match parse_reply(body) {
                Ok(reply) => KeyCheckOutcome::Valid { reply },
                Err(e) => e.into(),
            },
            StatusCode::BAD_REQUEST => KeyCheckOutcome::BadRequest {
                detail: error_detail(&body),
            },
            StatusCode::FORBIDDEN => KeyCheckOutcome::Forbidden {
                detail: error_detail(&body),
            },
            StatusCode::TOO_MANY_REQUESTS => KeyCheckOutcome::RateLimited {
                detail: error_detail(&body),
            },
            other => KeyCheckOutcome::UnexpectedStatus {
                status: other.as_u16(),
                body,
            },
        }
    }
}

/// Extract the first candidate's text from a 200 response body. A body
/// without the expected `candidates` nesting is reported back verbatim.
fn parse_reply(body: String) -> Result<String, LLMError> {
    let parsed: GeminiResponseBody = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(_) => return Err(LLMError::Deserialization(pretty_or_raw(body))),
    };

    let text = parsed
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .map(|part| part.text.clone());

    match text {
        Some(text) => Ok(text),
        None => Err(LLMError::Deserialization(pretty_or_raw(body))),
    }
}

/// Pretty-print the error envelope if the body parses as one, otherwise
/// return the raw text.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(envelope) => {
            serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| body.to_string())
        }
        Err(_) => body.to_string(),
    }
}

/// Re-indent a body for display when it is valid JSON; return it untouched
/// otherwise.
fn pretty_or_raw(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(body),
        Err(_) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::http_client::MockHttpClient;
    use serde_json::json;

    const TEST_KEY: &str = "AIzaSyTestKey1234567890";

    #[tokio::test]
    async fn test_check_key_valid() {
        let mock_response = GeminiResponseBody {
            candidates: vec![GeminiResponseCandidate {
                content: GeminiContent {
                    parts: vec![GeminiPart {
                        text: "Hello! Your API key is working correctly.".into(),
                    }],
                },
            }],
        };

        let client = GeminiClient {
            client: MockHttpClient::new(mock_response),
        };
        let outcome = client.check_key(TEST_KEY).await;

        assert_eq!(
            outcome,
            KeyCheckOutcome::Valid {
                reply: "Hello! Your API key is working correctly.".into()
            }
        );
    }

    #[tokio::test]
    async fn test_check_key_malformed_success_body() {
        let mock_response = json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        });

        let client = GeminiClient {
            client: MockHttpClient::new(mock_response),
        };
        let outcome = client.check_key(TEST_KEY).await;

        match outcome {
            KeyCheckOutcome::MalformedReply { body } => {
                assert!(body.contains("promptFeedback"));
            }
            other => panic!("Expected MalformedReply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_key_empty_candidates() {
        let mock_response = json!({ "candidates": [] });

        let client = GeminiClient {
            client: MockHttpClient::new(mock_response),
        };
        let outcome = client.check_key(TEST_KEY).await;

        assert!(matches!(outcome, KeyCheckOutcome::MalformedReply { .. }));
    }

    #[tokio::test]
    async fn test_check_key_forbidden() {
        let envelope = json!({
            "error": {
                "code": 403,
                "message": "API key not valid.",
                "status": "PERMISSION_DENIED"
            }
        });

        let client = GeminiClient {
            client: MockHttpClient::with_status(403, envelope),
        };
        let outcome = client.check_key(TEST_KEY).await;

        match outcome {
            KeyCheckOutcome::Forbidden { detail } => {
                assert!(detail.contains("API key not valid."));
                assert!(detail.contains("PERMISSION_DENIED"));
            }
            other => panic!("Expected Forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_key_bad_request() {
        let envelope = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        });

        let client = GeminiClient {
            client: MockHttpClient::with_status(400, envelope),
        };
        let outcome = client.check_key(TEST_KEY).await;

        match outcome {
            KeyCheckOutcome::BadRequest { detail } => {
                assert!(detail.contains("Please pass a valid API key."));
            }
            other => panic!("Expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_key_bad_request_unparseable_body() {
        let client = GeminiClient {
            client: MockHttpClient::with_status(400, "not json".to_string()),
        };
        let outcome = client.check_key(TEST_KEY).await;

        match outcome {
            // The mock serializes its response, so the raw text arrives quoted
            KeyCheckOutcome::BadRequest { detail } => assert!(detail.contains("not json")),
            other => panic!("Expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_key_rate_limited() {
        let envelope = json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted.",
                "status": "RESOURCE_EXHAUSTED"
            }
        });

        let client = GeminiClient {
            client: MockHttpClient::with_status(429, envelope),
        };
        let outcome = client.check_key(TEST_KEY).await;

        assert!(matches!(outcome, KeyCheckOutcome::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_check_key_unexpected_status() {
        let envelope = json!({
            "error": { "code": 500, "message": "Internal error.", "status": "INTERNAL" }
        });

        let client = GeminiClient {
            client: MockHttpClient::with_status(500, envelope),
        };
        let outcome = client.check_key(TEST_KEY).await;

        match outcome {
            KeyCheckOutcome::UnexpectedStatus { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("Internal error."));
            }
            other => panic!("Expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_errors_map_to_outcomes() {
        assert_eq!(
            KeyCheckOutcome::from(LLMError::Timeout),
            KeyCheckOutcome::TimedOut
        );
        assert_eq!(
            KeyCheckOutcome::from(LLMError::Network),
            KeyCheckOutcome::Unreachable
        );
        assert_eq!(
            KeyCheckOutcome::from(LLMError::Generic("boom".into())),
            KeyCheckOutcome::Failed {
                message: "boom".into()
            }
        );
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_text() {
        assert_eq!(error_detail("<html>bad gateway</html>"), "<html>bad gateway</html>");
    }
}
