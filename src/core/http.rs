//! HTTP transport layer.
//!
//! Builds the shared client and performs exactly one outbound request per
//! invocation, translating the raw transport result into a
//! [`WireOutcome`]. No retries happen here or anywhere else; a failed
//! attempt is classified and handed to the fallback policy.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde_json::Value;

use crate::core::models::Params;
use crate::error::{ClimiqError, Result};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Characters of a failing response body kept in `error_detail`.
const BODY_SNIPPET_CHARS: usize = 200;

/// HTTP methods the client supports.
///
/// The original contract treats any other method as a configuration
/// fault; a two-variant enum makes that state unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Parsed response body: JSON when it parses, opaque text otherwise.
#[derive(Debug, Clone)]
pub enum Body {
    Json(Value),
    Text(String),
}

/// Classified result of one transport attempt, in priority order.
#[derive(Debug, Clone)]
pub enum WireOutcome {
    /// HTTP 200/201.
    Success { status: u16, body: Body },
    /// HTTP 429.
    RateLimited { status: u16 },
    /// Any other HTTP status.
    HttpError { status: u16, snippet: String },
    /// The transport timed out.
    TimedOut,
    /// DNS failure, connection refused, malformed request, broken stream.
    Transport(String),
}

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(format!("climiq/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ClimiqError::ClientBuild(e.to_string()))
}

/// Perform one request and classify the result.
///
/// GET requests send `params` as the query string; POST requests send
/// them as a JSON body. `timeout` overrides the client default for this
/// attempt only.
pub async fn execute(
    client: &Client,
    method: HttpMethod,
    url: &str,
    params: &Params,
    headers: &[(String, String)],
    timeout: Duration,
) -> WireOutcome {
    let mut request = match method {
        HttpMethod::Get => {
            let mut builder = client.get(url);
            if !params.is_empty() {
                builder = builder.query(&params.to_query());
            }
            builder
        }
        HttpMethod::Post => client.post(url).json(&params.to_json_body()),
    };
    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }
    request = request.timeout(timeout);

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => return WireOutcome::TimedOut,
        Err(e) => return WireOutcome::Transport(e.to_string()),
    };

    let status = response.status().as_u16();
    match status {
        200 | 201 => {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) if e.is_timeout() => return WireOutcome::TimedOut,
                Err(e) => return WireOutcome::Transport(e.to_string()),
            };
            let body = serde_json::from_str::<Value>(&text)
                .map_or(Body::Text(text), Body::Json);
            WireOutcome::Success { status, body }
        }
        429 => WireOutcome::RateLimited { status },
        _ => {
            let text = response.text().await.unwrap_or_default();
            WireOutcome::HttpError {
                status,
                snippet: truncate_chars(&text, BODY_SNIPPET_CHARS),
            }
        }
    }
}

/// First `max` characters of `text`, respecting char boundaries.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_matches_wire_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "é".repeat(300);
        let snippet = truncate_chars(&text, 200);
        assert_eq!(snippet.chars().count(), 200);

        assert_eq!(truncate_chars("short", 200), "short");
    }

    #[test]
    fn build_client_accepts_custom_timeout() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }
}
