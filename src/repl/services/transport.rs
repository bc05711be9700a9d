//! # HTTP Transport
//!
//! Issues requests against the ledger API and normalizes every response into
//! a [`RequestOutcome`]. No retries, no caching, no shared state.

use super::body::{decode_body, ACCEPTED_ENCODINGS};
use crate::config::ConnectionProfile;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::time::Instant;
use thiserror::Error;

/// HTTP methods used by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A fully interpolated API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
        }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Ways a call can fail; the display text is what ends up on screen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or the response not received
    #[error("{0}")]
    Network(String),
    /// Non-success status; message is the body or the reason phrase
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Success status with a body that is not JSON
    #[error("{0}")]
    Decode(String),
}

/// Result of a transport call as consumed by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(Value),
    Failure(String),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }
}

impl From<Result<Value, TransportError>> for RequestOutcome {
    fn from(result: Result<Value, TransportError>) -> Self {
        match result {
            Ok(value) => RequestOutcome::Success(value),
            Err(err) => RequestOutcome::Failure(err.to_string()),
        }
    }
}

/// Something that can carry an [`ApiRequest`] to the backend
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: &ApiRequest) -> impl Future<Output = RequestOutcome> + Send;
}

/// reqwest-backed transport bound to one server
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    server: String,
}

impl HttpTransport {
    /// Create a transport from a connection profile
    pub fn new(profile: &ConnectionProfile) -> Result<Self> {
        tracing::debug!("Creating HttpTransport for {}", profile.server());

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPTED_ENCODINGS));

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("ledgerline/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if let Some(proxy) = profile.proxy() {
            builder = builder
                .proxy(reqwest::Proxy::all(proxy).with_context(|| format!("invalid proxy '{proxy}'"))?);
        }
        if profile.insecure() {
            tracing::warn!("TLS certificate verification disabled for {}", profile.server());
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().context("failed to build HTTP client")?;
        Url::parse(profile.server())
            .with_context(|| format!("invalid server URL '{}'", profile.server()))?;

        Ok(Self {
            client,
            server: profile.server().trim_end_matches('/').to_string(),
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let joined = format!("{}{}", self.server, path);
        Url::parse(&joined).map_err(|e| TransportError::Network(format!("invalid URL '{joined}': {e}")))
    }

    /// Execute a request and classify the response
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self.client.request(request.method.into(), url.clone());

        if request.method == Method::Post {
            builder = builder.header(CONTENT_TYPE, "application/json");
            if let Some(body) = &request.body {
                builder = builder.body(body.to_string());
            }
        }

        let start_time = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(error_chain(&e)))?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(error_chain(&e)))?;

        tracing::debug!(
            "{} {} -> {} ({} bytes, {}ms)",
            request.method,
            url,
            status.as_u16(),
            raw.len(),
            start_time.elapsed().as_millis()
        );

        if !status.is_success() {
            let text = decode_body(&headers, raw.clone())
                .unwrap_or_else(|_| String::from_utf8_lossy(&raw).into_owned());
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(TransportError::Server {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let text = decode_body(&headers, raw)?;
        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> RequestOutcome {
        self.execute(request).await.into()
    }
}

/// Render an error with its sources, outermost first
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_should_carry_error_display_text() {
        let failure: RequestOutcome = Err(TransportError::Server {
            status: 400,
            message: "insufficient balance".to_string(),
        })
        .into();
        assert_eq!(failure, RequestOutcome::Failure("insufficient balance".to_string()));

        let success: RequestOutcome = Ok(json!({"status": "ok"})).into();
        assert!(success.is_success());
    }

    #[test]
    fn transport_should_join_paths_onto_server() {
        let profile = ConnectionProfile::new("http://ledger.local:8080/");
        let transport = HttpTransport::new(&profile).unwrap();

        assert_eq!(transport.server(), "http://ledger.local:8080");
        assert_eq!(
            transport.url_for("/accounts/X1").unwrap().as_str(),
            "http://ledger.local:8080/accounts/X1"
        );
    }

    #[test]
    fn transport_should_reject_bad_server_url() {
        let profile = ConnectionProfile::new("not a url");
        assert!(HttpTransport::new(&profile).is_err());
    }

    #[test]
    fn api_request_should_display_method_and_path() {
        assert_eq!(ApiRequest::get("/raft/status").to_string(), "GET /raft/status");
        assert_eq!(
            ApiRequest::post("/accounts/register", None).to_string(),
            "POST /accounts/register"
        );
    }
}
