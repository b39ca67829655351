use std::env;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::redirect::Policy;

use crate::types::{RequestSpec, ResponseReport};

/// Default request timeout in seconds when the caller supplies none.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The transport capability the tool layer depends on.
///
/// One call, one request, no retries. Implementations must honor the
/// timeout in the spec so a slow target cannot stall the hosting runtime.
#[async_trait]
pub trait HttpCapability: Send + Sync {
    async fn execute(&self, spec: &RequestSpec) -> Result<ResponseReport, TransportError>;
}

/// Network-level failure, carrying a human-readable cause.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Other(String),
}

/// reqwest-backed transport.
///
/// The client is built per call because redirect policy, TLS verification,
/// and timeout are all caller-supplied; nothing is worth pooling across
/// stateless tool invocations.
#[derive(Debug, Default, Clone)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }

    /// Default timeout, env-overridable via `HTTPKIT_TIMEOUT_SECS`.
    pub fn default_timeout() -> Duration {
        let secs = env::var("HTTPKIT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

#[async_trait]
impl HttpCapability for ReqwestTransport {
    async fn execute(&self, spec: &RequestSpec) -> Result<ResponseReport, TransportError> {
        let redirect = if spec.follow_redirects {
            Policy::limited(10)
        } else {
            Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(spec.timeout)
            .redirect(redirect)
            .danger_accept_invalid_certs(!spec.verify_tls)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build client: {}", e)))?;

        let mut request = client.request(spec.method.into(), &spec.url);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        for (name, value) in spec.headers.iter() {
            request = request.header(name, value);
        }
        if let Some(body) = &spec.body {
            request = request.body(body.clone());
        }

        tracing::debug!(method = %spec.method, url = %spec.url, "sending request");

        let started = Instant::now();
        let response = request.send().await?;

        let http_version = version_label(response.version());
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        // Elapsed covers send through body drain, matching what a caller
        // timing the whole exchange would observe.
        let body = response.bytes().await?;
        let elapsed = started.elapsed();

        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "request completed"
        );

        Ok(ResponseReport {
            http_version,
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
            elapsed,
        })
    }
}

fn version_label(version: reqwest::Version) -> String {
    match version {
        reqwest::Version::HTTP_09 => "0.9".to_string(),
        reqwest::Version::HTTP_10 => "1.0".to_string(),
        reqwest::Version::HTTP_11 => "1.1".to_string(),
        reqwest::Version::HTTP_2 => "2".to_string(),
        reqwest::Version::HTTP_3 => "3".to_string(),
        other => format!("{:?}", other),
    }
}
