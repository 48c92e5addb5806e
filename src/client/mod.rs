//! Transport collaborator
//!
//! Sends a [`MaterializedRequest`] over HTTP and buffers the response into
//! a [`ResponseData`]. This is the only suspending operation around the
//! engine; retry, backoff and cancellation are the embedding shell's
//! concern, not ours.

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use std::time::Instant;
use tracing::{debug, info};

use crate::errors::{RestpadError, Result};
use crate::models::{MaterializedRequest, ResponseData, ResponseKind};

pub const USER_AGENT_STRING: &str = concat!("restpad/", env!("CARGO_PKG_VERSION"));

/// HTTP transport for materialized requests
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    /// Build a transport with the default client configuration
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT_STRING).build()?;
        Ok(Self { client })
    }

    /// Send a materialized request and buffer the full response
    pub async fn send(&self, request: &MaterializedRequest) -> Result<ResponseData> {
        let method: Method = request.method.parse().map_err(|_| {
            RestpadError::Parse(format!("Invalid HTTP method: {}", request.method))
        })?;

        let mut headers = HeaderMap::new();
        for (key, value) in &request.headers {
            // A header row that is not wire-legal is dropped, not fatal
            let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) else {
                continue;
            };
            headers.append(name, value);
        }

        let mut builder = self
            .client
            .request(method, request.url.as_str())
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let started = Instant::now();
        let response = builder.send().await?;

        let status = response.status();
        let mut response_headers: IndexMap<String, String> = IndexMap::new();
        for (name, value) in response.headers() {
            response_headers.insert(
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        let content_type = response_headers.get("content-type").cloned();
        let body = response.bytes().await?.to_vec();
        let elapsed = started.elapsed();

        info!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "request completed"
        );

        Ok(ResponseData {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            kind: ResponseKind::classify(content_type.as_deref()),
            headers: response_headers,
            body,
            content_type,
            elapsed,
        })
    }
}
