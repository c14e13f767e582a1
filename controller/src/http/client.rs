//! HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::debug;

use crate::errors::ControllerError;

/// Status and decoded body of an orchestrator response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

impl HttpReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used to talk to the orchestrator.
///
/// Non-2xx responses are returned as replies; only transport failures are
/// errors.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// `GET url` expecting JSON
    async fn get(&self, url: &str) -> Result<HttpReply, ControllerError>;

    /// `PUT url` with a JSON body
    async fn put(&self, url: &str, body: &Value) -> Result<HttpReply, ControllerError>;
}

/// reqwest-backed Marathon client
pub struct MarathonClient {
    client: Client,
}

impl MarathonClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, ControllerError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("marathonctl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Orchestrator for MarathonClient {
    async fn get(&self, url: &str) -> Result<HttpReply, ControllerError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        read_reply(response).await
    }

    async fn put(&self, url: &str, body: &Value) -> Result<HttpReply, ControllerError> {
        debug!("PUT {}", url);

        let response = self
            .client
            .put(url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        read_reply(response).await
    }
}

async fn read_reply(response: Response) -> Result<HttpReply, ControllerError> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    debug!("Status code: {}", status);

    Ok(HttpReply::new(status, decode_body(&text)))
}

/// Decode a response body: JSON when possible, the raw text otherwise
pub fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
