//! Remote engine boundary.
//!
//! The controller never performs cryptography itself; it posts multipart
//! requests to an engine and gets JSON back. [`RemoteEngine`] is the seam,
//! [`HttpEngine`] the production implementation over `reqwest`.

use async_trait::async_trait;
use cryptbox_core::config::EngineConfig;
use cryptbox_core::{CryptboxError, CryptboxResult, KeyKind, KeyPair};
use reqwest::multipart::{Form, Part as FormPart};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::registry;
use crate::request::{OperationRequest, Part};

#[async_trait]
pub trait RemoteEngine: Send + Sync {
    /// Send one operation and return the raw response body.
    ///
    /// Network failures and non-success statuses are `Transport` errors.
    async fn submit(&self, request: &OperationRequest) -> CryptboxResult<Vec<u8>>;

    /// Ask the engine for a fresh key pair.
    async fn generate_keys(&self, kind: KeyKind) -> CryptboxResult<KeyPair>;
}

#[derive(Deserialize)]
struct WireKeyPair {
    public_key: String,
    private_key: String,
}

/// Parse a key generation reply.
pub fn parse_key_pair(kind: KeyKind, body: &[u8]) -> CryptboxResult<KeyPair> {
    let wire: WireKeyPair = serde_json::from_slice(body)
        .map_err(|e| CryptboxError::Decode(format!("malformed response: {e}")))?;
    if wire.public_key.is_empty() || wire.private_key.is_empty() {
        return Err(CryptboxError::Decode(
            "malformed response: empty key material".into(),
        ));
    }
    Ok(KeyPair {
        kind,
        public_key: wire.public_key,
        private_key: SecretString::from(wire.private_key),
    })
}

/// Engine reached over HTTP at a configured base URL.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEngine {
    pub fn new(config: &EngineConfig) -> CryptboxResult<Self> {
        config.check_transport()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CryptboxError::Config(format!("building HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn form(request: &OperationRequest) -> CryptboxResult<Form> {
        let mut form = Form::new();
        for part in &request.parts {
            form = match part {
                Part::File { field, entry } => {
                    let body = FormPart::stream(entry.content().clone())
                        .file_name(entry.display_path().to_string())
                        .mime_str("application/octet-stream")
                        .map_err(|e| CryptboxError::Other(anyhow::anyhow!("multipart part: {e}")))?;
                    form.part(*field, body)
                }
                Part::Text { field, value } => form.text(*field, value.as_str().to_string()),
            };
        }
        Ok(form)
    }

    async fn read_success(response: reqwest::Response) -> CryptboxResult<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            debug!(%status, body = %detail, "engine error body");
            return Err(CryptboxError::Transport(format!("engine returned {status}")));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| CryptboxError::Transport(format!("reading response body: {e}")))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl RemoteEngine for HttpEngine {
    async fn submit(&self, request: &OperationRequest) -> CryptboxResult<Vec<u8>> {
        let url = self.url(request.endpoint);
        info!(
            direction = %request.direction,
            mode = %request.mode,
            files = request.files().count(),
            bytes = request.upload_bytes(),
            url = %url,
            "submitting operation"
        );

        let response = self
            .client
            .post(&url)
            .multipart(Self::form(request)?)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, "engine request failed: {e}");
                CryptboxError::Transport(e.to_string())
            })?;

        Self::read_success(response).await
    }

    async fn generate_keys(&self, kind: KeyKind) -> CryptboxResult<KeyPair> {
        let url = self.url(registry::keygen_endpoint(kind));
        info!(kind = kind.as_str(), url = %url, "requesting key pair");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CryptboxError::Transport(e.to_string()))?;

        let body = Self::read_success(response).await?;
        parse_key_pair(kind, &body)
    }
}
