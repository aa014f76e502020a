use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CryptboxError, CryptboxResult};
use crate::types::{Algorithm, Mode};

/// Top-level client configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptboxConfig {
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub defaults: DefaultsConfig,
    pub selection: SelectionConfig,
    pub log: LogConfig,
}

/// Where the remote cryptographic engine lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL every operation path is appended to (default: http://localhost:8000)
    pub base_url: String,
    /// Refuse plaintext HTTP base URLs instead of warning
    pub enforce_tls: bool,
    /// Per-request timeout in seconds; unset means wait for the engine
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory downloaded archives are written to
    pub dir: PathBuf,
    /// File name for encrypt results
    pub encrypted_name: String,
    /// File name for decrypt results
    pub decrypted_name: String,
    /// Write the decrypt integrity report here as JSON (optional)
    pub report_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub mode: Mode,
    pub algorithm: Algorithm,
}

/// Rules for turning directory arguments into a file selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Include dotfiles and dot-directories
    pub include_hidden: bool,
    /// Glob patterns matched against file and directory names
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            enforce_tls: false,
            request_timeout_secs: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            encrypted_name: "encrypted_bundle.zip".into(),
            decrypted_name: "decrypted_files.zip".into(),
            report_file: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl EngineConfig {
    /// Check the base URL against the TLS policy.
    ///
    /// With `enforce_tls` a plaintext `http://` URL is an error; otherwise it
    /// only produces a warning.
    pub fn check_transport(&self) -> CryptboxResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CryptboxError::Config(format!(
                "engine base_url must be an http(s) URL, got: {}",
                self.base_url
            )));
        }
        if self.base_url.starts_with("http://") {
            if self.enforce_tls {
                return Err(CryptboxError::Config(format!(
                    "engine base_url uses plaintext HTTP ({}), but enforce_tls is enabled",
                    self.base_url
                )));
            }
            tracing::warn!(
                base_url = %self.base_url,
                "engine base URL uses plaintext HTTP; passwords and keys are sent unencrypted"
            );
        }
        Ok(())
    }
}

impl CryptboxConfig {
    pub fn from_toml(content: &str) -> CryptboxResult<Self> {
        toml::from_str(content).map_err(|e| CryptboxError::Config(e.to_string()))
    }
}
