//! Response Handler: decode the engine's JSON reply into archive bytes and an
//! optional integrity report.
//!
//! Wire shape:
//! ```text
//! { "zip_b64": "<standard base64>", "report": { "verified": bool, "files": [...] } | null }
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use cryptbox_core::{CryptboxError, CryptboxResult, Direction, IntegrityReport};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WireResponse {
    zip_b64: Option<String>,
    #[serde(default)]
    report: Option<IntegrityReport>,
}

/// Decoded outcome of a successful engine call.
#[derive(Debug, Clone)]
pub struct OperationResult {
    pub direction: Direction,
    pub archive: Vec<u8>,
    /// Only ever set for decrypt operations
    pub report: Option<IntegrityReport>,
}

impl OperationResult {
    pub fn default_file_name(&self) -> &'static str {
        self.direction.default_file_name()
    }

    /// The engine answered but could not authenticate the archive.
    pub fn verification_failed(&self) -> bool {
        matches!(&self.report, Some(r) if !r.verified)
    }
}

fn malformed(detail: impl std::fmt::Display) -> CryptboxError {
    CryptboxError::Decode(format!("malformed response: {detail}"))
}

pub fn handle(direction: Direction, body: &[u8]) -> CryptboxResult<OperationResult> {
    let wire: WireResponse = serde_json::from_slice(body).map_err(malformed)?;

    let encoded = wire.zip_b64.ok_or_else(|| malformed("missing zip_b64"))?;
    let archive = BASE64
        .decode(encoded.trim())
        .map_err(|e| malformed(format!("zip_b64: {e}")))?;

    let report = match direction {
        Direction::Encrypt => None,
        Direction::Decrypt => wire.report.map(normalize_report).transpose()?,
    };

    Ok(OperationResult {
        direction,
        archive,
        report,
    })
}

/// Digests must be 64 hex characters; they are stored lowercase.
fn normalize_report(mut report: IntegrityReport) -> CryptboxResult<IntegrityReport> {
    for file in &mut report.files {
        if file.sha256.len() != 64 || !file.sha256.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed(format!("bad sha256 for {}", file.name)));
        }
        file.sha256.make_ascii_lowercase();
    }
    Ok(report)
}
