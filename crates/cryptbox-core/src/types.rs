use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which way an operation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Encrypt, Direction::Decrypt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        }
    }

    /// File name offered for the downloaded archive.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypted_bundle.zip",
            Direction::Decrypt => "decrypted_files.zip",
        }
    }

    pub fn busy_status(&self) -> &'static str {
        match self {
            Direction::Encrypt => "Encrypting...",
            Direction::Decrypt => "Decrypting...",
        }
    }

    pub fn success_status(&self) -> &'static str {
        match self {
            Direction::Encrypt => "Done. Encrypted bundle downloaded.",
            Direction::Decrypt => "Done. Files downloaded.",
        }
    }

    pub fn failure_status(&self) -> &'static str {
        match self {
            Direction::Encrypt => "Encryption failed.",
            Direction::Decrypt => "Decryption failed (wrong password/mode/keys?).",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode or algorithm identifier is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseCatalogError {
    kind: &'static str,
    value: String,
}

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Encryption mode. Exactly one is active at a time and it decides which
/// credential fields matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Password only
    #[default]
    Single,
    /// Password + recipient X25519 public key (dual lock)
    DualX25519,
    /// Password + recipient X25519 public key (double wrap)
    DoubleX25519,
    /// Password + recipient RSA public key
    DoubleRsa,
    /// Recipient X25519 public key only
    SingleX25519,
    /// Recipient RSA public key only
    SingleRsa,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Single,
        Mode::DualX25519,
        Mode::DoubleX25519,
        Mode::DoubleRsa,
        Mode::SingleX25519,
        Mode::SingleRsa,
    ];

    /// Wire identifier, also the last segment of the operation endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::DualX25519 => "dual-x25519",
            Mode::DoubleX25519 => "double-x25519",
            Mode::DoubleRsa => "double-rsa",
            Mode::SingleX25519 => "single-x25519",
            Mode::SingleRsa => "single-rsa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Single => "Single (Password Only)",
            Mode::DualX25519 => "Dual-Lock (Password + X25519)",
            Mode::DoubleX25519 => "Double (Password + X25519)",
            Mode::DoubleRsa => "Double (Password + RSA)",
            Mode::SingleX25519 => "Key-Only (X25519 Public Key)",
            Mode::SingleRsa => "Key-Only (RSA Public Key)",
        }
    }

    /// Key-only modes use no password in either direction.
    pub fn is_key_only(&self) -> bool {
        matches!(self, Mode::SingleX25519 | Mode::SingleRsa)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseCatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseCatalogError {
                kind: "mode",
                value: s.to_string(),
            })
    }
}

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// AEAD algorithm requested from the engine. Only meaningful when encrypting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "xchacha20-poly1305")]
    XChaCha20Poly1305,
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "aes-256-siv")]
    Aes256Siv,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::XChaCha20Poly1305,
        Algorithm::ChaCha20Poly1305,
        Algorithm::Aes256Gcm,
        Algorithm::Aes256Siv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::XChaCha20Poly1305 => "xchacha20-poly1305",
            Algorithm::ChaCha20Poly1305 => "chacha20-poly1305",
            Algorithm::Aes256Gcm => "aes-256-gcm",
            Algorithm::Aes256Siv => "aes-256-siv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::XChaCha20Poly1305 => "XChaCha20-Poly1305",
            Algorithm::ChaCha20Poly1305 => "ChaCha20-Poly1305",
            Algorithm::Aes256Gcm => "AES-256-GCM",
            Algorithm::Aes256Siv => "AES-256-SIV",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ParseCatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseCatalogError {
                kind: "algorithm",
                value: s.to_string(),
            })
    }
}

// ── Integrity report ──────────────────────────────────────────────────────────

/// Per-file verification metadata returned by a decrypt operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDigest {
    pub name: String,
    pub size: u64,
    /// 64-char lowercase hex SHA-256 of the recovered plaintext
    pub sha256: String,
}

/// `verified = false` means the engine could not authenticate the archive.
/// That is a value, not an error: the archive is still offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub verified: bool,
    #[serde(default)]
    pub files: Vec<FileDigest>,
}

// ── Key generation ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Base64-encoded X25519 key pair
    X25519,
    /// PEM-encoded RSA key pair
    Rsa,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::X25519 => "x25519",
            KeyKind::Rsa => "rsa",
        }
    }
}

/// A key pair produced by the engine. The private half never appears in
/// `Debug` output.
#[derive(Debug)]
pub struct KeyPair {
    pub kind: KeyKind,
    pub public_key: String,
    pub private_key: SecretString,
}
