use thiserror::Error;

use crate::types::Direction;

pub type CryptboxResult<T> = Result<T, CryptboxError>;

/// Why an operation was refused before anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no files selected")]
    NoFilesSelected,

    #[error("no bundle selected")]
    NoBundleSelected,

    #[error("password required")]
    PasswordRequired,

    #[error("password too short")]
    PasswordTooShort,

    #[error("recipient X25519 public key required")]
    RecipientX25519Required,

    #[error("recipient RSA public key required")]
    RecipientRsaRequired,

    #[error("X25519 private key required")]
    X25519PrivateKeyRequired,

    #[error("RSA private key required")]
    RsaPrivateKeyRequired,
}

#[derive(Debug, Error)]
pub enum CryptboxError {
    /// Local validation failure; never reaches the network.
    #[error("precondition failed: {0}")]
    Precondition(#[from] Rejection),

    /// The remote call did not complete (network error or non-success status).
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote call completed but its payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CryptboxError {
    /// Short status line suitable for showing to the user.
    ///
    /// Transport and decode failures collapse into the same generic text; the
    /// distinction is kept in the error value for diagnostics only.
    pub fn user_message(&self, direction: Direction) -> String {
        match self {
            CryptboxError::Precondition(reason) => reason.to_string(),
            _ => direction.failure_status().to_string(),
        }
    }
}
