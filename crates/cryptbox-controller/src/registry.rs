//! Mode/Algorithm Registry: the static table mapping each mode to the
//! credential fields it needs and the endpoints it talks to.
//!
//! Both the validator and the request builder read from this table; nothing
//! else in the crate knows which mode needs which field.

use cryptbox_core::{Direction, Mode, Rejection};

/// A credential input the user may have to supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialField {
    Password,
    /// Base64-encoded X25519 public key of the recipient
    RecipientX25519Public,
    /// PEM-encoded RSA public key of the recipient
    RecipientRsaPublic,
    /// Base64-encoded X25519 private key (decrypt only)
    X25519Private,
    /// PEM-encoded RSA private key (decrypt only)
    RsaPrivate,
}

impl CredentialField {
    pub const ALL: [CredentialField; 5] = [
        CredentialField::Password,
        CredentialField::RecipientX25519Public,
        CredentialField::RecipientRsaPublic,
        CredentialField::X25519Private,
        CredentialField::RsaPrivate,
    ];

    /// Multipart field name expected by the engine.
    pub fn form_name(&self) -> &'static str {
        match self {
            CredentialField::Password => "password",
            CredentialField::RecipientX25519Public => "recipient_public_key_b64",
            CredentialField::RecipientRsaPublic => "recipient_rsa_public_pem",
            CredentialField::X25519Private => "private_key_b64",
            CredentialField::RsaPrivate => "recipient_rsa_private_pem",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CredentialField::Password => "password",
            CredentialField::RecipientX25519Public => "recipient X25519 public key (Base64)",
            CredentialField::RecipientRsaPublic => "recipient RSA public key (PEM)",
            CredentialField::X25519Private => "X25519 private key (Base64)",
            CredentialField::RsaPrivate => "RSA private key (PEM)",
        }
    }

    /// Rejection raised when this field is required but empty.
    pub fn missing(&self) -> Rejection {
        match self {
            CredentialField::Password => Rejection::PasswordRequired,
            CredentialField::RecipientX25519Public => Rejection::RecipientX25519Required,
            CredentialField::RecipientRsaPublic => Rejection::RecipientRsaRequired,
            CredentialField::X25519Private => Rejection::X25519PrivateKeyRequired,
            CredentialField::RsaPrivate => Rejection::RsaPrivateKeyRequired,
        }
    }
}

/// Registry row for one mode.
#[derive(Debug, Clone, Copy)]
pub struct ModeSpec {
    pub mode: Mode,
    pub encrypt_requires: &'static [CredentialField],
    pub decrypt_requires: &'static [CredentialField],
    pub encrypt_endpoint: &'static str,
    pub decrypt_endpoint: &'static str,
}

use CredentialField::*;

const SINGLE: ModeSpec = ModeSpec {
    mode: Mode::Single,
    encrypt_requires: &[Password],
    decrypt_requires: &[Password],
    encrypt_endpoint: "/encrypt/single",
    decrypt_endpoint: "/decrypt/single",
};

// Decrypt lists only the private key, following the required-field table.
// Whether the engine also expects the password here is unconfirmed.
const DUAL_X25519: ModeSpec = ModeSpec {
    mode: Mode::DualX25519,
    encrypt_requires: &[Password, RecipientX25519Public],
    decrypt_requires: &[X25519Private],
    encrypt_endpoint: "/encrypt/dual-x25519",
    decrypt_endpoint: "/decrypt/dual-x25519",
};

const DOUBLE_X25519: ModeSpec = ModeSpec {
    mode: Mode::DoubleX25519,
    encrypt_requires: &[Password, RecipientX25519Public],
    decrypt_requires: &[Password, X25519Private],
    encrypt_endpoint: "/encrypt/double-x25519",
    decrypt_endpoint: "/decrypt/double-x25519",
};

const DOUBLE_RSA: ModeSpec = ModeSpec {
    mode: Mode::DoubleRsa,
    encrypt_requires: &[Password, RecipientRsaPublic],
    decrypt_requires: &[Password, RsaPrivate],
    encrypt_endpoint: "/encrypt/double-rsa",
    decrypt_endpoint: "/decrypt/double-rsa",
};

const SINGLE_X25519: ModeSpec = ModeSpec {
    mode: Mode::SingleX25519,
    encrypt_requires: &[RecipientX25519Public],
    decrypt_requires: &[X25519Private],
    encrypt_endpoint: "/encrypt/single-x25519",
    decrypt_endpoint: "/decrypt/single-x25519",
};

const SINGLE_RSA: ModeSpec = ModeSpec {
    mode: Mode::SingleRsa,
    encrypt_requires: &[RecipientRsaPublic],
    decrypt_requires: &[RsaPrivate],
    encrypt_endpoint: "/encrypt/single-rsa",
    decrypt_endpoint: "/decrypt/single-rsa",
};

pub fn lookup(mode: Mode) -> &'static ModeSpec {
    match mode {
        Mode::Single => &SINGLE,
        Mode::DualX25519 => &DUAL_X25519,
        Mode::DoubleX25519 => &DOUBLE_X25519,
        Mode::DoubleRsa => &DOUBLE_RSA,
        Mode::SingleX25519 => &SINGLE_X25519,
        Mode::SingleRsa => &SINGLE_RSA,
    }
}

/// Fields that must be non-empty for `(direction, mode)`, password first.
pub fn required_fields(direction: Direction, mode: Mode) -> &'static [CredentialField] {
    let row = lookup(mode);
    match direction {
        Direction::Encrypt => row.encrypt_requires,
        Direction::Decrypt => row.decrypt_requires,
    }
}

pub fn requires(direction: Direction, mode: Mode, field: CredentialField) -> bool {
    required_fields(direction, mode).contains(&field)
}

/// Operation path relative to the engine base URL.
pub fn endpoint(direction: Direction, mode: Mode) -> &'static str {
    let row = lookup(mode);
    match direction {
        Direction::Encrypt => row.encrypt_endpoint,
        Direction::Decrypt => row.decrypt_endpoint,
    }
}

/// Path of the key generation endpoint for a key kind.
pub fn keygen_endpoint(kind: cryptbox_core::KeyKind) -> &'static str {
    match kind {
        cryptbox_core::KeyKind::X25519 => "/keys/x25519",
        cryptbox_core::KeyKind::Rsa => "/keys/rsa",
    }
}
