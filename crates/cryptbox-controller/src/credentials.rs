//! Credential Set: password and key material entered by the user.
//!
//! Every field is sensitive. Values are zeroized when cleared, when
//! overwritten, and when the set is dropped.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::registry::CredentialField;

#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct CredentialSet {
    password: String,
    recipient_public_key_b64: String,
    recipient_rsa_public_key_pem: String,
    private_key_b64: String,
    recipient_rsa_private_key_pem: String,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Password => &self.password,
            CredentialField::RecipientX25519Public => &self.recipient_public_key_b64,
            CredentialField::RecipientRsaPublic => &self.recipient_rsa_public_key_pem,
            CredentialField::X25519Private => &self.private_key_b64,
            CredentialField::RsaPrivate => &self.recipient_rsa_private_key_pem,
        }
    }

    fn slot(&mut self, field: CredentialField) -> &mut String {
        match field {
            CredentialField::Password => &mut self.password,
            CredentialField::RecipientX25519Public => &mut self.recipient_public_key_b64,
            CredentialField::RecipientRsaPublic => &mut self.recipient_rsa_public_key_pem,
            CredentialField::X25519Private => &mut self.private_key_b64,
            CredentialField::RsaPrivate => &mut self.recipient_rsa_private_key_pem,
        }
    }

    /// Replace a field's value; the previous value is zeroized first.
    pub fn set(&mut self, field: CredentialField, value: impl Into<String>) {
        let slot = self.slot(field);
        slot.zeroize();
        *slot = value.into();
    }

    pub fn clear_field(&mut self, field: CredentialField) {
        self.slot(field).zeroize();
    }

    /// Presence check only; key format is left to the engine.
    pub fn is_present(&self, field: CredentialField) -> bool {
        !self.get(field).is_empty()
    }

    /// Zeroize and empty every field.
    pub fn clear(&mut self) {
        self.zeroize();
    }

    pub fn is_blank(&self) -> bool {
        CredentialField::ALL.iter().all(|f| !self.is_present(*f))
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("CredentialSet");
        for field in CredentialField::ALL {
            let shown = if self.is_present(field) { "[REDACTED]" } else { "" };
            s.field(field.form_name(), &shown);
        }
        s.finish()
    }
}
