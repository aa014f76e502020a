//! Precondition Validator and the advisory password strength meter.
//!
//! Checks run in a fixed order and stop at the first failure:
//!   1. encrypt: at least one file selected
//!   2. decrypt: a bundle attached
//!   3. password present when the registry requires it (and, when
//!      encrypting, at least [`MIN_PASSWORD_LEN`] UTF-16 code units)
//!   4. every other registry-required field present
//!
//! Nothing here touches the network or inspects key formats.

use cryptbox_core::{Direction, Mode, Rejection};

use crate::credentials::CredentialSet;
use crate::registry::{self, CredentialField};

/// Minimum password length accepted for encryption, counted in UTF-16 code
/// units so a character outside the Basic Multilingual Plane counts twice.
pub const MIN_PASSWORD_LEN: usize = 10;

pub fn validate(
    direction: Direction,
    mode: Mode,
    has_input: bool,
    credentials: &CredentialSet,
) -> Result<(), Rejection> {
    match direction {
        Direction::Encrypt if !has_input => return Err(Rejection::NoFilesSelected),
        Direction::Decrypt if !has_input => return Err(Rejection::NoBundleSelected),
        _ => {}
    }

    let required = registry::required_fields(direction, mode);

    if required.contains(&CredentialField::Password) {
        let password = credentials.get(CredentialField::Password);
        if password.is_empty() {
            return Err(Rejection::PasswordRequired);
        }
        if direction == Direction::Encrypt && utf16_len(password) < MIN_PASSWORD_LEN {
            return Err(Rejection::PasswordTooShort);
        }
    }

    for field in required {
        if *field != CredentialField::Password && !credentials.is_present(*field) {
            return Err(field.missing());
        }
    }

    Ok(())
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

// ── Password strength ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn label(&self) -> &'static str {
        match self {
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        }
    }
}

/// Score a password: one point each for length ≥ 8, length ≥ 12, an
/// uppercase letter, a lowercase letter, a digit, and a symbol.
pub fn password_strength(password: &str) -> Strength {
    let len = utf16_len(password);
    let checks = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    match checks.iter().filter(|&&hit| hit).count() {
        0..=2 => Strength::Weak,
        3..=4 => Strength::Medium,
        _ => Strength::Strong,
    }
}


#[cfg(test)]
mod proptest_suite {
    use super::*;
    use proptest::prelude::*;

    fn arb_mode() -> impl Strategy<Value = Mode> {
        prop::sample::select(Mode::ALL.to_vec())
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        /// Accepted iff every registry-required field is non-empty (passwords
        /// that are present are long enough, so only presence varies).
        #[test]
        fn accepts_iff_required_fields_present(
            direction in arb_direction(),
            mode in arb_mode(),
            present in prop::collection::vec(any::<bool>(), 5),
        ) {
            let mut c = CredentialSet::new();
            for (field, on) in CredentialField::ALL.iter().zip(&present) {
                if *on {
                    c.set(*field, "sufficiently-long-value");
                }
            }

            let expected = registry::required_fields(direction, mode)
                .iter()
                .all(|f| c.is_present(*f));
            let accepted = validate(direction, mode, true, &c).is_ok();
            prop_assert_eq!(accepted, expected);
        }

        #[test]
        fn rejection_names_a_required_field(
            direction in arb_direction(),
            mode in arb_mode(),
            present in prop::collection::vec(any::<bool>(), 5),
        ) {
            let mut c = CredentialSet::new();
            for (field, on) in CredentialField::ALL.iter().zip(&present) {
                if *on {
                    c.set(*field, "sufficiently-long-value");
                }
            }

            if let Err(reason) = validate(direction, mode, true, &c) {
                let named = registry::required_fields(direction, mode)
                    .iter()
                    .any(|f| f.missing() == reason && !c.is_present(*f));
                prop_assert!(named, "{:?} does not name a missing required field", reason);
            }
        }
    }
}
