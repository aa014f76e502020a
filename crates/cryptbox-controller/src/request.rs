//! Request Builder: turns the current selection and credentials into the
//! endpoint path and multipart parts for one engine call.
//!
//! Credential parts are included strictly per the registry. A field that the
//! active mode does not list is left out even when it holds a value, so a key
//! typed in under a previously selected mode never leaves the process.

use cryptbox_core::{Algorithm, CryptboxResult, Direction, Mode, Rejection};
use zeroize::Zeroizing;

use crate::credentials::CredentialSet;
use crate::registry;
use crate::selection::FileEntry;

/// Multipart field carrying each selected file when encrypting.
pub const FILES_FIELD: &str = "files";
/// Multipart field carrying the archive when decrypting.
pub const BUNDLE_FIELD: &str = "bundle";
/// Multipart field carrying the AEAD algorithm identifier.
pub const ALGORITHM_FIELD: &str = "algo";

pub enum Part {
    File {
        field: &'static str,
        entry: FileEntry,
    },
    Text {
        field: &'static str,
        value: Zeroizing<String>,
    },
}

impl std::fmt::Debug for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Part::File { field, entry } => f
                .debug_struct("File")
                .field("field", field)
                .field("entry", entry)
                .finish(),
            Part::Text { field, .. } => f
                .debug_struct("Text")
                .field("field", field)
                .field("value", &"[REDACTED]")
                .finish(),
        }
    }
}

#[derive(Debug)]
pub struct OperationRequest {
    pub direction: Direction,
    pub mode: Mode,
    /// Path relative to the engine base URL, e.g. `/encrypt/single`
    pub endpoint: &'static str,
    pub parts: Vec<Part>,
}

impl OperationRequest {
    /// Value of a text part, if present.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { field: f, value } if *f == field => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn text_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parts.iter().filter_map(|p| match p {
            Part::Text { field, .. } => Some(*field),
            Part::File { .. } => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &FileEntry> + '_ {
        self.parts.iter().filter_map(|p| match p {
            Part::File { entry, .. } => Some(entry),
            Part::Text { .. } => None,
        })
    }

    pub fn upload_bytes(&self) -> u64 {
        self.files().map(|e| e.size_bytes).sum()
    }
}

/// Assemble the request for `(direction, mode)`.
///
/// `files` is the whole selection when encrypting and exactly one bundle when
/// decrypting. `algorithm` is only sent when encrypting.
pub fn build(
    direction: Direction,
    mode: Mode,
    algorithm: Algorithm,
    files: &[FileEntry],
    credentials: &CredentialSet,
) -> CryptboxResult<OperationRequest> {
    let mut parts = Vec::with_capacity(files.len() + 3);

    match direction {
        Direction::Encrypt => {
            if files.is_empty() {
                return Err(Rejection::NoFilesSelected.into());
            }
            parts.extend(files.iter().map(|entry| Part::File {
                field: FILES_FIELD,
                entry: entry.clone(),
            }));
        }
        Direction::Decrypt => {
            let [bundle] = files else {
                return Err(Rejection::NoBundleSelected.into());
            };
            parts.push(Part::File {
                field: BUNDLE_FIELD,
                entry: bundle.clone(),
            });
        }
    }

    let required = registry::required_fields(direction, mode);
    let mut credential_parts = required.iter().map(|field| Part::Text {
        field: field.form_name(),
        value: Zeroizing::new(credentials.get(*field).to_string()),
    });

    // Password (when required) precedes the algorithm, keys follow it.
    if required.first() == Some(&registry::CredentialField::Password) {
        parts.extend(credential_parts.next());
    }
    if direction == Direction::Encrypt {
        parts.push(Part::Text {
            field: ALGORITHM_FIELD,
            value: Zeroizing::new(algorithm.as_str().to_string()),
        });
    }
    parts.extend(credential_parts);

    Ok(OperationRequest {
        direction,
        mode,
        endpoint: registry::endpoint(direction, mode),
        parts,
    })
}
