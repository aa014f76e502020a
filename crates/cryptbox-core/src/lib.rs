//! cryptbox-core: types shared by the bundle controller and its front ends

pub mod config;
pub mod error;
pub mod types;

pub use error::{CryptboxError, CryptboxResult, Rejection};
pub use types::{Algorithm, Direction, FileDigest, IntegrityReport, KeyKind, KeyPair, Mode};
