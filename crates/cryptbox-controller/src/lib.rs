//! cryptbox-controller: client-side controller for the remote bundle engine
//!
//! Flow of one operation:
//! ```text
//! FileSelection / CredentialSet / Mode
//!   → validate (local preconditions, no network)
//!   → request::build (endpoint + multipart parts, registry-filtered)
//!   → RemoteEngine::submit
//!   → response::handle (base64 archive + optional integrity report)
//!   → DownloadSink::deliver, then clear sensitive state
//! ```
//!
//! The mode → credential mapping lives only in [`registry`].

pub mod collect;
pub mod credentials;
pub mod download;
pub mod engine;
pub mod orchestrator;
pub mod registry;
pub mod request;
pub mod response;
pub mod selection;
pub mod validate;

pub use credentials::CredentialSet;
pub use download::{DirectorySink, DownloadSink};
pub use engine::{HttpEngine, RemoteEngine};
pub use orchestrator::{BundleController, Completion, Outcome, Phase};
pub use registry::CredentialField;
pub use request::{OperationRequest, Part};
pub use response::OperationResult;
pub use selection::{FileEntry, FileSelection, FolderGroup, ROOT_FOLDER};
pub use validate::{password_strength, validate, Strength, MIN_PASSWORD_LEN};
