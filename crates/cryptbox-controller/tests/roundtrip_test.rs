//! End-to-end controller round-trip against an in-memory engine.
//!
//! The fake engine "seals" the uploaded files into a JSON bundle tagged with
//! the password digest, and on decrypt reports per-file SHA-256 digests with
//! `verified` reflecting whether the password matched.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use cryptbox_controller::{
    BundleController, CredentialField, DownloadSink, FileEntry, OperationRequest, Outcome,
    RemoteEngine,
};
use cryptbox_core::{CryptboxError, CryptboxResult, Direction, KeyKind, KeyPair};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};

#[derive(Serialize, Deserialize)]
struct SealedFile {
    path: String,
    data_b64: String,
}

#[derive(Serialize, Deserialize)]
struct SealedBundle {
    password_sha256: String,
    files: Vec<SealedFile>,
}

fn hex_digest(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

struct InMemoryEngine;

impl InMemoryEngine {
    fn encrypt(request: &OperationRequest) -> CryptboxResult<serde_json::Value> {
        let password = request.text("password").unwrap_or_default();
        let bundle = SealedBundle {
            password_sha256: hex_digest(password.as_bytes()),
            files: request
                .files()
                .map(|f| SealedFile {
                    path: f.display_path().to_string(),
                    data_b64: BASE64.encode(f.content()),
                })
                .collect(),
        };
        let bytes = serde_json::to_vec(&bundle).map_err(|e| CryptboxError::Other(e.into()))?;
        Ok(json!({ "zip_b64": BASE64.encode(bytes) }))
    }

    fn decrypt(request: &OperationRequest) -> CryptboxResult<serde_json::Value> {
        let archive = request
            .files()
            .next()
            .ok_or_else(|| CryptboxError::Transport("400 missing bundle".into()))?;
        let bundle: SealedBundle = serde_json::from_slice(archive.content())
            .map_err(|_| CryptboxError::Transport("400 not a bundle".into()))?;

        let password = request.text("password").unwrap_or_default();
        let verified = bundle.password_sha256 == hex_digest(password.as_bytes());

        let mut plain = Vec::new();
        let mut report_files = Vec::new();
        for file in &bundle.files {
            let data = BASE64
                .decode(&file.data_b64)
                .map_err(|e| CryptboxError::Other(e.into()))?;
            let name = file.path.rsplit('/').next().unwrap_or_default();
            report_files.push(json!({
                "name": name,
                "size": data.len(),
                "sha256": hex_digest(&data),
            }));
            plain.extend_from_slice(&data);
        }

        Ok(json!({
            "zip_b64": BASE64.encode(plain),
            "report": { "verified": verified, "files": report_files },
        }))
    }
}

#[async_trait]
impl RemoteEngine for InMemoryEngine {
    async fn submit(&self, request: &OperationRequest) -> CryptboxResult<Vec<u8>> {
        let reply = match request.direction {
            Direction::Encrypt => Self::encrypt(request)?,
            Direction::Decrypt => Self::decrypt(request)?,
        };
        serde_json::to_vec(&reply).map_err(|e| CryptboxError::Other(e.into()))
    }

    async fn generate_keys(&self, _kind: KeyKind) -> CryptboxResult<KeyPair> {
        Err(CryptboxError::Transport("not supported".into()))
    }
}

#[derive(Default)]
struct MemorySink {
    last: Option<Vec<u8>>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, _: Direction, name: &str, bytes: &[u8]) -> CryptboxResult<String> {
        self.last = Some(bytes.to_vec());
        Ok(name.to_string())
    }
}

fn selection() -> Vec<FileEntry> {
    vec![
        FileEntry::from_relative_path("reports/q1.csv", b"quarter,revenue\n1,100\n".to_vec()),
        FileEntry::from_relative_path("reports/2024/q2.csv", b"quarter,revenue\n2,250\n".to_vec()),
        FileEntry::from_relative_path("readme.md", b"# numbers\n".to_vec()),
    ]
}

async fn encrypt_with(
    controller: &mut BundleController<InMemoryEngine, MemorySink>,
    password: &str,
) -> Vec<u8> {
    controller.selection_mut().add(selection());
    controller
        .credentials_mut()
        .set(CredentialField::Password, password);

    let outcome = controller.run(Direction::Encrypt).await;
    assert!(outcome.is_completed(), "encrypt failed: {outcome:?}");
    controller.sink().last.clone().unwrap()
}

#[tokio::test]
async fn single_mode_roundtrip_verifies_names_and_sizes() {
    let mut controller = BundleController::new(InMemoryEngine, MemorySink::default());
    let sealed = encrypt_with(&mut controller, "correct horse battery").await;

    assert!(controller.selection().is_empty());
    assert!(controller.credentials().is_blank());

    controller.attach_bundle(FileEntry::from_relative_path("encrypted_bundle.zip", sealed));
    controller
        .credentials_mut()
        .set(CredentialField::Password, "correct horse battery");

    let outcome = controller.run(Direction::Decrypt).await;
    let Outcome::Completed(done) = outcome else {
        panic!("decrypt failed: {outcome:?}");
    };
    assert_eq!(done.location, "decrypted_files.zip");

    let report = done.report.expect("decrypt returns a report");
    assert!(report.verified);

    let expected: Vec<(String, u64)> = selection()
        .into_iter()
        .map(|e| (e.name.clone(), e.size_bytes))
        .collect();
    let got: Vec<(String, u64)> = report
        .files
        .iter()
        .map(|f| (f.name.clone(), f.size))
        .collect();
    assert_eq!(got, expected);

    for (file, original) in report.files.iter().zip(selection()) {
        assert_eq!(file.sha256, hex_digest(original.content()));
    }
    assert_eq!(controller.status(), "Done. Files downloaded.");
}

#[tokio::test]
async fn wrong_password_yields_unverified_report() {
    let mut controller = BundleController::new(InMemoryEngine, MemorySink::default());
    let sealed = encrypt_with(&mut controller, "correct horse battery").await;

    controller.attach_bundle(FileEntry::from_relative_path("encrypted_bundle.zip", sealed));
    controller
        .credentials_mut()
        .set(CredentialField::Password, "tr0ub4dor&3");

    let outcome = controller.run(Direction::Decrypt).await;
    let Outcome::Completed(done) = outcome else {
        panic!("decrypt failed: {outcome:?}");
    };
    assert_eq!(done.verified(), Some(false));
    assert!(controller.status().contains("Integrity check FAILED"));
    assert!(controller.sink().last.is_some());
}

#[tokio::test]
async fn garbage_bundle_is_a_failure_and_keeps_credentials() {
    let mut controller = BundleController::new(InMemoryEngine, MemorySink::default());
    controller.attach_bundle(FileEntry::from_relative_path("bundle.zip", b"not a bundle".to_vec()));
    controller
        .credentials_mut()
        .set(CredentialField::Password, "anything");

    let outcome = controller.run(Direction::Decrypt).await;

    assert!(matches!(outcome, Outcome::Failed(CryptboxError::Transport(_))));
    assert_eq!(
        controller.status(),
        "Decryption failed (wrong password/mode/keys?)."
    );
    assert_eq!(
        controller.credentials().get(CredentialField::Password),
        "anything"
    );
    assert!(controller.bundle().is_some());
}
