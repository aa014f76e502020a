//! Where a finished archive goes.

use cryptbox_core::config::OutputConfig;
use cryptbox_core::{CryptboxError, CryptboxResult, Direction};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Receives the archive of a completed operation.
///
/// Returns a human-readable location. A failed delivery counts as a failed
/// operation, so the controller keeps its credentials and selection.
pub trait DownloadSink: Send {
    fn deliver(
        &mut self,
        direction: Direction,
        suggested_name: &str,
        bytes: &[u8],
    ) -> CryptboxResult<String>;
}

/// Writes archives into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    encrypted_name: Option<String>,
    decrypted_name: Option<String>,
    /// Exact target path, overriding `dir` and names
    target: Option<PathBuf>,
    overwrite: bool,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            encrypted_name: None,
            decrypted_name: None,
            target: None,
            overwrite: false,
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            dir: output.dir.clone(),
            encrypted_name: Some(output.encrypted_name.clone()),
            decrypted_name: Some(output.decrypted_name.clone()),
            target: None,
            overwrite: false,
        }
    }

    /// Write to exactly this path instead of `<dir>/<name>`.
    pub fn with_target(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(path.into());
        self
    }

    pub fn overwrite(mut self, yes: bool) -> Self {
        self.overwrite = yes;
        self
    }

    pub fn path_for(&self, direction: Direction, suggested_name: &str) -> PathBuf {
        if let Some(target) = &self.target {
            return target.clone();
        }
        let configured = match direction {
            Direction::Encrypt => self.encrypted_name.as_deref(),
            Direction::Decrypt => self.decrypted_name.as_deref(),
        };
        self.dir.join(configured.unwrap_or(suggested_name))
    }
}

fn write_file(path: &Path, bytes: &[u8], overwrite: bool) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut opts = OpenOptions::new();
    opts.write(true);
    if overwrite {
        opts.create(true).truncate(true);
    } else {
        opts.create_new(true);
    }
    let mut file = opts.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl DownloadSink for DirectorySink {
    fn deliver(
        &mut self,
        direction: Direction,
        suggested_name: &str,
        bytes: &[u8],
    ) -> CryptboxResult<String> {
        let path = self.path_for(direction, suggested_name);
        write_file(&path, bytes, self.overwrite).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                CryptboxError::Io(std::io::Error::new(
                    e.kind(),
                    format!("{} already exists (use --force to overwrite)", path.display()),
                ))
            } else {
                CryptboxError::Io(e)
            }
        })?;

        info!(path = %path.display(), bytes = bytes.len(), %direction, "archive written");
        Ok(path.display().to_string())
    }
}
