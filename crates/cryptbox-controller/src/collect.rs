//! Build a [`FileEntry`] list from paths on disk.
//!
//! A file argument becomes one entry named after the file. A directory
//! argument is walked recursively and each file gets the relative path
//! `<dirname>/<sub/path>`, joined with `/` on every platform, so the folder
//! grouping matches what a browser directory picker would report.

use anyhow::{Context, Result};
use cryptbox_core::config::SelectionConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::selection::{FileEntry, PATH_SEPARATOR};

/// Collect every file reachable from `paths`, in argument order.
///
/// Files inside one directory argument are sorted by relative path.
pub fn collect_paths(paths: &[PathBuf], config: &SelectionConfig) -> Result<Vec<FileEntry>> {
    let excludes: Vec<glob::Pattern> = config
        .exclude_patterns
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .collect();

    let mut out = Vec::new();
    for path in paths {
        let meta = std::fs::metadata(path).with_context(|| format!("stat: {}", path.display()))?;
        if meta.is_dir() {
            let root_name = dir_label(path)?;
            let mut found = Vec::new();
            walk(path, &mut found, config, &excludes)?;
            found.sort();
            for file in found {
                let rel = relative_label(&root_name, path, &file)?;
                out.push(read_entry(&file, rel)?);
            }
        } else {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("not a valid file name: {}", path.display()))?
                .to_string();
            out.push(read_entry(path, name)?);
        }
    }
    Ok(out)
}

fn read_entry(path: &Path, relative_path: String) -> Result<FileEntry> {
    let content = std::fs::read(path).with_context(|| format!("reading: {}", path.display()))?;
    debug!(path = %path.display(), relative = %relative_path, bytes = content.len(), "selected");
    Ok(FileEntry::from_relative_path(relative_path, content))
}

/// Last component of a directory argument; `.` and `..` resolve to the real name.
fn dir_label(dir: &Path) -> Result<String> {
    let named = match dir.file_name() {
        Some(n) => PathBuf::from(n),
        None => dir
            .canonicalize()
            .with_context(|| format!("resolving: {}", dir.display()))?
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default(),
    };
    named
        .to_str()
        .map(str::to_string)
        .with_context(|| format!("not a valid directory name: {}", dir.display()))
}

fn relative_label(root_name: &str, root: &Path, file: &Path) -> Result<String> {
    let rel = file
        .strip_prefix(root)
        .with_context(|| format!("{} escapes {}", file.display(), root.display()))?;
    let mut label = String::from(root_name);
    for component in rel.components() {
        let part = component
            .as_os_str()
            .to_str()
            .with_context(|| format!("not a valid path: {}", file.display()))?;
        if !label.is_empty() {
            label.push(PATH_SEPARATOR);
        }
        label.push_str(part);
    }
    Ok(label)
}

fn walk(
    dir: &Path,
    out: &mut Vec<PathBuf>,
    config: &SelectionConfig,
    excludes: &[glob::Pattern],
) -> Result<()> {
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading dir: {}", dir.display()))? {
        let entry = entry.context("reading dir entry")?;
        let path = entry.path();
        let meta = entry.metadata().context("stat dir entry")?;

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if excludes.iter().any(|p| p.matches(name)) {
            continue;
        }
        if name.starts_with('.') && !config.include_hidden {
            continue;
        }

        if meta.is_dir() {
            walk(&path, out, config, excludes)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}
