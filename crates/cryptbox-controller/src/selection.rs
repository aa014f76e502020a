//! File Selection Model: the ordered list of files chosen for encryption and
//! the folder-grouped view derived from it.
//!
//! Entries are identified by position. Duplicates by name are allowed. The
//! folder view is recomputed from the list on every call and only references
//! entries by index; expand/collapse state is kept separately, keyed by folder.

use bytes::Bytes;
use std::collections::BTreeMap;

/// Folder key used for files whose relative path has no folder component.
pub const ROOT_FOLDER: &str = "(root)";

/// Separator used inside relative paths, regardless of host platform.
pub const PATH_SEPARATOR: char = '/';

/// One user-selected file.
#[derive(Clone)]
pub struct FileEntry {
    pub name: String,
    /// May embed folder separators, e.g. `photos/2024/img.jpg`
    pub relative_path: String,
    pub size_bytes: u64,
    content: Bytes,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, relative_path: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            size_bytes: content.len() as u64,
            content,
        }
    }

    /// Entry whose name is the last segment of `relative_path`.
    pub fn from_relative_path(relative_path: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let relative_path = relative_path.into();
        let name = relative_path
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or_default()
            .to_string();
        Self::new(name, relative_path, content)
    }

    /// Path used for grouping and upload: the relative path, or the bare name
    /// when no relative path was recorded.
    pub fn display_path(&self) -> &str {
        if self.relative_path.is_empty() {
            &self.name
        } else {
            &self.relative_path
        }
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl std::fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEntry")
            .field("name", &self.name)
            .field("relative_path", &self.relative_path)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

/// Split a relative path into (folder key, display name).
pub fn folder_key(path: &str) -> (&str, &str) {
    match path.rsplit_once(PATH_SEPARATOR) {
        Some((folder, name)) => (folder, name),
        None => (ROOT_FOLDER, path),
    }
}

// ── Folder grouping ───────────────────────────────────────────────────────────

/// One member of a folder group, borrowed from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupItem<'a> {
    /// Position in the selection; pass to [`FileSelection::remove_at`]
    pub index: usize,
    /// Last path segment
    pub name: &'a str,
    pub full_path: &'a str,
}

/// Files sharing a folder key, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderGroup<'a> {
    pub folder: &'a str,
    pub items: Vec<GroupItem<'a>>,
}

impl FolderGroup<'_> {
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().map(|item| item.index)
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    entries: Vec<FileEntry>,
    /// Display state per folder key; absent means expanded
    expanded: BTreeMap<String, bool>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append files in the given order. Never deduplicates.
    pub fn add(&mut self, files: impl IntoIterator<Item = FileEntry>) {
        self.entries.extend(files);
    }

    /// Remove exactly one entry. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<FileEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Empty the selection and forget all expand/collapse state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }

    /// Group entry indices by folder, folders ordered by first appearance.
    pub fn group_by_folder(&self) -> Vec<FolderGroup<'_>> {
        let mut groups: Vec<FolderGroup<'_>> = Vec::new();
        let mut position: BTreeMap<&str, usize> = BTreeMap::new();

        for (index, entry) in self.entries.iter().enumerate() {
            let full_path = entry.display_path();
            let (folder, name) = folder_key(full_path);
            let item = GroupItem {
                index,
                name,
                full_path,
            };
            match position.get(folder) {
                Some(&slot) => groups[slot].items.push(item),
                None => {
                    position.insert(folder, groups.len());
                    groups.push(FolderGroup {
                        folder,
                        items: vec![item],
                    });
                }
            }
        }

        groups
    }

    pub fn is_expanded(&self, folder: &str) -> bool {
        self.expanded.get(folder).copied().unwrap_or(true)
    }

    /// Flip a folder between expanded and collapsed; returns the new state.
    pub fn toggle_folder(&mut self, folder: &str) -> bool {
        let next = !self.is_expanded(folder);
        self.expanded.insert(folder.to_string(), next);
        next
    }
}
