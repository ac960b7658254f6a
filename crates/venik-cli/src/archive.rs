//! Local directory standing in for the object store that holds archived
//! product pages.
//!
//! A document's storage key is its path relative to the archive root with
//! `/` separators, e.g. `Jumbo/zuivel/halfvolle-melk-1-l-123456PAK.html`.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;

const DOCUMENT_EXTENSION: &str = "html";

/// One archived page: where it lives and the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArchivedDocument {
    pub key: String,
    pub path: PathBuf,
}

impl ArchivedDocument {
    /// Reads the raw document bytes.
    pub(crate) fn read(&self) -> anyhow::Result<Vec<u8>> {
        std::fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))
    }
}

/// Handle on an archive directory. Cheap to construct; performs no I/O until
/// asked to list documents.
#[derive(Debug, Clone)]
pub(crate) struct LocalArchive {
    root: PathBuf,
}

impl LocalArchive {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Every `*.html` file beneath the root (extension matched
    /// case-insensitively), sorted by storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the root or any directory beneath it cannot be read.
    pub(crate) fn list_documents(&self) -> anyhow::Result<Vec<ArchivedDocument>> {
        let mut documents = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let entries = std::fs::read_dir(&dir)
                .with_context(|| format!("failed to list archive directory {}", dir.display()))?;
            for entry in entries {
                let entry = entry
                    .with_context(|| format!("failed to read entry in {}", dir.display()))?;
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .with_context(|| format!("failed to stat {}", path.display()))?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if is_document(&path) {
                    let key = self.key_for(&path);
                    documents.push(ArchivedDocument { key, path });
                }
            }
        }

        documents.sort_by(|a, b| a.key.cmp(&b.key));
        tracing::debug!(
            root = %self.root.display(),
            documents = documents.len(),
            "listed archive"
        );
        Ok(documents)
    }

    /// Storage key for `path`: relative to the root when the path lies inside
    /// it, otherwise the path itself. `.` components are ignored either way.
    pub(crate) fn key_for(&self, path: &Path) -> String {
        let root = normal_components(&self.root);
        let full = normal_components(path);
        let relative = if full.len() > root.len() && full.starts_with(&root) {
            &full[root.len()..]
        } else {
            &full[..]
        };
        relative.join("/")
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, contents: &[u8]) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn lists_html_files_recursively_sorted_by_key() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Jumbo/zuivel/melk-1-l-2PAK.html", b"<p>melk</p>");
        write(dir.path(), "Jumbo/brood/wit-1STK.HTML", b"<p>brood</p>");
        write(dir.path(), "Jumbo/brood/notes.txt", b"not a page");
        write(dir.path(), "Jumbo/dranken/frisdrank/cola-1-l-3FLS.html", b"<p>cola</p>");

        let archive = LocalArchive::new(dir.path());
        let keys: Vec<String> = archive
            .list_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.key)
            .collect();

        assert_eq!(
            keys,
            [
                "Jumbo/brood/wit-1STK.HTML",
                "Jumbo/dranken/frisdrank/cola-1-l-3FLS.html",
                "Jumbo/zuivel/melk-1-l-2PAK.html",
            ]
        );
    }

    #[test]
    fn empty_archive_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let archive = LocalArchive::new(dir.path());
        assert!(archive.list_documents().unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = LocalArchive::new(dir.path().join("absent"));
        let err = archive.list_documents().unwrap_err();
        assert!(
            format!("{err:#}").contains("failed to list archive directory"),
            "{err:#}"
        );
    }

    #[test]
    fn listed_document_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Jumbo/a/b-1X.html", b"<h1>x</h1>");
        let archive = LocalArchive::new(dir.path());
        let documents = archive.list_documents().unwrap();
        assert_eq!(documents[0].read().unwrap(), b"<h1>x</h1>");
    }

    #[test]
    fn key_is_relative_to_root() {
        let archive = LocalArchive::new("./archive");
        assert_eq!(
            archive.key_for(Path::new("archive/Jumbo/zuivel/melk-2PAK.html")),
            "Jumbo/zuivel/melk-2PAK.html"
        );
    }

    #[test]
    fn key_outside_root_is_the_path_itself() {
        let archive = LocalArchive::new("./archive");
        assert_eq!(
            archive.key_for(Path::new("downloads/Jumbo/zuivel/melk-2PAK.html")),
            "downloads/Jumbo/zuivel/melk-2PAK.html"
        );
    }
}
