use crate::error::{Result, SearchError};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of documents: enumerates identifiers and reads full text on demand.
pub trait Corpus {
    /// Identifiers of all indexable documents, sorted.
    fn document_ids(&self) -> Result<Vec<String>>;
    /// Full UTF-8 text of one document.
    fn read(&self, id: &str) -> Result<String>;
}

/// A flat directory of text files; the file name is the document identifier.
#[derive(Debug, Clone)]
pub struct DirCorpus {
    pub root: PathBuf,
    pub extension: String,
}

impl DirCorpus {
    pub fn new<P: AsRef<Path>>(root: P, extension: impl Into<String>) -> Self {
        Self { root: root.as_ref().to_path_buf(), extension: extension.into() }
    }

    pub fn path_of(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

impl Corpus for DirCorpus {
    fn document_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        // Only the top level of the folder is part of the corpus
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|source| SearchError::CorpusScan { path: self.root.clone(), source })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let p = entry.path();
            if p.extension().and_then(|s| s.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(name) = p.file_name().and_then(|s| s.to_str()) {
                ids.push(name.to_string());
            }
        }
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<String> {
        let path = self.path_of(id);
        std::fs::read_to_string(&path).map_err(|source| SearchError::CorpusRead { path, source })
    }
}

/// Documents held in memory, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    docs: BTreeMap<String, String>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(id.into(), text.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryCorpus {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut corpus = Self::new();
        for (id, text) in iter {
            corpus.insert(id, text);
        }
        corpus
    }
}

impl Corpus for MemoryCorpus {
    fn document_ids(&self) -> Result<Vec<String>> {
        Ok(self.docs.keys().cloned().collect())
    }

    fn read(&self, id: &str) -> Result<String> {
        self.docs.get(id).cloned().ok_or_else(|| SearchError::CorpusRead {
            path: PathBuf::from(id),
            source: io::Error::new(io::ErrorKind::NotFound, "document not in corpus"),
        })
    }
}

impl<C: Corpus + ?Sized> Corpus for &C {
    fn document_ids(&self) -> Result<Vec<String>> {
        (**self).document_ids()
    }

    fn read(&self, id: &str) -> Result<String> {
        (**self).read(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn dir_corpus_filters_by_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "beta").unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::write(dir.path().join("notes.md"), "skip me").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();
        fs::write(dir.path().join("nested.txt").join("c.txt"), "deep").unwrap();

        let corpus = DirCorpus::new(dir.path(), "txt");
        assert_eq!(corpus.document_ids().unwrap(), vec!["a.txt", "b.txt"]);
        assert_eq!(corpus.read("a.txt").unwrap(), "alpha");
    }

    #[test]
    fn dir_corpus_missing_document_is_read_error() {
        let dir = tempdir().unwrap();
        let corpus = DirCorpus::new(dir.path(), "txt");
        assert!(matches!(corpus.read("gone.txt"), Err(SearchError::CorpusRead { .. })));
    }

    #[test]
    fn missing_folder_is_scan_error() {
        let dir = tempdir().unwrap();
        let corpus = DirCorpus::new(dir.path().join("nope"), "txt");
        assert!(matches!(corpus.document_ids(), Err(SearchError::CorpusScan { .. })));
    }
}
