use crate::error::{Result, SearchError};
use crate::InvertedIndex;
use std::fs::{create_dir_all, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// JSON file holding an [`InvertedIndex`] as `{term: [file, ...]}`.
#[derive(Debug, Clone)]
pub struct IndexStore {
    pub path: PathBuf,
}

impl IndexStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn exists(&self) -> bool { self.path.is_file() }

    fn io_err(&self, source: std::io::Error) -> SearchError {
        SearchError::IndexIo { path: self.path.clone(), source }
    }

    /// Write the index to a fresh temp file beside its final location, then rename it into place.
    ///
    /// Every save gets its own temp file, so concurrent saves never share one and
    /// readers only ever see a complete index.
    pub fn save(&self, index: &InvertedIndex) -> Result<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from("."),
        };
        create_dir_all(&parent).map_err(|e| self.io_err(e))?;
        let json = serde_json::to_string_pretty(index)?;
        let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| self.io_err(e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| self.io_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_err(e.error))?;
        Ok(())
    }

    pub fn load(&self) -> Result<InvertedIndex> {
        let mut f = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(SearchError::IndexNotFound(self.path.clone())),
            Err(e) => return Err(self.io_err(e)),
        };
        let mut buf = String::new();
        f.read_to_string(&mut buf).map_err(|e| self.io_err(e))?;
        let index: InvertedIndex = serde_json::from_str(&buf)?;
        Ok(index)
    }
}
