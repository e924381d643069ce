use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("failed to read document {path}: {source}")]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to scan corpus {path}: {source}")]
    CorpusScan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("index not found at {0}; build the index first")]
    IndexNotFound(PathBuf),
    #[error("index store I/O error at {path}: {source}")]
    IndexIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed index: {0}")]
    IndexFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
