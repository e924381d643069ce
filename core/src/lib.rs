//! Core of a small full-text search engine over a folder of plain-text files.
//!
//! The pipeline is: [`tokenizer`] → [`builder`] → [`persist`] on the build side,
//! and [`handle`] → [`query`] → [`search`] on the query side.

pub mod builder;
pub mod config;
pub mod corpus;
pub mod error;
pub mod handle;
pub mod index;
pub mod persist;
pub mod query;
pub mod search;
pub mod tokenizer;
pub mod trace;

pub use builder::{build_and_persist, build_index};
pub use config::SearchConfig;
pub use corpus::{Corpus, DirCorpus, MemoryCorpus};
pub use error::{Result, SearchError};
pub use handle::IndexHandle;
pub use index::{DocName, InvertedIndex};
pub use persist::IndexStore;
pub use query::{parse_query, retrieve, Query, QueryMode};
pub use search::{search_query, ScoredResult, SearchEngine};
pub use trace::{trace, TraceStep};
