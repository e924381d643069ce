use crate::builder::build_index;
use crate::config::SearchConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::handle::IndexHandle;
use crate::query::{parse_query, retrieve};
use crate::trace::{trace, TraceStep};
use crate::InvertedIndex;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub file: String,
    /// Hits per character, rounded to 6 decimal places. Scores equal at that
    /// precision are ordered by `hits`.
    pub score: f64,
    /// Raw count of query-term occurrences in the document.
    pub hits: usize,
    pub snippet: String,
}

/// Lowercase each character to exactly one character, so char offsets in the
/// result line up with the original text.
fn fold_case(text: &str) -> String {
    text.chars().map(|c| c.to_lowercase().next().unwrap_or(c)).collect()
}

fn count_hits(folded: &str, terms: &[String]) -> usize {
    terms.iter().filter(|t| !t.is_empty()).map(|t| folded.matches(t.as_str()).count()).sum()
}

fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Excerpt of `text` around the earliest match of any term, with the hit upper-cased.
pub fn make_snippet(text: &str, terms: &[String], max_len: usize) -> String {
    let folded = fold_case(text);
    // (char offset, term) of the earliest match; ties keep the first term
    let mut hit: Option<(usize, &str)> = None;
    for term in terms.iter().filter(|t| !t.is_empty()) {
        if let Some(byte_pos) = folded.find(term.to_lowercase().as_str()) {
            let pos = folded[..byte_pos].chars().count();
            if hit.map_or(true, |(best, _)| pos < best) {
                hit = Some((pos, term.as_str()));
            }
        }
    }

    let chars: Vec<char> = text.chars().collect();
    let window: String = match hit {
        None => chars.iter().take(max_len).collect(),
        Some((pos, _)) => {
            let start = pos.saturating_sub(max_len / 4);
            let end = (pos + max_len / 4 * 3).min(chars.len());
            chars[start..end].iter().collect()
        }
    };
    let mut snippet = window.trim().to_string();

    if let Some((_, term)) = hit {
        let upper = term.to_uppercase();
        snippet = snippet.replacen(term, &upper, 1);
        snippet = snippet.replacen(&capitalize(term), &upper, 1);
    }
    snippet.replace(['\n', '\r'], " ")
}

/// Score, snippet and rank every document in `files`. Unreadable documents are skipped.
pub fn rank_results<C, I>(files: I, terms: &[String], corpus: &C, config: &SearchConfig) -> Vec<ScoredResult>
where
    C: Corpus + ?Sized,
    I: IntoIterator<Item = String>,
{
    let mut scored = Vec::new();
    for file in files {
        let text = match corpus.read(&file) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(%file, error = %e, "skipping unreadable document");
                continue;
            }
        };
        let hits = count_hits(&fold_case(&text), terms);
        let length = text.chars().count().max(config.min_doc_len).max(1);
        let score = round6(hits as f64 / length as f64);
        let snippet = make_snippet(&text, terms, config.snippet_len);
        scored.push(ScoredResult { file, score, hits, snippet });
    }
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(b.hits.cmp(&a.hits)));
    scored
}

/// Run `raw` against `index`, reading document text from `corpus`.
pub fn search_query<C: Corpus + ?Sized>(
    raw: &str,
    index: &InvertedIndex,
    corpus: &C,
    config: &SearchConfig,
) -> Vec<ScoredResult> {
    let query = parse_query(raw);
    if query.is_empty() {
        return Vec::new();
    }
    let files = retrieve(&query, index);
    tracing::debug!(query = raw, mode = ?query.mode, terms = query.terms.len(), matched = files.len(), "retrieved");
    rank_results(files, &query.terms, corpus, config)
}

/// Owns the index handle, the corpus and the config used to answer queries.
pub struct SearchEngine<C> {
    handle: IndexHandle,
    corpus: C,
    config: SearchConfig,
    // held for the whole build-save-swap sequence
    rebuild_lock: Mutex<()>,
}

impl<C: Corpus> SearchEngine<C> {
    pub fn new(handle: IndexHandle, corpus: C, config: SearchConfig) -> Self {
        Self { handle, corpus, config, rebuild_lock: Mutex::new(()) }
    }

    pub fn search(&self, raw: &str) -> Result<Vec<ScoredResult>> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let index = self.handle.get()?;
        Ok(search_query(raw, &index, &self.corpus, &self.config))
    }

    pub fn trace(&self, raw: &str) -> Result<Vec<TraceStep>> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        let index = self.handle.get()?;
        Ok(trace(raw, &index))
    }

    /// Rebuild from the corpus, persist, and swap the new index in. Returns the term count.
    ///
    /// Rebuilds run one at a time; queries keep using the previous index until the swap.
    pub fn rebuild(&self) -> Result<usize> {
        let _guard = self.rebuild_lock.lock();
        let index = build_index(&self.corpus)?;
        self.handle.store().save(&index)?;
        let terms = index.num_terms();
        self.handle.replace(index);
        tracing::info!(num_terms = terms, "index rebuilt and swapped");
        Ok(terms)
    }

    /// Build only if nothing is persisted yet. Returns the term count when a build ran.
    pub fn ensure_index(&self) -> Result<Option<usize>> {
        if self.handle.store().exists() {
            return Ok(None);
        }
        tracing::info!(path = %self.handle.store().path.display(), "index missing, building");
        self.rebuild().map(Some)
    }
}
