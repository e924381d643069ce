use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Document identifier (the file name within the corpus).
pub type DocName = String;

/// Term → documents containing the term at least once.
///
/// Keys are kept sorted so the serialized form is stable across rebuilds. A term
/// is only present when its posting list is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<DocName>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Record `doc` under every distinct term in `terms`. Repeated terms are counted once.
    ///
    /// Each document is added once per build; posting lists are appended to without a lookup.
    pub fn add_document<I, S>(&mut self, doc: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: HashSet<String> = terms.into_iter().map(Into::into).collect();
        for term in unique {
            self.postings.entry(term).or_default().push(doc.to_string());
        }
    }

    /// Posting list for `term`; empty when the term was never indexed.
    pub fn postings(&self, term: &str) -> &[DocName] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_term(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn terms(&self) -> impl Iterator<Item = &str> { self.postings.keys().map(String::as_str) }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_within_a_document_are_recorded_once() {
        let mut idx = InvertedIndex::new();
        idx.add_document("a.txt", ["cat", "cat", "sat", "cat"]);
        idx.add_document("b.txt", ["cat"]);
        assert_eq!(idx.postings("cat"), ["a.txt".to_string(), "b.txt".to_string()]);
        assert_eq!(idx.postings("sat"), ["a.txt".to_string()]);
        assert_eq!(idx.num_terms(), 2);
    }

    #[test]
    fn unknown_term_has_no_postings_and_no_entry() {
        let mut idx = InvertedIndex::new();
        idx.add_document("a.txt", ["cat"]);
        assert!(idx.postings("dog").is_empty());
        assert!(!idx.contains_term("dog"));
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let mut idx = InvertedIndex::new();
        idx.add_document("b.txt", ["cat"]);
        idx.add_document("a.txt", ["cat", "mat"]);
        let json = serde_json::to_value(&idx).unwrap();
        assert_eq!(json, serde_json::json!({"cat": ["b.txt", "a.txt"], "mat": ["a.txt"]}));
    }
}
