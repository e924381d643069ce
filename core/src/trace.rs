use crate::InvertedIndex;
use serde::{Deserialize, Serialize};

/// One indexed term and whether it is exactly the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub term: String,
    pub matched: bool,
}

/// Walk every indexed term, flagging the one equal to `raw` (case-insensitive, untokenized).
pub fn trace(raw: &str, index: &InvertedIndex) -> Vec<TraceStep> {
    if raw.is_empty() {
        return Vec::new();
    }
    let needle = raw.to_lowercase();
    index
        .terms()
        .map(|term| TraceStep { term: term.to_string(), matched: term == needle })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_exact_term_only() {
        let mut idx = InvertedIndex::new();
        idx.add_document("a.txt", ["cat", "catalog", "dog"]);
        let steps = trace("CAT", &idx);
        assert_eq!(steps.len(), 3);
        let matched: Vec<&str> = steps.iter().filter(|s| s.matched).map(|s| s.term.as_str()).collect();
        assert_eq!(matched, vec!["cat"]);
    }

    #[test]
    fn multi_word_query_matches_nothing() {
        let mut idx = InvertedIndex::new();
        idx.add_document("a.txt", ["cat", "dog"]);
        assert!(trace("cat dog", &idx).iter().all(|s| !s.matched));
        assert!(trace("", &idx).is_empty());
    }
}
