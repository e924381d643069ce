use crate::tokenizer::tokenize;
use crate::InvertedIndex;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    And,
    Or,
}

/// Parsed query: terms in order of appearance plus how to combine them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub terms: Vec<String>,
    pub mode: QueryMode,
}

impl Query {
    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}

fn is_or(word: &str) -> bool { word.eq_ignore_ascii_case("or") }

/// Parse a raw query.
///
/// `a OR b` (the `OR` matched case-insensitively) pools the terms of every fragment
/// under OR; anything else is tokenized whole and combined under AND.
pub fn parse_query(raw: &str) -> Query {
    let raw = raw.trim();
    if raw.to_uppercase().contains(" OR ") {
        let terms = raw.split_whitespace().filter(|w| !is_or(w)).flat_map(tokenize).collect();
        Query { terms, mode: QueryMode::Or }
    } else {
        Query { terms: tokenize(raw), mode: QueryMode::And }
    }
}

enum Intersection {
    NotStarted,
    Running(BTreeSet<String>),
}

/// Documents matching `query` in `index`.
pub fn retrieve(query: &Query, index: &InvertedIndex) -> BTreeSet<String> {
    match query.mode {
        QueryMode::Or => query.terms.iter().flat_map(|t| index.postings(t).iter().cloned()).collect(),
        QueryMode::And => {
            let mut state = Intersection::NotStarted;
            for term in &query.terms {
                let docs = index.postings(term);
                let next: BTreeSet<String> = match state {
                    Intersection::NotStarted => docs.iter().cloned().collect(),
                    Intersection::Running(acc) => acc.into_iter().filter(|d| docs.contains(d)).collect(),
                };
                if next.is_empty() {
                    return BTreeSet::new();
                }
                state = Intersection::Running(next);
            }
            match state {
                Intersection::NotStarted => BTreeSet::new(),
                Intersection::Running(acc) => acc,
            }
        }
    }
}
