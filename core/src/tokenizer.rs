use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_TERM: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
}

/// Tokenize text into index terms: lowercase, punctuation replaced by spaces, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned = NON_TERM.replace_all(&lowered, " ");
    cleaned.split_whitespace().map(str::to_string).collect()
}
