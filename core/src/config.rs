use serde::{Deserialize, Serialize};

/// Tunables shared by the builder and the query engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// File extension (without the dot) of documents picked up from the corpus.
    pub extension: String,
    /// Target snippet length in characters.
    pub snippet_len: usize,
    /// Floor applied to the document length when normalizing scores.
    pub min_doc_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { extension: "txt".into(), snippet_len: 160, min_doc_len: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"snippet_len": 80}"#).unwrap();
        assert_eq!(cfg.snippet_len, 80);
        assert_eq!(cfg.min_doc_len, 50);
        assert_eq!(cfg.extension, "txt");
    }
}
