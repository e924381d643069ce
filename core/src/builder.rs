use crate::corpus::Corpus;
use crate::error::Result;
use crate::persist::IndexStore;
use crate::tokenizer::tokenize;
use crate::InvertedIndex;

/// Build the inverted index over every document of `corpus`.
///
/// A document that cannot be read aborts the build; no partial index is returned.
pub fn build_index<C: Corpus + ?Sized>(corpus: &C) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    let ids = corpus.document_ids()?;
    for id in &ids {
        let text = corpus.read(id)?;
        index.add_document(id, tokenize(&text));
    }
    tracing::info!(num_docs = ids.len(), num_terms = index.num_terms(), "ingested documents");
    Ok(index)
}

/// Build the index, persist it through `store` and return the number of distinct terms.
pub fn build_and_persist<C: Corpus + ?Sized>(corpus: &C, store: &IndexStore) -> Result<usize> {
    let index = build_index(corpus)?;
    store.save(&index)?;
    tracing::info!(path = %store.path.display(), num_terms = index.num_terms(), "index build complete");
    Ok(index.num_terms())
}
