use crate::error::Result;
use crate::persist::IndexStore;
use crate::InvertedIndex;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, lazily loaded view of the persisted index.
///
/// Clones share one cache. Readers get an `Arc` snapshot and never hold the lock
/// while querying, so swapping in a rebuilt index does not disturb queries in flight.
#[derive(Clone)]
pub struct IndexHandle {
    store: IndexStore,
    cached: Arc<RwLock<Option<Arc<InvertedIndex>>>>,
}

impl IndexHandle {
    pub fn new(store: IndexStore) -> Self {
        Self { store, cached: Arc::new(RwLock::new(None)) }
    }

    /// Handle pre-populated with an in-memory index.
    pub fn with_index(store: IndexStore, index: InvertedIndex) -> Self {
        Self { store, cached: Arc::new(RwLock::new(Some(Arc::new(index)))) }
    }

    pub fn store(&self) -> &IndexStore { &self.store }

    pub fn is_loaded(&self) -> bool { self.cached.read().is_some() }

    /// Current index, loading it from the store on first use.
    pub fn get(&self) -> Result<Arc<InvertedIndex>> {
        if let Some(idx) = self.cached.read().as_ref() {
            return Ok(Arc::clone(idx));
        }
        let mut slot = self.cached.write();
        // another caller may have loaded it while we waited for the write lock
        if let Some(idx) = slot.as_ref() {
            return Ok(Arc::clone(idx));
        }
        let idx = Arc::new(self.store.load()?);
        tracing::info!(path = %self.store.path.display(), num_terms = idx.num_terms(), "index loaded");
        *slot = Some(Arc::clone(&idx));
        Ok(idx)
    }

    /// Drop the cached index; the next `get` reads the store again.
    pub fn invalidate(&self) {
        *self.cached.write() = None;
    }

    /// Load from the store and swap the result in.
    pub fn reload(&self) -> Result<Arc<InvertedIndex>> {
        let idx = Arc::new(self.store.load()?);
        *self.cached.write() = Some(Arc::clone(&idx));
        tracing::info!(num_terms = idx.num_terms(), "index reloaded");
        Ok(idx)
    }

    pub fn replace(&self, index: InvertedIndex) -> Arc<InvertedIndex> {
        let idx = Arc::new(index);
        *self.cached.write() = Some(Arc::clone(&idx));
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchError;
    use tempfile::tempdir;

    fn index_with(doc: &str, term: &str) -> InvertedIndex {
        let mut idx = InvertedIndex::new();
        idx.add_document(doc, [term]);
        idx
    }

    #[test]
    fn lazy_load_then_cached() {
        let dir = tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("index.json"));
        store.save(&index_with("a.txt", "cat")).unwrap();

        let handle = IndexHandle::new(store.clone());
        assert!(!handle.is_loaded());
        let first = handle.get().unwrap();
        assert!(handle.is_loaded());

        // changes on disk are not seen until invalidated
        store.save(&index_with("b.txt", "dog")).unwrap();
        assert!(Arc::ptr_eq(&first, &handle.get().unwrap()));

        handle.invalidate();
        assert!(handle.get().unwrap().contains_term("dog"));
    }

    #[test]
    fn missing_index_surfaces_error() {
        let dir = tempdir().unwrap();
        let handle = IndexHandle::new(IndexStore::new(dir.path().join("index.json")));
        assert!(matches!(handle.get(), Err(SearchError::IndexNotFound(_))));
        assert!(!handle.is_loaded());
    }

    #[test]
    fn replace_keeps_old_snapshots_alive() {
        let dir = tempdir().unwrap();
        let handle = IndexHandle::with_index(IndexStore::new(dir.path().join("i.json")), index_with("a.txt", "cat"));
        let clone = handle.clone();
        let old = handle.get().unwrap();
        clone.replace(index_with("b.txt", "dog"));
        assert!(old.contains_term("cat"));
        assert!(handle.get().unwrap().contains_term("dog"));
    }

    #[test]
    fn reload_reads_store() {
        let dir = tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("index.json"));
        let handle = IndexHandle::with_index(store.clone(), InvertedIndex::new());
        store.save(&index_with("a.txt", "cat")).unwrap();
        assert!(handle.reload().unwrap().contains_term("cat"));
    }
}
