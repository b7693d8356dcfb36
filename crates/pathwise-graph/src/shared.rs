//! Shared access to a concept store.
//!
//! [`SharedConceptGraph`] wraps a [`ConceptGraph`] in an `Arc<RwLock<_>>`
//! so any number of threads can run queries while a single writer adds
//! concepts or swaps in a reloaded dataset. Readers never see a partially
//! applied `add_concept` or reload.

use crate::persistence::ConceptDocument;
use crate::{Concept, ConceptGraph};
use parking_lot::RwLock;
use pathwise_core::Result;
use std::sync::Arc;

/// Cloneable, thread-safe handle to a concept store.
#[derive(Clone, Debug, Default)]
pub struct SharedConceptGraph {
    inner: Arc<RwLock<ConceptGraph>>,
}

impl SharedConceptGraph {
    /// Wraps an existing store.
    pub fn new(graph: ConceptGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Runs `f` against the store under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&ConceptGraph) -> R) -> R {
        f(&self.inner.read())
    }

    /// Inserts or overwrites a concept under the write lock.
    pub fn add_concept(&self, concept: Concept) {
        self.inner.write().add_concept(concept);
    }

    /// Replaces the store with a freshly built one.
    ///
    /// The new store is built before the lock is taken; if the document is
    /// invalid the current contents stay in place.
    pub fn reload(&self, document: ConceptDocument) -> Result<()> {
        let fresh = ConceptGraph::from_document(document)?;
        *self.inner.write() = fresh;
        log::info!("Reloaded concept store");
        Ok(())
    }

    /// Clones the current store.
    pub fn snapshot(&self) -> ConceptGraph {
        self.inner.read().clone()
    }
}

impl From<ConceptGraph> for SharedConceptGraph {
    fn from(graph: ConceptGraph) -> Self {
        Self::new(graph)
    }
}

// ============================================================================
// Tests
// ============================================================================
