use std::collections::BTreeMap;

use annodiff_types::{Annotation, AnnotationKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::AnnotationResolver;

/// Content-addressed annotation store.
///
/// Maps [`AnnotationKey`]s to [`Annotation`]s. Keys are derived from content,
/// so inserting the same annotation twice is a no-op and two independently
/// built stores always agree on shared keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationStore {
    annotations: BTreeMap<AnnotationKey, Annotation>,
}

impl AnnotationStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an annotation and return its key.
    ///
    /// Idempotent: storing an annotation that is already present returns the
    /// existing key.
    pub fn insert(&mut self, annotation: Annotation) -> StoreResult<AnnotationKey> {
        let key = annotation.key()?;
        self.insert_keyed(key, annotation)?;
        Ok(key)
    }

    /// Build a store holding every annotation in `annotations`.
    pub fn from_annotations<I>(annotations: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = Annotation>,
    {
        let mut store = Self::new();
        for annotation in annotations {
            store.insert(annotation)?;
        }
        Ok(store)
    }

    /// Store an annotation under an already-computed key.
    fn insert_keyed(&mut self, key: AnnotationKey, annotation: Annotation) -> StoreResult<bool> {
        match self.annotations.get(&key) {
            Some(existing) if *existing == annotation => Ok(false),
            Some(_) => Err(StoreError::KeyCollision(key)),
            None => {
                self.annotations.insert(key, annotation);
                Ok(true)
            }
        }
    }

    /// Look up an annotation by key.
    pub fn get(&self, key: &AnnotationKey) -> Option<&Annotation> {
        self.annotations.get(key)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &AnnotationKey) -> bool {
        self.annotations.contains_key(key)
    }

    /// Number of stored annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Iterate over `(key, annotation)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&AnnotationKey, &Annotation)> {
        self.annotations.iter()
    }

    /// Merge every annotation of `other` into this store.
    ///
    /// Returns the number of keys that were new to this store. Equal content
    /// collapses onto the same key; a key whose stored content differs is a
    /// [`StoreError::KeyCollision`].
    pub fn merge(&mut self, other: &AnnotationStore) -> StoreResult<usize> {
        let mut added = 0;
        for (key, annotation) in &other.annotations {
            if self.insert_keyed(*key, annotation.clone())? {
                added += 1;
            }
        }
        debug!(added, total = self.len(), "merged annotation store");
        Ok(added)
    }

    /// Clone this store and merge `other` into the clone.
    ///
    /// Neither source store is modified.
    pub fn merged(&self, other: &AnnotationStore) -> StoreResult<AnnotationStore> {
        let mut store = self.clone();
        store.merge(other)?;
        Ok(store)
    }

    /// Verify that every stored annotation hashes to its key.
    ///
    /// Stores built through [`Self::insert`] always pass; deserialized stores
    /// should be verified before use.
    pub fn verify(&self) -> StoreResult<()> {
        for (key, annotation) in &self.annotations {
            let computed = annotation.key()?;
            if computed != *key {
                return Err(StoreError::HashMismatch {
                    key: *key,
                    computed,
                });
            }
        }
        Ok(())
    }
}

impl AnnotationResolver for AnnotationStore {
    fn resolve(&self, key: &AnnotationKey) -> StoreResult<&Annotation> {
        self.annotations
            .get(key)
            .ok_or(StoreError::UnresolvedAnnotation(*key))
    }
}
