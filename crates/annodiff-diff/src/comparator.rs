//! Element equality rules used by the diff engine and the cleaner.

use std::collections::BTreeSet;

use annodiff_store::{AnnotationResolver, AnnotationStore, StoreResult};
use annodiff_types::{Annotation, AnnotationKey, Element};

/// Equality predicates closed over a merged annotation store.
///
/// Both input sequences must resolve against the same store so that equal
/// annotations carry equal keys. Call [`Self::check_resolvable`] on every
/// input before using the predicates; after that they are pure and cannot
/// fail.
#[derive(Clone, Debug)]
pub struct Comparator {
    store: AnnotationStore,
}

impl Comparator {
    /// Bind a comparator to an already merged store.
    pub fn new(store: AnnotationStore) -> Self {
        Self { store }
    }

    /// The merged store.
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Check that every annotation in `elements` resolves in the merged store.
    pub fn check_resolvable(&self, elements: &[Element]) -> StoreResult<()> {
        self.store.check_resolvable(elements)
    }

    /// Full equality: same content and comparable annotation sets.
    ///
    /// Annotations match when they have the same name and attributes, so two
    /// links that differ only in their original markup are equal.
    pub fn is_equal_element(&self, a: &Element, b: &Element) -> bool {
        a == b || (a.same_content(b) && self.same_annotations(a.annotations(), b.annotations()))
    }

    /// Content equality ignoring annotations.
    pub fn is_equal_unannotated(&self, a: &Element, b: &Element) -> bool {
        a.same_content(b)
    }

    /// Length-equal and pairwise [`Self::is_equal_element`].
    ///
    /// `None` only equals `None`.
    pub fn is_equal_sequence(&self, a: Option<&[Element]>, b: Option<&[Element]>) -> bool {
        match (a, b) {
            (None, None) => true,
            (None, Some(_)) | (Some(_), None) => false,
            (Some(a), Some(b)) => {
                if std::ptr::eq(a, b) {
                    return true;
                }
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| self.is_equal_element(x, y))
            }
        }
    }

    /// Returns `true` if `set` holds an annotation comparable to `annotation`
    /// (same name and attributes).
    pub fn contains_comparable(&self, set: &[&Annotation], annotation: &Annotation) -> bool {
        set.iter().any(|a| a.is_comparable_to(annotation))
    }

    /// Every distinct annotation applied anywhere in `data`, in order of first
    /// appearance.
    pub fn annotations_in(&self, data: &[Element]) -> StoreResult<Vec<&Annotation>> {
        let mut seen = BTreeSet::new();
        let mut annotations = Vec::new();
        for element in data {
            for key in element.annotations() {
                if seen.insert(*key) {
                    annotations.push(self.store.resolve(key)?);
                }
            }
        }
        Ok(annotations)
    }
}

impl Comparator {
    fn same_annotations(&self, a: &[AnnotationKey], b: &[AnnotationKey]) -> bool {
        if same_key_set(a, b) {
            return true;
        }
        let (Some(a), Some(b)) = (self.resolve_all(a), self.resolve_all(b)) else {
            return false;
        };
        a.iter().all(|x| self.contains_comparable(&b, x))
            && b.iter().all(|y| self.contains_comparable(&a, y))
    }

    fn resolve_all(&self, keys: &[AnnotationKey]) -> Option<Vec<&Annotation>> {
        keys.iter().map(|key| self.store.resolve(key).ok()).collect()
    }
}

fn same_key_set(a: &[AnnotationKey], b: &[AnnotationKey]) -> bool {
    if a == b {
        return true;
    }
    a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
}
