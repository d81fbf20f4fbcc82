use annodiff_types::{Annotation, AnnotationKey, Element};

use crate::error::StoreResult;

/// Resolves annotation keys to annotation values.
///
/// Implementations must satisfy these invariants:
/// - A key always resolves to the same annotation (keys are content hashes).
/// - A missing key is reported as [`StoreError::UnresolvedAnnotation`](crate::StoreError::UnresolvedAnnotation), never
///   treated as an empty annotation set.
pub trait AnnotationResolver {
    /// Look up an annotation by key.
    fn resolve(&self, key: &AnnotationKey) -> StoreResult<&Annotation>;

    /// Resolve every annotation applied to `element`, in application order.
    ///
    /// Structural elements have no annotations and yield an empty list.
    fn annotations_for(&self, element: &Element) -> StoreResult<Vec<&Annotation>> {
        element
            .annotations()
            .iter()
            .map(|key| self.resolve(key))
            .collect()
    }

    /// Check that every annotation referenced from `elements` resolves.
    fn check_resolvable(&self, elements: &[Element]) -> StoreResult<()> {
        for element in elements {
            for key in element.annotations() {
                self.resolve(key)?;
            }
        }
        Ok(())
    }
}
