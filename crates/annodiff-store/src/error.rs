use annodiff_types::{AnnotationKey, TypeError};

/// Errors from annotation store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An element references a key that is absent from the store.
    #[error("unresolved annotation: {0}")]
    UnresolvedAnnotation(AnnotationKey),

    /// Two different annotations claim the same key.
    #[error("key collision for {0}: stored annotation differs from incoming one")]
    KeyCollision(AnnotationKey),

    /// A stored annotation does not hash to its key (data corruption).
    #[error("hash mismatch for {key}: stored annotation hashes to {computed}")]
    HashMismatch {
        key: AnnotationKey,
        computed: AnnotationKey,
    },

    /// A close marker does not match the innermost open marker.
    #[error("unbalanced structure at element {index}: expected {expected:?}, found {found:?}")]
    UnbalancedStructure {
        index: usize,
        expected: Option<String>,
        found: Option<String>,
    },

    /// Key derivation failed.
    #[error("type error: {0}")]
    Type(#[from] TypeError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
