//! Content-addressed annotation storage for annodiff.
//!
//! Elements never hold annotations directly. Each annotation is stored once in
//! an [`AnnotationStore`], keyed by the BLAKE3 hash of its content, and
//! elements refer to it by [`AnnotationKey`](annodiff_types::AnnotationKey).
//!
//! # Key Types
//!
//! - [`AnnotationStore`] -- `BTreeMap`-based store with clone-then-merge
//! - [`AnnotationResolver`] -- lookup seam used by the diff comparator
//! - [`Sequence`] / [`SequenceBuilder`] -- one document snapshot and its store
//!
//! # Design Rules
//!
//! 1. Annotations are immutable once stored (content-addressing guarantees this).
//! 2. Equal content maps to the same key in every store, so merging two stores
//!    never renumbers anything.
//! 3. Merging never mutates a source store: clone first, then merge.
//! 4. A key that cannot be resolved is an error, never "no annotations".

pub mod error;
pub mod sequence;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use sequence::{Sequence, SequenceBuilder};
pub use store::AnnotationStore;
pub use traits::AnnotationResolver;
