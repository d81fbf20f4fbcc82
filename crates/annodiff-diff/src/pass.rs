use crate::comparator::Comparator;
use crate::error::DiffResult;
use crate::op::DiffOp;
use crate::wordbreak::WordBreak;

// ---------------------------------------------------------------------------
// PassContext
// ---------------------------------------------------------------------------

/// Collaborators available to every cleaning pass.
pub struct PassContext<'a> {
    /// Equality rules over the merged annotation store.
    pub comparator: &'a Comparator,
    /// Word segmentation used for alignment.
    pub word_break: &'a dyn WordBreak,
}

impl<'a> PassContext<'a> {
    pub fn new(comparator: &'a Comparator, word_break: &'a dyn WordBreak) -> Self {
        Self {
            comparator,
            word_break,
        }
    }
}

// ---------------------------------------------------------------------------
// CleanPass trait
// ---------------------------------------------------------------------------

/// A single rewrite of the op list in the cleaning pipeline.
///
/// A pass consumes the list and builds a new one. It must not change what
/// the ops reconstruct: concatenating the old-side (new-side) data of the
/// output gives exactly the old-side (new-side) data of the input.
///
/// The trait is object-safe and `Send + Sync` so passes can be stored in a
/// `Vec<Box<dyn CleanPass>>`.
pub trait CleanPass: Send + Sync {
    /// Short name used in logs and invariant errors (e.g. "collapse").
    fn name(&self) -> &str;

    /// Rewrite `ops`.
    fn apply(&self, ops: Vec<DiffOp>, ctx: &PassContext<'_>) -> DiffResult<Vec<DiffOp>>;
}
