use std::time::Instant;

use annodiff_types::Element;
use tracing::debug;

use crate::comparator::Comparator;
use crate::error::{DiffError, DiffResult};
use crate::op::{new_side, old_side, DiffOp};
use crate::pass::{CleanPass, PassContext};
use crate::passes::{ChangePass, CollapsePass, DestripePass, MergePass, WordAlignPass};

// ---------------------------------------------------------------------------
// DiffCleaner
// ---------------------------------------------------------------------------

/// Turns a minimal edit script into a human-friendly one.
///
/// The standard pipeline is:
/// collapse -> merge -> word-align -> destripe -> change
///
/// Change actions in the input are downgraded to plain deletes and inserts
/// first, so cleaning an already clean diff is allowed.
pub struct DiffCleaner {
    passes: Vec<Box<dyn CleanPass>>,
    verify: bool,
}

impl DiffCleaner {
    /// The standard five-pass pipeline, without verification.
    pub fn new() -> Self {
        let mut cleaner = Self::empty();
        cleaner.add_pass(Box::new(CollapsePass));
        cleaner.add_pass(Box::new(MergePass));
        cleaner.add_pass(Box::new(WordAlignPass));
        cleaner.add_pass(Box::new(DestripePass));
        cleaner.add_pass(Box::new(ChangePass));
        cleaner
    }

    /// A cleaner with no passes. Use [`Self::add_pass`] to build a pipeline.
    pub fn empty() -> Self {
        Self {
            passes: Vec::new(),
            verify: false,
        }
    }

    /// Append a pass to the end of the pipeline.
    pub fn add_pass(&mut self, pass: Box<dyn CleanPass>) {
        self.passes.push(pass);
    }

    /// Check the round-trip property after every pass.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Names of the passes in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass over `ops`.
    pub fn clean(&self, ops: Vec<DiffOp>, ctx: &PassContext<'_>) -> DiffResult<Vec<DiffOp>> {
        let start = Instant::now();
        let mut ops: Vec<DiffOp> = ops.into_iter().map(downgrade).collect();
        let expected = self.verify.then(|| (old_side(&ops), new_side(&ops)));

        for pass in &self.passes {
            let pass_start = Instant::now();
            let ops_in = ops.len();
            ops = pass.apply(ops, ctx)?;
            debug!(
                pass = pass.name(),
                ops_in,
                ops_out = ops.len(),
                elapsed = ?pass_start.elapsed(),
                "clean pass applied"
            );
            if let Some((old, new)) = &expected {
                verify_round_trip(pass.name(), ctx.comparator, old, new, &ops)?;
            }
        }

        debug!(ops = ops.len(), elapsed = ?start.elapsed(), "diff cleaned");
        Ok(ops)
    }
}

impl Default for DiffCleaner {
    fn default() -> Self {
        Self::new()
    }
}

fn downgrade(mut op: DiffOp) -> DiffOp {
    op.action = op.action.base();
    op.annotation_changes.clear();
    op
}

/// Fail unless `ops` reconstruct `old` and `new`.
pub(crate) fn verify_round_trip(
    stage: &str,
    comparator: &Comparator,
    old: &[Element],
    new: &[Element],
    ops: &[DiffOp],
) -> DiffResult<()> {
    let rebuilt_old = old_side(ops);
    if !comparator.is_equal_sequence(Some(old), Some(rebuilt_old.as_slice())) {
        return Err(DiffError::invariant(
            stage,
            format!(
                "old side no longer round-trips ({} elements, expected {})",
                rebuilt_old.len(),
                old.len()
            ),
        ));
    }
    let rebuilt_new = new_side(ops);
    if !comparator.is_equal_sequence(Some(new), Some(rebuilt_new.as_slice())) {
        return Err(DiffError::invariant(
            stage,
            format!(
                "new side no longer round-trips ({} elements, expected {})",
                rebuilt_new.len(),
                new.len()
            ),
        ));
    }
    Ok(())
}
