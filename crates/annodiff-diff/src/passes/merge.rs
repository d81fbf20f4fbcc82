use crate::error::DiffResult;
use crate::op::DiffOp;
use crate::pass::{CleanPass, PassContext};

/// Joins consecutive ops with the same action and drops empty ones.
pub struct MergePass;

impl CleanPass for MergePass {
    fn name(&self) -> &str {
        "merge"
    }

    fn apply(&self, ops: Vec<DiffOp>, _ctx: &PassContext<'_>) -> DiffResult<Vec<DiffOp>> {
        let mut out: Vec<DiffOp> = Vec::with_capacity(ops.len());
        for op in ops {
            if op.is_empty() {
                continue;
            }
            match out.last_mut() {
                Some(last) if last.action == op.action => {
                    last.data.extend(op.data);
                    last.annotation_changes.extend(op.annotation_changes);
                }
                _ => out.push(op),
            }
        }
        Ok(out)
    }
}
