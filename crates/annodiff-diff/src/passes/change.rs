use annodiff_types::Element;

use crate::comparator::Comparator;
use crate::error::DiffResult;
use crate::op::{AnnotationChange, DiffAction, DiffOp};
use crate::pass::{CleanPass, PassContext};

use super::is_complementary;

/// Marks delete/insert pairs that only differ in formatting as changes.
///
/// A pair qualifies when both sides have the same length and the same content
/// once annotations are ignored. For every annotation on the new side whose
/// type also appears on the old side without a comparable instance, an
/// [`AnnotationChange`] is recorded on the second op and both ops are
/// promoted to `ChangeDelete` / `ChangeInsert`.
pub struct ChangePass;

impl CleanPass for ChangePass {
    fn name(&self) -> &str {
        "change"
    }

    fn apply(&self, mut ops: Vec<DiffOp>, ctx: &PassContext<'_>) -> DiffResult<Vec<DiffOp>> {
        let cmp = ctx.comparator;
        let mut index = 0;
        while index + 1 < ops.len() {
            let (a, b) = (&ops[index], &ops[index + 1]);
            if !is_complementary(a.action, b.action) || !same_content(cmp, &a.data, &b.data) {
                index += 1;
                continue;
            }
            let (old, new) = if a.action == DiffAction::Delete {
                (a, b)
            } else {
                (b, a)
            };
            let changes = annotation_changes(cmp, &old.data, &new.data)?;
            if !changes.is_empty() {
                ops[index].action = ops[index].action.promoted();
                ops[index + 1].action = ops[index + 1].action.promoted();
                ops[index + 1].annotation_changes = changes;
            }
            // The second op of a qualifying pair never starts another pair.
            index += 2;
        }
        Ok(ops)
    }
}

fn same_content(cmp: &Comparator, a: &[Element], b: &[Element]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| cmp.is_equal_unannotated(x, y))
}

fn annotation_changes(
    cmp: &Comparator,
    old: &[Element],
    new: &[Element],
) -> DiffResult<Vec<AnnotationChange>> {
    let old_annotations = cmp.annotations_in(old)?;
    let new_annotations = cmp.annotations_in(new)?;

    let mut changes = Vec::new();
    for annotation in new_annotations {
        let Some(same_name) = old_annotations.iter().find(|a| a.same_name(annotation)) else {
            continue;
        };
        if !cmp.contains_comparable(&old_annotations, annotation) {
            changes.push(AnnotationChange {
                old: (*same_name).clone(),
                new: annotation.clone(),
            });
        }
    }
    Ok(changes)
}
