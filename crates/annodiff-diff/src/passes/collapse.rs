use crate::error::DiffResult;
use crate::op::{DiffAction, DiffOp};
use crate::pass::{CleanPass, PassContext};

use super::is_complementary;

/// Turns a Delete and an Insert of equal data into one Retain.
///
/// Data is compared with the comparator, so annotation order and annotation
/// source markup do not matter. Empty ops are skipped over when looking for a partner,
/// and an op is collapsed at most once.
pub struct CollapsePass;

impl CleanPass for CollapsePass {
    fn name(&self) -> &str {
        "collapse"
    }

    fn apply(&self, ops: Vec<DiffOp>, ctx: &PassContext<'_>) -> DiffResult<Vec<DiffOp>> {
        let mut out: Vec<DiffOp> = Vec::with_capacity(ops.len());
        // Position in `out` of the last non-empty op still free to pair.
        let mut candidate: Option<usize> = None;

        for op in ops {
            if op.is_empty() {
                out.push(op);
                continue;
            }
            if let Some(at) = candidate {
                let prev = &mut out[at];
                if is_complementary(prev.action, op.action)
                    && ctx
                        .comparator
                        .is_equal_sequence(Some(prev.data.as_slice()), Some(op.data.as_slice()))
                {
                    prev.action = DiffAction::Retain;
                    prev.annotation_changes.clear();
                    candidate = None;
                    continue;
                }
            }
            out.push(op);
            candidate = Some(out.len() - 1);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_support::*;

    #[test]
    fn delete_then_insert_of_same_data() {
        let out = run(&CollapsePass, vec![r("a"), d("bc"), i("bc"), r("d")]);
        assert_eq!(out, vec![r("a"), r("bc"), r("d")]);
    }

    #[test]
    fn insert_then_delete_of_same_data() {
        let out = run(&CollapsePass, vec![i("x"), d("x")]);
        assert_eq!(out, vec![r("x")]);
    }

    #[test]
    fn different_data_is_left_alone() {
        let ops = vec![d("ab"), i("ac")];
        assert_eq!(run(&CollapsePass, ops.clone()), ops);
    }

    #[test]
    fn empty_ops_are_transparent() {
        let out = run(&CollapsePass, vec![d("x"), r(""), i("x")]);
        assert_eq!(out, vec![r("x"), r("")]);
    }

    #[test]
    fn an_op_pairs_at_most_once() {
        // The insert collapses with the first delete; the second delete stays.
        let out = run(&CollapsePass, vec![d("x"), i("x"), d("x")]);
        assert_eq!(out, vec![r("x"), d("x")]);
    }

    #[test]
    fn annotation_source_is_ignored() {
        let mut store = annodiff_store::AnnotationStore::new();
        let link = annodiff_types::Annotation::new("link").with_attribute("href", "a");
        let sourced = store.insert(link.clone().with_source("<a href=a>")).unwrap();
        let bare = store.insert(link).unwrap();
        let cmp = crate::comparator::Comparator::new(store);
        let ctx = PassContext::new(&cmp, &crate::wordbreak::UnicodeWordBreak);

        let ops = vec![
            DiffOp::delete(annodiff_types::Element::styled("x", &[sourced])),
            DiffOp::insert(annodiff_types::Element::styled("x", &[bare])),
        ];
        let out = CollapsePass.apply(ops, &ctx).unwrap();
        assert_eq!(actions(&out), vec![DiffAction::Retain]);
    }

    #[test]
    fn different_annotations_are_not_collapsed() {
        let key = annodiff_types::AnnotationKey::from_canonical(b"bold");
        let bold = DiffOp::insert(annodiff_types::Element::styled("x", &[key]));
        let ops = vec![d("x"), bold];
        assert_eq!(actions(&run(&CollapsePass, ops)), vec![DiffAction::Delete, DiffAction::Insert]);
    }
}
