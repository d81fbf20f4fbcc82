//! Raw edit script: Myers diff over comparator-wrapped elements.
//!
//! `similar` strips the common prefix and suffix before it recurses on the
//! middle snake, so the first and last retained runs are as long as possible.
//! Removed and added content between two retains is always emitted as one
//! Delete followed by one Insert.

use std::convert::Infallible;
use std::time::Instant;

use annodiff_types::Element;
use similar::algorithms::{myers, DiffHook};
use tracing::{debug, warn};

use crate::comparator::Comparator;
use crate::op::{DiffAction, DiffOp};

/// An element that compares through a [`Comparator`].
struct Compared<'a> {
    element: &'a Element,
    comparator: &'a Comparator,
}

impl PartialEq for Compared<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.comparator.is_equal_element(self.element, other.element)
    }
}

fn wrap<'a>(data: &'a [Element], comparator: &'a Comparator) -> Vec<Compared<'a>> {
    data.iter()
        .map(|element| Compared {
            element,
            comparator,
        })
        .collect()
}

/// Collects `similar` callbacks into coalesced ops.
struct OpCollector<'a> {
    old: &'a [Element],
    new: &'a [Element],
    ops: Vec<DiffOp>,
    deleted: Vec<Element>,
    inserted: Vec<Element>,
}

impl<'a> OpCollector<'a> {
    fn new(old: &'a [Element], new: &'a [Element]) -> Self {
        Self {
            old,
            new,
            ops: Vec::new(),
            deleted: Vec::new(),
            inserted: Vec::new(),
        }
    }

    fn flush_changes(&mut self) {
        if !self.deleted.is_empty() {
            self.ops.push(DiffOp::delete(std::mem::take(&mut self.deleted)));
        }
        if !self.inserted.is_empty() {
            self.ops.push(DiffOp::insert(std::mem::take(&mut self.inserted)));
        }
    }

    fn into_ops(mut self) -> Vec<DiffOp> {
        self.flush_changes();
        self.ops
    }
}

impl DiffHook for OpCollector<'_> {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, _new_index: usize, len: usize) -> Result<(), Self::Error> {
        self.flush_changes();
        let data = &self.old[old_index..old_index + len];
        match self.ops.last_mut() {
            Some(last) if last.action == DiffAction::Retain => last.data.extend_from_slice(data),
            _ => self.ops.push(DiffOp::retain(data.to_vec())),
        }
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        _new_index: usize,
    ) -> Result<(), Self::Error> {
        self.deleted
            .extend_from_slice(&self.old[old_index..old_index + old_len]);
        Ok(())
    }

    fn insert(
        &mut self,
        _old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.inserted
            .extend_from_slice(&self.new[new_index..new_index + new_len]);
        Ok(())
    }
}

/// Compute the raw edit script from `old` to `new`.
///
/// The result holds only Retain, Delete and Insert ops, no two adjacent ops
/// share an action, and none is empty. Retained data is copied from `old`.
/// When `deadline` passes, the script gets coarser but stays correct.
pub fn raw_diff(
    old: &[Element],
    new: &[Element],
    comparator: &Comparator,
    deadline: Option<Instant>,
) -> Vec<DiffOp> {
    let old_wrapped = wrap(old, comparator);
    let new_wrapped = wrap(new, comparator);
    let mut collector = OpCollector::new(old, new);
    myers::diff_deadline(
        &mut collector,
        &old_wrapped,
        0..old_wrapped.len(),
        &new_wrapped,
        0..new_wrapped.len(),
        deadline,
    )
    .unwrap_or_else(|never| match never {});

    if deadline.is_some_and(|d| Instant::now() >= d) {
        warn!(
            old_len = old.len(),
            new_len = new.len(),
            "raw diff deadline reached, edit script may be coarse"
        );
    }

    let ops = collector.into_ops();
    debug!(
        old_len = old.len(),
        new_len = new.len(),
        ops = ops.len(),
        "raw diff computed"
    );
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{new_side, old_side};
    use annodiff_store::AnnotationStore;
    use annodiff_types::Annotation;

    fn plain(s: &str) -> Vec<Element> {
        Element::plain(s)
    }

    fn comparator() -> Comparator {
        Comparator::new(AnnotationStore::new())
    }

    fn actions(ops: &[DiffOp]) -> Vec<DiffAction> {
        ops.iter().map(|op| op.action).collect()
    }

    #[test]
    fn both_empty() {
        assert!(raw_diff(&[], &[], &comparator(), None).is_empty());
    }

    #[test]
    fn one_side_empty() {
        let cmp = comparator();
        assert_eq!(
            raw_diff(&[], &plain("ab"), &cmp, None),
            vec![DiffOp::insert(plain("ab"))]
        );
        assert_eq!(
            raw_diff(&plain("ab"), &[], &cmp, None),
            vec![DiffOp::delete(plain("ab"))]
        );
    }

    #[test]
    fn equal_inputs_retain_everything() {
        let ops = raw_diff(&plain("same"), &plain("same"), &comparator(), None);
        assert_eq!(ops, vec![DiffOp::retain(plain("same"))]);
    }

    #[test]
    fn pure_insert_at_end() {
        let ops = raw_diff(&plain("ab"), &plain("abc"), &comparator(), None);
        assert_eq!(
            ops,
            vec![DiffOp::retain(plain("ab")), DiffOp::insert(plain("c"))]
        );
    }

    #[test]
    fn replacement_emits_delete_before_insert() {
        let ops = raw_diff(&plain("axb"), &plain("ayb"), &comparator(), None);
        assert_eq!(
            ops,
            vec![
                DiffOp::retain(plain("a")),
                DiffOp::delete(plain("x")),
                DiffOp::insert(plain("y")),
                DiffOp::retain(plain("b")),
            ]
        );
    }

    #[test]
    fn adjacent_ops_never_share_an_action() {
        let ops = raw_diff(
            &plain("the quick brown fox"),
            &plain("a quick red fox jumps"),
            &comparator(),
            None,
        );
        assert!(ops.iter().all(|op| !op.is_empty()));
        for pair in actions(&ops).windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn sides_reconstruct_inputs() {
        let old = plain("kitten sitting");
        let new = plain("sitting kitten");
        let ops = raw_diff(&old, &new, &comparator(), None);
        assert_eq!(old_side(&ops), old);
        assert_eq!(new_side(&ops), new);
    }

    #[test]
    fn annotations_make_elements_differ() {
        let mut store = AnnotationStore::new();
        let bold = store.insert(Annotation::new("textStyle/bold")).unwrap();
        let cmp = Comparator::new(store);
        let old = plain("ab");
        let new = vec![Element::text('a'), Element::annotated('b', vec![bold])];
        let ops = raw_diff(&old, &new, &cmp, None);
        assert_eq!(
            actions(&ops),
            vec![DiffAction::Retain, DiffAction::Delete, DiffAction::Insert]
        );
        assert_eq!(ops[2].data, new[1..].to_vec());
    }

    #[test]
    fn expired_deadline_is_still_correct() {
        let old = plain("abcdefghij");
        let new = plain("jihgfedcba");
        let ops = raw_diff(&old, &new, &comparator(), Some(Instant::now()));
        assert_eq!(old_side(&ops), old);
        assert_eq!(new_side(&ops), new);
    }
}
