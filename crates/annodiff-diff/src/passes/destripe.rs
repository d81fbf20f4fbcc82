use annodiff_types::Element;

use crate::error::DiffResult;
use crate::op::{DiffAction, DiffOp};
use crate::pass::{CleanPass, PassContext};

/// Folds alternating deletes and inserts into one delete and one insert.
///
/// A retain made only of whitespace that sits between two changes does not
/// interrupt a stripe; it is absorbed into both sides. Any other retain ends
/// the stripe.
pub struct DestripePass;

impl CleanPass for DestripePass {
    fn name(&self) -> &str {
        "destripe"
    }

    fn apply(&self, ops: Vec<DiffOp>, _ctx: &PassContext<'_>) -> DiffResult<Vec<DiffOp>> {
        let mut out = Vec::with_capacity(ops.len());
        let mut removed: Vec<Element> = Vec::new();
        let mut inserted: Vec<Element> = Vec::new();

        let mut ops = ops.into_iter().filter(|op| !op.is_empty()).peekable();
        while let Some(op) = ops.next() {
            match op.action.base() {
                DiffAction::Delete => removed.extend(op.data),
                DiffAction::Insert => inserted.extend(op.data),
                _ if in_stripe(&removed, &inserted)
                    && ops.peek().is_some_and(|next| next.action != DiffAction::Retain)
                    && op.data.iter().all(Element::is_whitespace) =>
                {
                    removed.extend_from_slice(&op.data);
                    inserted.extend(op.data);
                }
                _ => {
                    flush(&mut out, &mut removed, &mut inserted);
                    out.push(op);
                }
            }
        }
        flush(&mut out, &mut removed, &mut inserted);

        Ok(out)
    }
}

fn in_stripe(removed: &[Element], inserted: &[Element]) -> bool {
    !removed.is_empty() || !inserted.is_empty()
}

fn flush(out: &mut Vec<DiffOp>, removed: &mut Vec<Element>, inserted: &mut Vec<Element>) {
    if !removed.is_empty() {
        out.push(DiffOp::delete(std::mem::take(removed)));
    }
    if !inserted.is_empty() {
        out.push(DiffOp::insert(std::mem::take(inserted)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::test_support::*;

    #[test]
    fn stripes_across_whitespace_become_one_pair() {
        let out = run(&DestripePass, vec![d("aa"), i("cc"), r(" "), d("bb"), i("dd")]);
        assert_eq!(out, vec![d("aa bb"), i("cc dd")]);
    }

    #[test]
    fn content_retains_end_a_stripe() {
        let out = run(
            &DestripePass,
            vec![d("a"), i("b"), d("c"), r("keep"), i("x"), d("y")],
        );
        assert_eq!(out, vec![d("ac"), i("b"), r("keep"), d("y"), i("x")]);
    }

    #[test]
    fn whitespace_next_to_a_retain_is_kept() {
        let ops = vec![r("a"), r("  "), r("b")];
        assert_eq!(run(&DestripePass, ops.clone()), ops);
        let edges = vec![r(" "), d("a"), i("b"), r(" ")];
        assert_eq!(run(&DestripePass, edges.clone()), edges);
    }

    #[test]
    fn annotated_whitespace_counts_as_whitespace() {
        let key = annodiff_types::AnnotationKey::from_canonical(b"bold");
        let space = DiffOp::retain(Element::styled(" ", &[key]));
        let out = run(&DestripePass, vec![d("a"), space.clone(), d("b")]);
        let mut removed = plain("a");
        removed.extend(space.data.clone());
        removed.extend(plain("b"));
        assert_eq!(out, vec![DiffOp::delete(removed), DiffOp::insert(space.data)]);
    }

    #[test]
    fn structural_retains_are_not_whitespace() {
        let close = DiffOp::retain(vec![Element::close("p")]);
        let out = run(&DestripePass, vec![d("a"), close.clone(), i("b")]);
        assert_eq!(out, vec![d("a"), close, i("b")]);
    }

    #[test]
    fn empty_retains_are_dropped() {
        let out = run(&DestripePass, vec![d("a"), r(""), i("b")]);
        assert_eq!(out, vec![d("a"), i("b")]);
    }
}
