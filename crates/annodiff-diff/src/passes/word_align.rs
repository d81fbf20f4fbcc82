use annodiff_types::Element;

use crate::error::{DiffError, DiffResult};
use crate::op::{new_side, old_side, DiffAction, DiffOp};
use crate::pass::{CleanPass, PassContext};
use crate::wordbreak::WordBreak;

const NAME: &str = "word-align";

/// Shrinks retains so they start and end on word boundaries.
///
/// A retained run appears in both documents, so an offset inside it counts
/// as a boundary only when it is a word break in the old document and in the
/// new document. A retain that begins or ends in the middle of a word has the
/// partial word cut off and re-expressed as a delete plus an insert of the
/// same content, so the change reads as whole words. A retain with no
/// internal boundary that is not aligned on both ends is replaced entirely.
pub struct WordAlignPass;

impl CleanPass for WordAlignPass {
    fn name(&self) -> &str {
        NAME
    }

    fn apply(&self, ops: Vec<DiffOp>, ctx: &PassContext<'_>) -> DiffResult<Vec<DiffOp>> {
        let old_breaks = BreakMap::new(ctx.word_break, &old_side(&ops));
        let new_breaks = BreakMap::new(ctx.word_break, &new_side(&ops));

        let mut out = Vec::with_capacity(ops.len());
        let (mut old_at, mut new_at) = (0, 0);
        for op in ops {
            let (on_old, on_new, len) = (op.action.is_old_side(), op.action.is_new_side(), op.len());
            if op.action == DiffAction::Retain {
                let seams = Seams {
                    old: &old_breaks,
                    new: &new_breaks,
                    old_at,
                    new_at,
                };
                align_retain(&op.data, &seams, &mut out)?;
            } else {
                out.push(op);
            }
            if on_old {
                old_at += len;
            }
            if on_new {
                new_at += len;
            }
        }
        Ok(out)
    }
}

/// Break flags for every offset of one document.
struct BreakMap(Vec<bool>);

impl BreakMap {
    fn new(word_break: &dyn WordBreak, data: &[Element]) -> Self {
        let mut flags = vec![false; data.len() + 1];
        for offset in word_break.breaks(data) {
            if let Some(flag) = flags.get_mut(offset) {
                *flag = true;
            }
        }
        Self(flags)
    }

    fn is_break(&self, offset: usize) -> bool {
        self.0.get(offset).copied().unwrap_or(true)
    }
}

/// Where one retain sits in the old and new documents.
struct Seams<'a> {
    old: &'a BreakMap,
    new: &'a BreakMap,
    old_at: usize,
    new_at: usize,
}

impl Seams<'_> {
    /// Whether offset `k` of the retain is a break on both sides.
    fn is_break(&self, k: usize) -> bool {
        self.old.is_break(self.old_at + k) && self.new.is_break(self.new_at + k)
    }
}

fn align_retain(data: &[Element], seams: &Seams<'_>, out: &mut Vec<DiffOp>) -> DiffResult<()> {
    let len = data.len();
    let start_aligned = seams.is_break(0);
    let end_aligned = seams.is_break(len);

    let Some(first) = (1..len).find(|&k| seams.is_break(k)) else {
        if start_aligned && end_aligned {
            out.push(DiffOp::retain(data.to_vec()));
        } else if data.iter().all(Element::is_text) {
            push_replacement(out, data);
        } else {
            return Err(DiffError::invariant(
                NAME,
                format!("unbroken retain of {len} elements holds structure"),
            ));
        }
        return Ok(());
    };
    let last = (1..len).rev().find(|&k| seams.is_break(k)).unwrap_or(first);

    let end_at = if end_aligned { len } else { last };
    let cut_at = if start_aligned { 0 } else { first };

    if !data[end_at..].iter().all(Element::is_text) {
        return Err(DiffError::invariant(
            NAME,
            format!("trailing fragment at offset {end_at} holds structure"),
        ));
    }
    if !data[..cut_at].iter().all(Element::is_text) {
        return Err(DiffError::invariant(
            NAME,
            format!("leading fragment of {cut_at} elements holds structure"),
        ));
    }
    if cut_at > end_at {
        return Err(DiffError::invariant(
            NAME,
            format!("leading fragment ends at {cut_at}, past trailing fragment at {end_at}"),
        ));
    }
    // Close markers at the front of what is left travel with the change.
    let start_len = cut_at + data[cut_at..end_at].iter().take_while(|e| e.is_close()).count();

    push_replacement(out, &data[..start_len]);
    if start_len < end_at {
        out.push(DiffOp::retain(data[start_len..end_at].to_vec()));
    }
    push_replacement(out, &data[end_at..]);
    Ok(())
}

fn push_replacement(out: &mut Vec<DiffOp>, data: &[Element]) {
    if data.is_empty() {
        return;
    }
    out.push(DiffOp::delete(data.to_vec()));
    out.push(DiffOp::insert(data.to_vec()));
}
