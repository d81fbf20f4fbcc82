//! Word boundary segmentation over element sequences.
//!
//! The cleaner never decides on its own where words start and end; it asks a
//! [`WordBreak`] implementation. Two are provided:
//!
//! - [`UnicodeWordBreak`] -- Unicode word boundaries (UAX #29) within runs of
//!   text, with a boundary on both sides of every structural element.
//! - [`ElementBreak`] -- a boundary between every pair of elements, which
//!   turns word alignment off.

use annodiff_types::Element;
use unicode_segmentation::UnicodeSegmentation;

/// Search direction for [`WordBreak::next_break_offset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Linguistic segmentation of an element slice.
///
/// Offsets are element positions: offset `i` sits between `data[i - 1]` and
/// `data[i]`. Offsets `0` and `data.len()` are always breaks.
pub trait WordBreak: Send + Sync {
    /// Returns `true` if there is a word break at `offset`.
    fn is_break(&self, data: &[Element], offset: usize) -> bool;

    /// Every break offset of `data`, ascending, including both ends.
    fn breaks(&self, data: &[Element]) -> Vec<usize> {
        (0..=data.len()).filter(|&o| self.is_break(data, o)).collect()
    }

    /// The nearest break strictly after (`Forward`) or strictly before
    /// (`Backward`) `from`, or `None` if `from` is already at that end.
    fn next_break_offset(
        &self,
        data: &[Element],
        direction: Direction,
        from: usize,
    ) -> Option<usize> {
        match direction {
            Direction::Forward => (from + 1..=data.len()).find(|&o| self.is_break(data, o)),
            Direction::Backward => (0..from.min(data.len() + 1))
                .rev()
                .find(|&o| self.is_break(data, o)),
        }
    }
}

/// Unicode (UAX #29) word boundaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordBreak;

impl WordBreak for UnicodeWordBreak {
    fn is_break(&self, data: &[Element], offset: usize) -> bool {
        if offset == 0 || offset >= data.len() {
            return true;
        }
        if data[offset - 1].is_structural() || data[offset].is_structural() {
            return true;
        }
        let start = data[..offset]
            .iter()
            .rposition(Element::is_structural)
            .map_or(0, |p| p + 1);
        let end = data[offset..]
            .iter()
            .position(Element::is_structural)
            .map_or(data.len(), |p| offset + p);
        text_breaks(&data[start..end])
            .binary_search(&(offset - start))
            .is_ok()
    }

    fn breaks(&self, data: &[Element]) -> Vec<usize> {
        break_offsets(data)
    }

    fn next_break_offset(
        &self,
        data: &[Element],
        direction: Direction,
        from: usize,
    ) -> Option<usize> {
        let breaks = break_offsets(data);
        match direction {
            Direction::Forward => breaks.into_iter().find(|&b| b > from),
            Direction::Backward => breaks.into_iter().rev().find(|&b| b < from),
        }
    }
}

/// A break between every pair of elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElementBreak;

impl WordBreak for ElementBreak {
    fn is_break(&self, _data: &[Element], _offset: usize) -> bool {
        true
    }
}

/// Every Unicode break offset of `data`, ascending, including both ends.
pub fn break_offsets(data: &[Element]) -> Vec<usize> {
    let mut breaks = Vec::new();
    let mut i = 0;
    while i < data.len() {
        if data[i].is_structural() {
            breaks.push(i);
            i += 1;
            continue;
        }
        let start = i;
        while i < data.len() && data[i].is_text() {
            i += 1;
        }
        breaks.extend(text_breaks(&data[start..i]).into_iter().map(|b| start + b));
    }
    breaks.push(data.len());
    breaks.dedup();
    breaks
}

/// Break offsets within a run of text elements, including both ends.
fn text_breaks(run: &[Element]) -> Vec<usize> {
    let text: String = run.iter().filter_map(Element::as_char).collect();
    let char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let mut breaks: Vec<usize> = text
        .split_word_bound_indices()
        .filter_map(|(byte, _)| char_starts.binary_search(&byte).ok())
        .collect();
    breaks.push(run.len());
    breaks.dedup();
    breaks
}
