//! The standard cleaning passes, in the order the cleaner runs them.

pub mod change;
pub mod collapse;
pub mod destripe;
pub mod merge;
pub mod word_align;

pub use change::ChangePass;
pub use collapse::CollapsePass;
pub use destripe::DestripePass;
pub use merge::MergePass;
pub use word_align::WordAlignPass;

use crate::op::DiffAction;

/// Returns `true` for a Delete next to an Insert, in either order.
fn is_complementary(a: DiffAction, b: DiffAction) -> bool {
    matches!(
        (a, b),
        (DiffAction::Delete, DiffAction::Insert) | (DiffAction::Insert, DiffAction::Delete)
    )
}
