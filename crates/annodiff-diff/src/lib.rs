//! Structural diff for annotated document sequences.
//!
//! A diff runs in three stages:
//!
//! 1. [`Comparator`] -- element equality over a merged annotation store.
//! 2. [`raw_diff`] -- a minimal edit script from the Myers algorithm.
//! 3. [`DiffCleaner`] -- passes that reshape the script for human readers:
//!    collapse, merge, word-align, destripe, change.
//!
//! [`DiffSession`] wires the stages together.
//!
//! # Key Types
//!
//! - [`DiffOp`] / [`DiffAction`] -- one edit action over a slice of elements
//! - [`Diff`] -- the cleaned result, with side reconstruction and stats
//! - [`AnnotationChange`] -- an annotation replaced by another of the same type
//! - [`WordBreak`] -- pluggable word segmentation
//! - [`DiffConfig`] -- size limits, deadline, verification, segmentation

pub mod cleaner;
pub mod comparator;
pub mod config;
pub mod error;
pub mod op;
pub mod pass;
pub mod passes;
pub mod raw;
pub mod session;
pub mod wordbreak;

pub use cleaner::DiffCleaner;
pub use comparator::Comparator;
pub use config::{DiffConfig, WordBreakKind};
pub use error::{DiffError, DiffResult};
pub use op::{AnnotationChange, Diff, DiffAction, DiffOp, DiffStats};
pub use pass::{CleanPass, PassContext};
pub use raw::raw_diff;
pub use session::{diff_sequences, diff_sequences_with, DiffSession};
pub use wordbreak::{Direction, ElementBreak, UnicodeWordBreak, WordBreak};
