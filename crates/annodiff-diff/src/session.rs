use std::time::Instant;

use annodiff_store::{AnnotationStore, Sequence};
use annodiff_types::Element;
use tracing::debug;

use crate::cleaner::{verify_round_trip, DiffCleaner};
use crate::comparator::Comparator;
use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::op::{Diff, DiffOp};
use crate::pass::PassContext;
use crate::raw;
use crate::wordbreak::WordBreak;

/// One diff invocation between two stores.
///
/// The session owns a merged copy of both annotation stores; the stores it
/// was built from are never touched.
pub struct DiffSession {
    comparator: Comparator,
    word_break: Box<dyn WordBreak>,
    cleaner: DiffCleaner,
    config: DiffConfig,
}

impl DiffSession {
    /// Merge `old_store` and `new_store` and prepare the pipeline.
    pub fn new(
        old_store: &AnnotationStore,
        new_store: &AnnotationStore,
        config: DiffConfig,
    ) -> DiffResult<Self> {
        let store = old_store.merged(new_store)?;
        debug!(annotations = store.len(), "diff session created");
        Ok(Self {
            comparator: Comparator::new(store),
            word_break: config.word_break.build(),
            cleaner: DiffCleaner::new().with_verification(config.verify_passes),
            config,
        })
    }

    /// Replace the word segmentation chosen by the config.
    pub fn with_word_break(mut self, word_break: Box<dyn WordBreak>) -> Self {
        self.word_break = word_break;
        self
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// The merged annotation store.
    pub fn store(&self) -> &AnnotationStore {
        self.comparator.store()
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// The minimal edit script, before cleaning.
    pub fn raw_diff(&self, old: &[Element], new: &[Element]) -> DiffResult<Vec<DiffOp>> {
        self.check_inputs(old, new)?;
        self.raw_diff_checked(old, new)
    }

    /// Run the cleaning pipeline over `ops`.
    pub fn clean(&self, ops: Vec<DiffOp>) -> DiffResult<Vec<DiffOp>> {
        let ctx = PassContext::new(&self.comparator, self.word_break.as_ref());
        self.cleaner.clean(ops, &ctx)
    }

    /// The cleaned diff from `old` to `new`.
    ///
    /// Equal inputs give a single Retain (or nothing when both are empty).
    pub fn diff(&self, old: &[Element], new: &[Element]) -> DiffResult<Diff> {
        self.check_inputs(old, new)?;
        if self.comparator.is_equal_sequence(Some(old), Some(new)) {
            let ops = if old.is_empty() {
                Vec::new()
            } else {
                vec![DiffOp::retain(old.to_vec())]
            };
            return Ok(Diff::new(ops));
        }
        let raw = self.raw_diff_checked(old, new)?;
        Ok(Diff::new(self.clean(raw)?))
    }

    fn raw_diff_checked(&self, old: &[Element], new: &[Element]) -> DiffResult<Vec<DiffOp>> {
        let deadline = self.config.timeout().map(|t| Instant::now() + t);
        let ops = raw::raw_diff(old, new, &self.comparator, deadline);
        if self.config.verify_passes {
            verify_round_trip("raw", &self.comparator, old, new, &ops)?;
        }
        Ok(ops)
    }

    fn check_inputs(&self, old: &[Element], new: &[Element]) -> DiffResult<()> {
        if let Some(limit) = self.config.max_elements {
            for (side, data) in [("old", old), ("new", new)] {
                if data.len() > limit {
                    return Err(DiffError::InputTooLarge {
                        side,
                        len: data.len(),
                        limit,
                    });
                }
            }
        }
        self.comparator.check_resolvable(old)?;
        self.comparator.check_resolvable(new)?;
        Ok(())
    }
}

/// Diff two sequences with the default configuration.
pub fn diff_sequences(old: &Sequence, new: &Sequence) -> DiffResult<Diff> {
    diff_sequences_with(old, new, DiffConfig::default())
}

/// Diff two sequences with an explicit configuration.
pub fn diff_sequences_with(old: &Sequence, new: &Sequence, config: DiffConfig) -> DiffResult<Diff> {
    DiffSession::new(&old.store, &new.store, config)?.diff(&old.elements, &new.elements)
}
