use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::wordbreak::{ElementBreak, UnicodeWordBreak, WordBreak};

/// Which word segmentation the cleaner aligns retains to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordBreakKind {
    /// Unicode word boundaries (UAX #29).
    #[default]
    Unicode,
    /// A boundary between every pair of elements.
    Element,
}

impl WordBreakKind {
    /// Instantiate the segmenter.
    pub fn build(self) -> Box<dyn WordBreak> {
        match self {
            Self::Unicode => Box::new(UnicodeWordBreak),
            Self::Element => Box::new(ElementBreak),
        }
    }
}

/// Configuration for a diff session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Refuse inputs with more elements than this on either side.
    ///
    /// Myers is quadratic in the worst case; interactive hosts should keep a
    /// limit in place.
    pub max_elements: Option<usize>,
    /// Wall-clock limit for the raw diff, in milliseconds. When it runs out
    /// the engine settles for a coarser (still correct) edit script.
    pub timeout_ms: Option<u64>,
    /// Check the round-trip property after every cleaning pass.
    pub verify_passes: bool,
    /// Word segmentation used by the word-align pass.
    pub word_break: WordBreakKind,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_elements: Some(100_000),
            timeout_ms: None,
            verify_passes: cfg!(debug_assertions),
            word_break: WordBreakKind::Unicode,
        }
    }
}

impl DiffConfig {
    /// No size limit and no deadline.
    pub fn unbounded() -> Self {
        Self {
            max_elements: None,
            timeout_ms: None,
            ..Default::default()
        }
    }

    /// The raw diff limit as a `Duration`.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
