//! Diff operations and the final diff.

use std::fmt;

use annodiff_types::{Annotation, Element};
use serde::{Deserialize, Serialize};

/// The edit action of a [`DiffOp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAction {
    /// Content present in both sequences.
    Retain,
    /// Content removed from the old sequence.
    Delete,
    /// Content added in the new sequence.
    Insert,
    /// Removed half of a formatting change: same content, different annotation.
    ChangeDelete,
    /// Inserted half of a formatting change.
    ChangeInsert,
}

impl DiffAction {
    /// Numeric code used by linear-diff consumers: 0, -1, 1, -2, 2.
    pub fn code(self) -> i8 {
        match self {
            Self::Retain => 0,
            Self::Delete => -1,
            Self::Insert => 1,
            Self::ChangeDelete => -2,
            Self::ChangeInsert => 2,
        }
    }

    /// Inverse of [`Self::code`].
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Retain),
            -1 => Some(Self::Delete),
            1 => Some(Self::Insert),
            -2 => Some(Self::ChangeDelete),
            2 => Some(Self::ChangeInsert),
            _ => None,
        }
    }

    /// Returns `true` if the op contributes to the old sequence.
    pub fn is_old_side(self) -> bool {
        matches!(self, Self::Retain | Self::Delete | Self::ChangeDelete)
    }

    /// Returns `true` if the op contributes to the new sequence.
    pub fn is_new_side(self) -> bool {
        matches!(self, Self::Retain | Self::Insert | Self::ChangeInsert)
    }

    /// The plain action underlying a change action.
    pub fn base(self) -> Self {
        match self {
            Self::ChangeDelete => Self::Delete,
            Self::ChangeInsert => Self::Insert,
            other => other,
        }
    }

    /// The change action for a plain delete or insert.
    pub fn promoted(self) -> Self {
        match self {
            Self::Delete => Self::ChangeDelete,
            Self::Insert => Self::ChangeInsert,
            other => other,
        }
    }
}

impl fmt::Display for DiffAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retain => write!(f, "retain"),
            Self::Delete => write!(f, "delete"),
            Self::Insert => write!(f, "insert"),
            Self::ChangeDelete => write!(f, "change-delete"),
            Self::ChangeInsert => write!(f, "change-insert"),
        }
    }
}

/// One annotation replaced by another of the same type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationChange {
    pub old: Annotation,
    pub new: Annotation,
}

/// A tagged edit action over a copied slice of elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiffOp {
    pub action: DiffAction,
    pub data: Vec<Element>,
    /// Formatting changes, attached to the second op of a change pair.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotation_changes: Vec<AnnotationChange>,
}

impl DiffOp {
    pub fn new(action: DiffAction, data: Vec<Element>) -> Self {
        Self {
            action,
            data,
            annotation_changes: Vec::new(),
        }
    }

    pub fn retain(data: Vec<Element>) -> Self {
        Self::new(DiffAction::Retain, data)
    }

    pub fn delete(data: Vec<Element>) -> Self {
        Self::new(DiffAction::Delete, data)
    }

    pub fn insert(data: Vec<Element>) -> Self {
        Self::new(DiffAction::Insert, data)
    }

    /// Number of elements in the op.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Concatenate the data of every op that contributes to the old sequence.
pub fn old_side(ops: &[DiffOp]) -> Vec<Element> {
    ops.iter()
        .filter(|op| op.action.is_old_side())
        .flat_map(|op| op.data.iter().cloned())
        .collect()
}

/// Concatenate the data of every op that contributes to the new sequence.
pub fn new_side(ops: &[DiffOp]) -> Vec<Element> {
    ops.iter()
        .filter(|op| op.action.is_new_side())
        .flat_map(|op| op.data.iter().cloned())
        .collect()
}

/// The cleaned diff between two sequences.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    pub ops: Vec<DiffOp>,
}

/// Element counts per action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub retained: usize,
    pub deleted: usize,
    pub inserted: usize,
    /// Elements in change-delete ops (the change-insert side has the same count).
    pub changed: usize,
    pub annotation_changes: usize,
}

impl Diff {
    pub fn new(ops: Vec<DiffOp>) -> Self {
        Self { ops }
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if there are no operations (both inputs were empty).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns `true` if the diff only retains content.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| op.action == DiffAction::Retain)
    }

    /// Reconstruct the old sequence.
    pub fn old_side(&self) -> Vec<Element> {
        old_side(&self.ops)
    }

    /// Reconstruct the new sequence.
    pub fn new_side(&self) -> Vec<Element> {
        new_side(&self.ops)
    }

    /// Element counts per action.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for op in &self.ops {
            match op.action {
                DiffAction::Retain => stats.retained += op.len(),
                DiffAction::Delete => stats.deleted += op.len(),
                DiffAction::Insert => stats.inserted += op.len(),
                DiffAction::ChangeDelete => stats.changed += op.len(),
                DiffAction::ChangeInsert => {}
            }
            stats.annotation_changes += op.annotation_changes.len();
        }
        stats
    }
}
