//! Elements: the units of an annotated document sequence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key::AnnotationKey;

/// One unit of an annotated sequence.
///
/// Text elements carry a single character plus references to the annotations
/// applied to it. Structural elements open or close a typed node; they must be
/// properly nested across a full sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// A character with zero or more annotation references.
    Text {
        ch: char,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        annotations: Vec<AnnotationKey>,
    },
    /// Opening marker of a structural node (e.g. a paragraph).
    Open {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, Value>,
    },
    /// Closing marker matching an earlier [`Element::Open`].
    Close { tag: String },
}

impl Element {
    /// An unannotated character.
    pub fn text(ch: char) -> Self {
        Self::Text {
            ch,
            annotations: Vec::new(),
        }
    }

    /// A character carrying the given annotation references.
    pub fn annotated(ch: char, annotations: Vec<AnnotationKey>) -> Self {
        Self::Text { ch, annotations }
    }

    /// An opening marker with no attributes.
    pub fn open(tag: impl Into<String>) -> Self {
        Self::Open {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// An opening marker with attributes.
    pub fn open_with(tag: impl Into<String>, attributes: BTreeMap<String, Value>) -> Self {
        Self::Open {
            tag: tag.into(),
            attributes,
        }
    }

    /// A closing marker.
    pub fn close(tag: impl Into<String>) -> Self {
        Self::Close { tag: tag.into() }
    }

    /// Unannotated elements for every character of `s`.
    pub fn plain(s: &str) -> Vec<Self> {
        s.chars().map(Self::text).collect()
    }

    /// Elements for every character of `s`, each carrying `annotations`.
    pub fn styled(s: &str, annotations: &[AnnotationKey]) -> Vec<Self> {
        s.chars()
            .map(|ch| Self::annotated(ch, annotations.to_vec()))
            .collect()
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Returns `true` for open and close markers.
    pub fn is_structural(&self) -> bool {
        !self.is_text()
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Self::Close { .. })
    }

    /// The character of a text element.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Text { ch, .. } => Some(*ch),
            _ => None,
        }
    }

    /// The tag of a structural element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Open { tag, .. } | Self::Close { tag } => Some(tag),
            Self::Text { .. } => None,
        }
    }

    /// Annotation references (always empty for structural elements).
    pub fn annotations(&self) -> &[AnnotationKey] {
        match self {
            Self::Text { annotations, .. } => annotations,
            _ => &[],
        }
    }

    /// Returns `true` for whitespace characters, whatever their annotations.
    pub fn is_whitespace(&self) -> bool {
        self.as_char().is_some_and(char::is_whitespace)
    }

    /// Content equality ignoring annotations.
    ///
    /// Characters compare by value, open markers by tag and attributes, close
    /// markers by tag. Text never equals a structural element.
    pub fn same_content(&self, other: &Element) -> bool {
        match (self, other) {
            (Self::Text { ch: a, .. }, Self::Text { ch: b, .. }) => a == b,
            (
                Self::Open {
                    tag: a,
                    attributes: a_attrs,
                },
                Self::Open {
                    tag: b,
                    attributes: b_attrs,
                },
            ) => a == b && a_attrs == b_attrs,
            (Self::Close { tag: a }, Self::Close { tag: b }) => a == b,
            _ => false,
        }
    }
}
