//! Annotations: immutable formatting and metadata records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TypeResult;
use crate::key::AnnotationKey;

/// An immutable formatting/metadata record attached to text elements.
///
/// Annotations are stored once in an annotation store and referenced from
/// elements by [`AnnotationKey`]. The key covers every field, including
/// `source`; the *comparable* form used by change detection covers only
/// `name` and `attributes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation type, e.g. `textStyle/bold` or `link`.
    pub name: String,
    /// Semantic value of the annotation (e.g. a link target).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    /// Original markup this annotation was parsed from, kept for round-tripping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Annotation {
    /// Create an annotation with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            source: None,
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style source markup setter.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Compute the content-addressed key for this annotation.
    pub fn key(&self) -> TypeResult<AnnotationKey> {
        AnnotationKey::from_json(self)
    }

    /// Returns `true` if both annotations have the same type.
    pub fn same_name(&self, other: &Annotation) -> bool {
        self.name == other.name
    }

    /// Returns `true` if the annotations are equal ignoring `source`.
    ///
    /// Two links with the same target but different original markup are
    /// comparable; two links with different targets are not.
    pub fn is_comparable_to(&self, other: &Annotation) -> bool {
        self.name == other.name && self.attributes == other.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn link(href: &str) -> Annotation {
        Annotation::new("link").with_attribute("href", href)
    }

    #[test]
    fn key_is_content_addressed() {
        assert_eq!(link("a").key().unwrap(), link("a").key().unwrap());
        assert_ne!(link("a").key().unwrap(), link("b").key().unwrap());
    }

    #[test]
    fn source_changes_key_but_not_comparable_form() {
        let plain = link("a");
        let sourced = link("a").with_source("<a href=\"a\" rel=\"x\">");
        assert_ne!(plain.key().unwrap(), sourced.key().unwrap());
        assert!(plain.is_comparable_to(&sourced));
    }

    #[test]
    fn different_targets_are_not_comparable() {
        assert!(link("a").same_name(&link("b")));
        assert!(!link("a").is_comparable_to(&link("b")));
    }

    #[test]
    fn attribute_order_does_not_affect_key() {
        let a = Annotation::new("span")
            .with_attribute("x", 1)
            .with_attribute("y", 2);
        let b = Annotation::new("span")
            .with_attribute("y", 2)
            .with_attribute("x", 1);
        assert_eq!(a.key().unwrap(), b.key().unwrap());
    }

    #[test]
    fn serde_omits_empty_fields() {
        let json = serde_json::to_value(Annotation::new("textStyle/bold")).unwrap();
        assert_eq!(json, json!({"name": "textStyle/bold"}));
    }

    #[test]
    fn serde_roundtrip() {
        let original = link("https://example.org").with_source("<a>");
        let json = serde_json::to_string(&original).unwrap();
        let parsed: Annotation = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }
}
