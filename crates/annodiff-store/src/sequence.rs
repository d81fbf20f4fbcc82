//! Document sequences: an ordered element list paired with its store.

use std::collections::BTreeMap;

use annodiff_types::{Annotation, Element};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::store::AnnotationStore;
use crate::traits::AnnotationResolver;

/// One full document snapshot.
///
/// The store holds every annotation the elements refer to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub elements: Vec<Element>,
    #[serde(default)]
    pub store: AnnotationStore,
}

impl Sequence {
    /// Pair elements with the store that resolves their annotations.
    pub fn new(elements: Vec<Element>, store: AnnotationStore) -> Self {
        Self { elements, store }
    }

    /// A sequence of unannotated characters.
    pub fn plain(text: &str) -> Self {
        Self::new(Element::plain(text), AnnotationStore::new())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The characters of all text elements, structural markers skipped.
    pub fn text(&self) -> String {
        self.elements.iter().filter_map(Element::as_char).collect()
    }

    /// Check structural nesting and annotation resolution.
    ///
    /// Every close marker must match the innermost open marker, every open
    /// marker must be closed, and every annotation key must resolve in the
    /// sequence's own store.
    pub fn validate(&self) -> StoreResult<()> {
        check_balanced(&self.elements)?;
        self.store.check_resolvable(&self.elements)
    }
}

/// Verify that open and close markers nest properly.
pub fn check_balanced(elements: &[Element]) -> StoreResult<()> {
    let mut stack: Vec<&str> = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        match element {
            Element::Open { tag, .. } => stack.push(tag),
            Element::Close { tag } => match stack.pop() {
                Some(open) if open == tag => {}
                open => {
                    return Err(StoreError::UnbalancedStructure {
                        index,
                        expected: open.map(str::to_string),
                        found: Some(tag.clone()),
                    })
                }
            },
            Element::Text { .. } => {}
        }
    }
    match stack.pop() {
        Some(open) => Err(StoreError::UnbalancedStructure {
            index: elements.len(),
            expected: Some(open.to_string()),
            found: None,
        }),
        None => Ok(()),
    }
}

/// Incremental builder for [`Sequence`]s.
///
/// Annotations passed to [`Self::styled`] are interned into the sequence's
/// store; [`Self::build`] checks nesting.
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    elements: Vec<Element>,
    store: AnnotationStore,
    open: Vec<String>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unannotated text.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.elements.extend(Element::plain(text));
        self
    }

    /// Append text carrying every annotation in `annotations`.
    pub fn styled(&mut self, text: &str, annotations: &[Annotation]) -> StoreResult<&mut Self> {
        let keys = annotations
            .iter()
            .map(|a| self.store.insert(a.clone()))
            .collect::<StoreResult<Vec<_>>>()?;
        self.elements.extend(Element::styled(text, &keys));
        Ok(self)
    }

    /// Open a structural node.
    pub fn open(&mut self, tag: &str) -> &mut Self {
        self.open_with(tag, BTreeMap::new())
    }

    /// Open a structural node with attributes.
    pub fn open_with(&mut self, tag: &str, attributes: BTreeMap<String, Value>) -> &mut Self {
        self.open.push(tag.to_string());
        self.elements.push(Element::open_with(tag, attributes));
        self
    }

    /// Close the innermost open node.
    pub fn close(&mut self) -> StoreResult<&mut Self> {
        let tag = self
            .open
            .pop()
            .ok_or_else(|| StoreError::UnbalancedStructure {
                index: self.elements.len(),
                expected: None,
                found: Some("close".to_string()),
            })?;
        self.elements.push(Element::close(tag));
        Ok(self)
    }

    /// Finish the sequence.
    pub fn build(&mut self) -> StoreResult<Sequence> {
        let sequence = Sequence::new(
            std::mem::take(&mut self.elements),
            std::mem::take(&mut self.store),
        );
        self.open.clear();
        sequence.validate()?;
        Ok(sequence)
    }
}
