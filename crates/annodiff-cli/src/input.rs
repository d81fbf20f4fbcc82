//! Loading documents and diff settings from disk.
//!
//! A document file is either a JSON array of items or a serialized
//! [`Sequence`] (`{"elements": [...], "store": {...}}`). Items are:
//!
//! - `"plain text"`
//! - `{"text": "...", "annotations": [{"name": ..., "attributes": {...}}]}`
//! - `{"open": "p", "attributes": {...}}`
//! - `{"close": "p"}`

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use annodiff_diff::DiffConfig;
use annodiff_store::{AnnotationStore, Sequence, StoreResult};
use annodiff_types::{Annotation, Element};
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Items(Vec<Item>),
    Sequence(Sequence),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Item {
    Plain(String),
    Styled {
        text: String,
        #[serde(default)]
        annotations: Vec<AnnotationItem>,
    },
    Open {
        open: String,
        #[serde(default)]
        attributes: BTreeMap<String, Value>,
    },
    Close {
        close: String,
    },
}

#[derive(Deserialize)]
struct AnnotationItem {
    name: String,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
    #[serde(default)]
    source: Option<String>,
}

impl From<AnnotationItem> for Annotation {
    fn from(item: AnnotationItem) -> Self {
        Annotation {
            name: item.name,
            attributes: item.attributes,
            source: item.source,
        }
    }
}

/// Read a document file. The result is not validated.
pub fn load_document(path: &Path) -> anyhow::Result<Sequence> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&json).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse a document from JSON text.
pub fn parse_document(json: &str) -> anyhow::Result<Sequence> {
    let document: Document = serde_json::from_str(json)?;
    match document {
        Document::Items(items) => Ok(from_items(items)?),
        Document::Sequence(sequence) => Ok(sequence),
    }
}

fn from_items(items: Vec<Item>) -> StoreResult<Sequence> {
    let mut elements = Vec::new();
    let mut store = AnnotationStore::new();
    for item in items {
        match item {
            Item::Plain(text) => elements.extend(Element::plain(&text)),
            Item::Styled { text, annotations } => {
                let keys = annotations
                    .into_iter()
                    .map(|a| store.insert(a.into()))
                    .collect::<StoreResult<Vec<_>>>()?;
                elements.extend(Element::styled(&text, &keys));
            }
            Item::Open { open, attributes } => elements.push(Element::open_with(open, attributes)),
            Item::Close { close } => elements.push(Element::close(close)),
        }
    }
    Ok(Sequence::new(elements, store))
}

/// Read diff settings from a TOML file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> anyhow::Result<DiffConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use annodiff_diff::WordBreakKind;
    use annodiff_store::StoreError;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn plain_strings() {
        let seq = parse_document(r#"["ab", "c"]"#).unwrap();
        assert_eq!(seq.elements, Element::plain("abc"));
        assert!(seq.store.is_empty());
    }

    #[test]
    fn styled_text_registers_annotations() {
        let seq = parse_document(
            r#"[{"text": "hi", "annotations": [{"name": "link", "attributes": {"href": "a"}}]}]"#,
        )
        .unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.store.len(), 1);
        let key = seq.elements[0].annotations()[0];
        assert_eq!(seq.store.get(&key).unwrap().attributes["href"], "a");
        seq.validate().unwrap();
    }

    #[test]
    fn structural_items() {
        let seq = parse_document(
            r#"[{"open": "p", "attributes": {"align": "left"}}, "x", {"close": "p"}]"#,
        )
        .unwrap();
        assert!(seq.elements[0].is_open());
        assert_eq!(seq.elements[0].tag(), Some("p"));
        assert!(seq.elements[2].is_close());
        seq.validate().unwrap();
    }

    #[test]
    fn unbalanced_structure_fails_validation() {
        let seq = parse_document(r#"[{"open": "p"}, "x", {"close": "h1"}]"#).unwrap();
        assert!(matches!(
            seq.validate(),
            Err(StoreError::UnbalancedStructure { .. })
        ));
    }

    #[test]
    fn serialized_sequence_is_accepted() {
        let original = parse_document(r#"[{"text": "b", "annotations": [{"name": "bold"}]}]"#).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(parse_document(&json).unwrap(), original);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_document("[1, 2]").is_err());
        assert!(parse_document("not json").is_err());
    }

    #[test]
    fn load_from_file() {
        let file = write_temp(r#"["hello"]"#);
        let seq = load_document(file.path()).unwrap();
        assert_eq!(seq.text(), "hello");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_document(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }

    #[test]
    fn config_from_toml() {
        let file = write_temp("max_elements = 10\nword_break = \"element\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.max_elements, Some(10));
        assert_eq!(config.word_break, WordBreakKind::Element);
        assert!(config.timeout_ms.is_none());
    }

    #[test]
    fn bad_config_is_an_error() {
        let file = write_temp("word_break = \"sentence\"\n");
        assert!(load_config(file.path()).is_err());
    }
}
