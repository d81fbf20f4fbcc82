use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TypeError, TypeResult};

/// Domain tag prepended to every annotation hash.
const ANNOTATION_DOMAIN: &str = "annodiff-annotation-v1";

/// Content-addressed identifier for an annotation.
///
/// An `AnnotationKey` is the domain-separated BLAKE3 hash of an annotation's
/// canonical JSON encoding. Identical annotations always produce the same key,
/// so two stores built independently agree on the key for shared content and
/// can be merged without renumbering.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationKey([u8; 32]);

impl AnnotationKey {
    /// Compute a key from canonical annotation bytes.
    pub fn from_canonical(data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(ANNOTATION_DOMAIN.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Self(*hasher.finalize().as_bytes())
    }

    /// Hash a serializable value as JSON with domain separation.
    pub fn from_json<T: Serialize>(value: &T) -> TypeResult<Self> {
        let data =
            serde_json::to_vec(value).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Ok(Self::from_canonical(&data))
    }

    /// Create a key from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> TypeResult<Self> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationKey({})", self.short_hex())
    }
}

impl fmt::Display for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// Keys are map keys in serialized stores, so they travel as hex strings.
impl Serialize for AnnotationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AnnotationKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl From<[u8; 32]> for AnnotationKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_canonical_is_deterministic() {
        let k1 = AnnotationKey::from_canonical(b"{\"name\":\"bold\"}");
        let k2 = AnnotationKey::from_canonical(b"{\"name\":\"bold\"}");
        assert_eq!(k1, k2);
    }

    #[test]
    fn different_data_produces_different_keys() {
        let k1 = AnnotationKey::from_canonical(b"bold");
        let k2 = AnnotationKey::from_canonical(b"italic");
        assert_ne!(k1, k2);
    }

    #[test]
    fn domain_separated_from_plain_blake3() {
        let key = AnnotationKey::from_canonical(b"bold");
        assert_ne!(key.as_bytes(), blake3::hash(b"bold").as_bytes());
    }

    #[test]
    fn hex_roundtrip() {
        let key = AnnotationKey::from_canonical(b"test");
        let parsed = AnnotationKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = AnnotationKey::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            AnnotationKey::from_hex("not hex"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn short_hex_is_8_chars() {
        let key = AnnotationKey::from_canonical(b"test");
        assert_eq!(key.short_hex().len(), 8);
    }

    #[test]
    fn serde_uses_hex_string() {
        let key = AnnotationKey::from_canonical(b"serde test");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key.to_hex()));
        let parsed: AnnotationKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        let k1 = AnnotationKey::from_hash([0; 32]);
        let k2 = AnnotationKey::from_hash([1; 32]);
        assert!(k1 < k2);
    }
}
