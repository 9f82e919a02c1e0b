use std::fmt;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::TypeError;

/// Number of raw bytes in an [`ObjectId`].
pub const ID_LENGTH: usize = 20;

/// Content-addressed identifier for any stored object.
///
/// An `ObjectId` is the SHA-1 digest of an object's canonical serialized
/// form. Identical content always produces the same `ObjectId`, making
/// objects deduplicatable and verifiable. Equality is byte equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId([u8; ID_LENGTH]);

impl ObjectId {
    /// Compute an `ObjectId` by hashing raw bytes.
    pub fn hash_of(data: &[u8]) -> Self {
        let digest = Sha1::digest(data);
        let mut arr = [0u8; ID_LENGTH];
        arr.copy_from_slice(&digest);
        Self(arr)
    }

    /// Create an `ObjectId` from a pre-computed 20-byte digest.
    pub const fn from_raw(bytes: [u8; ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The null object ID (all zeros). Represents "no object".
    pub const fn null() -> Self {
        Self([0u8; ID_LENGTH])
    }

    /// Returns `true` if this is the null object ID.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; ID_LENGTH]
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
        &self.0
    }

    /// Lowercase 40-character hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a 40-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != ID_LENGTH {
            return Err(TypeError::InvalidLength {
                expected: ID_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; ID_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Parse from a byte slice that must be exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
        if bytes.len() != ID_LENGTH {
            return Err(TypeError::InvalidLength {
                expected: ID_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; ID_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; ID_LENGTH]> for ObjectId {
    fn from(bytes: [u8; ID_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<ObjectId> for [u8; ID_LENGTH] {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_of_is_deterministic() {
        let data = b"hello world";
        let id1 = ObjectId::hash_of(data);
        let id2 = ObjectId::hash_of(data);
        assert_eq!(id1, id2);
    }

    #[test]
    fn different_data_produces_different_ids() {
        let id1 = ObjectId::hash_of(b"hello");
        let id2 = ObjectId::hash_of(b"world");
        assert_ne!(id1, id2);
    }

    #[test]
    fn null_is_all_zeros() {
        let null = ObjectId::null();
        assert!(null.is_null());
        assert_eq!(null.as_bytes(), &[0u8; 20]);
    }

    #[test]
    fn hex_roundtrip() {
        let id = ObjectId::hash_of(b"test");
        let hex = id.to_hex();
        let parsed = ObjectId::from_hex(&hex).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(ObjectId::from_hex("abcd").is_err());
        assert!(ObjectId::from_hex("zz").is_err());
    }

    #[test]
    fn display_is_lowercase_40_chars() {
        let id = ObjectId::hash_of(b"test");
        let display = format!("{id}");
        assert_eq!(display.len(), 40);
        assert_eq!(display, display.to_lowercase());
    }

    #[test]
    fn short_hex_is_8_chars() {
        let id = ObjectId::hash_of(b"test");
        assert_eq!(id.short_hex().len(), 8);
    }

    #[test]
    fn from_slice_roundtrip() {
        let id = ObjectId::hash_of(b"slice");
        let parsed = ObjectId::from_slice(id.as_bytes()).unwrap();
        assert_eq!(id, parsed);
        assert!(ObjectId::from_slice(&[0u8; 19]).is_err());
    }

    #[test]
    fn ordering_is_consistent() {
        let id1 = ObjectId::from_raw([0; 20]);
        let id2 = ObjectId::from_raw([1; 20]);
        assert!(id1 < id2);
    }

    #[test]
    fn serde_roundtrip() {
        let id = ObjectId::hash_of(b"serde test");
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn sha1_known_vector() {
        // sha1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        let id = ObjectId::hash_of(b"abc");
        assert_eq!(id.to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }
}
