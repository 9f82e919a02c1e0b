use std::fmt;

use serde::{Deserialize, Serialize};

use crate::feature_type::FeatureType;
use crate::id::ObjectId;
use crate::tree::RevTree;
use crate::value::FieldValue;

/// The kind of a revision object, with its canonical one-byte type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Commit,
    Tree,
    Feature,
    FeatureType,
    Tag,
}

impl ObjectKind {
    /// The type tag written as the first byte of every serialized object.
    pub fn type_byte(&self) -> u8 {
        match self {
            Self::Commit => 1,
            Self::Tree => 2,
            Self::Feature => 3,
            Self::FeatureType => 4,
            Self::Tag => 5,
        }
    }

    /// Parse from a type tag byte.
    pub fn from_type_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Commit),
            2 => Some(Self::Tree),
            3 => Some(Self::Feature),
            4 => Some(Self::FeatureType),
            5 => Some(Self::Tag),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit => write!(f, "commit"),
            Self::Tree => write!(f, "tree"),
            Self::Feature => write!(f, "feature"),
            Self::FeatureType => write!(f, "featuretype"),
            Self::Tag => write!(f, "tag"),
        }
    }
}

/// An author or committer record: identity plus a moment in time.
///
/// The timestamp is signed milliseconds since the Unix epoch; the timezone
/// offset is signed minutes east of UTC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: Option<String>,
    pub email: Option<String>,
    pub timestamp_ms: i64,
    pub tz_offset_min: i32,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        timestamp_ms: i64,
        tz_offset_min: i32,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            timestamp_ms,
            tz_offset_min,
        }
    }

    /// A person with no identity, for tooling-generated objects.
    pub fn anonymous(timestamp_ms: i64) -> Self {
        Self {
            name: None,
            email: None,
            timestamp_ms,
            tz_offset_min: 0,
        }
    }
}

/// A commit: a tree snapshot plus ancestry and authorship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevCommit {
    /// The root tree captured by this commit.
    pub tree: ObjectId,
    /// Parent commits, oldest-first as recorded. Empty for a root commit.
    pub parents: Vec<ObjectId>,
    pub author: Person,
    pub committer: Person,
    /// UTF-8 commit message.
    pub message: String,
}

/// An annotated tag: a named, described pointer to a commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevTag {
    pub commit: ObjectId,
    pub name: String,
    pub message: String,
    pub tagger: Person,
}

/// A revision object: the closed set of things the object database stores.
///
/// Every variant serializes to a deterministic canonical byte form whose
/// SHA-1 digest is the object's identity. The graph formed by object
/// references is acyclic by construction: an object's digest can only be
/// computed after the digests of everything it references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevObject {
    Commit(RevCommit),
    Tree(RevTree),
    Feature { values: Vec<FieldValue> },
    FeatureType(FeatureType),
    Tag(RevTag),
}

impl RevObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Commit(_) => ObjectKind::Commit,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Feature { .. } => ObjectKind::Feature,
            Self::FeatureType(_) => ObjectKind::FeatureType,
            Self::Tag(_) => ObjectKind::Tag,
        }
    }

    pub fn as_commit(&self) -> Option<&RevCommit> {
        match self {
            Self::Commit(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&RevTree> {
        match self {
            Self::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&RevTag> {
        match self {
            Self::Tag(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_byte_roundtrip() {
        for kind in [
            ObjectKind::Commit,
            ObjectKind::Tree,
            ObjectKind::Feature,
            ObjectKind::FeatureType,
            ObjectKind::Tag,
        ] {
            let byte = kind.type_byte();
            assert_eq!(ObjectKind::from_type_byte(byte), Some(kind));
        }
    }

    #[test]
    fn type_byte_values_are_stable() {
        assert_eq!(ObjectKind::Commit.type_byte(), 1);
        assert_eq!(ObjectKind::Tree.type_byte(), 2);
        assert_eq!(ObjectKind::Feature.type_byte(), 3);
        assert_eq!(ObjectKind::FeatureType.type_byte(), 4);
        assert_eq!(ObjectKind::Tag.type_byte(), 5);
    }

    #[test]
    fn unknown_type_byte() {
        assert!(ObjectKind::from_type_byte(0).is_none());
        assert!(ObjectKind::from_type_byte(6).is_none());
        assert!(ObjectKind::from_type_byte(255).is_none());
    }

    #[test]
    fn kind_dispatch() {
        let commit = RevObject::Commit(RevCommit {
            tree: ObjectId::null(),
            parents: vec![],
            author: Person::anonymous(0),
            committer: Person::anonymous(0),
            message: String::new(),
        });
        assert_eq!(commit.kind(), ObjectKind::Commit);
        assert!(commit.as_commit().is_some());
        assert!(commit.as_tree().is_none());
        assert!(commit.as_tag().is_none());
    }

    #[test]
    fn person_constructors() {
        let p = Person::new("Ada", "a@x", 1_700_000_000_000, -120);
        assert_eq!(p.name.as_deref(), Some("Ada"));
        assert_eq!(p.tz_offset_min, -120);

        let anon = Person::anonymous(42);
        assert!(anon.name.is_none());
        assert!(anon.email.is_none());
        assert_eq!(anon.timestamp_ms, 42);
    }

    #[test]
    fn object_kind_display() {
        assert_eq!(format!("{}", ObjectKind::Commit), "commit");
        assert_eq!(format!("{}", ObjectKind::FeatureType), "featuretype");
    }
}
