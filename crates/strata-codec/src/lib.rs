//! Canonical binary serialization for Strata revision objects.
//!
//! This is format version 2: a deterministic, platform-independent byte
//! encoding for each of the five object kinds. The encoding is bit-exact by
//! contract — two logically equal objects always serialize to identical
//! bytes — because an object's identity is the SHA-1 digest of its encoded
//! form.
//!
//! Every object starts with a one-byte type tag (commit=1, tree=2,
//! feature=3, featuretype=4, tag=5) followed by the kind-specific body.
//! Counts and lengths are LEB128 varints, bounded primitives are fixed-width
//! big-endian, strings are length-prefixed UTF-8, digests are 20 raw bytes,
//! and optionals carry a one-byte presence flag.
//!
//! # Entry points
//!
//! - [`encode`] — serialize an object to its canonical bytes
//! - [`decode`] / [`decode_reader`] — parse one object, verifying the tag
//! - [`decode_expected`] — parse while requiring a specific kind
//! - [`hash_object`] — the object's identity: SHA-1 over [`encode`]

mod commit;
mod feature;
mod feature_type;
mod geometry;
mod primitives;
mod tag;
mod tree;

pub mod error;
pub mod varint;

use std::io::Read;

use strata_types::{ObjectId, ObjectKind, RevObject};

pub use error::{CodecError, CodecResult};

/// Serialize an object to its canonical byte form.
pub fn encode(object: &RevObject) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(object.kind().type_byte());
    match object {
        RevObject::Commit(c) => commit::write_commit(&mut buf, c),
        RevObject::Tree(t) => tree::write_tree(&mut buf, t),
        RevObject::Feature { values } => feature::write_feature(&mut buf, values),
        RevObject::FeatureType(ft) => feature_type::write_feature_type(&mut buf, ft),
        RevObject::Tag(t) => tag::write_tag(&mut buf, t),
    }
    buf
}

/// Parse exactly one object from a stream.
///
/// Consumes only the bytes belonging to the object; the canonical form is
/// self-delimiting, so the reader is left positioned at the next record.
pub fn decode_reader(r: &mut impl Read) -> CodecResult<RevObject> {
    let tag = primitives::read_u8(r)?;
    decode_body(tag, r)
}

/// Parse one object, failing unless it is of the expected kind.
pub fn decode_expected(expected: ObjectKind, r: &mut impl Read) -> CodecResult<RevObject> {
    let tag = primitives::read_u8(r)?;
    if tag != expected.type_byte() {
        return Err(CodecError::UnexpectedType {
            expected: kind_name(expected),
            actual: tag,
        });
    }
    decode_body(tag, r)
}

/// Parse an object from a byte slice.
pub fn decode(bytes: &[u8]) -> CodecResult<RevObject> {
    let mut reader = bytes;
    decode_reader(&mut reader)
}

/// Compute an object's content-addressed identity.
pub fn hash_object(object: &RevObject) -> ObjectId {
    ObjectId::hash_of(&encode(object))
}

fn decode_body(tag: u8, r: &mut impl Read) -> CodecResult<RevObject> {
    let kind = ObjectKind::from_type_byte(tag)
        .ok_or_else(|| CodecError::Malformed(format!("unknown object type tag {tag:#04x}")))?;
    Ok(match kind {
        ObjectKind::Commit => RevObject::Commit(commit::read_commit(r)?),
        ObjectKind::Tree => RevObject::Tree(tree::read_tree(r)?),
        ObjectKind::Feature => RevObject::Feature {
            values: feature::read_feature(r)?,
        },
        ObjectKind::FeatureType => RevObject::FeatureType(feature_type::read_feature_type(r)?),
        ObjectKind::Tag => RevObject::Tag(tag::read_tag(r)?),
    })
}

fn kind_name(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Commit => "commit",
        ObjectKind::Tree => "tree",
        ObjectKind::Feature => "feature",
        ObjectKind::FeatureType => "featuretype",
        ObjectKind::Tag => "tag",
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use strata_types::{Coord, FieldValue, Geometry, Person, RevCommit};

    fn arb_coord() -> impl Strategy<Value = Coord> {
        (-180_0000000i64..=180_0000000, -90_0000000i64..=90_0000000)
            .prop_map(|(x, y)| Coord::from_fixed(x, y))
    }

    fn arb_geometry() -> impl Strategy<Value = Geometry> {
        let point = arb_coord().prop_map(Geometry::Point);
        let line = prop::collection::vec(arb_coord(), 0..8).prop_map(Geometry::LineString);
        let polygon = prop::collection::vec(prop::collection::vec(arb_coord(), 3..6), 1..3)
            .prop_map(Geometry::Polygon);
        prop_oneof![point, line, polygon]
    }

    fn arb_value() -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            Just(FieldValue::Null),
            any::<bool>().prop_map(FieldValue::Bool),
            any::<i32>().prop_map(FieldValue::Int),
            any::<i64>().prop_map(FieldValue::Long),
            any::<f64>().prop_map(FieldValue::Double),
            ".*".prop_map(FieldValue::String),
            prop::collection::vec(any::<u8>(), 0..32).prop_map(FieldValue::Bytes),
            prop::collection::vec(any::<i64>(), 0..8).prop_map(FieldValue::LongArray),
            arb_geometry().prop_map(FieldValue::Geometry),
        ]
    }

    fn arb_person() -> impl Strategy<Value = Person> {
        (
            prop::option::of(".{0,12}"),
            prop::option::of("[a-z]{1,8}@[a-z]{1,8}"),
            any::<i64>(),
            -720i32..=840,
        )
            .prop_map(|(name, email, timestamp_ms, tz_offset_min)| Person {
                name,
                email,
                timestamp_ms,
                tz_offset_min,
            })
    }

    proptest! {
        #[test]
        fn feature_roundtrip_law(values in prop::collection::vec(arb_value(), 0..12)) {
            let object = RevObject::Feature { values };
            let encoded = encode(&object);
            let decoded = decode(&encoded).unwrap();
            // NaN-free inputs round-trip to logical equality; re-encoding is
            // always bitwise stable either way.
            prop_assert_eq!(encode(&decoded), encoded);
        }

        #[test]
        fn commit_roundtrip_law(
            parents in prop::collection::vec(any::<[u8; 20]>(), 0..4),
            author in arb_person(),
            committer in arb_person(),
            message in ".{0,64}",
            tree in any::<[u8; 20]>(),
        ) {
            let object = RevObject::Commit(RevCommit {
                tree: ObjectId::from_raw(tree),
                parents: parents.into_iter().map(ObjectId::from_raw).collect(),
                author,
                committer,
                message,
            });
            let encoded = encode(&object);
            let decoded = decode(&encoded).unwrap();
            prop_assert_eq!(&decoded, &object);
            prop_assert_eq!(encode(&decoded), encoded.clone());
            prop_assert_eq!(hash_object(&object), ObjectId::hash_of(&encoded));
        }

        #[test]
        fn decode_never_panics_on_noise(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode(&bytes);
        }
    }
}
