//! Foundation types for Strata, a distributed version-control engine for
//! geospatial feature data.
//!
//! This crate provides the identity and structural types every other Strata
//! crate builds on.
//!
//! # Key Types
//!
//! - [`ObjectId`] — 20-byte content-addressed identifier (SHA-1 of the
//!   canonical object bytes)
//! - [`RevObject`] — the closed set of revision object kinds: commit, tree,
//!   feature, feature type, and tag
//! - [`RevTree`] / [`Node`] / [`Bucket`] — the tree structure, in leaf or
//!   bucketed form
//! - [`FieldValue`] / [`Geometry`] — typed attribute values carried by
//!   features, including fixed-precision geometries
//! - [`FeatureType`] — the schema a feature's values are validated against

pub mod error;
pub mod feature_type;
pub mod geometry;
pub mod id;
pub mod object;
pub mod tree;
pub mod value;

pub use error::TypeError;
pub use feature_type::{AttributeDescriptor, Binding, FeatureType, QualifiedName};
pub use geometry::{Coord, Geometry, GeometryType};
pub use id::ObjectId;
pub use object::{ObjectKind, Person, RevCommit, RevObject, RevTag};
pub use tree::{Bounds, Bucket, Node, NodeKind, RevTree, MAX_BUCKETS};
pub use value::{BigDecimal, BigInt, FieldValue};
