use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::ObjectId;

/// Number of bucket slots an internal tree node partitions into.
pub const MAX_BUCKETS: u32 = 1024;

/// An axis-aligned bounding box over feature coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Grow this box to cover `other`.
    pub fn expand(&mut self, other: &Bounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Whether the point lies inside (or on the boundary of) this box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// What a tree node points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Feature,
    Tree,
}

impl NodeKind {
    /// Tag value in the canonical form; shares the object type-tag space.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Tree => 2,
            Self::Feature => 3,
        }
    }

    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            2 => Some(Self::Tree),
            3 => Some(Self::Feature),
            _ => None,
        }
    }
}

/// A named reference from a tree to a feature or subtree.
///
/// The optional `metadata` digest points at the [`FeatureType`] describing
/// the referenced object's schema.
///
/// [`FeatureType`]: crate::feature_type::FeatureType
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub target: ObjectId,
    pub metadata: Option<ObjectId>,
    pub kind: NodeKind,
    pub bounds: Option<Bounds>,
}

impl Node {
    pub fn feature(name: impl Into<String>, target: ObjectId) -> Self {
        Self {
            name: name.into(),
            target,
            metadata: None,
            kind: NodeKind::Feature,
            bounds: None,
        }
    }

    pub fn tree(name: impl Into<String>, target: ObjectId) -> Self {
        Self {
            name: name.into(),
            target,
            metadata: None,
            kind: NodeKind::Tree,
            bounds: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ObjectId) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// A slot in a bucketed tree: the child subtree plus its coverage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub target: ObjectId,
    pub bounds: Option<Bounds>,
}

/// A tree object: either a leaf holding feature and subtree nodes directly,
/// or an internal node partitioning a large flat tree into up to 1024
/// hashed buckets. The two forms are mutually exclusive.
///
/// `size` counts all features transitively contained; `child_tree_count`
/// counts direct subtrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevTree {
    pub size: u64,
    pub child_tree_count: u64,
    pub features: Vec<Node>,
    pub trees: Vec<Node>,
    pub buckets: BTreeMap<u32, Bucket>,
}

impl RevTree {
    /// The canonical empty tree.
    pub fn empty() -> Self {
        Self {
            size: 0,
            child_tree_count: 0,
            features: Vec::new(),
            trees: Vec::new(),
            buckets: BTreeMap::new(),
        }
    }

    /// Build a leaf tree from feature and subtree nodes.
    pub fn leaf(size: u64, child_tree_count: u64, features: Vec<Node>, trees: Vec<Node>) -> Self {
        Self {
            size,
            child_tree_count,
            features,
            trees,
            buckets: BTreeMap::new(),
        }
    }

    /// Build an internal tree from a sparse bucket map.
    ///
    /// Fails if any bucket index is outside `0..MAX_BUCKETS`.
    pub fn bucketed(
        size: u64,
        child_tree_count: u64,
        buckets: BTreeMap<u32, Bucket>,
    ) -> Result<Self, TypeError> {
        if let Some(index) = buckets.keys().find(|i| **i >= MAX_BUCKETS) {
            return Err(TypeError::BucketIndexOutOfRange(*index));
        }
        Ok(Self {
            size,
            child_tree_count,
            features: Vec::new(),
            trees: Vec::new(),
            buckets,
        })
    }

    /// Whether this tree is in bucketed (internal) form.
    pub fn is_bucketed(&self) -> bool {
        !self.buckets.is_empty()
    }

    /// Validate the leaf/bucket exclusivity invariant.
    pub fn check_form(&self) -> Result<(), TypeError> {
        if self.is_bucketed() && (!self.features.is_empty() || !self.trees.is_empty()) {
            return Err(TypeError::MixedTreeForm);
        }
        Ok(())
    }
}
