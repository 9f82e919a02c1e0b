//! Tree serialization: size metadata, leaf node lists, and the sparse
//! bucket map of internal nodes.

use std::collections::BTreeMap;
use std::io::Read;

use strata_types::{Bucket, Node, NodeKind, RevTree, MAX_BUCKETS};

use crate::error::{CodecError, CodecResult};
use crate::primitives::{
    read_id_or_null, read_object_id, read_optional_bounds, read_string, write_id_or_null,
    write_object_id, write_optional_bounds, write_string,
};
use crate::varint::{read_uvarint, write_uvarint};

pub(crate) fn write_tree(buf: &mut Vec<u8>, tree: &RevTree) {
    write_uvarint(buf, tree.size);
    write_uvarint(buf, tree.child_tree_count);
    write_uvarint(buf, tree.features.len() as u64);
    for node in &tree.features {
        write_node(buf, node);
    }
    write_uvarint(buf, tree.trees.len() as u64);
    for node in &tree.trees {
        write_node(buf, node);
    }
    write_uvarint(buf, tree.buckets.len() as u64);
    for (index, bucket) in &tree.buckets {
        write_uvarint(buf, u64::from(*index));
        write_object_id(buf, &bucket.target);
        write_optional_bounds(buf, bucket.bounds.as_ref());
    }
}

pub(crate) fn read_tree(r: &mut impl Read) -> CodecResult<RevTree> {
    let size = read_uvarint(r)?;
    let child_tree_count = read_uvarint(r)?;

    let feature_count = read_uvarint(r)?;
    let mut features = Vec::with_capacity(feature_count.min(4096) as usize);
    for _ in 0..feature_count {
        features.push(read_node(r)?);
    }

    let tree_count = read_uvarint(r)?;
    let mut trees = Vec::with_capacity(tree_count.min(4096) as usize);
    for _ in 0..tree_count {
        trees.push(read_node(r)?);
    }

    let bucket_count = read_uvarint(r)?;
    let mut buckets = BTreeMap::new();
    for _ in 0..bucket_count {
        let index = read_uvarint(r)?;
        if index >= u64::from(MAX_BUCKETS) {
            return Err(CodecError::Malformed(format!(
                "bucket index {index} out of range"
            )));
        }
        let target = read_object_id(r)?;
        let bounds = read_optional_bounds(r)?;
        buckets.insert(index as u32, Bucket { target, bounds });
    }

    let tree = RevTree {
        size,
        child_tree_count,
        features,
        trees,
        buckets,
    };
    tree.check_form()
        .map_err(|e| CodecError::Malformed(e.to_string()))?;
    Ok(tree)
}

fn write_node(buf: &mut Vec<u8>, node: &Node) {
    write_uvarint(buf, u64::from(node.kind.tag()));
    write_string(buf, &node.name);
    write_object_id(buf, &node.target);
    write_id_or_null(buf, node.metadata.as_ref());
    write_optional_bounds(buf, node.bounds.as_ref());
}

fn read_node(r: &mut impl Read) -> CodecResult<Node> {
    let kind_tag = read_uvarint(r)?;
    let kind = NodeKind::from_tag(kind_tag)
        .ok_or_else(|| CodecError::Malformed(format!("unknown node kind tag {kind_tag}")))?;
    let name = read_string(r)?;
    let target = read_object_id(r)?;
    let metadata = read_id_or_null(r)?;
    let bounds = read_optional_bounds(r)?;
    Ok(Node {
        name,
        target,
        metadata,
        kind,
        bounds,
    })
}
