//! Commit serialization: tree digest, parent list, author, committer,
//! message.

use std::io::Read;

use strata_types::RevCommit;

use crate::error::CodecResult;
use crate::primitives::{
    read_object_id, read_person, read_string, write_object_id, write_person, write_string,
};
use crate::varint::{read_uvarint, write_uvarint};

pub(crate) fn write_commit(buf: &mut Vec<u8>, commit: &RevCommit) {
    write_object_id(buf, &commit.tree);
    write_uvarint(buf, commit.parents.len() as u64);
    for parent in &commit.parents {
        write_object_id(buf, parent);
    }
    write_person(buf, &commit.author);
    write_person(buf, &commit.committer);
    write_string(buf, &commit.message);
}

pub(crate) fn read_commit(r: &mut impl Read) -> CodecResult<RevCommit> {
    let tree = read_object_id(r)?;
    let parent_count = read_uvarint(r)?;
    let mut parents = Vec::with_capacity(parent_count.min(1024) as usize);
    for _ in 0..parent_count {
        parents.push(read_object_id(r)?);
    }
    let author = read_person(r)?;
    let committer = read_person(r)?;
    let message = read_string(r)?;
    Ok(RevCommit {
        tree,
        parents,
        author,
        committer,
        message,
    })
}
