//! Tag serialization: target commit, name, message, tagger.

use std::io::Read;

use strata_types::RevTag;

use crate::error::CodecResult;
use crate::primitives::{
    read_object_id, read_person, read_string, write_object_id, write_person, write_string,
};

pub(crate) fn write_tag(buf: &mut Vec<u8>, tag: &RevTag) {
    write_object_id(buf, &tag.commit);
    write_string(buf, &tag.name);
    write_string(buf, &tag.message);
    write_person(buf, &tag.tagger);
}

pub(crate) fn read_tag(r: &mut impl Read) -> CodecResult<RevTag> {
    Ok(RevTag {
        commit: read_object_id(r)?,
        name: read_string(r)?,
        message: read_string(r)?,
        tagger: read_person(r)?,
    })
}
