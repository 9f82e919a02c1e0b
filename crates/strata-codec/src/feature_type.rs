//! Feature-type serialization: qualified name plus ordered attribute
//! descriptors.

use std::io::Read;

use strata_types::{AttributeDescriptor, Binding, FeatureType, QualifiedName};

use crate::error::{CodecError, CodecResult};
use crate::primitives::{
    read_optional_string, read_string, read_u8, write_optional_string, write_string,
};
use crate::varint::{read_uvarint, write_uvarint};

pub(crate) fn write_feature_type(buf: &mut Vec<u8>, ft: &FeatureType) {
    write_optional_string(buf, ft.name.namespace.as_deref());
    write_string(buf, &ft.name.local);
    write_uvarint(buf, ft.attributes.len() as u64);
    for attr in &ft.attributes {
        write_attribute(buf, attr);
    }
}

pub(crate) fn read_feature_type(r: &mut impl Read) -> CodecResult<FeatureType> {
    let namespace = read_optional_string(r)?;
    let local = read_string(r)?;
    let count = read_uvarint(r)?;
    let mut attributes = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        attributes.push(read_attribute(r)?);
    }
    Ok(FeatureType {
        name: QualifiedName { namespace, local },
        attributes,
    })
}

fn write_attribute(buf: &mut Vec<u8>, attr: &AttributeDescriptor) {
    write_string(buf, &attr.name);
    buf.push(attr.binding.tag());
    buf.push(u8::from(attr.nillable));
    write_uvarint(buf, attr.min_occurs);
    write_uvarint(buf, attr.max_occurs);
    write_optional_string(buf, attr.crs.as_deref());
}

fn read_attribute(r: &mut impl Read) -> CodecResult<AttributeDescriptor> {
    let name = read_string(r)?;
    let binding_tag = read_u8(r)?;
    let binding = Binding::from_tag(binding_tag).ok_or_else(|| {
        CodecError::Malformed(format!("unknown binding tag {binding_tag:#04x}"))
    })?;
    let nillable = match read_u8(r)? {
        0 => false,
        1 => true,
        other => {
            return Err(CodecError::Malformed(format!(
                "invalid nillable byte {other:#04x}"
            )))
        }
    };
    let min_occurs = read_uvarint(r)?;
    let max_occurs = read_uvarint(r)?;
    let crs = read_optional_string(r)?;
    Ok(AttributeDescriptor {
        name,
        binding,
        nillable,
        min_occurs,
        max_occurs,
        crs,
    })
}
