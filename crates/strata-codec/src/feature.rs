//! Feature serialization: an ordered run of tagged typed values.

use std::io::Read;

use strata_types::{BigDecimal, BigInt, FieldValue};

use crate::error::{CodecError, CodecResult};
use crate::geometry::{read_geometry, write_geometry};
use crate::primitives::{
    fill, read_f32, read_f64, read_i16, read_i32, read_i64, read_string, read_u8, write_f32,
    write_f64, write_i16, write_i32, write_i64, write_string,
};
use crate::varint::{read_svarint, read_uvarint, write_svarint, write_uvarint};

pub(crate) fn write_feature(buf: &mut Vec<u8>, values: &[FieldValue]) {
    write_uvarint(buf, values.len() as u64);
    for value in values {
        write_value(buf, value);
    }
}

pub(crate) fn read_feature(r: &mut impl Read) -> CodecResult<Vec<FieldValue>> {
    let count = read_uvarint(r)?;
    let mut values = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        values.push(read_value(r)?);
    }
    Ok(values)
}

fn write_value(buf: &mut Vec<u8>, value: &FieldValue) {
    buf.push(value.field_tag());
    match value {
        FieldValue::Null => {}
        FieldValue::Bool(v) => buf.push(u8::from(*v)),
        FieldValue::Byte(v) => buf.push(*v as u8),
        FieldValue::Short(v) => write_i16(buf, *v),
        FieldValue::Int(v) => write_i32(buf, *v),
        FieldValue::Long(v) => write_i64(buf, *v),
        FieldValue::Float(v) => write_f32(buf, *v),
        FieldValue::Double(v) => write_f64(buf, *v),
        FieldValue::String(v) => write_string(buf, v),
        FieldValue::Bytes(v) => {
            write_uvarint(buf, v.len() as u64);
            buf.extend_from_slice(v);
        }
        FieldValue::BoolArray(v) => {
            write_uvarint(buf, v.len() as u64);
            buf.extend(v.iter().map(|b| u8::from(*b)));
        }
        FieldValue::ShortArray(v) => {
            write_uvarint(buf, v.len() as u64);
            v.iter().for_each(|e| write_i16(buf, *e));
        }
        FieldValue::IntArray(v) => {
            write_uvarint(buf, v.len() as u64);
            v.iter().for_each(|e| write_i32(buf, *e));
        }
        FieldValue::LongArray(v) => {
            write_uvarint(buf, v.len() as u64);
            v.iter().for_each(|e| write_i64(buf, *e));
        }
        FieldValue::FloatArray(v) => {
            write_uvarint(buf, v.len() as u64);
            v.iter().for_each(|e| write_f32(buf, *e));
        }
        FieldValue::DoubleArray(v) => {
            write_uvarint(buf, v.len() as u64);
            v.iter().for_each(|e| write_f64(buf, *e));
        }
        FieldValue::StringArray(v) => {
            write_uvarint(buf, v.len() as u64);
            v.iter().for_each(|e| write_string(buf, e));
        }
        FieldValue::Uuid(v) => buf.extend_from_slice(v.as_bytes()),
        FieldValue::BigInt(v) => write_bigint(buf, v),
        FieldValue::BigDecimal(v) => {
            write_svarint(buf, i64::from(v.scale));
            write_bigint(buf, &v.unscaled);
        }
        FieldValue::Date(v) | FieldValue::Time(v) | FieldValue::Timestamp(v) => {
            write_i64(buf, *v)
        }
        FieldValue::Geometry(g) => write_geometry(buf, g),
    }
}

fn read_value(r: &mut impl Read) -> CodecResult<FieldValue> {
    let tag = read_u8(r)?;
    Ok(match tag {
        0x00 => FieldValue::Null,
        0x01 => FieldValue::Bool(read_bool(r)?),
        0x02 => FieldValue::Byte(read_u8(r)? as i8),
        0x03 => FieldValue::Short(read_i16(r)?),
        0x04 => FieldValue::Int(read_i32(r)?),
        0x05 => FieldValue::Long(read_i64(r)?),
        0x06 => FieldValue::Float(read_f32(r)?),
        0x07 => FieldValue::Double(read_f64(r)?),
        0x08 => FieldValue::String(read_string(r)?),
        0x09 => {
            let len = read_uvarint(r)? as usize;
            let mut bytes = vec![0u8; len];
            fill(r, &mut bytes)?;
            FieldValue::Bytes(bytes)
        }
        0x0A => FieldValue::BoolArray(read_array(r, read_bool)?),
        0x0B => FieldValue::ShortArray(read_array(r, read_i16)?),
        0x0C => FieldValue::IntArray(read_array(r, read_i32)?),
        0x0D => FieldValue::LongArray(read_array(r, read_i64)?),
        0x0E => FieldValue::FloatArray(read_array(r, read_f32)?),
        0x0F => FieldValue::DoubleArray(read_array(r, read_f64)?),
        0x10 => FieldValue::StringArray(read_array(r, read_string)?),
        0x11 => {
            let mut bytes = [0u8; 16];
            fill(r, &mut bytes)?;
            FieldValue::Uuid(uuid::Uuid::from_bytes(bytes))
        }
        0x12 => FieldValue::BigInt(read_bigint(r)?),
        0x13 => {
            let scale = read_svarint(r)?;
            let scale = i32::try_from(scale)
                .map_err(|_| CodecError::Malformed("decimal scale out of range".into()))?;
            FieldValue::BigDecimal(BigDecimal {
                scale,
                unscaled: read_bigint(r)?,
            })
        }
        0x14 => FieldValue::Date(read_i64(r)?),
        0x15 => FieldValue::Time(read_i64(r)?),
        0x16 => FieldValue::Timestamp(read_i64(r)?),
        0x17 => FieldValue::Geometry(read_geometry(r)?),
        other => {
            return Err(CodecError::Malformed(format!(
                "unknown field tag {other:#04x}"
            )))
        }
    })
}

fn read_bool(r: &mut impl Read) -> CodecResult<bool> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CodecError::Malformed(format!(
            "invalid bool byte {other:#04x}"
        ))),
    }
}

fn read_array<R: Read, T>(
    r: &mut R,
    element: impl Fn(&mut R) -> CodecResult<T>,
) -> CodecResult<Vec<T>> {
    let count = read_uvarint(r)?;
    let mut out = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        out.push(element(r)?);
    }
    Ok(out)
}

fn write_bigint(buf: &mut Vec<u8>, value: &BigInt) {
    write_uvarint(buf, value.as_bytes().len() as u64);
    buf.extend_from_slice(value.as_bytes());
}

fn read_bigint(r: &mut impl Read) -> CodecResult<BigInt> {
    let len = read_uvarint(r)? as usize;
    let mut bytes = vec![0u8; len];
    fill(r, &mut bytes)?;
    Ok(BigInt::from_twos_complement(bytes))
}
