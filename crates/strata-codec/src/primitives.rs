//! Shared encoders for the primitive building blocks of the canonical
//! format: fixed-width big-endian integers, length-prefixed strings,
//! digests, presence-flagged optionals, person records, and bounds.

use std::io::Read;

use strata_types::{Bounds, ObjectId, Person};

use crate::error::{CodecError, CodecResult};
use crate::varint::{read_uvarint, write_uvarint};

/// Read exactly `buf.len()` bytes, reporting truncation as malformed.
pub(crate) fn fill(r: &mut impl Read, buf: &mut [u8]) -> CodecResult<()> {
    match r.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(CodecError::Malformed("truncated input".into()))
        }
        Err(e) => Err(CodecError::Io(e)),
    }
}

pub(crate) fn read_u8(r: &mut impl Read) -> CodecResult<u8> {
    let mut buf = [0u8; 1];
    fill(r, &mut buf)?;
    Ok(buf[0])
}

macro_rules! fixed_width {
    ($write:ident, $read:ident, $ty:ty, $len:expr) => {
        pub(crate) fn $write(buf: &mut Vec<u8>, value: $ty) {
            buf.extend_from_slice(&value.to_be_bytes());
        }

        pub(crate) fn $read(r: &mut impl Read) -> CodecResult<$ty> {
            let mut bytes = [0u8; $len];
            fill(r, &mut bytes)?;
            Ok(<$ty>::from_be_bytes(bytes))
        }
    };
}

fixed_width!(write_i16, read_i16, i16, 2);
fixed_width!(write_i32, read_i32, i32, 4);
fixed_width!(write_i64, read_i64, i64, 8);
fixed_width!(write_f32, read_f32, f32, 4);
fixed_width!(write_f64, read_f64, f64, 8);

pub(crate) fn write_string(buf: &mut Vec<u8>, s: &str) {
    write_uvarint(buf, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

pub(crate) fn read_string(r: &mut impl Read) -> CodecResult<String> {
    let len = read_uvarint(r)? as usize;
    let mut bytes = vec![0u8; len];
    fill(r, &mut bytes)?;
    String::from_utf8(bytes).map_err(|_| CodecError::Malformed("invalid UTF-8 in string".into()))
}

pub(crate) fn write_presence(buf: &mut Vec<u8>, present: bool) {
    buf.push(u8::from(present));
}

pub(crate) fn read_presence(r: &mut impl Read) -> CodecResult<bool> {
    match read_u8(r)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CodecError::Malformed(format!(
            "invalid presence flag {other:#04x}"
        ))),
    }
}

pub(crate) fn write_optional_string(buf: &mut Vec<u8>, s: Option<&str>) {
    match s {
        Some(s) => {
            write_presence(buf, true);
            write_string(buf, s);
        }
        None => write_presence(buf, false),
    }
}

pub(crate) fn read_optional_string(r: &mut impl Read) -> CodecResult<Option<String>> {
    if read_presence(r)? {
        Ok(Some(read_string(r)?))
    } else {
        Ok(None)
    }
}

pub(crate) fn write_object_id(buf: &mut Vec<u8>, id: &ObjectId) {
    buf.extend_from_slice(id.as_bytes());
}

pub(crate) fn read_object_id(r: &mut impl Read) -> CodecResult<ObjectId> {
    let mut bytes = [0u8; 20];
    fill(r, &mut bytes)?;
    Ok(ObjectId::from_raw(bytes))
}

/// Write an optional digest as 20 bytes, NULL standing in for absent.
pub(crate) fn write_id_or_null(buf: &mut Vec<u8>, id: Option<&ObjectId>) {
    match id {
        Some(id) => write_object_id(buf, id),
        None => write_object_id(buf, &ObjectId::null()),
    }
}

pub(crate) fn read_id_or_null(r: &mut impl Read) -> CodecResult<Option<ObjectId>> {
    let id = read_object_id(r)?;
    Ok(if id.is_null() { None } else { Some(id) })
}

pub(crate) fn write_person(buf: &mut Vec<u8>, person: &Person) {
    write_optional_string(buf, person.name.as_deref());
    write_optional_string(buf, person.email.as_deref());
    write_i64(buf, person.timestamp_ms);
    write_i32(buf, person.tz_offset_min);
}

pub(crate) fn read_person(r: &mut impl Read) -> CodecResult<Person> {
    Ok(Person {
        name: read_optional_string(r)?,
        email: read_optional_string(r)?,
        timestamp_ms: read_i64(r)?,
        tz_offset_min: read_i32(r)?,
    })
}

pub(crate) fn write_bounds(buf: &mut Vec<u8>, b: &Bounds) {
    write_f64(buf, b.min_x);
    write_f64(buf, b.max_x);
    write_f64(buf, b.min_y);
    write_f64(buf, b.max_y);
}

pub(crate) fn read_bounds(r: &mut impl Read) -> CodecResult<Bounds> {
    Ok(Bounds {
        min_x: read_f64(r)?,
        max_x: read_f64(r)?,
        min_y: read_f64(r)?,
        max_y: read_f64(r)?,
    })
}

pub(crate) fn write_optional_bounds(buf: &mut Vec<u8>, b: Option<&Bounds>) {
    match b {
        Some(b) => {
            write_presence(buf, true);
            write_bounds(buf, b);
        }
        None => write_presence(buf, false),
    }
}

pub(crate) fn read_optional_bounds(r: &mut impl Read) -> CodecResult<Option<Bounds>> {
    if read_presence(r)? {
        Ok(Some(read_bounds(r)?))
    } else {
        Ok(None)
    }
}
