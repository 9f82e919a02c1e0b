use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Geometry;

/// An arbitrary-precision integer carried opaquely through the store.
///
/// The canonical form is the two's-complement big-endian byte string; no
/// arithmetic is provided, only exact round-trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BigInt(pub Vec<u8>);

impl BigInt {
    pub fn from_twos_complement(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// An arbitrary-precision decimal: an unscaled [`BigInt`] and a scale.
///
/// The represented value is `unscaled * 10^(-scale)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BigDecimal {
    pub scale: i32,
    pub unscaled: BigInt,
}

/// A single typed attribute value within a feature.
///
/// The variant set is closed; the codec assigns each variant a stable field
/// tag. Temporal values are signed milliseconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    BoolArray(Vec<bool>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
    Uuid(Uuid),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
    Date(i64),
    Time(i64),
    Timestamp(i64),
    Geometry(Geometry),
}

impl FieldValue {
    /// The field tag identifying this variant in the canonical form.
    pub fn field_tag(&self) -> u8 {
        match self {
            Self::Null => 0x00,
            Self::Bool(_) => 0x01,
            Self::Byte(_) => 0x02,
            Self::Short(_) => 0x03,
            Self::Int(_) => 0x04,
            Self::Long(_) => 0x05,
            Self::Float(_) => 0x06,
            Self::Double(_) => 0x07,
            Self::String(_) => 0x08,
            Self::Bytes(_) => 0x09,
            Self::BoolArray(_) => 0x0A,
            Self::ShortArray(_) => 0x0B,
            Self::IntArray(_) => 0x0C,
            Self::LongArray(_) => 0x0D,
            Self::FloatArray(_) => 0x0E,
            Self::DoubleArray(_) => 0x0F,
            Self::StringArray(_) => 0x10,
            Self::Uuid(_) => 0x11,
            Self::BigInt(_) => 0x12,
            Self::BigDecimal(_) => 0x13,
            Self::Date(_) => 0x14,
            Self::Time(_) => 0x15,
            Self::Timestamp(_) => 0x16,
            Self::Geometry(_) => 0x17,
        }
    }
}
