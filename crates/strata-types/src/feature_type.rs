use std::fmt;

use serde::{Deserialize, Serialize};

/// A namespace-qualified type name, e.g. `http://example.com/gis#roads`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QualifiedName {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: name.into(),
        }
    }

    pub fn namespaced(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}#{}", self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// The binding class of an attribute: which [`FieldValue`] variant its
/// values take. Tag values match the field tags the codec writes.
///
/// [`FieldValue`]: crate::value::FieldValue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Bytes,
    BoolArray,
    ShortArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    StringArray,
    Uuid,
    BigInt,
    BigDecimal,
    Date,
    Time,
    Timestamp,
    Geometry,
}

impl Binding {
    pub fn tag(&self) -> u8 {
        match self {
            Self::Bool => 0x01,
            Self::Byte => 0x02,
            Self::Short => 0x03,
            Self::Int => 0x04,
            Self::Long => 0x05,
            Self::Float => 0x06,
            Self::Double => 0x07,
            Self::String => 0x08,
            Self::Bytes => 0x09,
            Self::BoolArray => 0x0A,
            Self::ShortArray => 0x0B,
            Self::IntArray => 0x0C,
            Self::LongArray => 0x0D,
            Self::FloatArray => 0x0E,
            Self::DoubleArray => 0x0F,
            Self::StringArray => 0x10,
            Self::Uuid => 0x11,
            Self::BigInt => 0x12,
            Self::BigDecimal => 0x13,
            Self::Date => 0x14,
            Self::Time => 0x15,
            Self::Timestamp => 0x16,
            Self::Geometry => 0x17,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::Bool),
            0x02 => Some(Self::Byte),
            0x03 => Some(Self::Short),
            0x04 => Some(Self::Int),
            0x05 => Some(Self::Long),
            0x06 => Some(Self::Float),
            0x07 => Some(Self::Double),
            0x08 => Some(Self::String),
            0x09 => Some(Self::Bytes),
            0x0A => Some(Self::BoolArray),
            0x0B => Some(Self::ShortArray),
            0x0C => Some(Self::IntArray),
            0x0D => Some(Self::LongArray),
            0x0E => Some(Self::FloatArray),
            0x0F => Some(Self::DoubleArray),
            0x10 => Some(Self::StringArray),
            0x11 => Some(Self::Uuid),
            0x12 => Some(Self::BigInt),
            0x13 => Some(Self::BigDecimal),
            0x14 => Some(Self::Date),
            0x15 => Some(Self::Time),
            0x16 => Some(Self::Timestamp),
            0x17 => Some(Self::Geometry),
            _ => None,
        }
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self, Self::Geometry)
    }
}

/// Describes one attribute of a feature type.
///
/// `crs` carries the coordinate reference system authority code (e.g.
/// `EPSG:4326`) and is only meaningful for geometry bindings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub binding: Binding,
    pub nillable: bool,
    pub min_occurs: u64,
    pub max_occurs: u64,
    pub crs: Option<String>,
}

impl AttributeDescriptor {
    pub fn required(name: impl Into<String>, binding: Binding) -> Self {
        Self {
            name: name.into(),
            binding,
            nillable: false,
            min_occurs: 1,
            max_occurs: 1,
            crs: None,
        }
    }

    pub fn optional(name: impl Into<String>, binding: Binding) -> Self {
        Self {
            name: name.into(),
            binding,
            nillable: true,
            min_occurs: 0,
            max_occurs: 1,
            crs: None,
        }
    }

    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }
}

/// The schema a feature's values are validated against: a qualified name
/// and an ordered attribute list. Feature values agree positionally with
/// the attribute order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureType {
    pub name: QualifiedName,
    pub attributes: Vec<AttributeDescriptor>,
}

impl FeatureType {
    pub fn new(name: QualifiedName, attributes: Vec<AttributeDescriptor>) -> Self {
        Self { name, attributes }
    }
}
