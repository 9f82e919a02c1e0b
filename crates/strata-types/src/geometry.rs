use serde::{Deserialize, Serialize};

/// Scale factor of the fixed-precision coordinate grid (1e-7 degrees).
pub const FIXED_PRECISION_FACTOR: f64 = 1e7;

/// A 2D coordinate snapped to the fixed-precision grid.
///
/// Construction quantizes each ordinate to `round(value * 1e7) / 1e7`, so a
/// coordinate always round-trips exactly through the canonical encoding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Self::quantize(x),
            y: Self::quantize(y),
        }
    }

    /// Rebuild from fixed-precision grid units.
    pub fn from_fixed(x: i64, y: i64) -> Self {
        Self {
            x: x as f64 / FIXED_PRECISION_FACTOR,
            y: y as f64 / FIXED_PRECISION_FACTOR,
        }
    }

    /// The ordinates in fixed-precision grid units.
    pub fn to_fixed(&self) -> (i64, i64) {
        (
            (self.x * FIXED_PRECISION_FACTOR).round() as i64,
            (self.y * FIXED_PRECISION_FACTOR).round() as i64,
        )
    }

    fn quantize(ordinate: f64) -> f64 {
        (ordinate * FIXED_PRECISION_FACTOR).round() / FIXED_PRECISION_FACTOR
    }
}

/// Geometry kind, with its canonical tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub fn tag(&self) -> u64 {
        match self {
            Self::Point => 1,
            Self::LineString => 2,
            Self::Polygon => 3,
            Self::MultiPoint => 4,
            Self::MultiLineString => 5,
            Self::MultiPolygon => 6,
            Self::GeometryCollection => 7,
        }
    }

    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            1 => Some(Self::Point),
            2 => Some(Self::LineString),
            3 => Some(Self::Polygon),
            4 => Some(Self::MultiPoint),
            5 => Some(Self::MultiLineString),
            6 => Some(Self::MultiPolygon),
            7 => Some(Self::GeometryCollection),
            _ => None,
        }
    }
}

/// A geometry value.
///
/// A polygon is a shell ring followed by hole rings; rings are not required
/// to be closed by this type (topology validation is out of scope).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::LineString(_) => GeometryType::LineString,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::MultiPoint(_) => GeometryType::MultiPoint,
            Self::MultiLineString(_) => GeometryType::MultiLineString,
            Self::MultiPolygon(_) => GeometryType::MultiPolygon,
            Self::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// The bounding box over every coordinate, or `None` for an empty
    /// geometry.
    pub fn bounds(&self) -> Option<crate::tree::Bounds> {
        let mut result: Option<crate::tree::Bounds> = None;
        self.each_coord(&mut |c: &Coord| {
            let point = crate::tree::Bounds::new(c.x, c.x, c.y, c.y);
            result = Some(match result {
                Some(mut b) => {
                    b.expand(&point);
                    b
                }
                None => point,
            });
        });
        result
    }

    fn each_coord(&self, f: &mut impl FnMut(&Coord)) {
        match self {
            Self::Point(c) => f(c),
            Self::LineString(cs) | Self::MultiPoint(cs) => cs.iter().for_each(f),
            Self::Polygon(rings) | Self::MultiLineString(rings) => {
                rings.iter().flatten().for_each(f)
            }
            Self::MultiPolygon(polys) => polys.iter().flatten().flatten().for_each(f),
            Self::GeometryCollection(members) => {
                for g in members {
                    g.each_coord(f);
                }
            }
        }
    }
}
