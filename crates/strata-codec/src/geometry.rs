//! Geometry serialization.
//!
//! A geometry is a varint type tag followed by its coordinate structure.
//! Coordinate sequences store each ordinate as `round(value * 1e7)` in a
//! signed varint, delta-coded against the previous point in the same
//! sequence, so dense vertex runs stay compact.

use std::io::Read;

use strata_types::{Coord, Geometry, GeometryType};

use crate::error::{CodecError, CodecResult};
use crate::varint::{read_svarint, read_uvarint, write_svarint, write_uvarint};

pub(crate) fn write_geometry(buf: &mut Vec<u8>, geometry: &Geometry) {
    write_uvarint(buf, geometry.geometry_type().tag());
    match geometry {
        Geometry::Point(c) => {
            let (x, y) = c.to_fixed();
            write_svarint(buf, x);
            write_svarint(buf, y);
        }
        Geometry::LineString(coords) | Geometry::MultiPoint(coords) => {
            write_coord_seq(buf, coords);
        }
        Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
            write_uvarint(buf, rings.len() as u64);
            for ring in rings {
                write_coord_seq(buf, ring);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            write_uvarint(buf, polygons.len() as u64);
            for rings in polygons {
                write_uvarint(buf, rings.len() as u64);
                for ring in rings {
                    write_coord_seq(buf, ring);
                }
            }
        }
        Geometry::GeometryCollection(members) => {
            write_uvarint(buf, members.len() as u64);
            for member in members {
                write_geometry(buf, member);
            }
        }
    }
}

pub(crate) fn read_geometry(r: &mut impl Read) -> CodecResult<Geometry> {
    let tag = read_uvarint(r)?;
    let geometry_type =
        GeometryType::from_tag(tag).ok_or(CodecError::UnsupportedGeometry(tag))?;
    Ok(match geometry_type {
        GeometryType::Point => {
            let x = read_svarint(r)?;
            let y = read_svarint(r)?;
            Geometry::Point(Coord::from_fixed(x, y))
        }
        GeometryType::LineString => Geometry::LineString(read_coord_seq(r)?),
        GeometryType::MultiPoint => Geometry::MultiPoint(read_coord_seq(r)?),
        GeometryType::Polygon => Geometry::Polygon(read_rings(r)?),
        GeometryType::MultiLineString => Geometry::MultiLineString(read_rings(r)?),
        GeometryType::MultiPolygon => {
            let count = read_uvarint(r)?;
            let mut polygons = Vec::with_capacity(count.min(4096) as usize);
            for _ in 0..count {
                polygons.push(read_rings(r)?);
            }
            Geometry::MultiPolygon(polygons)
        }
        GeometryType::GeometryCollection => {
            let count = read_uvarint(r)?;
            let mut members = Vec::with_capacity(count.min(4096) as usize);
            for _ in 0..count {
                members.push(read_geometry(r)?);
            }
            Geometry::GeometryCollection(members)
        }
    })
}

fn write_coord_seq(buf: &mut Vec<u8>, coords: &[Coord]) {
    write_uvarint(buf, coords.len() as u64);
    let mut prev = (0i64, 0i64);
    for coord in coords {
        let (x, y) = coord.to_fixed();
        write_svarint(buf, x - prev.0);
        write_svarint(buf, y - prev.1);
        prev = (x, y);
    }
}

fn read_coord_seq(r: &mut impl Read) -> CodecResult<Vec<Coord>> {
    let count = read_uvarint(r)?;
    let mut coords = Vec::with_capacity(count.min(65_536) as usize);
    let mut prev = (0i64, 0i64);
    for _ in 0..count {
        let x = prev.0 + read_svarint(r)?;
        let y = prev.1 + read_svarint(r)?;
        coords.push(Coord::from_fixed(x, y));
        prev = (x, y);
    }
    Ok(coords)
}

fn read_rings(r: &mut impl Read) -> CodecResult<Vec<Vec<Coord>>> {
    let count = read_uvarint(r)?;
    let mut rings = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        rings.push(read_coord_seq(r)?);
    }
    Ok(rings)
}
