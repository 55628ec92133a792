// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use std::io::Read;

use crate::endian::{read_endianness, read_f64, read_u32, Endianness};
use crate::error::{Result, SedonaEwkbError};
use crate::geometry::{
    Coordinate, Geometry, GeometryCollection, Header, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::header::{read_header, read_type_field};
use crate::types::{Dimension, GeomType};

// Counts come from untrusted input, so only this many elements are reserved
// up front
const MAX_PREALLOCATED: usize = 4096;

/// Decode one (E)WKB geometry from `reader`
///
/// Reads the byte order marker and header, then the body of the geometry,
/// recursing into collection members. Nothing is returned unless the whole
/// geometry was read. Bytes following the geometry are left unread.
pub fn decode<R: Read>(reader: &mut R) -> Result<Geometry> {
    let endianness = read_endianness(reader)?;
    let header = read_header(reader, endianness)?;
    read_body(reader, header, endianness)
}

/// Decode one (E)WKB geometry from the start of a buffer
pub fn decode_wkb(buf: &[u8]) -> Result<Geometry> {
    let mut reader = buf;
    decode(&mut reader)
}

/// Decode hex encoded (E)WKB, as returned by PostGIS for a geometry column
pub fn decode_hex(value: &str) -> Result<Geometry> {
    let buf = hex::decode(value.trim())?;
    decode_wkb(&buf)
}

fn with_capacity<T>(count: u32) -> Vec<T> {
    Vec::with_capacity((count as usize).min(MAX_PREALLOCATED))
}

/// Read the body of a geometry whose header has already been read
fn read_body<R: Read>(reader: &mut R, header: Header, endianness: Endianness) -> Result<Geometry> {
    let geometry: Geometry = match header.geom_type() {
        GeomType::Point => read_point(reader, header, endianness)?.into(),
        GeomType::LineString => read_line_string(reader, header, endianness)?.into(),
        GeomType::Polygon => read_polygon(reader, header, endianness)?.into(),
        GeomType::MultiPoint => read_multi_point(reader, header, endianness)?.into(),
        GeomType::MultiLineString => read_multi_line_string(reader, header, endianness)?.into(),
        GeomType::MultiPolygon => read_multi_polygon(reader, header, endianness)?.into(),
        GeomType::GeometryCollection => {
            read_geometry_collection(reader, header, endianness)?.into()
        }
        other => {
            return Err(SedonaEwkbError::UnsupportedGeometry(format!(
                "cannot decode {other}"
            )))
        }
    };

    Ok(geometry)
}

/// Read the byte order marker and header of a Multi* member
///
/// The member's own geometry type code is not used for dispatch. A code that
/// differs from `expected` is kept in the header; a code that is not a known
/// geometry type is replaced by `expected`.
fn read_member_header<R: Read>(
    reader: &mut R,
    expected: GeomType,
) -> Result<(Header, Endianness)> {
    let endianness = read_endianness(reader)?;
    let field = read_type_field(reader, endianness)?;
    let geom_type = match GeomType::try_from_code(field.code) {
        Ok(geom_type) => {
            if geom_type != expected {
                log::warn!(
                    "Member header claims {geom_type} inside a collection of {expected}; reading as {expected}"
                );
            }
            geom_type
        }
        Err(_) => {
            log::warn!(
                "Member header has unknown type code {} inside a collection of {expected}; reading as {expected}",
                field.code
            );
            expected
        }
    };

    Ok((
        Header::from_wire(geom_type, field.dimension, field.srid),
        endianness,
    ))
}

fn read_coord<R: Read>(
    reader: &mut R,
    dimension: Dimension,
    endianness: Endianness,
) -> Result<Coordinate> {
    let ordinates = (0..dimension.arity())
        .map(|_| read_f64(reader, endianness))
        .collect::<Result<Vec<_>>>()?;
    Ok(Coordinate::from_ordinates(ordinates))
}

fn read_coords<R: Read>(
    reader: &mut R,
    dimension: Dimension,
    endianness: Endianness,
) -> Result<Vec<Coordinate>> {
    let num_coords = read_u32(reader, endianness)?;
    let mut coords = with_capacity(num_coords);
    for _ in 0..num_coords {
        coords.push(read_coord(reader, dimension, endianness)?);
    }

    Ok(coords)
}

fn read_point<R: Read>(reader: &mut R, header: Header, endianness: Endianness) -> Result<Point> {
    let coord = read_coord(reader, header.dimension(), endianness)?;
    Ok(Point::from_parts(header, coord))
}

fn read_line_string<R: Read>(
    reader: &mut R,
    header: Header,
    endianness: Endianness,
) -> Result<LineString> {
    let coords = read_coords(reader, header.dimension(), endianness)?;
    Ok(LineString::from_parts(header, coords))
}

fn read_polygon<R: Read>(
    reader: &mut R,
    header: Header,
    endianness: Endianness,
) -> Result<Polygon> {
    let num_rings = read_u32(reader, endianness)?;
    let mut rings = with_capacity(num_rings);
    for _ in 0..num_rings {
        // Rings have no header and take the dimension of their polygon
        let coords = read_coords(reader, header.dimension(), endianness)?;
        rings.push(LinearRing::new(coords));
    }

    Ok(Polygon::from_parts(header, rings))
}

fn read_multi_point<R: Read>(
    reader: &mut R,
    header: Header,
    endianness: Endianness,
) -> Result<MultiPoint> {
    let num_points = read_u32(reader, endianness)?;
    let mut points = with_capacity(num_points);
    for _ in 0..num_points {
        let (member_header, member_endianness) = read_member_header(reader, GeomType::Point)?;
        points.push(read_point(reader, member_header, member_endianness)?);
    }

    Ok(MultiPoint::from_parts(header, points))
}

fn read_multi_line_string<R: Read>(
    reader: &mut R,
    header: Header,
    endianness: Endianness,
) -> Result<MultiLineString> {
    let num_line_strings = read_u32(reader, endianness)?;
    let mut line_strings = with_capacity(num_line_strings);
    for _ in 0..num_line_strings {
        let (member_header, member_endianness) =
            read_member_header(reader, GeomType::LineString)?;
        line_strings.push(read_line_string(reader, member_header, member_endianness)?);
    }

    Ok(MultiLineString::from_parts(header, line_strings))
}

fn read_multi_polygon<R: Read>(
    reader: &mut R,
    header: Header,
    endianness: Endianness,
) -> Result<MultiPolygon> {
    let num_polygons = read_u32(reader, endianness)?;
    let mut polygons = with_capacity(num_polygons);
    for _ in 0..num_polygons {
        let (member_header, member_endianness) = read_member_header(reader, GeomType::Polygon)?;
        polygons.push(read_polygon(reader, member_header, member_endianness)?);
    }

    Ok(MultiPolygon::from_parts(header, polygons))
}

fn read_geometry_collection<R: Read>(
    reader: &mut R,
    header: Header,
    endianness: Endianness,
) -> Result<GeometryCollection> {
    let num_geometries = read_u32(reader, endianness)?;
    let mut geometries = with_capacity(num_geometries);
    for _ in 0..num_geometries {
        // Unlike Multi* members, these dispatch on their own geometry type
        let member_endianness = read_endianness(reader)?;
        let member_header = read_header(reader, member_endianness)?;
        geometries.push(read_body(reader, member_header, member_endianness)?);
    }

    Ok(GeometryCollection::from_parts(header, geometries))
}
