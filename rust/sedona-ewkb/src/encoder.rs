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
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::endian::{write_f64, write_u32, Endianness};
use crate::error::{Result, SedonaEwkbError};
use crate::geometry::{
    Coordinate, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::header::write_header;

/// Options for writing (E)WKB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Byte order of the output; every member is written in the same order
    pub endianness: Endianness,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            endianness: Endianness::BigEndian,
        }
    }
}

/// Encode `geometry` as big endian (E)WKB
///
/// Geometries with an SRID are written as EWKB; geometries without one are
/// written as ISO WKB. Passing `None` fails with [SedonaEwkbError::NoGeometry].
/// Bytes written before an error are not rolled back.
pub fn encode<'a, W: Write>(geometry: impl Into<Option<&'a Geometry>>, writer: &mut W) -> Result<()> {
    encode_with_options(geometry, writer, &WriteOptions::default())
}

/// Encode `geometry` as (E)WKB using the given [WriteOptions]
pub fn encode_with_options<'a, W: Write>(
    geometry: impl Into<Option<&'a Geometry>>,
    writer: &mut W,
    options: &WriteOptions,
) -> Result<()> {
    let geometry = geometry.into().ok_or(SedonaEwkbError::NoGeometry)?;
    write_geometry(writer, geometry, options.endianness)
}

/// Encode `geometry` into a new buffer
pub fn encode_to_vec(geometry: &Geometry, options: &WriteOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_with_options(geometry, &mut out, options)?;
    Ok(out)
}

/// Encode `geometry` as lowercase hex, the text form PostGIS accepts for EWKB
pub fn encode_hex(geometry: &Geometry, options: &WriteOptions) -> Result<String> {
    Ok(hex::encode(encode_to_vec(geometry, options)?))
}

fn count_to_u32(count: usize) -> Result<u32> {
    count.try_into().map_err(|_| {
        SedonaEwkbError::Invalid("Geometry contains too many elements for WKB format".to_string())
    })
}

fn write_geometry<W: Write>(
    writer: &mut W,
    geometry: &Geometry,
    endianness: Endianness,
) -> Result<()> {
    match geometry {
        Geometry::Point(point) => write_point(writer, point, endianness),
        Geometry::LineString(line_string) => write_line_string(writer, line_string, endianness),
        Geometry::Polygon(polygon) => write_polygon(writer, polygon, endianness),
        Geometry::MultiPoint(multi_point) => write_multi_point(writer, multi_point, endianness),
        Geometry::MultiLineString(multi_line_string) => {
            write_multi_line_string(writer, multi_line_string, endianness)
        }
        Geometry::MultiPolygon(multi_polygon) => {
            write_multi_polygon(writer, multi_polygon, endianness)
        }
        Geometry::GeometryCollection(collection) => {
            write_geometry_collection(writer, collection, endianness)
        }
        Geometry::LinearRing(_) => Err(SedonaEwkbError::UnsupportedGeometry(
            "LINEARRING has no header and can only be written as part of a POLYGON".to_string(),
        )),
    }
}

fn write_coord<W: Write>(writer: &mut W, coord: &Coordinate, endianness: Endianness) -> Result<()> {
    for ordinate in coord.ordinates() {
        write_f64(writer, endianness, *ordinate)?;
    }

    Ok(())
}

fn write_coords<W: Write>(
    writer: &mut W,
    coords: &[Coordinate],
    endianness: Endianness,
) -> Result<()> {
    write_u32(writer, endianness, count_to_u32(coords.len())?)?;
    for coord in coords {
        write_coord(writer, coord, endianness)?;
    }

    Ok(())
}

fn write_point<W: Write>(writer: &mut W, point: &Point, endianness: Endianness) -> Result<()> {
    write_header(writer, point.header(), endianness)?;
    write_coord(writer, point.coord(), endianness)
}

fn write_line_string<W: Write>(
    writer: &mut W,
    line_string: &LineString,
    endianness: Endianness,
) -> Result<()> {
    write_header(writer, line_string.header(), endianness)?;
    write_coords(writer, line_string.coords(), endianness)
}

fn write_linear_ring<W: Write>(
    writer: &mut W,
    ring: &LinearRing,
    endianness: Endianness,
) -> Result<()> {
    write_coords(writer, ring.coords(), endianness)
}

fn write_polygon<W: Write>(writer: &mut W, polygon: &Polygon, endianness: Endianness) -> Result<()> {
    write_header(writer, polygon.header(), endianness)?;
    write_u32(writer, endianness, count_to_u32(polygon.rings().len())?)?;
    for ring in polygon.rings() {
        write_linear_ring(writer, ring, endianness)?;
    }

    Ok(())
}

fn write_multi_point<W: Write>(
    writer: &mut W,
    multi_point: &MultiPoint,
    endianness: Endianness,
) -> Result<()> {
    write_header(writer, multi_point.header(), endianness)?;
    write_u32(writer, endianness, count_to_u32(multi_point.points().len())?)?;
    for point in multi_point.points() {
        write_point(writer, point, endianness)?;
    }

    Ok(())
}

fn write_multi_line_string<W: Write>(
    writer: &mut W,
    multi_line_string: &MultiLineString,
    endianness: Endianness,
) -> Result<()> {
    write_header(writer, multi_line_string.header(), endianness)?;
    let line_strings = multi_line_string.line_strings();
    write_u32(writer, endianness, count_to_u32(line_strings.len())?)?;
    for line_string in line_strings {
        write_line_string(writer, line_string, endianness)?;
    }

    Ok(())
}

fn write_multi_polygon<W: Write>(
    writer: &mut W,
    multi_polygon: &MultiPolygon,
    endianness: Endianness,
) -> Result<()> {
    write_header(writer, multi_polygon.header(), endianness)?;
    write_u32(writer, endianness, count_to_u32(multi_polygon.polygons().len())?)?;
    for polygon in multi_polygon.polygons() {
        write_polygon(writer, polygon, endianness)?;
    }

    Ok(())
}

fn write_geometry_collection<W: Write>(
    writer: &mut W,
    collection: &GeometryCollection,
    endianness: Endianness,
) -> Result<()> {
    write_header(writer, collection.header(), endianness)?;
    write_u32(writer, endianness, count_to_u32(collection.geometries().len())?)?;
    for geometry in collection.geometries() {
        write_geometry(writer, geometry, endianness)?;
    }

    Ok(())
}
