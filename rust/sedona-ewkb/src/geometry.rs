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

//! Owned geometry tree produced by the decoder and consumed by the encoder
//!
//! Every node except [LinearRing] carries its own [Header]. Nodes are plain
//! values: a collection owns its members and nothing points back up the tree.

use crate::error::{Result, SedonaEwkbError};
use crate::types::{Dimension, GeomType};

/// Geometry type, dimension, and SRID of one geometry node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    dimension: Dimension,
    srid: u32,
    geom_type: GeomType,
}

impl Header {
    /// Create a new [Header]
    ///
    /// The SRID flag of `dimension` is replaced so that it is set exactly
    /// when `srid` is non-zero, which is how the header will be encoded.
    pub fn new(geom_type: GeomType, dimension: Dimension, srid: u32) -> Self {
        Self {
            dimension: dimension.with_srid(srid != 0),
            srid,
            geom_type,
        }
    }

    /// Create a [Header] exactly as it was read from a stream
    pub(crate) fn from_wire(geom_type: GeomType, dimension: Dimension, srid: u32) -> Self {
        Self {
            dimension,
            srid,
            geom_type,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The SRID, or 0 if none was specified
    pub fn srid(&self) -> u32 {
        self.srid
    }

    pub fn geom_type(&self) -> GeomType {
        self.geom_type
    }

    /// Whether this header is written in the extended (SRID carrying) form
    pub fn is_ewkb(&self) -> bool {
        self.srid != 0
    }
}

/// A single position with 2, 3, or 4 ordinates
///
/// The meaning of the third ordinate (Z or M) is given by the
/// [Dimension] of the geometry owning the coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate(Vec<f64>);

impl Coordinate {
    /// Create a coordinate from 2 to 4 ordinates
    pub fn try_new(ordinates: Vec<f64>) -> Result<Self> {
        if !(2..=4).contains(&ordinates.len()) {
            return Err(SedonaEwkbError::Invalid(format!(
                "Expected 2 to 4 ordinates per coordinate but got {}",
                ordinates.len()
            )));
        }

        Ok(Self(ordinates))
    }

    pub(crate) fn from_ordinates(ordinates: Vec<f64>) -> Self {
        debug_assert!((2..=4).contains(&ordinates.len()));
        Self(ordinates)
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// The ordinate at position `n`, if present
    pub fn nth(&self, n: usize) -> Option<f64> {
        self.0.get(n).copied()
    }

    pub fn ordinates(&self) -> &[f64] {
        &self.0
    }

    /// Number of ordinates
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed coordinate
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare ordinates within an absolute tolerance
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(value: [f64; 2]) -> Self {
        Self(value.to_vec())
    }
}

impl From<[f64; 3]> for Coordinate {
    fn from(value: [f64; 3]) -> Self {
        Self(value.to_vec())
    }
}

impl From<[f64; 4]> for Coordinate {
    fn from(value: [f64; 4]) -> Self {
        Self(value.to_vec())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Self(vec![value.0, value.1])
    }
}

fn check_arity<'a>(
    dimension: Dimension,
    coords: impl IntoIterator<Item = &'a Coordinate>,
) -> Result<()> {
    let arity = dimension.arity();
    for coord in coords {
        if coord.len() != arity {
            return Err(SedonaEwkbError::Invalid(format!(
                "Expected {arity} ordinates for dimension {dimension} but got {}",
                coord.len()
            )));
        }
    }

    Ok(())
}

fn check_member_dimension(container: Dimension, member: &Header) -> Result<()> {
    if container.coordinate_dimensions() != member.dimension().coordinate_dimensions() {
        return Err(SedonaEwkbError::Invalid(format!(
            "{} with dimension {} cannot be a member of a geometry with dimension {container}",
            member.geom_type(),
            member.dimension()
        )));
    }

    Ok(())
}

/// POINT
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    header: Header,
    coord: Coordinate,
}

impl Point {
    pub fn try_new(dimension: Dimension, srid: u32, coord: impl Into<Coordinate>) -> Result<Self> {
        let coord = coord.into();
        check_arity(dimension, [&coord])?;
        Ok(Self {
            header: Header::new(GeomType::Point, dimension, srid),
            coord,
        })
    }

    pub(crate) fn from_parts(header: Header, coord: Coordinate) -> Self {
        Self { header, coord }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn coord(&self) -> &Coordinate {
        &self.coord
    }
}

/// LINESTRING
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    header: Header,
    coords: Vec<Coordinate>,
}

impl LineString {
    pub fn try_new(dimension: Dimension, srid: u32, coords: Vec<Coordinate>) -> Result<Self> {
        check_arity(dimension, &coords)?;
        Ok(Self {
            header: Header::new(GeomType::LineString, dimension, srid),
            coords,
        })
    }

    pub(crate) fn from_parts(header: Header, coords: Vec<Coordinate>) -> Self {
        Self { header, coords }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }
}

/// One boundary of a [Polygon]
///
/// A ring has no header: its dimension is the dimension of the polygon that
/// owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    coords: Vec<Coordinate>,
}

impl LinearRing {
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self { coords }
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }
}

/// POLYGON
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    header: Header,
    rings: Vec<LinearRing>,
}

impl Polygon {
    /// Create a polygon from its exterior ring followed by any interior rings
    pub fn try_new(dimension: Dimension, srid: u32, rings: Vec<LinearRing>) -> Result<Self> {
        check_arity(dimension, rings.iter().flat_map(|ring| ring.coords()))?;
        Ok(Self {
            header: Header::new(GeomType::Polygon, dimension, srid),
            rings,
        })
    }

    pub(crate) fn from_parts(header: Header, rings: Vec<LinearRing>) -> Self {
        Self { header, rings }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    pub fn exterior(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    pub fn interiors(&self) -> &[LinearRing] {
        self.rings.get(1..).unwrap_or_default()
    }
}

/// MULTIPOINT
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    header: Header,
    points: Vec<Point>,
}

impl MultiPoint {
    pub fn try_new(dimension: Dimension, srid: u32, points: Vec<Point>) -> Result<Self> {
        for point in &points {
            check_member_dimension(dimension, point.header())?;
        }

        Ok(Self {
            header: Header::new(GeomType::MultiPoint, dimension, srid),
            points,
        })
    }

    pub(crate) fn from_parts(header: Header, points: Vec<Point>) -> Self {
        Self { header, points }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// MULTILINESTRING
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    header: Header,
    line_strings: Vec<LineString>,
}

impl MultiLineString {
    pub fn try_new(dimension: Dimension, srid: u32, line_strings: Vec<LineString>) -> Result<Self> {
        for line_string in &line_strings {
            check_member_dimension(dimension, line_string.header())?;
        }

        Ok(Self {
            header: Header::new(GeomType::MultiLineString, dimension, srid),
            line_strings,
        })
    }

    pub(crate) fn from_parts(header: Header, line_strings: Vec<LineString>) -> Self {
        Self {
            header,
            line_strings,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }
}

/// MULTIPOLYGON
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    header: Header,
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    pub fn try_new(dimension: Dimension, srid: u32, polygons: Vec<Polygon>) -> Result<Self> {
        for polygon in &polygons {
            check_member_dimension(dimension, polygon.header())?;
        }

        Ok(Self {
            header: Header::new(GeomType::MultiPolygon, dimension, srid),
            polygons,
        })
    }

    pub(crate) fn from_parts(header: Header, polygons: Vec<Polygon>) -> Self {
        Self { header, polygons }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

/// GEOMETRYCOLLECTION
///
/// Members may be any geometry with a header, including other collections.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    header: Header,
    geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn try_new(dimension: Dimension, srid: u32, geometries: Vec<Geometry>) -> Result<Self> {
        for geometry in &geometries {
            match geometry.header() {
                Some(member) => check_member_dimension(dimension, member)?,
                None => {
                    return Err(SedonaEwkbError::Invalid(
                        "A LinearRing cannot be a member of a GEOMETRYCOLLECTION".to_string(),
                    ))
                }
            }
        }

        Ok(Self {
            header: Header::new(GeomType::GeometryCollection, dimension, srid),
            geometries,
        })
    }

    pub(crate) fn from_parts(header: Header, geometries: Vec<Geometry>) -> Self {
        Self { header, geometries }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }
}

/// Any geometry node
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// The header of this node, or `None` for a [LinearRing]
    pub fn header(&self) -> Option<&Header> {
        match self {
            Geometry::Point(point) => Some(point.header()),
            Geometry::LineString(line_string) => Some(line_string.header()),
            Geometry::LinearRing(_) => None,
            Geometry::Polygon(polygon) => Some(polygon.header()),
            Geometry::MultiPoint(multi_point) => Some(multi_point.header()),
            Geometry::MultiLineString(multi_line_string) => Some(multi_line_string.header()),
            Geometry::MultiPolygon(multi_polygon) => Some(multi_polygon.header()),
            Geometry::GeometryCollection(collection) => Some(collection.header()),
        }
    }

    /// The SRID, or 0 if none was specified
    pub fn srid(&self) -> u32 {
        self.header().map_or(0, |header| header.srid())
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.header().map(|header| header.dimension())
    }

    pub fn geom_type(&self) -> Option<GeomType> {
        self.header().map(|header| header.geom_type())
    }
}

macro_rules! impl_from_node {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }
        )*
    };
}

impl_from_node!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);
