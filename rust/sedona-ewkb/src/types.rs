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
use std::{fmt::Display, str::FromStr};

use geo_traits::Dimensions;
use serde::{Deserialize, Serialize};

use crate::error::SedonaEwkbError;

/// EWKB flag marking that an SRID follows the type field
///
/// Applies to the high 16 bits of the type field.
pub const SRID_FLAG: u16 = 0x2000;

/// EWKB flag marking a Z ordinate (high 16 bits of the type field)
pub const Z_FLAG: u16 = 0x8000;

/// EWKB flag marking an M ordinate (high 16 bits of the type field)
pub const M_FLAG: u16 = 0x4000;

/// ISO WKB offset added to the geometry type code of XYZ geometries
pub const WKB_Z_OFFSET: u16 = 1000;

/// ISO WKB offset added to the geometry type code of XYM geometries
pub const WKB_M_OFFSET: u16 = 2000;

/// ISO WKB offset added to the geometry type code of XYZM geometries
pub const WKB_ZM_OFFSET: u16 = 3000;

/// Coordinate dimensions combined with the presence of an SRID
///
/// The `*S` variants are the EWKB forms in which an SRID field follows
/// the type field. Each variant's discriminant is its bit mask in the high
/// 16 bits of the EWKB type field.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[repr(u16)]
pub enum Dimension {
    XY = 0x0000,
    XYM = 0x4000,
    XYZ = 0x8000,
    XYZM = 0xC000,
    XYS = 0x2000,
    XYMS = 0x6000,
    XYZS = 0xA000,
    XYZMS = 0xE000,
}

impl Dimension {
    /// All dimensions, plain variants first
    pub const ALL: [Dimension; 8] = [
        Self::XY,
        Self::XYM,
        Self::XYZ,
        Self::XYZM,
        Self::XYS,
        Self::XYMS,
        Self::XYZS,
        Self::XYZMS,
    ];

    /// Match the high 16 bits of an EWKB type field
    ///
    /// Returns `None` for any value that is not exactly one of the eight masks.
    pub fn from_mask(mask: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.mask() == mask)
    }

    /// The bit mask of this dimension in the high 16 bits of the type field
    pub fn mask(&self) -> u16 {
        *self as u16
    }

    pub fn has_z(&self) -> bool {
        self.mask() & Z_FLAG != 0
    }

    pub fn has_m(&self) -> bool {
        self.mask() & M_FLAG != 0
    }

    /// Whether an SRID field follows the type field
    pub fn has_srid(&self) -> bool {
        self.mask() & SRID_FLAG != 0
    }

    /// This coordinate shape with the SRID flag set or cleared
    pub fn with_srid(&self, srid: bool) -> Self {
        match (self, srid) {
            (Self::XY | Self::XYS, false) => Self::XY,
            (Self::XYM | Self::XYMS, false) => Self::XYM,
            (Self::XYZ | Self::XYZS, false) => Self::XYZ,
            (Self::XYZM | Self::XYZMS, false) => Self::XYZM,
            (Self::XY | Self::XYS, true) => Self::XYS,
            (Self::XYM | Self::XYMS, true) => Self::XYMS,
            (Self::XYZ | Self::XYZS, true) => Self::XYZS,
            (Self::XYZM | Self::XYZMS, true) => Self::XYZMS,
        }
    }

    /// Number of ordinates per coordinate
    pub fn arity(&self) -> usize {
        2 + self.has_z() as usize + self.has_m() as usize
    }

    /// The coordinate shape as [Dimensions], ignoring the SRID flag
    pub fn coordinate_dimensions(&self) -> Dimensions {
        match (self.has_z(), self.has_m()) {
            (false, false) => Dimensions::Xy,
            (true, false) => Dimensions::Xyz,
            (false, true) => Dimensions::Xym,
            (true, true) => Dimensions::Xyzm,
        }
    }

    /// Legacy ISO WKB offset for this coordinate shape (e.g., 1000 for Z)
    pub fn wkb_offset(&self) -> u16 {
        match (self.has_z(), self.has_m()) {
            (false, false) => 0,
            (true, false) => WKB_Z_OFFSET,
            (false, true) => WKB_M_OFFSET,
            (true, true) => WKB_ZM_OFFSET,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XY => "XY",
            Self::XYM => "XYM",
            Self::XYZ => "XYZ",
            Self::XYZM => "XYZM",
            Self::XYS => "XYS",
            Self::XYMS => "XYMS",
            Self::XYZS => "XYZS",
            Self::XYZMS => "XYZMS",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = SedonaEwkbError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value_upper = value.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|dim| dim.as_str() == value_upper)
            .ok_or_else(|| SedonaEwkbError::Invalid(format!("Invalid dimension string: '{value}'")))
    }
}

/// Geometry types
///
/// The discriminant is the geometry type code in the low 16 bits of the type
/// field once any ISO offset has been removed. Only [GeomType::Point] through
/// [GeomType::GeometryCollection] can be decoded or encoded; the curve and
/// surface kinds are recognized as identifiers only.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[repr(u16)]
pub enum GeomType {
    Geometry = 0,
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    CircularString = 8,
    CompoundCurve = 9,
    CurvePolygon = 10,
    MultiCurve = 11,
    MultiSurface = 12,
    Curve = 13,
    Surface = 14,
    PolyhedralSurface = 15,
    Tin = 16,
    Triangle = 17,
}

impl GeomType {
    const ALL: [GeomType; 18] = [
        Self::Geometry,
        Self::Point,
        Self::LineString,
        Self::Polygon,
        Self::MultiPoint,
        Self::MultiLineString,
        Self::MultiPolygon,
        Self::GeometryCollection,
        Self::CircularString,
        Self::CompoundCurve,
        Self::CurvePolygon,
        Self::MultiCurve,
        Self::MultiSurface,
        Self::Curve,
        Self::Surface,
        Self::PolyhedralSurface,
        Self::Tin,
        Self::Triangle,
    ];

    /// Construct a geometry type from its code (0 for Geometry...17 for Triangle)
    pub fn try_from_code(code: u16) -> Result<Self, SedonaEwkbError> {
        Self::ALL.get(code as usize).copied().ok_or_else(|| {
            SedonaEwkbError::UnsupportedGeometry(format!("unknown geometry type code {code}"))
        })
    }

    /// The geometry type code (e.g., 1 for Point)
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// The name used by WKT and PostGIS (e.g., `MULTIPOLYGON`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Geometry => "GEOMETRY",
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::GeometryCollection => "GEOMETRYCOLLECTION",
            Self::CircularString => "CIRCULARSTRING",
            Self::CompoundCurve => "COMPOUNDCURVE",
            Self::CurvePolygon => "CURVEPOLYGON",
            Self::MultiCurve => "MULTICURVE",
            Self::MultiSurface => "MULTISURFACE",
            Self::Curve => "CURVE",
            Self::Surface => "SURFACE",
            Self::PolyhedralSurface => "POLYHEDRALSURFACE",
            Self::Tin => "TIN",
            Self::Triangle => "TRIANGLE",
        }
    }
}

impl Display for GeomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeomType {
    type Err = SedonaEwkbError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value_upper = value.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|geom_type| geom_type.as_str() == value_upper)
            .ok_or_else(|| {
                SedonaEwkbError::Invalid(format!("Invalid geometry type string: '{value}'"))
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn dimension_mask_roundtrip(
        #[values(
            (Dimension::XY, 0x0000, 2, false),
            (Dimension::XYM, 0x4000, 3, false),
            (Dimension::XYZ, 0x8000, 3, false),
            (Dimension::XYZM, 0xC000, 4, false),
            (Dimension::XYS, 0x2000, 2, true),
            (Dimension::XYMS, 0x6000, 3, true),
            (Dimension::XYZS, 0xA000, 3, true),
            (Dimension::XYZMS, 0xE000, 4, true)
        )]
        dim_and_props: (Dimension, u16, usize, bool),
    ) {
        let (dim, mask, arity, has_srid) = dim_and_props;
        assert_eq!(dim.mask(), mask);
        assert_eq!(Dimension::from_mask(mask), Some(dim));
        assert_eq!(dim.arity(), arity);
        assert_eq!(dim.has_srid(), has_srid);
        assert_eq!(dim.with_srid(has_srid), dim);
        assert_eq!(dim.with_srid(true).with_srid(false).with_srid(has_srid), dim);
        assert_eq!(dim.to_string().parse::<Dimension>().unwrap(), dim);
    }

    #[test]
    fn dimension_unknown_mask() {
        assert_eq!(Dimension::from_mask(0x1234), None);
        assert_eq!(Dimension::from_mask(0x0001), None);
        assert_eq!(Dimension::from_mask(0xFFFF), None);
    }

    #[test]
    fn dimension_srid_flag() {
        assert_eq!(Dimension::XY.with_srid(true), Dimension::XYS);
        assert_eq!(Dimension::XYZ.with_srid(true), Dimension::XYZS);
        assert_eq!(Dimension::XYM.with_srid(true), Dimension::XYMS);
        assert_eq!(Dimension::XYZM.with_srid(true), Dimension::XYZMS);
        assert_eq!(Dimension::XYZMS.with_srid(false), Dimension::XYZM);
    }

    #[test]
    fn dimension_z_m() {
        assert!(Dimension::XYZS.has_z());
        assert!(!Dimension::XYZS.has_m());
        assert!(Dimension::XYMS.has_m());
        assert!(!Dimension::XYMS.has_z());
        assert!(Dimension::XYZM.has_z() && Dimension::XYZM.has_m());
    }

    #[test]
    fn dimension_coordinate_dimensions() {
        assert_eq!(Dimension::XYS.coordinate_dimensions(), Dimensions::Xy);
        assert_eq!(Dimension::XYZ.coordinate_dimensions(), Dimensions::Xyz);
        assert_eq!(Dimension::XYMS.coordinate_dimensions(), Dimensions::Xym);
        assert_eq!(Dimension::XYZMS.coordinate_dimensions(), Dimensions::Xyzm);
    }

    #[test]
    fn dimension_wkb_offset() {
        assert_eq!(Dimension::XY.wkb_offset(), 0);
        assert_eq!(Dimension::XYS.wkb_offset(), 0);
        assert_eq!(Dimension::XYZ.wkb_offset(), 1000);
        assert_eq!(Dimension::XYMS.wkb_offset(), 2000);
        assert_eq!(Dimension::XYZM.wkb_offset(), 3000);
    }

    #[test]
    fn dimension_parse() {
        assert_eq!("xyzm".parse::<Dimension>().unwrap(), Dimension::XYZM);
        let err = "XYQ".parse::<Dimension>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid dimension string: 'XYQ'");
    }

    #[rstest]
    fn geom_type_code_roundtrip(
        #[values(
            (GeomType::Geometry, 0, "GEOMETRY"),
            (GeomType::Point, 1, "POINT"),
            (GeomType::LineString, 2, "LINESTRING"),
            (GeomType::Polygon, 3, "POLYGON"),
            (GeomType::MultiPoint, 4, "MULTIPOINT"),
            (GeomType::MultiLineString, 5, "MULTILINESTRING"),
            (GeomType::MultiPolygon, 6, "MULTIPOLYGON"),
            (GeomType::GeometryCollection, 7, "GEOMETRYCOLLECTION"),
            (GeomType::CircularString, 8, "CIRCULARSTRING"),
            (GeomType::PolyhedralSurface, 15, "POLYHEDRALSURFACE"),
            (GeomType::Triangle, 17, "TRIANGLE")
        )]
        type_code_and_name: (GeomType, u16, &str),
    ) {
        let (geom_type, code, name) = type_code_and_name;
        assert_eq!(geom_type.code(), code);
        assert_eq!(GeomType::try_from_code(code).unwrap(), geom_type);
        assert_eq!(geom_type.to_string(), name);
        assert_eq!(name.parse::<GeomType>().unwrap(), geom_type);
        assert_eq!(name.to_lowercase().parse::<GeomType>().unwrap(), geom_type);
    }

    #[test]
    fn geom_type_unknown_code() {
        let err = GeomType::try_from_code(18).unwrap_err();
        assert!(matches!(err, SedonaEwkbError::UnsupportedGeometry(_)));
        assert!(GeomType::try_from_code(999).is_err());
        assert!("POLYLINE".parse::<GeomType>().is_err());
    }

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_string(&Dimension::XYZS).unwrap(),
            "\"XYZS\""
        );
        assert_eq!(
            serde_json::from_str::<GeomType>("\"MultiPolygon\"").unwrap(),
            GeomType::MultiPolygon
        );
    }
}
