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

//! Reading and writing geometries as WKB and PostGIS EWKB
//!
//! [decode] turns a byte stream into an owned [Geometry] tree and [encode]
//! turns such a tree back into bytes that PostGIS reads and writes unchanged.
//! Headers carrying an SRID use the EWKB bit mask form; all other headers use
//! the ISO WKB numeric offsets.
//!
//! ```
//! use sedona_ewkb::{decode_hex, encode_hex, Dimension, Geometry, WriteOptions};
//!
//! let hex = "002000000100006c343ff00000000000003ff0000000000000";
//! let geom = decode_hex(hex).unwrap();
//! assert_eq!(geom.srid(), 27700);
//! assert_eq!(geom.dimension(), Some(Dimension::XYS));
//! assert!(matches!(geom, Geometry::Point(_)));
//! assert_eq!(encode_hex(&geom, &WriteOptions::default()).unwrap(), hex);
//! ```
pub mod decoder;
pub mod encoder;
pub mod endian;
pub mod error;
pub mod geometry;
pub mod header;
pub mod types;

pub use decoder::{decode, decode_hex, decode_wkb};
pub use encoder::{encode, encode_hex, encode_to_vec, encode_with_options, WriteOptions};
pub use endian::Endianness;
pub use error::{Result, SedonaEwkbError};
pub use geometry::{
    Coordinate, Geometry, GeometryCollection, Header, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
pub use types::{Dimension, GeomType};
