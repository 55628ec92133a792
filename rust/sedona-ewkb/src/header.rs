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
use std::io::{Read, Write};

use crate::endian::{read_u32, write_endianness, write_u32, Endianness};
use crate::error::{Result, SedonaEwkbError};
use crate::geometry::Header;
use crate::types::{Dimension, GeomType, WKB_M_OFFSET, WKB_ZM_OFFSET, WKB_Z_OFFSET};

/// Dimension, SRID, and geometry type code of a type field as read
///
/// The code has any ISO offset removed but has not been checked against
/// the known geometry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeField {
    pub dimension: Dimension,
    pub srid: u32,
    pub code: u16,
}

/// Read the type field (and SRID, if flagged) following a byte order marker
///
/// The high 16 bits of the type field must be one of the eight EWKB dimension
/// masks. Plain WKB always has zero there, which reads as [Dimension::XY].
/// ISO WKB instead encodes Z, M, and ZM by adding 1000, 2000, or 3000 to the
/// geometry type code; when such an offset is present it overrides the
/// dimension taken from the mask.
pub fn read_type_field<R: Read>(reader: &mut R, endianness: Endianness) -> Result<TypeField> {
    let raw = read_u32(reader, endianness)?;
    let mask = (raw >> 16) as u16;
    let mut code = (raw & 0xFFFF) as u16;

    let mut dimension =
        Dimension::from_mask(mask).ok_or(SedonaEwkbError::UnknownDimension(mask))?;

    let srid = if dimension.has_srid() {
        read_u32(reader, endianness)?
    } else {
        0
    };

    if let Some((iso_dimension, offset)) = iso_dimension(code) {
        log::debug!("ISO WKB type code {code} read as {iso_dimension} (mask was {dimension})");
        dimension = iso_dimension;
        code -= offset;
    }

    log::trace!("Read type field: code={code} dimension={dimension} srid={srid} ({endianness:?})");
    Ok(TypeField {
        dimension,
        srid,
        code,
    })
}

/// Read a type field whose geometry type code must be a known [GeomType]
pub fn read_header<R: Read>(reader: &mut R, endianness: Endianness) -> Result<Header> {
    let field = read_type_field(reader, endianness)?;
    let geom_type = GeomType::try_from_code(field.code)?;
    Ok(Header::from_wire(geom_type, field.dimension, field.srid))
}

fn iso_dimension(code: u16) -> Option<(Dimension, u16)> {
    if code >= WKB_ZM_OFFSET {
        Some((Dimension::XYZM, WKB_ZM_OFFSET))
    } else if code >= WKB_M_OFFSET {
        Some((Dimension::XYM, WKB_M_OFFSET))
    } else if code >= WKB_Z_OFFSET {
        Some((Dimension::XYZ, WKB_Z_OFFSET))
    } else {
        None
    }
}

/// The 32-bit type field written for `header`
///
/// Headers with an SRID use the EWKB form (dimension mask with the SRID flag
/// in the high 16 bits). Headers without one use the ISO offsets, which every
/// WKB reader understands.
pub fn type_field(header: &Header) -> u32 {
    let code = header.geom_type().code() as u32;
    if header.srid() != 0 {
        let mask = header.dimension().with_srid(true).mask() as u32;
        (mask << 16) | code
    } else {
        code + header.dimension().wkb_offset() as u32
    }
}

/// Write the byte order marker, type field, and SRID (if non-zero)
pub fn write_header<W: Write>(
    writer: &mut W,
    header: &Header,
    endianness: Endianness,
) -> Result<()> {
    write_endianness(writer, endianness)?;
    write_u32(writer, endianness, type_field(header))?;
    if header.srid() != 0 {
        write_u32(writer, endianness, header.srid())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn read_be(buf: &[u8]) -> (Result<Header>, u64) {
        let mut reader = Cursor::new(buf);
        let header = read_header(&mut reader, Endianness::BigEndian);
        (header, reader.position())
    }

    #[rstest]
    fn dimension_mask_table(
        #[values(
            (0x0000, Dimension::XY),
            (0x4000, Dimension::XYM),
            (0x8000, Dimension::XYZ),
            (0xC000, Dimension::XYZM),
            (0x2000, Dimension::XYS),
            (0x6000, Dimension::XYMS),
            (0xA000, Dimension::XYZS),
            (0xE000, Dimension::XYZMS)
        )]
        mask_and_dimension: (u16, Dimension),
    ) {
        let (mask, expected) = mask_and_dimension;
        let mut buf = vec![];
        buf.extend_from_slice(&mask.to_be_bytes());
        buf.extend_from_slice(&0x0003u16.to_be_bytes());
        buf.extend_from_slice(&27700u32.to_be_bytes());

        let (header, position) = read_be(&buf);
        let header = header.unwrap();
        assert_eq!(header.dimension(), expected);
        assert_eq!(header.geom_type(), GeomType::Polygon);

        if expected.has_srid() {
            assert_eq!(header.srid(), 27700);
            assert_eq!(position, 8);
        } else {
            assert_eq!(header.srid(), 0);
            assert_eq!(position, 4);
        }
    }

    #[rstest]
    fn iso_offsets(
        #[values(
            (1, GeomType::Point),
            (2, GeomType::LineString),
            (3, GeomType::Polygon),
            (7, GeomType::GeometryCollection),
            (17, GeomType::Triangle)
        )]
        code_and_type: (u16, GeomType),
        #[values(
            (0, Dimension::XY),
            (1000, Dimension::XYZ),
            (2000, Dimension::XYM),
            (3000, Dimension::XYZM)
        )]
        offset_and_dimension: (u16, Dimension),
    ) {
        let (code, geom_type) = code_and_type;
        let (offset, dimension) = offset_and_dimension;
        let raw = (code + offset) as u32;

        let (header, position) = read_be(&raw.to_be_bytes());
        let header = header.unwrap();
        assert_eq!(header.geom_type(), geom_type);
        assert_eq!(header.dimension(), dimension);
        assert_eq!(header.srid(), 0);
        assert_eq!(position, 4);
    }

    #[test]
    fn iso_offset_overrides_mask() {
        // EWKB XYS mask with an ISO Z code: the SRID is still read, but the
        // dimension comes from the offset
        let buf = [0x20, 0x00, 0x03, 0xe9, 0x00, 0x00, 0x10, 0xe6];
        let (header, position) = read_be(&buf);
        let header = header.unwrap();
        assert_eq!(header.dimension(), Dimension::XYZ);
        assert_eq!(header.geom_type(), GeomType::Point);
        assert_eq!(header.srid(), 4326);
        assert_eq!(position, 8);
    }

    #[test]
    fn little_endian() {
        // POINT with SRID 27700
        let buf = [0x01, 0x00, 0x00, 0x20, 0x34, 0x6c, 0x00, 0x00];
        let mut reader = Cursor::new(&buf[..]);
        let header = read_header(&mut reader, Endianness::LittleEndian).unwrap();
        assert_eq!(header.dimension(), Dimension::XYS);
        assert_eq!(header.srid(), 27700);
        assert_eq!(header.geom_type(), GeomType::Point);
    }

    #[test]
    fn unknown_dimension() {
        let (header, _) = read_be(&[0x12, 0x34, 0x00, 0x01]);
        match header.unwrap_err() {
            SedonaEwkbError::UnknownDimension(mask) => assert_eq!(mask, 0x1234),
            other => panic!("Expected UnknownDimension but got {other:?}"),
        }
    }

    #[test]
    fn unknown_geometry_type() {
        let (header, _) = read_be(&[0x00, 0x00, 0x00, 0x12]);
        assert!(matches!(
            header.unwrap_err(),
            SedonaEwkbError::UnsupportedGeometry(_)
        ));

        // 4001 is past every ISO offset
        let (header, _) = read_be(&4001u32.to_be_bytes());
        assert!(matches!(
            header.unwrap_err(),
            SedonaEwkbError::UnsupportedGeometry(_)
        ));
    }

    #[test]
    fn unknown_code_in_type_field() {
        // Codes are only checked by read_header
        let field = read_type_field(&mut Cursor::new(99u32.to_be_bytes()), Endianness::BigEndian)
            .unwrap();
        assert_eq!(field.code, 99);
        assert_eq!(field.dimension, Dimension::XY);

        let field =
            read_type_field(&mut Cursor::new(3999u32.to_be_bytes()), Endianness::BigEndian)
                .unwrap();
        assert_eq!(field.code, 999);
        assert_eq!(field.dimension, Dimension::XYZM);
    }

    #[test]
    fn truncated() {
        let (header, _) = read_be(&[0x00, 0x00]);
        assert!(matches!(header.unwrap_err(), SedonaEwkbError::IO(_)));

        // SRID flagged but missing
        let (header, _) = read_be(&[0x20, 0x00, 0x00, 0x01]);
        assert!(matches!(header.unwrap_err(), SedonaEwkbError::IO(_)));
    }

    #[rstest]
    fn type_fields(
        #[values(
            (Dimension::XY, 0, 0x0000_0001),
            (Dimension::XYZ, 0, 1001),
            (Dimension::XYM, 0, 2001),
            (Dimension::XYZM, 0, 3001),
            (Dimension::XY, 27700, 0x2000_0001),
            (Dimension::XYZ, 27700, 0xA000_0001),
            (Dimension::XYM, 27700, 0x6000_0001),
            (Dimension::XYZM, 27700, 0xE000_0001)
        )]
        dimension_srid_field: (Dimension, u32, u32),
    ) {
        let (dimension, srid, expected) = dimension_srid_field;
        let header = Header::new(GeomType::Point, dimension, srid);
        assert_eq!(type_field(&header), expected);

        // Headers decoded with an S dimension but no SRID still write plain WKB
        let wire = Header::from_wire(GeomType::Point, dimension.with_srid(true), srid);
        assert_eq!(type_field(&wire), expected);
    }

    #[test]
    fn write_srid_gating() {
        let mut buf = vec![];
        let header = Header::new(GeomType::LineString, Dimension::XY, 0);
        write_header(&mut buf, &header, Endianness::BigEndian).unwrap();
        assert_eq!(buf, vec![0x00, 0x00, 0x00, 0x00, 0x02]);

        let mut buf = vec![];
        let header = Header::new(GeomType::LineString, Dimension::XY, 27700);
        write_header(&mut buf, &header, Endianness::BigEndian).unwrap();
        assert_eq!(buf, vec![0x00, 0x20, 0x00, 0x00, 0x02, 0x00, 0x00, 0x6c, 0x34]);

        let mut buf = vec![];
        write_header(&mut buf, &header, Endianness::LittleEndian).unwrap();
        assert_eq!(buf, vec![0x01, 0x02, 0x00, 0x00, 0x20, 0x34, 0x6c, 0x00, 0x00]);
    }

    #[rstest]
    fn header_roundtrip(
        #[values(Endianness::BigEndian, Endianness::LittleEndian)] endianness: Endianness,
        #[values(Dimension::XY, Dimension::XYZ, Dimension::XYM, Dimension::XYZM)]
        dimension: Dimension,
        #[values(0, 4326)] srid: u32,
    ) {
        let header = Header::new(GeomType::MultiPolygon, dimension, srid);
        let mut buf = vec![];
        write_header(&mut buf, &header, endianness).unwrap();

        let mut reader = Cursor::new(buf);
        assert_eq!(
            crate::endian::read_endianness(&mut reader).unwrap(),
            endianness
        );
        assert_eq!(read_header(&mut reader, endianness).unwrap(), header);
    }
}
