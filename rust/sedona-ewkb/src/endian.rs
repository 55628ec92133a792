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

//! Byte-order aware primitive reads and writes
//!
//! Every (E)WKB message starts with a single byte selecting the byte order
//! of everything that follows it. The selected [Endianness] is a plain
//! `Copy` value passed down the decode/encode call chain.

use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, BE, LE};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Marker byte for big endian (XDR) data
pub const BIG_ENDIAN_MARKER: u8 = 0x00;

/// Marker byte for little endian (NDR) data
pub const LITTLE_ENDIAN_MARKER: u8 = 0x01;

/// Byte order of an (E)WKB message or sub-message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endianness {
    /// XDR
    BigEndian,
    /// NDR
    LittleEndian,
}

impl Endianness {
    /// Interpret a byte order marker
    ///
    /// Only `0x00` selects big endian. Any other value, not just `0x01`,
    /// selects little endian.
    pub fn from_marker(marker: u8) -> Self {
        if marker == BIG_ENDIAN_MARKER {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    /// The marker byte written for this byte order
    pub fn marker(&self) -> u8 {
        match self {
            Self::BigEndian => BIG_ENDIAN_MARKER,
            Self::LittleEndian => LITTLE_ENDIAN_MARKER,
        }
    }
}

/// Consume one byte order marker
pub fn read_endianness<R: Read>(reader: &mut R) -> Result<Endianness> {
    Ok(Endianness::from_marker(reader.read_u8()?))
}

pub fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    Ok(reader.read_u8()?)
}

pub fn read_u16<R: Read>(reader: &mut R, endianness: Endianness) -> Result<u16> {
    let value = match endianness {
        Endianness::BigEndian => reader.read_u16::<BE>()?,
        Endianness::LittleEndian => reader.read_u16::<LE>()?,
    };
    Ok(value)
}

pub fn read_u32<R: Read>(reader: &mut R, endianness: Endianness) -> Result<u32> {
    let value = match endianness {
        Endianness::BigEndian => reader.read_u32::<BE>()?,
        Endianness::LittleEndian => reader.read_u32::<LE>()?,
    };
    Ok(value)
}

pub fn read_f64<R: Read>(reader: &mut R, endianness: Endianness) -> Result<f64> {
    let value = match endianness {
        Endianness::BigEndian => reader.read_f64::<BE>()?,
        Endianness::LittleEndian => reader.read_f64::<LE>()?,
    };
    Ok(value)
}

/// Write the marker byte for `endianness`
pub fn write_endianness<W: Write>(writer: &mut W, endianness: Endianness) -> Result<()> {
    write_u8(writer, endianness.marker())
}

pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> Result<()> {
    writer.write_u8(value)?;
    Ok(())
}

pub fn write_u16<W: Write>(writer: &mut W, endianness: Endianness, value: u16) -> Result<()> {
    match endianness {
        Endianness::BigEndian => writer.write_u16::<BE>(value)?,
        Endianness::LittleEndian => writer.write_u16::<LE>(value)?,
    }
    Ok(())
}

pub fn write_u32<W: Write>(writer: &mut W, endianness: Endianness, value: u32) -> Result<()> {
    match endianness {
        Endianness::BigEndian => writer.write_u32::<BE>(value)?,
        Endianness::LittleEndian => writer.write_u32::<LE>(value)?,
    }
    Ok(())
}

pub fn write_f64<W: Write>(writer: &mut W, endianness: Endianness, value: f64) -> Result<()> {
    match endianness {
        Endianness::BigEndian => writer.write_f64::<BE>(value)?,
        Endianness::LittleEndian => writer.write_f64::<LE>(value)?,
    }
    Ok(())
}
