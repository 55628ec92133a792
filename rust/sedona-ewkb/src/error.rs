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
use std::io;

use thiserror::Error;

/// Errors raised while decoding or encoding (E)WKB
#[derive(Error, Debug)]
pub enum SedonaEwkbError {
    #[error("{0}")]
    IO(io::Error),
    #[error("Unknown EWKB dimension type: {0:X}")]
    UnknownDimension(u16),
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("No geometry specified")]
    NoGeometry,
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    External(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = SedonaEwkbError> = std::result::Result<T, E>;

impl From<io::Error> for SedonaEwkbError {
    fn from(value: io::Error) -> Self {
        SedonaEwkbError::IO(value)
    }
}

impl From<hex::FromHexError> for SedonaEwkbError {
    fn from(value: hex::FromHexError) -> Self {
        SedonaEwkbError::External(Box::new(value))
    }
}
