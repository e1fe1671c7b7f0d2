/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinMatchupError>;

#[derive(Error,Debug)]
pub enum OdinMatchupError {

    /// malformed WKT/WKB input
    #[error("geometry parse error {0}")]
    GeometryParseError( String ),

    /// geometry kind (or combination of kinds) the kernel adapter does not support
    #[error("unsupported geometry {0}")]
    UnsupportedGeometryError( String ),

    /// the swath footprint could not be made valid, not even by segmenting it
    #[error("invalid bounding geometry {0}")]
    InvalidBoundingGeometryError( String ),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("RON serialization error {0}")]
    RonSerError( #[from] ron::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinMatchupError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;

macro_rules! parse_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinMatchupError::GeometryParseError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use parse_error;

macro_rules! unsupported_geometry {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinMatchupError::UnsupportedGeometryError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use unsupported_geometry;

macro_rules! invalid_bounding_geometry {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinMatchupError::InvalidBoundingGeometryError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_bounding_geometry;
