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

//! spatio-temporal matchups of satellite observations.
//!
//! An [`Observation`] consists of a footprint geometry and one [`TimeAxis`] per footprint part. The
//! intersection engine ([`get_intersecting_intervals`]) intersects the footprints of two observations and
//! maps the intersection vertices back onto both time axes, which gives us either a common acquisition
//! [`TimeInterval`] or the minimal time between both acquisitions.
//! Footprints and time axes can be created from sensor longitude/latitude grids with the
//! [`BoundingPolygonCreator`], footprints that cross the antimeridian are handled by the
//! [`antimeridian`] module.

use std::{fs, path::Path};
use serde::de::DeserializeOwned;

pub mod errors;
pub mod geometry;
pub mod antimeridian;
pub mod time_interval;
pub mod time_axis;
pub mod observation;
pub mod intersection;
pub mod bounding_polygon;
pub mod matchup;

pub use errors::{OdinMatchupError, Result};
pub use geometry::{GeoCoord, GeoPoint, Geometry, GeometryKind};
pub use time_interval::TimeInterval;
pub use time_axis::TimeAxis;
pub use observation::{NodeType, Observation, ObservationSpec};
pub use intersection::{Intersection, TimeInfo, get_intersecting_intervals, calculate_time_delta};
pub use bounding_polygon::BoundingPolygonCreator;
pub use matchup::{MatchupConfig, MatchupRecord, find_matchups, find_all_matchups, is_candidate};

/// read a RON config (or observation spec) file
pub fn load_config <C: DeserializeOwned> (path: impl AsRef<Path>) -> Result<C> {
    let contents = fs::read_to_string( path.as_ref())?;
    Ok( ron::from_str::<C>( contents.as_str())? )
}

pub fn load_observation (path: impl AsRef<Path>) -> Result<Observation> {
    let spec: ObservationSpec = load_config( path)?;
    spec.to_observation()
}

/*
 * we intercept logging/tracing macros here to have a central place where we can remove/replace them
 */

#[macro_export]
macro_rules! trace {
    ( $( $id:ident = $e:expr ),* ) => { tracing::trace!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::trace!( $( $e ),* ) }
}

#[macro_export]
macro_rules! debug {
    ( $( $id:ident = $e:expr ),* ) => { tracing::debug!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::debug!( $( $e ),* ) }
}

#[macro_export]
macro_rules! info {
    ( $( $id:ident = $e:expr ),* ) => { tracing::info!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::info!( $( $e ),* ) }
}

#[macro_export]
macro_rules! warn {
    ( $( $id:ident = $e:expr ),* ) => { tracing::warn!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::warn!( $( $e ),* ) }
}

#[macro_export]
macro_rules! error {
    ( $( $id:ident = $e:expr ),* ) => { tracing::error!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::error!( $( $e ),* ) }
}
