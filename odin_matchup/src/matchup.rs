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

use std::time::Duration;
use chrono::TimeDelta;
use parse_duration::parse;
use rayon::prelude::*;
use serde::{Serialize, Serializer, Deserialize, Deserializer};

use crate::{debug, info};
use crate::errors::{OdinMatchupError, Result, op_failed};
use crate::intersection::{Intersection, get_intersecting_intervals};
use crate::observation::Observation;
use crate::time_interval::TimeInterval;

/* #region config *************************************************************************************************/

/// matchup run configuration, normally read from a RON file such as
/// ```ron
/// MatchupConfig(
///     max_time_delta: "5m",
///     interval_x: 8,
///     interval_y: 8,
///     num_segments: 2,
/// )
/// ```
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct MatchupConfig {
    /// maximum time between both acquisitions of a matchup area
    #[serde(serialize_with="serialize_duration", deserialize_with="deserialize_duration")]
    pub max_time_delta: Duration,

    /// bounding polygon sub-sampling
    pub interval_x: usize,
    pub interval_y: usize,

    /// along track segments for footprints that are not valid as a whole
    pub num_segments: usize,
}

impl Default for MatchupConfig {
    fn default() -> Self {
        MatchupConfig {
            max_time_delta: Duration::from_secs(300),
            interval_x: 8,
            interval_y: 8,
            num_segments: 2,
        }
    }
}

impl MatchupConfig {
    pub fn max_time_delta_millis (&self) -> Result<i64> {
        i64::try_from( self.max_time_delta.as_millis())
            .map_err( |e| op_failed!("max_time_delta out of range: {}", e))
    }

    /// the sensing interval of the observation widened by our max_time_delta on both sides
    pub fn search_interval (&self, obs: &Observation) -> Result<TimeInterval> {
        let delta = TimeDelta::from_std( self.max_time_delta)
            .map_err( |e| op_failed!("max_time_delta out of range: {}", e))?;
        Ok( obs.sensing_interval().expand( delta))
    }
}

fn deserialize_duration <'a,D>(deserializer: D) -> std::result::Result<Duration,D::Error> where D: Deserializer<'a> {
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str()).map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> std::result::Result<S::Ok, S::Error>  {
    s.serialize_str( &format!("{}s", dur.as_secs_f64()))
}

/* #endregion config */

/* #region records ************************************************************************************************/

/// the persistent form of an intersection. Geometries are stored as WKT, the time delta is only set
/// if there is no temporal overlap
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct MatchupRecord {
    pub primary_name: String,
    pub secondary_name: String,
    pub primary_geometry: String,
    pub secondary_geometry: String,
    pub intersection_geometry: String,
    pub overlap: Option<TimeInterval>,
    pub minimal_time_delta_ms: Option<i64>,
}

impl MatchupRecord {
    pub fn from_intersection (primary: &Observation, secondary: &Observation, intersection: &Intersection) -> Result<Self> {
        let time_info = &intersection.time_info;
        let minimal_time_delta_ms = if time_info.has_overlap() { None } else { Some(time_info.minimal_time_delta) };

        Ok( MatchupRecord {
            primary_name: primary.name().to_string(),
            secondary_name: secondary.name().to_string(),
            primary_geometry: intersection.primary_geometry.to_wkt()?,
            secondary_geometry: intersection.secondary_geometry.to_wkt()?,
            intersection_geometry: intersection.geometry.to_wkt()?,
            overlap: time_info.overlap_interval,
            minimal_time_delta_ms,
        })
    }

    pub fn to_ron (&self) -> Result<String> {
        Ok( ron::ser::to_string_pretty( self, ron::ser::PrettyConfig::default())? )
    }

    pub fn to_json (&self) -> Result<String> {
        Ok( serde_json::to_string_pretty( self)? )
    }
}

/* #endregion records */

/* #region screening **********************************************************************************************/

/// true if the secondary was acquired within the search interval of the primary
pub fn is_candidate (primary: &Observation, secondary: &Observation, config: &MatchupConfig) -> Result<bool> {
    let search_interval = config.search_interval( primary)?;
    Ok( search_interval.intersect( &secondary.sensing_interval()).is_some() )
}

/// the matchups of a single observation pair. Intersections without temporal overlap are only kept
/// if their time delta is below the configured maximum
pub fn find_matchups (primary: &Observation, secondary: &Observation, config: &MatchupConfig) -> Result<Vec<MatchupRecord>> {
    if !is_candidate( primary, secondary, config)? {
        debug!("'{}' not within time range of '{}'", secondary.name(), primary.name());
        return Ok( Vec::new())
    }

    let max_delta = config.max_time_delta_millis()?;
    let mut records: Vec<MatchupRecord> = Vec::new();

    for intersection in get_intersecting_intervals( primary, secondary)? {
        if intersection.time_info.minimal_time_delta < max_delta {
            records.push( MatchupRecord::from_intersection( primary, secondary, &intersection)?);
        } else {
            debug!("rejecting {} of '{}' and '{}'", intersection, primary.name(), secondary.name());
        }
    }

    Ok(records)
}

/// the matchups of all primary/secondary combinations, computed in parallel. The result is ordered by
/// primary and then secondary index, i.e. it does not depend on thread scheduling
pub fn find_all_matchups (primaries: &[Observation], secondaries: &[Observation], config: &MatchupConfig) -> Result<Vec<MatchupRecord>> {
    let pairs: Vec<(&Observation,&Observation)> = primaries.iter()
        .flat_map( |p| secondaries.iter().map( move |s| (p,s)))
        .collect();

    let results: Vec<Result<Vec<MatchupRecord>>> = pairs.par_iter()
        .map( |(p,s)| find_matchups( p, s, config))
        .collect();

    let mut records: Vec<MatchupRecord> = Vec::new();
    for res in results {
        records.extend( res?);
    }

    info!("found {} matchups for {} primaries and {} secondaries", records.len(), primaries.len(), secondaries.len());
    Ok(records)
}

/* #endregion screening */
