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

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::errors::{OdinMatchupError, Result, op_failed};
use crate::geometry::Geometry;
use crate::time_axis::TimeAxis;
use crate::time_interval::{TimeInterval, parse_datetime};

/// orbit direction of a polar orbiting sensor during the acquisition
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum NodeType {
    Ascending,
    Descending,
    #[default]
    Undefined,
}

/// one sensor acquisition: its footprint and the time axes that map footprint locations to
/// acquisition times. There is one time axis per footprint part (see [`Geometry::footprint_parts`]),
/// both are index aligned.
/// Observations are read-only once created and can be shared between matchup threads
#[derive(Debug,Clone)]
pub struct Observation {
    name: String,
    footprint: Geometry,
    time_axes: Vec<TimeAxis>,
    sensing: TimeInterval,
    node_type: NodeType,
}

impl Observation {
    pub fn new (name: impl ToString, footprint: Geometry, time_axes: Vec<TimeAxis>,
                start: DateTime<Utc>, stop: DateTime<Utc>, node_type: NodeType) -> Result<Self>
    {
        let n_parts = footprint.footprint_parts().len();
        if n_parts != time_axes.len() {
            return Err( op_failed!("footprint has {} parts but {} time axes were given", n_parts, time_axes.len()))
        }
        if stop < start {
            return Err( op_failed!("sensing stop {} before start {}", stop, start))
        }

        Ok( Observation { name: name.to_string(), footprint, time_axes, sensing: TimeInterval::new(start,stop), node_type })
    }

    pub fn name (&self) -> &str { self.name.as_str() }
    pub fn footprint (&self) -> &Geometry { &self.footprint }
    pub fn time_axes (&self) -> &[TimeAxis] { self.time_axes.as_slice() }
    pub fn sensing_interval (&self) -> TimeInterval { self.sensing }
    pub fn sensing_start (&self) -> DateTime<Utc> { self.sensing.start() }
    pub fn sensing_stop (&self) -> DateTime<Utc> { self.sensing.stop() }
    pub fn node_type (&self) -> NodeType { self.node_type }

    /// footprint parts paired with their time axes
    pub fn parts (&self) -> impl Iterator<Item=(&Geometry,&TimeAxis)> {
        self.footprint.footprint_parts().into_iter().zip( self.time_axes.iter())
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observation( '{}', {:?}, parts:{}, {}, {:?} )",
               self.name, self.footprint.kind(), self.time_axes.len(), self.sensing, self.node_type)
    }
}

/// the serialized (RON) description of an observation:
/// ```ron
/// ObservationSpec(
///     name: "noaa18_2024_001_1200",
///     footprint: "POLYGON((0 0,1 0,1 2,0 2,0 0))",
///     time_axes: ["LINESTRING(0.5 0,0.5 2)"],
///     start: "2024-01-01T12:00:00Z",
///     stop: "2024-01-01T13:00:00Z",
///     node_type: Ascending,
/// )
/// ```
/// If the footprint is a collection of N parts the sensing interval is split into N sub intervals
/// of equal length, one for each time axis
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ObservationSpec {
    pub name: String,
    pub footprint: String,
    pub time_axes: Vec<String>,
    pub start: String,
    pub stop: String,
    #[serde(default)]
    pub node_type: NodeType,
}

impl ObservationSpec {
    pub fn to_observation (&self) -> Result<Observation> {
        let footprint = Geometry::parse_wkt( &self.footprint)?;
        let start = parse_datetime( &self.start)?;
        let stop = parse_datetime( &self.stop)?;

        let intervals = TimeInterval::new( start, stop).split( self.time_axes.len());

        let mut time_axes: Vec<TimeAxis> = Vec::with_capacity( self.time_axes.len());
        for (wkt, interval) in self.time_axes.iter().zip( intervals.iter()) {
            let line = Geometry::parse_wkt( wkt)?;
            time_axes.push( TimeAxis::from_geometry( &line, interval.start(), interval.stop())?);
        }

        Observation::new( &self.name, footprint, time_axes, start, stop, self.node_type)
    }
}
