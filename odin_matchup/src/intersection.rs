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

/// the spatio-temporal intersection engine.
/// For two observations we intersect each footprint part of the primary with each footprint part of
/// the secondary, sample the acquisition times of the intersection vertices on both time axes and then
/// either report the common time interval or - if there is none - the minimal time between both
/// acquisitions of the intersection area.
/// The engine has no state, it can be called concurrently for any number of observation pairs

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::{debug, trace};
use crate::errors::Result;
use crate::geometry::Geometry;
use crate::observation::Observation;
use crate::time_axis::TimeAxis;
use crate::time_interval::TimeInterval;

/// temporal relation of the two acquisitions over an intersection area
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct TimeInfo {
    /// None if both sensors did not observe the area at overlapping times
    pub overlap_interval: Option<TimeInterval>,

    /// milliseconds between both acquisitions, 0 if there is an overlap
    pub minimal_time_delta: i64,
}

impl TimeInfo {
    pub fn overlap (interval: TimeInterval) -> Self {
        TimeInfo { overlap_interval: Some(interval), minimal_time_delta: 0 }
    }

    pub fn delta (millis: i64) -> Self {
        TimeInfo { overlap_interval: None, minimal_time_delta: millis }
    }

    pub fn has_overlap (&self) -> bool { self.overlap_interval.is_some() }
}

#[derive(Debug,Clone)]
pub struct Intersection {
    pub primary_geometry: Geometry,
    pub secondary_geometry: Geometry,
    pub geometry: Geometry,
    pub time_info: TimeInfo,
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.time_info.overlap_interval {
            Some(interval) => write!(f, "Intersection( {:?}, overlap: {} )", self.geometry.kind(), interval),
            None => write!(f, "Intersection( {:?}, dt: {}ms )", self.geometry.kind(), self.time_info.minimal_time_delta)
        }
    }
}

/// compute all intersections between the footprint parts of two observations.
/// Part pairs that do not intersect spatially, or for which no acquisition time could be computed on
/// either side, do not produce an entry. Errors are only reported for geometry kinds the kernel cannot
/// intersect
pub fn get_intersecting_intervals (primary: &Observation, secondary: &Observation) -> Result<Vec<Intersection>> {
    let mut intersections: Vec<Intersection> = Vec::new();

    for (i, (primary_geometry, primary_axis)) in primary.parts().enumerate() {
        for (j, (secondary_geometry, secondary_axis)) in secondary.parts().enumerate() {
            let geometry = primary_geometry.intersection( secondary_geometry)?;
            if geometry.is_empty() {
                trace!("no spatial intersection between '{}'[{}] and '{}'[{}]", primary.name(), i, secondary.name(), j);
                continue;
            }

            let Some(time_info) = get_time_info( &geometry, primary_axis, secondary_axis) else {
                debug!("no acquisition times for intersection of '{}'[{}] and '{}'[{}]", primary.name(), i, secondary.name(), j);
                continue;
            };

            intersections.push( Intersection {
                primary_geometry: primary_geometry.clone(),
                secondary_geometry: secondary_geometry.clone(),
                geometry,
                time_info,
            });
        }
    }

    Ok(intersections)
}

fn get_time_info (geometry: &Geometry, primary_axis: &TimeAxis, secondary_axis: &TimeAxis) -> Option<TimeInfo> {
    let mut coordinates = geometry.coordinates();
    coordinates.pop(); // closing vertex

    let mut primary_times: Vec<DateTime<Utc>> = Vec::with_capacity( coordinates.len());
    let mut secondary_times: Vec<DateTime<Utc>> = Vec::with_capacity( coordinates.len());

    for p in &coordinates {
        if let Some(t) = primary_axis.get_time( p) { primary_times.push(t) }
        if let Some(t) = secondary_axis.get_time( p) { secondary_times.push(t) }
    }

    let primary_interval = TimeInterval::create( &primary_times)?;
    let secondary_interval = TimeInterval::create( &secondary_times)?;

    let time_info = match primary_interval.intersect( &secondary_interval) {
        Some(overlap) => TimeInfo::overlap( overlap),
        None => TimeInfo::delta( calculate_time_delta( &primary_interval, &secondary_interval))
    };
    Some(time_info)
}

/// milliseconds between the end of the earlier and the start of the later interval.
/// The earlier interval is the one that starts first (the first argument on ties), hence the result is
/// only guaranteed to be non-negative for disjoint intervals
pub fn calculate_time_delta (interval_1: &TimeInterval, interval_2: &TimeInterval) -> i64 {
    let (earlier, later) = if interval_2.start() < interval_1.start() {
        (interval_2, interval_1)
    } else {
        (interval_1, interval_2)
    };

    (later.start() - earlier.stop()).num_milliseconds()
}
