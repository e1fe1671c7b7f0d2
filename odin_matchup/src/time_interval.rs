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
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, Deserialize, Serializer, Deserializer, de::Error as DeError};

use crate::errors::{OdinMatchupError, Result, op_failed};

/// closed time range [start,stop]. We expect stop >= start but do not enforce it - callers have to
/// provide ordered instants
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub struct TimeInterval {
    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    start: DateTime<Utc>,

    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    stop: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new (start: DateTime<Utc>, stop: DateTime<Utc>) -> Self {
        TimeInterval { start, stop }
    }

    pub fn from_epoch_millis (start: i64, stop: i64) -> Result<Self> {
        Ok( TimeInterval { start: from_epoch_millis(start)?, stop: from_epoch_millis(stop)? })
    }

    /// the [min,max] interval over a set of instants, None if there are none
    pub fn create (times: &[DateTime<Utc>]) -> Option<Self> {
        let start = times.iter().min()?;
        let stop = times.iter().max()?;
        Some( TimeInterval { start: *start, stop: *stop })
    }

    #[inline] pub fn start (&self) -> DateTime<Utc> { self.start }
    #[inline] pub fn stop (&self) -> DateTime<Utc> { self.stop }

    pub fn duration (&self) -> TimeDelta { self.stop - self.start }

    pub fn contains (&self, t: &DateTime<Utc>) -> bool {
        *t >= self.start && *t <= self.stop
    }

    /// the common part of both intervals, None if they are disjoint. Touching intervals intersect in one instant
    pub fn intersect (&self, other: &TimeInterval) -> Option<TimeInterval> {
        if self.start > other.stop || self.stop < other.start {
            return None
        }

        let start = if self.start > other.start { self.start } else { other.start };
        let stop = if self.stop < other.stop { self.stop } else { other.stop };
        Some( TimeInterval { start, stop })
    }

    /// widen the interval by the same amount on both sides
    pub fn expand (&self, delta: TimeDelta) -> TimeInterval {
        TimeInterval { start: self.start - delta, stop: self.stop + delta }
    }

    /// split into n contiguous sub-intervals of equal (millisecond truncated) duration. The last one
    /// ends exactly at our stop time and hence absorbs the rounding remainder
    pub fn split (&self, n: usize) -> Vec<TimeInterval> {
        if n == 0 {
            return Vec::new()
        }

        let step = TimeDelta::milliseconds( self.duration().num_milliseconds() / n as i64);
        let mut segments: Vec<TimeInterval> = Vec::with_capacity(n);
        let mut t = self.start;

        for i in 0..n {
            let stop = if i == n-1 { self.stop } else { t + step };
            segments.push( TimeInterval { start: t, stop });
            t = stop;
        }

        segments
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.start.format("%Y-%m-%dT%H:%M:%S%.3fZ"), self.stop.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

//--- epoch millis support

pub fn from_epoch_millis (millis: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or( op_failed!("invalid epoch millis {}", millis))
}

pub fn parse_datetime (s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map( |dt| dt.to_utc())
        .map_err( |e| op_failed!("invalid datetime spec '{}': {}", s, e))
}

pub fn ser_epoch_millis<S: Serializer> (dt: &DateTime<Utc>, s: S) -> std::result::Result<S::Ok, S::Error>  {
    s.serialize_i64(dt.timestamp_millis())
}

pub fn de_from_epoch_millis <'a,D>(deserializer: D) -> std::result::Result<DateTime<Utc>,D::Error> where D: Deserializer<'a> {
    let millis: i64 = i64::deserialize(deserializer)?;
    DateTime::from_timestamp_millis(millis).ok_or( DeError::custom("invalid timestamp value"))
}
