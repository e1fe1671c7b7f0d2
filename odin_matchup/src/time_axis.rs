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
use geo::{Coord, Distance, Euclidean, Length, LineLocatePoint, LineString, MapCoords, Point};

use crate::errors::{OdinMatchupError, Result, op_failed, unsupported_geometry};
use crate::geometry::{GeoCoord, GeoPoint, Geometry};
use crate::time_interval::TimeInterval;

/// the location of a point projected onto one of the axis segments
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SegmentProjection {
    pub segment: usize,  // index of the segment start vertex
    pub factor: f64,     // 0..1 along the segment
    pub coord: GeoCoord, // the projected point
}

/// a swath centerline with acquisition start and end time.
/// Time is assumed to progress linearly with the arc length of the centerline, i.e. the time for
/// a point is obtained by projecting it onto the line and interpolating between start and end.
///
/// Centerlines of swaths that cross the antimeridian keep their unwrapped longitudes (e.g. 170..190)
/// whereas footprints and query points are in [-180,180]. Lookups are therefore longitude periodic:
/// a point is also tried with its longitude moved by 360 degrees into the unwrapped range of the line.
/// Time axes are immutable once created and can be shared between threads
#[derive(Debug,Clone)]
pub struct TimeAxis {
    line: LineString,
    start: DateTime<Utc>,
    end: DateTime<Utc>,

    elapsed_millis: i64,
    axis_length: f64,
    inverse_axis_length: f64,
    vertex_offsets: Vec<f64>, // arc length of each vertex, this is our length index
    lon_shifts: Vec<f64>,     // longitude shifts that move [-180,180] points into the range of the line
}

impl TimeAxis {
    pub fn new (line: LineString, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if line.0.len() < 2 {
            return Err( op_failed!("time axis needs at least 2 points, got {}", line.0.len()))
        }
        if end < start {
            return Err( op_failed!("time axis end {} before start {}", end, start))
        }

        let axis_length = Euclidean.length( &line);
        if axis_length <= 0.0 {
            return Err( op_failed!("time axis line has zero length"))
        }

        let mut vertex_offsets: Vec<f64> = Vec::with_capacity( line.0.len());
        let mut len = 0.0;
        vertex_offsets.push( len);
        for l in line.lines() {
            len += Euclidean.length( &l);
            vertex_offsets.push( len);
        }

        let mut lon_shifts = vec![0.0];
        if line.0.iter().any( |c| c.x > 180.0) { lon_shifts.push( 360.0) }
        if line.0.iter().any( |c| c.x < -180.0) { lon_shifts.push( -360.0) }

        let elapsed_millis = (end - start).num_milliseconds();
        let inverse_axis_length = 1.0 / axis_length;

        Ok( TimeAxis { line, start, end, elapsed_millis, axis_length, inverse_axis_length, vertex_offsets, lon_shifts })
    }

    pub fn from_geometry (geometry: &Geometry, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        match geometry {
            Geometry::LineString(ls) => TimeAxis::new( ls.clone(), start, end),
            _ => Err( unsupported_geometry!("time axis from {:?}", geometry.kind()))
        }
    }

    #[inline] pub fn line (&self) -> &LineString { &self.line }
    #[inline] pub fn start (&self) -> DateTime<Utc> { self.start }
    #[inline] pub fn end (&self) -> DateTime<Utc> { self.end }
    #[inline] pub fn axis_length (&self) -> f64 { self.axis_length }

    pub fn time_interval (&self) -> TimeInterval { TimeInterval::new( self.start, self.end) }

    /// acquisition time for a point, None if the point does not project onto any axis segment
    pub fn get_time (&self, point: &GeoPoint) -> Option<DateTime<Utc>> {
        let projection = self.locate( &point.coord())?;
        let offset = self.arc_offset( &projection);
        Some( self.time_at( offset))
    }

    /// the time interval during which the axis is inside the polygon, None if the axis does not intersect it
    pub fn get_intersection_time (&self, polygon: &Geometry) -> Result<Option<TimeInterval>> {
        let mut min_offset = f64::MAX;
        let mut max_offset = f64::MIN;

        for shift in &self.lon_shifts {
            let line = if *shift == 0.0 {
                self.line.clone()
            } else {
                self.line.map_coords( |c| Coord { x: c.x - shift, y: c.y })
            };

            let clipped = polygon.intersection( &Geometry::LineString( line))?;
            for part in clipped.sub_geometries() {
                if let Geometry::LineString(ls) = part {
                    for c in [ls.0.first(), ls.0.last()].into_iter().flatten() {
                        let offset = self.index_of( &Coord { x: c.x + shift, y: c.y });
                        if offset < min_offset { min_offset = offset }
                        if offset > max_offset { max_offset = offset }
                    }
                }
            }
        }
        if min_offset > max_offset {
            return Ok(None)
        }

        let offset_millis = self.millis_for( min_offset);
        let duration_millis = self.millis_for( max_offset - min_offset);

        let t_start = self.start + TimeDelta::milliseconds( offset_millis);
        Ok( Some( TimeInterval::new( t_start, t_start + TimeDelta::milliseconds( duration_millis))))
    }

    /// the time interval that corresponds to the projection of a foreign line (e.g. a polygon side) onto
    /// this axis. Only the end points of the line are projected. End points that do not have a valid
    /// segment projection are mapped to the closest point of the axis
    pub fn get_projection_time (&self, other: &LineString) -> Result<TimeInterval> {
        let (first, last) = match (other.0.first(), other.0.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err( op_failed!("cannot project empty line string"))
        };

        let start_offset = self.projection_offset( first);
        let end_offset = self.projection_offset( last);

        let (low, high) = if start_offset > end_offset { (end_offset, start_offset) } else { (start_offset, end_offset) };

        let t_start = self.time_at( low);
        let t_end = self.time_at( high);
        Ok( TimeInterval::new( t_start, t_end))
    }

    /// project onto the first segment (in axis order) that yields a projection factor within [0,1].
    /// Note this is a linear scan and not a closest point search - if a point projects onto several
    /// segments the first one wins. The coordinate has to be in the longitude range of the line
    pub fn find_projection (&self, c: &GeoCoord) -> Option<SegmentProjection> {
        for (segment, l) in self.line.lines().enumerate() {
            if let Some(factor) = projection_factor( &l.start, &l.end, c) {
                if (0.0..=1.0).contains( &factor) {
                    let coord = Coord {
                        x: l.start.x + factor * (l.end.x - l.start.x),
                        y: l.start.y + factor * (l.end.y - l.start.y),
                    };
                    return Some( SegmentProjection { segment, factor, coord })
                }
            }
        }
        None
    }

    /// arc length offset of the axis location closest to the given coordinate.
    /// The coordinate has to be in the longitude range of the line
    pub fn index_of (&self, c: &GeoCoord) -> f64 {
        self.line.line_locate_point( &Point::from(*c))
            .map( |fraction| fraction * self.axis_length)
            .unwrap_or(0.0)
    }

    /// the segment projection of a [-180,180] coordinate over all longitude shifts of this axis.
    /// If several shifts project, the one closest to its projected point wins
    fn locate (&self, c: &GeoCoord) -> Option<SegmentProjection> {
        let mut best: Option<(f64,SegmentProjection)> = None;

        for shift in &self.lon_shifts {
            let shifted = Coord { x: c.x + shift, y: c.y };
            if let Some(projection) = self.find_projection( &shifted) {
                let dist = Euclidean.distance( shifted, projection.coord);
                if best.map_or( true, |(d,_)| dist < d) {
                    best = Some( (dist, projection));
                }
            }
        }
        best.map( |(_,projection)| projection)
    }

    /// the arc length offset of the axis location closest to a [-180,180] coordinate over all longitude shifts
    fn nearest_offset (&self, c: &GeoCoord) -> f64 {
        let mut best: Option<(f64,f64)> = None;

        for shift in &self.lon_shifts {
            let shifted = Coord { x: c.x + shift, y: c.y };
            let dist = Euclidean.distance( &Point::from(shifted), &self.line);
            if best.map_or( true, |(d,_)| dist < d) {
                best = Some( (dist, self.index_of( &shifted)));
            }
        }
        best.map_or( 0.0, |(_,offset)| offset)
    }

    #[inline]
    fn arc_offset (&self, projection: &SegmentProjection) -> f64 {
        let seg_start = self.vertex_offsets[projection.segment];
        let seg_len = self.vertex_offsets[projection.segment + 1] - seg_start;
        seg_start + projection.factor * seg_len
    }

    fn projection_offset (&self, c: &GeoCoord) -> f64 {
        match self.locate( c) {
            Some(projection) => self.arc_offset( &projection),
            None => self.nearest_offset( c)
        }
    }

    /// fraction of elapsed time for an arc length, truncated to millis
    #[inline]
    fn millis_for (&self, arc_length: f64) -> i64 {
        let relative = arc_length * self.inverse_axis_length;
        (self.elapsed_millis as f64 * relative) as i64
    }

    #[inline]
    fn time_at (&self, arc_length: f64) -> DateTime<Utc> {
        self.start + TimeDelta::milliseconds( self.millis_for( arc_length))
    }
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeAxis( n_points:{}, length:{:.4}, {} )", self.line.0.len(), self.axis_length, self.time_interval())
    }
}

/// the position of the orthogonal projection of c onto the (infinite) line through a and b, relative
/// to the segment a->b. None for degenerate segments
#[inline]
pub fn projection_factor (a: &GeoCoord, b: &GeoCoord, c: &GeoCoord) -> Option<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx*dx + dy*dy;
    if len2 == 0.0 {
        None
    } else {
        Some( ((c.x - a.x) * dx + (c.y - a.y) * dy) / len2)
    }
}
