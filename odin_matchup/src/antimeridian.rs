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

/// support for footprints that cross the ±180° meridian.
/// Swath rings are first "unwrapped" into a continuous longitude band (which can extend beyond ±180),
/// then cut against three reference globes and shifted back into the canonical [-180,180] range

use lazy_static::lazy_static;
use geo::{BooleanOps, Coord, LineString, MapCoords, MultiPolygon, Polygon};

use crate::geometry::{GeoCoord, polygon_from_ring};

lazy_static! {
    /// [-540,-180] x [-90,90]
    static ref WEST_SHIFTED_GLOBE: Polygon = globe( -540.0, -180.0);
    /// [-180,180] x [-90,90]
    static ref CENTRAL_GLOBE: Polygon = globe( -180.0, 180.0);
    /// [180,540] x [-90,90]
    static ref EAST_SHIFTED_GLOBE: Polygon = globe( 180.0, 540.0);
}

fn globe (west: f64, east: f64) -> Polygon {
    polygon_from_ring( vec![
        Coord{ x: west, y: 90.0 },
        Coord{ x: west, y: -90.0 },
        Coord{ x: east, y: -90.0 },
        Coord{ x: east, y: 90.0 },
    ])
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/// unwrap the longitudes of a ring in place so that consecutive vertices never differ by more than 180°.
///
/// Each jump of more than +180° between vertex i-1 and i decrements a running offset by 360°, each jump below
/// -180° increments it. The offset is applied to vertex i and all its successors. Afterwards the ring is
/// shifted by +360° if it extends below -180° but not above +180°.
/// Note that the first vertex does not participate in the min/max tracking, and that rings that extend
/// beyond both -180° and +180° (pole crossing or very wide swaths) are left as they are
pub fn normalize_ring (coords: &mut [GeoCoord]) {
    if coords.len() < 2 {
        return;
    }

    let input_lons: Vec<f64> = coords.iter().map( |c| c.x).collect();

    let mut increment = 0.0;
    let mut min_lon = f64::MAX;
    let mut max_lon = f64::MIN;

    for i in 1..coords.len() {
        let lon_diff = input_lons[i] - input_lons[i-1];
        if lon_diff > 180.0 {
            increment -= 360.0;
        } else if lon_diff < -180.0 {
            increment += 360.0;
        }

        let c = &mut coords[i];
        c.x += increment;
        if c.x < min_lon { min_lon = c.x }
        if c.x > max_lon { max_lon = c.x }
    }

    let exceeds_west = min_lon < -180.0;
    let exceeds_east = max_lon > 180.0;

    if exceeds_west && !exceeds_east {
        for c in coords.iter_mut() {
            c.x += 360.0;
        }
    }
}

/// returns a copy of the polygon with a normalized exterior ring. Interior rings are normalized independently
pub fn normalize_polygon (polygon: &Polygon) -> Polygon {
    let mut exterior: Vec<GeoCoord> = polygon.exterior().0.clone();
    normalize_ring( &mut exterior);

    let interiors: Vec<LineString> = polygon.interiors().iter().map( |ls| {
        let mut coords = ls.0.clone();
        normalize_ring( &mut coords);
        LineString::new( coords)
    }).collect();

    Polygon::new( LineString::new( exterior), interiors)
}

/// a coordinate transformation that shifts longitudes by a fixed amount.
/// This always creates a new polygon - we never shift shared geometries in place
#[derive(Debug,Clone,Copy)]
pub struct LonShifter {
    shift: f64
}

impl LonShifter {
    pub fn new (shift: f64) -> Self { LonShifter{ shift } }

    pub fn apply (&self, polygon: &Polygon) -> Polygon {
        let shift = self.shift;
        polygon.map_coords( |Coord{x,y}| Coord{ x: x + shift, y })
    }
}

/// cut a (possibly unwrapped) polygon into parts that lie within the canonical [-180,180] longitude range.
///
/// The polygon is intersected with the west shifted, central and east shifted globes. Non-empty results
/// are shifted back by ±360° where required and returned in this order (west, central, east).
/// A polygon that lies completely inside the canonical range comes back as a single part
pub fn map_to_globe (polygon: &Polygon) -> Vec<Polygon> {
    let mut parts: Vec<Polygon> = Vec::with_capacity(3);

    let west_shifted: MultiPolygon = WEST_SHIFTED_GLOBE.intersection( polygon);
    let shifter = LonShifter::new( 360.0);
    for p in &west_shifted.0 {
        parts.push( shifter.apply( p));
    }

    let central: MultiPolygon = CENTRAL_GLOBE.intersection( polygon);
    parts.extend( central.0.into_iter());

    let east_shifted: MultiPolygon = EAST_SHIFTED_GLOBE.intersection( polygon);
    let shifter = LonShifter::new( -360.0);
    for p in &east_shifted.0 {
        parts.push( shifter.apply( p));
    }

    parts.retain( |p| !p.exterior().0.is_empty());
    parts
}
