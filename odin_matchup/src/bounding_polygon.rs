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

/// creates swath footprints and their time axes from the longitude/latitude grids of satellite
/// sensors. Grids are `[row,column]` arrays with rows along track (acquisition order) and columns
/// across track

use chrono::{DateTime, Utc};
use geo::{Coord, LineString, MultiPolygon, Polygon, Validation};
use ndarray::Array2;

use crate::{debug, warn};
use crate::antimeridian::{map_to_globe, normalize_ring};
use crate::errors::{OdinMatchupError, Result, op_failed, invalid_bounding_geometry};
use crate::geometry::{GeoCoord, Geometry, line_string_from_coords, polygon_from_ring};
use crate::matchup::MatchupConfig;
use crate::observation::{NodeType, Observation};
use crate::time_axis::TimeAxis;
use crate::time_interval::TimeInterval;

pub const DEFAULT_NUM_SEGMENTS: usize = 2;

/// a range of grid rows `[start,end)` that is covered by one footprint part
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct RowBand {
    pub start: usize,
    pub end: usize,
}

impl RowBand {
    pub fn len (&self) -> usize { self.end - self.start }
}

#[derive(Debug,Clone)]
pub struct BoundingPolygonCreator {
    interval_x: usize, // across track sub-sampling
    interval_y: usize, // along track sub-sampling
    num_segments: usize,
}

impl BoundingPolygonCreator {
    pub fn new (interval_x: usize, interval_y: usize) -> Result<Self> {
        if interval_x == 0 || interval_y == 0 {
            return Err( op_failed!("sub-sampling intervals have to be positive, got ({},{})", interval_x, interval_y))
        }
        Ok( BoundingPolygonCreator { interval_x, interval_y, num_segments: DEFAULT_NUM_SEGMENTS })
    }

    pub fn from_config (config: &MatchupConfig) -> Result<Self> {
        BoundingPolygonCreator::new( config.interval_x, config.interval_y)?.with_num_segments( config.num_segments)
    }

    /// number of along track bands to use if the footprint of the whole grid is not a valid polygon
    pub fn with_num_segments (mut self, num_segments: usize) -> Result<Self> {
        if num_segments == 0 {
            return Err( op_failed!("number of segments has to be positive"))
        }
        self.num_segments = num_segments;
        Ok(self)
    }

    pub fn num_segments (&self) -> usize { self.num_segments }

    /// the closed border ring of the whole grid
    pub fn create_bounding_ring (&self, lons: &Array2<f64>, lats: &Array2<f64>) -> Result<Vec<GeoCoord>> {
        let (rows, _) = check_grids( lons, lats)?;
        self.band_ring( lons, lats, RowBand { start: 0, end: rows })
    }

    /// the swath centerline over the rows of the given band, using the middle column of the grid
    pub fn create_time_axis_line (&self, lons: &Array2<f64>, lats: &Array2<f64>, row_start: usize, row_end: usize) -> Result<LineString> {
        let (rows, cols) = check_grids( lons, lats)?;
        if row_end > rows || row_start + 1 >= row_end {
            return Err( op_failed!("invalid row range [{},{}) for {} rows", row_start, row_end, rows))
        }

        let x = cols / 2;
        let last = row_end - 1;
        let mut coords: Vec<GeoCoord> = Vec::new();

        let mut y = row_start;
        while y < last {
            coords.push( Coord { x: lons[[y,x]], y: lats[[y,x]] });
            y += self.interval_y;
        }
        coords.push( Coord { x: lons[[last,x]], y: lats[[last,x]] });

        normalize_ring( &mut coords);
        line_string_from_coords( coords)
    }

    /// the footprint of the grid. This is a Polygon if the border of the whole grid is a valid polygon
    /// within [-180,180], a MultiPolygon if it has to be cut at the antimeridian, and a GeometryCollection
    /// of such geometries if the grid has to be segmented into along track bands
    pub fn create_bounding_geometry (&self, lons: &Array2<f64>, lats: &Array2<f64>) -> Result<Geometry> {
        let (geometry, _) = self.create_footprint( lons, lats)?;
        Ok(geometry)
    }

    /// create the footprint and the index aligned time axes for a grid. If the footprint is segmented the
    /// sensing interval is split into equal sub-intervals, one per segment
    pub fn create_observation (&self, name: impl ToString, lons: &Array2<f64>, lats: &Array2<f64>,
                               start: DateTime<Utc>, stop: DateTime<Utc>, node_type: NodeType) -> Result<Observation>
    {
        let (footprint, bands) = self.create_footprint( lons, lats)?;
        let intervals = TimeInterval::new( start, stop).split( bands.len());

        let mut time_axes: Vec<TimeAxis> = Vec::with_capacity( bands.len());
        for (band, interval) in bands.iter().zip( intervals.iter()) {
            let line = self.create_time_axis_line( lons, lats, band.start, band.end)?;
            time_axes.push( TimeAxis::new( line, interval.start(), interval.stop())?);
        }

        Observation::new( name, footprint, time_axes, start, stop, node_type)
    }

    /// the along track bands used for a segmented footprint. Neighboring bands share their boundary row
    pub fn segment_bands (&self, rows: usize) -> Result<Vec<RowBand>> {
        let n = self.num_segments;
        if rows < 2 || (rows - 1) < n {
            return Err( op_failed!("cannot split {} rows into {} segments", rows, n))
        }

        let height = (rows - 1) / n;
        let mut bands: Vec<RowBand> = Vec::with_capacity(n);
        for i in 0..n {
            let start = i * height;
            let end = if i == n-1 { rows } else { start + height + 1 };
            bands.push( RowBand { start, end });
        }
        Ok(bands)
    }

    fn create_footprint (&self, lons: &Array2<f64>, lats: &Array2<f64>) -> Result<(Geometry,Vec<RowBand>)> {
        let (rows, _) = check_grids( lons, lats)?;

        let whole = RowBand { start: 0, end: rows };
        if let Some(geometry) = self.band_geometry( lons, lats, whole)? {
            return Ok( (geometry, vec![whole]) )
        }

        debug!("swath footprint not valid, splitting into {} segments", self.num_segments);
        let bands = self.segment_bands( rows)?;
        let mut parts: Vec<Geometry> = Vec::with_capacity( bands.len());
        for band in &bands {
            match self.band_geometry( lons, lats, *band)? {
                Some(geometry) => parts.push( geometry),
                None => {
                    warn!("swath segment rows [{},{}) still not valid", band.start, band.end);
                    return Err( invalid_bounding_geometry!("swath segment rows [{},{}) is not a valid polygon", band.start, band.end))
                }
            }
        }

        Ok( (Geometry::GeometryCollection(parts), bands) )
    }

    /// footprint of a single band, None if its border does not form a valid polygon
    fn band_geometry (&self, lons: &Array2<f64>, lats: &Array2<f64>, band: RowBand) -> Result<Option<Geometry>> {
        let mut ring = self.band_ring( lons, lats, band)?;
        normalize_ring( &mut ring);

        let polygon = polygon_from_ring( ring);
        if !polygon.is_valid() {
            return Ok(None)
        }

        if is_canonical( &polygon) {
            Ok( Some( Geometry::Polygon(polygon)))
        } else {
            let mut parts = map_to_globe( &polygon);
            match parts.len() {
                0 => Ok(None),
                1 => Ok( Some( Geometry::Polygon( parts.remove(0)))),
                _ => Ok( Some( Geometry::MultiPolygon( MultiPolygon::new( parts))))
            }
        }
    }

    /// walk the border of the band clockwise in grid space: first row left to right, last column
    /// down, last row right to left and first column up. Each side starts at a corner
    fn band_ring (&self, lons: &Array2<f64>, lats: &Array2<f64>, band: RowBand) -> Result<Vec<GeoCoord>> {
        let (_, cols) = check_grids( lons, lats)?;
        if band.len() < 2 {
            return Err( op_failed!("swath band needs at least 2 rows"))
        }

        let max_x = cols - 1;
        let first_y = band.start;
        let last_y = band.end - 1;
        let coord = |y: usize, x: usize| Coord { x: lons[[y,x]], y: lats[[y,x]] };

        let mut ring: Vec<GeoCoord> = Vec::new();

        let mut x = 0;
        while x < max_x {
            ring.push( coord( first_y, x));
            x += self.interval_x;
        }

        let mut y = first_y;
        while y < last_y {
            ring.push( coord( y, max_x));
            y += self.interval_y;
        }

        let mut x = max_x;
        while x > 0 {
            ring.push( coord( last_y, x));
            x = x.saturating_sub( self.interval_x);
        }

        let mut y = last_y;
        while y > first_y {
            ring.push( coord( y, 0));
            y = y.saturating_sub( self.interval_y).max( first_y);
        }

        ring.push( ring[0]);
        Ok(ring)
    }
}

fn is_canonical (polygon: &Polygon) -> bool {
    polygon.exterior().0.iter().all( |c| c.x >= -180.0 && c.x <= 180.0)
}

fn check_grids (lons: &Array2<f64>, lats: &Array2<f64>) -> Result<(usize,usize)> {
    if lons.shape() != lats.shape() {
        return Err( op_failed!("longitude grid {:?} and latitude grid {:?} differ in shape", lons.shape(), lats.shape()))
    }
    let (rows, cols) = lons.dim();
    if rows < 2 || cols < 2 {
        return Err( op_failed!("grid needs at least 2 rows and columns, got {}x{}", rows, cols))
    }
    Ok( (rows, cols) )
}
