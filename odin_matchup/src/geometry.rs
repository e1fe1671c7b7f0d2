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

/// this module is the thin layer between the matchup engine and the 2-D geometry kernel.
/// Following odin-rs design principles we do not implement our own planar geometry but use the
/// [geo](https://docs.rs/geo/latest/geo/index.html) crate for boolean operations and validity checks,
/// and [geozero](https://docs.rs/geozero/latest/geozero/) for the WKT/WKB codecs.
/// Geometries are represented as a tagged union over the handful of kinds a swath footprint can have,
/// each variant carrying the underlying `geo` object.

use std::fmt;

use geo::{BooleanOps, Coord, CoordsIter, LineString, MultiLineString, MultiPolygon, Point, Polygon, Validation};
use geozero::{CoordDimensions, ToGeo, ToWkb, ToWkt};
use geozero::wkb::Wkb;
use geozero::wkt::WktStr;

use crate::errors::{OdinMatchupError, Result, op_failed, parse_error, unsupported_geometry};

pub type GeoCoord = Coord<f64>;

/* #region GeoPoint ***********************************************************************************************/

/// a (longitude,latitude) pair in degrees.
/// Longitudes can temporarily be outside of [-180,180] while we unwrap rings that cross the antimeridian
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( lon, lat))
    }

    pub fn from_coord (c: GeoCoord) -> Self { GeoPoint( Point(c)) }

    #[inline] pub fn lon (&self)->f64 { self.0.x() }
    #[inline] pub fn lat (&self)->f64 { self.0.y() }

    pub fn point (&self) -> &Point { &self.0 }
    pub fn coord (&self) -> GeoCoord { self.0.0 }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lon(), self.lat())
    }
}

impl From<GeoCoord> for GeoPoint {
    fn from (c: GeoCoord) -> Self { GeoPoint::from_coord(c) }
}

/* #endregion GeoPoint */

/* #region ring and line helpers **********************************************************************************/

/// close a ring by appending its first coordinate. This is a no-op if the ring is already closed
/// or has less than two coordinates, hence it can be applied repeatedly
pub fn ensure_closed_ring (coords: &mut Vec<GeoCoord>) {
    if coords.len() > 1 {
        let first = coords[0];
        if coords[coords.len()-1] != first {
            coords.push( first);
        }
    }
}

/// create a polygon without holes from a (possibly open) ring
pub fn polygon_from_ring (mut coords: Vec<GeoCoord>) -> Polygon {
    ensure_closed_ring( &mut coords);
    Polygon::new( LineString::new( coords), Vec::new())
}

/// create a line string. Line strings parametrize time along a swath, hence we need at least two points
pub fn line_string_from_coords (coords: Vec<GeoCoord>) -> Result<LineString> {
    if coords.len() < 2 {
        return Err( op_failed!("line string needs at least 2 points, got {}", coords.len()))
    }
    Ok( LineString::new( coords))
}

/* #endregion ring and line helpers */

/* #region Geometry ***********************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

/// the geometry kinds the matchup engine deals with.
/// Note that cloning is a deep copy - the `geo` objects own their coordinates
#[derive(Debug,Clone,PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {

    //--- construction and codecs

    pub fn parse_wkt (wkt: &str) -> Result<Geometry> {
        let g = WktStr(wkt).to_geo().map_err( |e| parse_error!("invalid WKT '{}': {}", wkt, e))?;
        Geometry::try_from(g)
    }

    pub fn to_wkt (&self) -> Result<String> {
        self.to_geo().to_wkt().map_err( |e| op_failed!("WKT encoding failed: {}", e))
    }

    pub fn from_wkb (bytes: &[u8]) -> Result<Geometry> {
        let g = Wkb(bytes.to_vec()).to_geo().map_err( |e| parse_error!("invalid WKB: {}", e))?;
        Geometry::try_from(g)
    }

    pub fn to_wkb (&self) -> Result<Vec<u8>> {
        self.to_geo().to_wkb( CoordDimensions::xy()).map_err( |e| op_failed!("WKB encoding failed: {}", e))
    }

    /// convert into a plain `geo` geometry (copies coordinates)
    pub fn to_geo (&self) -> geo::Geometry {
        match self {
            Geometry::Point(p) => geo::Geometry::Point(*p),
            Geometry::LineString(ls) => geo::Geometry::LineString(ls.clone()),
            Geometry::Polygon(p) => geo::Geometry::Polygon(p.clone()),
            Geometry::MultiPolygon(mp) => geo::Geometry::MultiPolygon(mp.clone()),
            Geometry::GeometryCollection(gs) => {
                geo::Geometry::GeometryCollection( geo::GeometryCollection::new_from( gs.iter().map( |g| g.to_geo()).collect()))
            }
        }
    }

    /// turn a polygonal boolean op result into the simplest representation
    pub fn from_multi_polygon (mp: MultiPolygon) -> Geometry {
        if mp.0.len() == 1 {
            let mut mp = mp;
            Geometry::Polygon( mp.0.remove(0))
        } else {
            Geometry::MultiPolygon(mp)
        }
    }

    //--- queries

    pub fn kind (&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    pub fn is_polygonal (&self) -> bool {
        matches!( self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    pub fn is_empty (&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(ls) => ls.0.is_empty(),
            Geometry::Polygon(p) => p.exterior().0.is_empty(),
            Geometry::MultiPolygon(mp) => mp.0.iter().all( |p| p.exterior().0.is_empty()),
            Geometry::GeometryCollection(gs) => gs.iter().all( |g| g.is_empty()),
        }
    }

    pub fn is_valid (&self) -> bool {
        match self {
            Geometry::Point(p) => p.x().is_finite() && p.y().is_finite(),
            Geometry::LineString(ls) => ls.is_valid(),
            Geometry::Polygon(p) => p.is_valid(),
            Geometry::MultiPolygon(mp) => mp.is_valid(),
            Geometry::GeometryCollection(gs) => gs.iter().all( |g| g.is_valid()),
        }
    }

    /// all vertices in construction order: exterior ring before interior rings, parts in sequence.
    /// Closed rings do report their closing vertex
    pub fn coordinates (&self) -> Vec<GeoPoint> {
        match self {
            Geometry::Point(p) => vec![ GeoPoint(*p) ],
            Geometry::LineString(ls) => ls.coords_iter().map( GeoPoint::from_coord).collect(),
            Geometry::Polygon(p) => p.coords_iter().map( GeoPoint::from_coord).collect(),
            Geometry::MultiPolygon(mp) => mp.coords_iter().map( GeoPoint::from_coord).collect(),
            Geometry::GeometryCollection(gs) => gs.iter().flat_map( |g| g.coordinates()).collect(),
        }
    }

    /// the parts of a composed geometry: collection members, the polygons of a multi-polygon or self
    pub fn sub_geometries (&self) -> Vec<Geometry> {
        match self {
            Geometry::GeometryCollection(gs) => gs.clone(),
            Geometry::MultiPolygon(mp) => mp.0.iter().map( |p| Geometry::Polygon(p.clone())).collect(),
            _ => vec![ self.clone() ]
        }
    }

    /// the parts the intersection engine iterates over - only collections are split, a multi-polygon
    /// is one footprint with one time axis
    pub fn footprint_parts (&self) -> Vec<&Geometry> {
        match self {
            Geometry::GeometryCollection(gs) => gs.iter().collect(),
            _ => vec![ self ]
        }
    }

    fn as_multi_polygon (&self) -> Result<MultiPolygon> {
        match self {
            Geometry::Polygon(p) => Ok( MultiPolygon::new( vec![ p.clone() ])),
            Geometry::MultiPolygon(mp) => Ok( mp.clone()),
            _ => Err( unsupported_geometry!("{:?} is not polygonal", self.kind()))
        }
    }

    //--- boolean operations

    /// the boolean AND of two geometries, which can be empty.
    /// Supported are polygonal x polygonal (result is a Polygon, or a MultiPolygon if the result has
    /// zero or more than one part) and line string x polygonal (result is the clipped line string,
    /// or a collection of line strings if the line leaves and re-enters the polygon)
    pub fn intersection (&self, other: &Geometry) -> Result<Geometry> {
        match (self, other) {
            (Geometry::LineString(ls), poly) | (poly, Geometry::LineString(ls)) if poly.is_polygonal() => {
                let mp = poly.as_multi_polygon()?;
                let clipped = mp.clip( &MultiLineString::new( vec![ ls.clone() ]), false);
                Ok( Geometry::from_multi_line_string( clipped))
            }
            (a, b) if a.is_polygonal() && b.is_polygonal() => {
                let mp_a = a.as_multi_polygon()?;
                let mp_b = b.as_multi_polygon()?;
                Ok( Geometry::from_multi_polygon( mp_a.intersection( &mp_b)))
            }
            _ => Err( unsupported_geometry!("intersection of {:?} and {:?}", self.kind(), other.kind()))
        }
    }

    fn from_multi_line_string (mls: MultiLineString) -> Geometry {
        let mut lines: Vec<LineString> = mls.0.into_iter().filter( |ls| !ls.0.is_empty()).collect();
        match lines.len() {
            0 => Geometry::LineString( LineString::new( Vec::new())),
            1 => Geometry::LineString( lines.remove(0)),
            _ => Geometry::GeometryCollection( lines.into_iter().map( Geometry::LineString).collect())
        }
    }
}

impl TryFrom<geo::Geometry> for Geometry {
    type Error = OdinMatchupError;

    fn try_from (g: geo::Geometry) -> Result<Geometry> {
        match g {
            geo::Geometry::Point(p) => Ok( Geometry::Point(p)),
            geo::Geometry::Line(l) => Ok( Geometry::LineString( LineString::new( vec![l.start, l.end]))),
            geo::Geometry::LineString(ls) => Ok( Geometry::LineString(ls)),
            geo::Geometry::Polygon(p) => Ok( Geometry::Polygon(p)),
            geo::Geometry::MultiPolygon(mp) => Ok( Geometry::MultiPolygon(mp)),
            geo::Geometry::Rect(r) => Ok( Geometry::Polygon( r.to_polygon())),
            geo::Geometry::Triangle(t) => Ok( Geometry::Polygon( t.to_polygon())),
            geo::Geometry::GeometryCollection(gc) => {
                let gs: Result<Vec<Geometry>> = gc.0.into_iter().map( Geometry::try_from).collect();
                Ok( Geometry::GeometryCollection( gs?))
            }
            geo::Geometry::MultiPoint(_) => Err( unsupported_geometry!("MultiPoint")),
            geo::Geometry::MultiLineString(_) => Err( unsupported_geometry!("MultiLineString")),
        }
    }
}

impl From<Polygon> for Geometry {
    fn from (p: Polygon) -> Self { Geometry::Polygon(p) }
}

impl From<LineString> for Geometry {
    fn from (ls: LineString) -> Self { Geometry::LineString(ls) }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_wkt() {
            Ok(wkt) => write!(f, "{}", wkt),
            Err(_) => write!(f, "{:?}", self.kind())
        }
    }
}

/* #endregion Geometry */
