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
#![allow(unused)]

use chrono::{DateTime, TimeDelta, Utc};
use ndarray::Array2;
use odin_matchup::{
    BoundingPolygonCreator, Geometry, GeometryKind, NodeType, Observation, OdinMatchupError, TimeAxis, TimeInterval,
    calculate_time_delta, get_intersecting_intervals, load_observation
};
use odin_matchup::antimeridian::normalize_180;
use odin_matchup::time_interval::{from_epoch_millis, parse_datetime};

/// end-to-end tests of the intersection engine.
/// The primary footprint is [0,1]x[0,2] with a northbound centerline, the secondary [0,1]x[1,3]. Both
/// overlap in the square [0,1]x[1,2], which is the second half of the primary axis and the first half
/// of the secondary axis

fn t0 () -> DateTime<Utc> {
    parse_datetime("2024-01-01T12:00:00Z").unwrap()
}

fn secs (s: i64) -> TimeDelta { TimeDelta::seconds(s) }

fn observation (name: &str, footprint: &str, axis: &str, start: DateTime<Utc>, stop: DateTime<Utc>) -> Observation {
    let footprint = Geometry::parse_wkt( footprint).unwrap();
    let axis = TimeAxis::from_geometry( &Geometry::parse_wkt( axis).unwrap(), start, stop).unwrap();
    Observation::new( name, footprint, vec![axis], start, stop, NodeType::Undefined).unwrap()
}

fn primary () -> Observation {
    observation( "primary", "POLYGON((0 0,1 0,1 2,0 2,0 0))", "LINESTRING(0.5 0,0.5 2)", t0(), t0() + secs(3600))
}

fn secondary (start_offset: i64) -> Observation {
    let start = t0() + secs(start_offset);
    observation( "secondary", "POLYGON((0 1,1 1,1 3,0 3,0 1))", "LINESTRING(0.5 1,0.5 3)", start, start + secs(3600))
}

#[test]
fn test_overlapping_times () {
    let primary = primary();
    let secondary = secondary( 1800);

    let intersections = get_intersecting_intervals( &primary, &secondary).unwrap();
    for i in &intersections { println!("{i}") }
    assert_eq!( intersections.len(), 1);

    let is = &intersections[0];
    assert!( is.geometry.is_polygonal());
    assert_eq!( is.primary_geometry, *primary.footprint());
    assert_eq!( is.secondary_geometry, *secondary.footprint());

    let overlap = is.time_info.overlap_interval.unwrap();
    assert_eq!( is.time_info.minimal_time_delta, 0);
    assert!( overlap.start() >= t0() + secs(1800));
    assert!( overlap.stop() <= t0() + secs(3600));
    assert!( overlap.start() <= overlap.stop());
}

#[test]
fn test_disjoint_times () {
    let primary = primary();
    let secondary = secondary( 7200);

    let intersections = get_intersecting_intervals( &primary, &secondary).unwrap();
    for i in &intersections { println!("{i}") }
    assert_eq!( intersections.len(), 1);

    let time_info = &intersections[0].time_info;
    assert!( time_info.overlap_interval.is_none());
    assert_eq!( time_info.minimal_time_delta, 3_600_000);

    // argument order does not change the delta
    let intersections = get_intersecting_intervals( &secondary, &primary).unwrap();
    assert_eq!( intersections[0].time_info.minimal_time_delta, 3_600_000);
}

#[test]
fn test_no_spatial_intersection () {
    let primary = primary();
    let start = t0();
    let other = observation( "other", "POLYGON((5 5,6 5,6 6,5 6,5 5))", "LINESTRING(5.5 5,5.5 6)", start, start + secs(600));

    let intersections = get_intersecting_intervals( &primary, &other).unwrap();
    assert!( intersections.is_empty());
}

#[test]
fn test_no_time_samples () {
    // the primary axis ends before the overlap area, none of its vertices can be timed
    let start = t0();
    let primary = observation( "short axis", "POLYGON((0 0,1 0,1 2,0 2,0 0))", "LINESTRING(0.5 0,0.5 0.5)", start, start + secs(3600));
    let secondary = secondary( 1800);

    let intersections = get_intersecting_intervals( &primary, &secondary).unwrap();
    assert!( intersections.is_empty());
}

#[test]
fn test_segmented_footprint () {
    let obs = load_observation("tests/data/segmented.ron").unwrap();
    println!("{obs}");
    assert_eq!( obs.time_axes().len(), 2);
    assert_eq!( obs.time_axes()[0].end(), obs.time_axes()[1].start());

    // the secondary only overlaps with the second part of the segmented footprint
    let start = obs.sensing_start();
    let other = observation( "other", "POLYGON((0 1.5,1 1.5,1 3,0 3,0 1.5))", "LINESTRING(0.5 1.5,0.5 3)", start, start + secs(600));

    let intersections = get_intersecting_intervals( &obs, &other).unwrap();
    for i in &intersections { println!("{i}") }
    assert_eq!( intersections.len(), 1);
    assert_eq!( intersections[0].primary_geometry, obs.footprint().footprint_parts()[1].clone());
}

/// a builder made swath that crosses the antimeridian diagonally. Its centerline runs from (170,-5) to the
/// unwrapped (190,5), hence the acquisition time fraction of a point p is dot(p - (170,-5), (20,10)) / 500
fn dateline_swath () -> Observation {
    let lons = Array2::from_shape_fn( (11,3), |(r,c)| normalize_180( 170.0 + 2.0 * r as f64 + c as f64 - 1.0));
    let lats = Array2::from_shape_fn( (11,3), |(r,_)| -5.0 + r as f64);
    let bpc = BoundingPolygonCreator::new( 1, 1).unwrap();
    bpc.create_observation( "dateline", &lons, &lats, t0(), t0() + secs(1000), NodeType::Ascending).unwrap()
}

fn assert_near (actual: DateTime<Utc>, expected: DateTime<Utc>) {
    let d = (actual - expected).num_milliseconds();
    assert!( d.abs() <= 2, "expected {} got {} ({}ms)", expected, actual, d);
}

#[test]
fn test_dateline_swath () {
    let primary = dateline_swath();
    println!("{primary}");
    assert_eq!( primary.footprint().kind(), GeometryKind::MultiPolygon);
    assert_eq!( primary.time_axes().len(), 1);

    // east of the dateline, primary times 235s..265s
    let east = observation( "east", "POLYGON((174.75 -2.75,175.25 -2.75,175.25 -2.25,174.75 -2.25,174.75 -2.75))",
                            "LINESTRING(175 -2.75,175 -2.25)", t0() + secs(200), t0() + secs(300));
    let intersections = get_intersecting_intervals( &primary, &east).unwrap();
    for i in &intersections { println!("east: {i}") }
    assert_eq!( intersections.len(), 1);
    assert!( intersections[0].geometry.is_polygonal());
    let overlap = intersections[0].time_info.overlap_interval.unwrap();
    assert_near( overlap.start(), t0() + secs(235));
    assert_near( overlap.stop(), t0() + secs(265));

    // west of the dateline, at the unwrapped (185,2.5) with primary times 735s..765s
    let west = observation( "west", "POLYGON((-175.25 2.25,-174.75 2.25,-174.75 2.75,-175.25 2.75,-175.25 2.25))",
                            "LINESTRING(-175 2.25,-175 2.75)", t0() + secs(700), t0() + secs(800));
    let intersections = get_intersecting_intervals( &primary, &west).unwrap();
    for i in &intersections { println!("west: {i}") }
    assert_eq!( intersections.len(), 1);
    assert!( intersections[0].geometry.is_polygonal());
    let overlap = intersections[0].time_info.overlap_interval.unwrap();
    assert_near( overlap.start(), t0() + secs(735));
    assert_near( overlap.stop(), t0() + secs(765));

    // the west side acquired an hour later does not overlap but still gets its time delta
    let late = observation( "late", "POLYGON((-175.25 2.25,-174.75 2.25,-174.75 2.75,-175.25 2.75,-175.25 2.25))",
                            "LINESTRING(-175 2.25,-175 2.75)", t0() + secs(4600), t0() + secs(4700));
    let intersections = get_intersecting_intervals( &primary, &late).unwrap();
    assert_eq!( intersections.len(), 1);
    assert!( intersections[0].time_info.overlap_interval.is_none());
    let dt = intersections[0].time_info.minimal_time_delta;
    assert!( (dt - 3_835_000).abs() <= 2, "unexpected delta {dt}");
}

#[test]
fn test_observation_specs () {
    let primary = load_observation("tests/data/primary.ron").unwrap();
    let secondary = load_observation("tests/data/secondary.ron").unwrap();
    println!("{primary}\n{secondary}");
    assert_eq!( primary.node_type(), NodeType::Ascending);
    assert_eq!( secondary.node_type(), NodeType::Descending);

    let intersections = get_intersecting_intervals( &primary, &secondary).unwrap();
    assert_eq!( intersections.len(), 1);
    assert!( intersections[0].time_info.has_overlap());
}

#[test]
fn test_axis_count_mismatch () {
    let footprint = Geometry::parse_wkt("GEOMETRYCOLLECTION(POLYGON((0 0,1 0,1 1,0 1,0 0)),POLYGON((0 1,1 1,1 2,0 2,0 1)))").unwrap();
    let axis = TimeAxis::from_geometry( &Geometry::parse_wkt("LINESTRING(0.5 0,0.5 2)").unwrap(), t0(), t0() + secs(60)).unwrap();

    let res = Observation::new( "mismatch", footprint, vec![axis], t0(), t0() + secs(60), NodeType::Undefined);
    assert!( matches!( res, Err(OdinMatchupError::OpFailedError(_))));
}

#[test]
fn test_calculate_time_delta () {
    let a = TimeInterval::from_epoch_millis( 2500, 2800).unwrap();
    let b = TimeInterval::from_epoch_millis( 3000, 3500).unwrap();

    assert_eq!( calculate_time_delta( &a, &b), 200);
    assert_eq!( calculate_time_delta( &b, &a), 200);
}
