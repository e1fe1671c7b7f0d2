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
use odin_matchup::TimeInterval;
use odin_matchup::time_interval::{from_epoch_millis, parse_datetime};

fn ti (start: i64, stop: i64) -> TimeInterval {
    TimeInterval::from_epoch_millis( start, stop).unwrap()
}

fn t (millis: i64) -> DateTime<Utc> {
    from_epoch_millis( millis).unwrap()
}

#[test]
fn test_intersect () {
    let a = ti( 1000, 2000);
    let b = ti( 1500, 3000);

    let c = a.intersect( &b).unwrap();
    println!("{a} ∩ {b} = {c}");
    assert_eq!( c, ti( 1500, 2000));
    assert_eq!( b.intersect( &a), Some(c));

    // contained
    let d = ti( 1200, 1300);
    assert_eq!( a.intersect( &d), Some(d));
    assert_eq!( d.intersect( &a), Some(d));

    // touching intervals share one instant
    let e = ti( 2000, 2500);
    assert_eq!( a.intersect( &e), Some( ti( 2000, 2000)));

    // disjoint
    let f = ti( 2001, 2500);
    assert_eq!( a.intersect( &f), None);
    assert_eq!( f.intersect( &a), None);
}

#[test]
fn test_create () {
    assert!( TimeInterval::create( &[]).is_none());

    let times = vec![ t(5000), t(1000), t(3000), t(2000) ];
    let i = TimeInterval::create( &times).unwrap();
    assert_eq!( i, ti( 1000, 5000));

    let i = TimeInterval::create( &[ t(42) ]).unwrap();
    assert_eq!( i.start(), i.stop());
}

#[test]
fn test_split () {
    let interval = ti( 0, 1000);
    let segments = interval.split( 3);
    for s in &segments { println!("  {s}") }

    assert_eq!( segments.len(), 3);
    assert_eq!( segments[0].start(), interval.start());
    assert_eq!( segments[2].stop(), interval.stop());
    for w in segments.windows(2) {
        assert_eq!( w[0].stop(), w[1].start());
    }
    assert_eq!( segments[0].duration().num_milliseconds(), 333);
    assert_eq!( segments[1].duration().num_milliseconds(), 333);
    assert_eq!( segments[2].duration().num_milliseconds(), 334);

    assert_eq!( interval.split(1), vec![interval]);
    assert!( interval.split(0).is_empty());
}

#[test]
fn test_expand () {
    let i = ti( 10_000, 20_000).expand( TimeDelta::seconds(5));
    assert_eq!( i, ti( 5_000, 25_000));
    assert!( i.contains( &t(5_000)));
    assert!( !i.contains( &t(25_001)));
}

#[test]
fn test_parse_and_serialize () {
    let start = parse_datetime("2024-01-01T12:00:00Z").unwrap();
    let stop = parse_datetime("2024-01-01T13:00:00+01:00").unwrap();
    assert_eq!( start, stop); // same instant

    assert!( parse_datetime("yesterday").is_err());

    let i = ti( 1704110400000, 1704114000000);
    let s = ron::to_string( &i).unwrap();
    println!("{s}");
    assert!( s.contains("1704110400000"));

    let i1: TimeInterval = ron::from_str( &s).unwrap();
    assert_eq!( i, i1);
}
