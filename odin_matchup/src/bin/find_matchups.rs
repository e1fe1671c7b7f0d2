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

use anyhow::Result;
use clap::{Parser, ValueEnum};
use lazy_static::lazy_static;
use tracing_subscriber::EnvFilter;

use odin_matchup::{MatchupConfig, Observation, find_all_matchups, load_config, load_observation, info};

#[derive(Debug,Clone,Copy,PartialEq,Eq,ValueEnum)]
enum Format {
    Ron,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = "find matchups between a primary and a list of secondary observations")]
struct Args {
    /// pathname of the RON matchup config (defaults are used if not set)
    #[arg(short,long)]
    config: Option<String>,

    /// output format of matchup records
    #[arg(short,long, value_enum, default_value_t = Format::Ron)]
    format: Format,

    /// pathname of the primary observation spec (RON)
    primary: String,

    /// pathnames of secondary observation specs (RON)
    #[arg(num_args=1..)]
    secondaries: Vec<String>,
}

lazy_static! {
    static ref ARGS: Args = Args::parse();
}

fn main()->Result<()> {
    // RUST_LOG sets the max level
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let config: MatchupConfig = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => MatchupConfig::default()
    };

    let primary = load_observation( &ARGS.primary)?;
    info!("primary {}", primary);

    let mut secondaries: Vec<Observation> = Vec::with_capacity( ARGS.secondaries.len());
    for path in &ARGS.secondaries {
        let obs = load_observation( path)?;
        info!("secondary {}", obs);
        secondaries.push( obs);
    }

    let records = find_all_matchups( std::slice::from_ref( &primary), &secondaries, &config)?;
    for rec in &records {
        let s = match ARGS.format {
            Format::Ron => rec.to_ron()?,
            Format::Json => rec.to_json()?,
        };
        println!("{s}");
    }

    Ok(())
}
