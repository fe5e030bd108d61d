//! CLI argument definitions for predict

use chrono::{DateTime, Utc};
use clap::Parser;
use sattrack_orbit::LatLonRect;
use sattrack_time::TimeError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Csv,
    Pipe,
    Json,
    Xml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Frame {
    Geodetic,
    Geocentric,
    /// Keep raw TEME coordinates.
    Teme,
}

#[derive(Parser)]
#[command(name = "predict")]
#[command(about = "Predict satellite ground tracks from two-line element sets")]
#[command(version)]
pub struct Cli {
    /// Satellite catalog number
    #[arg(short = 's', long = "sid", default_value_t = 25_544)]
    pub sid: u32,

    /// Propagation window (e.g. 72h, 90m)
    #[arg(short = 'd', long = "duration", default_value = "72h", value_parser = duration)]
    pub period: Duration,

    /// Sample step (e.g. 1m, 30s)
    #[arg(short = 'i', long = "interval", default_value = "1m", value_parser = duration)]
    pub step: Duration,

    /// Propagation start anchor (e.g. "2018-11-01 06:00:00")
    #[arg(short = 'b', long = "base", value_parser = time)]
    pub base: Option<DateTime<Utc>>,

    /// Crossing region as north:east:south:west degrees
    #[arg(short = 'r', long = "region", default_value_t = LatLonRect::default())]
    pub region: LatLonRect,

    /// Reject elements whose |B*| exceeds this limit
    #[arg(long = "bstar", default_value_t = 0.001)]
    pub bstar: f64,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Pipe)]
    pub format: Format,

    /// Coordinate frame of the output
    #[arg(long = "frames", value_enum, default_value_t = Frame::Geodetic)]
    pub frame: Frame,

    /// Render latitude/longitude as degrees-minutes-seconds (pipe format)
    #[arg(long = "dms")]
    pub dms: bool,

    /// Wrap longitudes into [0, 360)
    #[arg(long = "to360")]
    pub round: bool,

    /// Directory for cached copies of fetched TLEs
    #[arg(short = 't', long = "tmpdir")]
    pub copydir: Option<PathBuf>,

    /// Write the trajectory to a file instead of stdout
    #[arg(short = 'w', long = "write")]
    pub file: Option<PathBuf>,

    /// Print the per-element propagation windows and exit
    #[arg(long = "info")]
    pub info: bool,

    /// TLE sources: file paths or http(s) URLs (stdin when empty)
    pub sources: Vec<String>,
}

fn duration(s: &str) -> Result<Duration, TimeError> {
    sattrack_time::parse_duration(s)
}

fn time(s: &str) -> Result<DateTime<Utc>, TimeError> {
    sattrack_time::parse_time(s)
}
