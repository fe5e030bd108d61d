//! Re-emit an annotated trajectory in another coordinate frame.
//!
//! Reads the 8-field annotated trajectory CSV (comments starting with `#`
//! are skipped) and prints pipe-delimited rows with the position converted
//! to the requested frame. Raw rows are expected to carry the TEME
//! position with z in the altitude column and x/y in the latitude and
//! longitude columns, which is how the predictor lays them out.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use sattrack_coords::{geocentric_from_ecef, geodetic_from_ecef, teme_to_ecef};
use sattrack_core::angle::wrap_degrees;
use sattrack_core::Vector3;
use sattrack_time::{greenwich_sidereal_time, JulianDate};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Frame {
    /// Spherical latitude/longitude over the mean-radius Earth.
    Classic,
    Geodetic,
    Geocentric,
    /// Pass raw TEME coordinates through unchanged.
    Teme,
}

#[derive(Parser)]
#[command(name = "coordconv")]
#[command(about = "Convert annotated trajectory points between coordinate frames")]
#[command(version)]
struct Cli {
    /// Target coordinate frame
    #[arg(short = 'm', long = "frames", value_enum, default_value_t = Frame::Classic)]
    frame: Frame,

    /// Repeat the previous row over one-second gaps
    #[arg(short = 'f', long = "fill")]
    fill: bool,

    /// Wrap longitudes into [0, 360)
    #[arg(long = "to360")]
    round: bool,

    /// Input positions are meters instead of kilometers
    #[arg(long = "meters")]
    meters: bool,

    /// Seconds subtracted from every input timestamp
    #[arg(long = "leap", default_value_t = 0i64)]
    leap: i64,

    /// Input file (stdin when omitted)
    file: Option<PathBuf>,
}

#[derive(Clone, Copy)]
struct Row {
    when: DateTime<Utc>,
    epoch: JulianDate,
    alt: f64,
    lat: f64,
    lon: f64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let reader: Box<dyn BufRead> = match &cli.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("fail to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut index = 0usize;
    let mut previous: Option<Row> = None;
    for line in reader.lines() {
        let line = line.context("fail to read input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = parse_row(trimmed, cli)?;
        if let Some(prev) = &previous {
            if row.when == prev.when {
                continue;
            }
            if cli.fill {
                let second = chrono::Duration::seconds(1);
                let mut when = prev.when + second;
                while when < row.when {
                    print_row(index, &Row { when, ..*prev });
                    when += second;
                    index += 1;
                }
            }
        }
        print_row(index, &row);
        index += 1;
        previous = Some(row);
    }
    Ok(())
}

fn parse_row(line: &str, cli: &Cli) -> Result<Row> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 5 {
        bail!("short row: {} fields", fields.len());
    }

    let when = sattrack_time::parse_time(fields[0])?
        - chrono::Duration::seconds(cli.leap);
    let scale = if cli.meters { 1e-3 } else { 1.0 };
    let alt: f64 = fields[2].trim().parse().context("altitude column")?;
    let lat: f64 = fields[3].trim().parse().context("latitude column")?;
    let lon: f64 = fields[4].trim().parse().context("longitude column")?;

    let epoch = JulianDate::from_datetime(&when);
    let (alt, lat, lon) = convert(cli.frame, &epoch, alt * scale, lat * scale, lon * scale);
    let lon = if cli.round && cli.frame != Frame::Teme {
        wrap_degrees(lon)
    } else {
        lon
    };
    Ok(Row {
        when,
        epoch,
        alt,
        lat,
        lon,
    })
}

/// Converts one raw row to the requested frame.
///
/// Raw columns hold `(z, x, y)` of the TEME position; the converted
/// columns hold `(altitude km, latitude°, longitude°)`.
fn convert(frame: Frame, epoch: &JulianDate, z: f64, x: f64, y: f64) -> (f64, f64, f64) {
    if frame == Frame::Teme {
        return (z, x, y);
    }
    let gst = greenwich_sidereal_time(epoch.value());
    let ecef = teme_to_ecef(gst, &Vector3::new(x, y, z));
    match frame {
        Frame::Classic => {
            let (lat, lon, alt) = sattrack_coords::geocentric_spherical(&(ecef * 1_000.0));
            (alt / 1_000.0, lat, lon)
        }
        Frame::Geodetic => {
            let (lat, lon, alt) = geodetic_from_ecef(&ecef);
            (alt, lat, lon)
        }
        Frame::Geocentric => {
            let (lat, lon, alt) = geocentric_from_ecef(&ecef);
            (alt, lat, lon)
        }
        Frame::Teme => unreachable!(),
    }
}

fn print_row(index: usize, row: &Row) {
    println!(
        "{:6} | {} | {:12.6} | {:12.5} | {:12.5} | {:12.5}",
        index,
        row.when.format("%Y-%m-%dT%H:%M:%S%.6f"),
        row.epoch.mjd_cnes(),
        row.alt,
        row.lat,
        row.lon
    );
}
