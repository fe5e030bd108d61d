//! crossing: extract area-crossing points and passes from annotated
//! trajectories.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use sattrack_crossing::{
    read_points, AnalysisError, Conjunction, Eclipse, Pass, PassTracker, Point, Predicate,
    Settings, Square, Window,
};
use sattrack_time::TimeError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "crossing")]
#[command(about = "Extract region crossings from annotated trajectories")]
#[command(version)]
struct Cli {
    /// Read areas and options from a TOML file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Area center latitude, degrees
    #[arg(long = "lat", default_value_t = 0.0, allow_negative_numbers = true)]
    lat: f64,

    /// Area center longitude, degrees
    #[arg(long = "lon", default_value_t = 0.0, allow_negative_numbers = true)]
    lon: f64,

    /// Area half-size, degrees
    #[arg(long = "margin", default_value_t = 10.0, allow_negative_numbers = true)]
    margin: f64,

    /// Keep night (full eclipse) samples only
    #[arg(long = "night")]
    night: bool,

    /// Window start
    #[arg(long = "starts", value_parser = time)]
    starts: Option<DateTime<Utc>>,

    /// Window end (exclusive)
    #[arg(long = "ends", value_parser = time)]
    ends: Option<DateTime<Utc>>,

    /// Emit accepted points instead of aggregated passes
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Comma-separated output
    #[arg(long = "csv")]
    csv: bool,

    /// Drop passes shorter than this (e.g. 2m)
    #[arg(long = "min-duration", value_parser = duration)]
    min_duration: Option<Duration>,

    /// Annotated trajectory files (stdin when empty)
    files: Vec<PathBuf>,
}

fn time(s: &str) -> Result<DateTime<Utc>, TimeError> {
    sattrack_time::parse_time(s)
}

fn duration(s: &str) -> Result<Duration, TimeError> {
    sattrack_time::parse_duration(s)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(exit_code(&err));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AnalysisError>() {
        Some(AnalysisError::Io(_)) => 5,
        Some(_) => 22,
        None => 22,
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (predicates, list, csv, minimum, files) = setup(cli)?;

    for predicate in &predicates {
        eprintln!("{predicate}");
    }

    let minimum = minimum.map(|d| chrono::TimeDelta::milliseconds(d.as_millis() as i64));
    let mut tracker = PassTracker::new(predicates, minimum);

    let receiver = read_points(files);
    for outcome in receiver {
        let point = outcome?;
        if list {
            if tracker.matches(&point).is_some() {
                print_point(&point, csv);
            }
        } else {
            for pass in tracker.update(&point) {
                print_pass(&pass, csv);
            }
        }
    }
    if !list {
        for pass in tracker.finish() {
            print_pass(&pass, csv);
        }
    }
    Ok(())
}

type Setup = (Vec<Predicate>, bool, bool, Option<Duration>, Vec<PathBuf>);

fn setup(cli: &Cli) -> Result<Setup> {
    if let Some(path) = &cli.config {
        let settings = Settings::load(path)?;
        let mut files = cli.files.clone();
        if files.is_empty() {
            files.extend(settings.file.clone());
        }
        return Ok((
            settings.predicates()?,
            settings.list,
            settings.csv,
            settings.min_duration()?,
            files,
        ));
    }

    let square = Square::new(cli.lat, cli.lon, cli.margin).map_err(anyhow::Error::from)?;
    let predicate = Predicate::All(Conjunction::new(
        "",
        vec![
            Predicate::Area(square),
            Predicate::Window(Window::new(cli.starts, cli.ends)),
            Predicate::Eclipse(Eclipse(cli.night)),
        ],
    ));
    Ok((
        vec![predicate],
        cli.list,
        cli.csv,
        cli.min_duration,
        cli.files.clone(),
    ))
}

fn print_point(point: &Point, csv: bool) {
    let when = point.when.format("%Y-%m-%d %H:%M:%S%.3f");
    let night = if point.eclipse { "night" } else { "day" };
    let saa = if point.saa { "saa" } else { "-" };
    if csv {
        println!(
            "{when},{:.3},{:.3},{:.3},{night},{saa}",
            point.alt, point.lat, point.lon
        );
    } else {
        println!(
            "{when} | {:8.3} | {:8.3} | {:8.3} | {night:>5} | {saa:>3}",
            point.alt, point.lat, point.lon
        );
    }
}

fn print_pass(pass: &Pass, csv: bool) {
    let first = pass.first.when.format("%Y-%m-%dT%H:%M:%S%.3f");
    let last = pass.last.when.format("%Y-%m-%dT%H:%M:%S%.3f");
    let seconds = pass.duration().num_seconds();
    if csv {
        println!(
            "{},{first},{:.3},{:.3},{last},{:.3},{:.3},{seconds},{:.1}",
            pass.label,
            pass.first.lat,
            pass.first.lon,
            pass.last.lat,
            pass.last.lon,
            pass.distance()
        );
    } else {
        println!(
            "{:8} | {first} | {:8.3} | {:8.3} | {last} | {:8.3} | {:8.3} | {seconds:6}s | {:8.1}",
            pass.label,
            pass.first.lat,
            pass.first.lon,
            pass.last.lat,
            pass.last.lon,
            pass.distance()
        );
    }
}
