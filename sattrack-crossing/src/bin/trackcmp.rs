//! trackcmp: compare a predicted trajectory against reference telemetry.
//!
//! Both inputs are annotated trajectory CSVs. Rows are joined on the
//! timestamp truncated to the second; for each joined pair the tool
//! prints the ground separation and whether the eclipse and crossing
//! flags agree.

use anyhow::Result;
use chrono::{DateTime, SubsecRound, Utc};
use clap::Parser;
use sattrack_crossing::{read_points, AnalysisError, Point};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

#[derive(Parser)]
#[command(name = "trackcmp")]
#[command(about = "Compare a predicted trajectory against reference telemetry")]
#[command(version)]
struct Cli {
    /// Predicted trajectory to compare with ("-" for stdin)
    #[arg(short = 't', long = "trajectory")]
    trajectory: String,

    /// Chord distance through the ellipsoid instead of the great circle
    #[arg(long = "cartesian")]
    cartesian: bool,

    /// Reference telemetry files
    reference: Vec<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        let code = match err.downcast_ref::<AnalysisError>() {
            Some(AnalysisError::Io(_)) => 5,
            _ => 22,
        };
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let predicted = if cli.trajectory == "-" {
        read_points(Vec::new())
    } else {
        read_points(vec![PathBuf::from(&cli.trajectory)])
    };
    let reference = read_points(cli.reference.clone());

    let mut predicted = Stream::new(predicted);
    for outcome in reference {
        let point = outcome?;
        let Some(candidate) = predicted.seek(point.when)? else {
            break;
        };

        let distance = if cli.cartesian {
            candidate.distance(&point)
        } else {
            candidate.haversine(&point)
        };
        println!(
            "{} | {} | {:12.5}km | {} | {}",
            point.when.format("%Y-%m-%d %H:%M:%S"),
            candidate.when.format("%Y-%m-%d %H:%M:%S"),
            distance,
            candidate.eclipse == point.eclipse,
            candidate.saa == point.saa
        );
    }
    Ok(())
}

/// Pull-view over a point channel that advances to a requested second.
struct Stream {
    receiver: Receiver<Result<Point, AnalysisError>>,
    held: Option<Point>,
}

impl Stream {
    fn new(receiver: Receiver<Result<Point, AnalysisError>>) -> Self {
        Self {
            receiver,
            held: None,
        }
    }

    /// Returns the first point at or past `when` (seconds resolution),
    /// consuming everything earlier. `None` once the stream is dry.
    fn seek(&mut self, when: DateTime<Utc>) -> Result<Option<Point>> {
        let target = when.trunc_subsecs(0);
        if let Some(held) = self.held {
            if held.when.trunc_subsecs(0) >= target {
                return Ok(Some(held));
            }
            self.held = None;
        }
        for outcome in self.receiver.iter() {
            let point = outcome?;
            if point.when.trunc_subsecs(0) >= target {
                self.held = Some(point);
                return Ok(Some(point));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_trajectory_flag() {
        assert!(Cli::try_parse_from(["trackcmp", "reference.csv"]).is_err());
        let cli =
            Cli::try_parse_from(["trackcmp", "-t", "predicted.csv", "reference.csv"]).unwrap();
        assert_eq!(cli.trajectory, "predicted.csv");
        assert_eq!(cli.reference.len(), 1);
    }
}
