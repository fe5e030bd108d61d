//! predict: satellite ground-track prediction from TLE sets.

mod cli;
mod exit;
mod output;
mod sources;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;
use output::Printer;
use sattrack_orbit::{Region, Trajectory};
use std::fs::File;
use std::io::{self, BufWriter, Write};

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(exit::code(&err));
    }
}

fn run(cli: &Cli) -> Result<()> {
    let copydir = cli
        .copydir
        .clone()
        .unwrap_or_else(std::env::temp_dir);

    let mut trajectory = Trajectory::new();
    trajectory.base = cli.base;
    sources::scan_all(&mut trajectory, &cli.sources, cli.sid, cli.bstar, &copydir)?;
    info!(
        "{} elements for satellite {}",
        trajectory.elements().len(),
        cli.sid
    );

    if cli.info {
        for window in trajectory.windows(cli.period, cli.step) {
            println!(
                "{} | {} | {} | {}",
                window.sid,
                window.when.format("%Y-%m-%d %H:%M:%S"),
                window.starts.format("%Y-%m-%d %H:%M:%S"),
                window.ends.format("%Y-%m-%d %H:%M:%S")
            );
        }
        return Ok(());
    }

    let region: Option<Box<dyn Region>> = Some(Box::new(cli.region));
    let results = trajectory.predict(cli.period, cli.step, region)?;

    let mut writer: Box<dyn Write> = match &cli.file {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let printer = Printer {
        format: cli.format,
        frame: cli.frame,
        dms: cli.dms,
        round: cli.round,
    };
    let failure = printer.print(&mut writer, results)?;
    writer.flush()?;

    if let Some(error) = failure {
        return Err(error.into());
    }
    Ok(())
}
