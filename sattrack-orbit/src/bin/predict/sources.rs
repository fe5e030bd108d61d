//! TLE acquisition from files, URLs or stdin.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use sattrack_orbit::Trajectory;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, ErrorKind};
use std::path::{Path, PathBuf};

/// Feeds every source into the trajectory. URLs are fetched over HTTP and
/// a timestamped copy is kept under `copydir`; plain paths are read as
/// files; an empty source list reads stdin.
pub fn scan_all(
    trajectory: &mut Trajectory,
    sources: &[String],
    sid: u32,
    bstar: f64,
    copydir: &Path,
) -> Result<()> {
    if sources.is_empty() {
        trajectory.scan(io::stdin().lock(), sid, bstar)?;
        info!("parsing TLE from stdin done");
        return Ok(());
    }

    for source in sources {
        if source.starts_with("http://") || source.starts_with("https://") {
            let body = fetch(source)?;
            cache_copy(copydir, source, &body);
            trajectory.scan(Cursor::new(body), sid, bstar)?;
        } else {
            let file =
                File::open(source).with_context(|| format!("fail to open {source}"))?;
            trajectory.scan(BufReader::new(file), sid, bstar)?;
        }
        info!("parsing TLE from {source} done");
    }
    Ok(())
}

fn fetch(url: &str) -> Result<String> {
    let response = reqwest::blocking::get(url).with_context(|| format!("fail to fetch {url}"))?;
    if !response.status().is_success() {
        // Surfaced as an I/O failure so the exit code lands in that class.
        return Err(io::Error::new(
            ErrorKind::Other,
            format!("fail to fetch data from {url} ({})", response.status()),
        )
        .into());
    }
    Ok(response.text()?)
}

/// Keeps a timestamped copy of a fetched TLE next to the temp files.
/// Failure to cache never fails the run.
fn cache_copy(copydir: &Path, url: &str, body: &str) {
    let name = url.rsplit('/').next().unwrap_or("tle");
    let stamped = format!("{name}-{}", Utc::now().format("%Y%m%d_%H%M%S"));
    let target: PathBuf = copydir.join(stamped);

    let outcome = fs::create_dir_all(copydir).and_then(|_| fs::write(&target, body));
    match outcome {
        Ok(()) => info!("cached {url} as {}", target.display()),
        Err(err) => warn!("fail to cache {url}: {err}"),
    }
}
