//! Streaming reader feeding analyzer points over a bounded channel.

use crate::errors::AnalysisResult;
use crate::point::Point;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread;

/// Streams the points of one or more annotated trajectory files, stdin
/// when the list is empty. `#` comments and blank lines are skipped.
///
/// The first read or parse failure is delivered on the channel and ends
/// the stream; dropping the receiver stops the producer.
pub fn read_points(paths: Vec<PathBuf>) -> Receiver<AnalysisResult<Point>> {
    let (sender, receiver) = sync_channel(1);

    thread::spawn(move || {
        if paths.is_empty() {
            drain(io::stdin().lock(), &sender);
            return;
        }
        for path in paths {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(err) => {
                    let _ = sender.send(Err(err.into()));
                    return;
                }
            };
            if !drain(BufReader::new(file), &sender) {
                return;
            }
        }
    });

    receiver
}

/// Sends every point of one reader; false when the stream must stop.
fn drain<R: BufRead>(reader: R, sender: &SyncSender<AnalysisResult<Point>>) -> bool {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                let _ = sender.send(Err(err.into()));
                return false;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let outcome = Point::from_row(trimmed);
        let failed = outcome.is_err();
        if sender.send(outcome).is_err() || failed {
            return false;
        }
    }
    true
}
