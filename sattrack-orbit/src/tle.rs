//! TLE record scanner.
//!
//! Accepts the layout served by the usual distribution sites: an optional
//! 24-character name line, then two 69-character data lines per record,
//! with blank lines tolerated between records.

use crate::element::Element;
use crate::errors::{OrbitError, OrbitResult, TLE_LINE_LEN};
use std::io::BufRead;

/// Length of the optional satellite-name line.
const NAME_LINE_LEN: usize = 24;

/// Scans TLE records from a reader, keeping the elements of the requested
/// satellite.
///
/// Records of other satellites that fail to decode are skipped; a bad
/// record of the satellite of interest surfaces its error. An element of
/// the requested satellite whose |B*| exceeds `bstar_limit` aborts the
/// scan with [`OrbitError::Drag`].
pub fn scan<R: BufRead>(reader: R, sid: u32, bstar_limit: f64) -> OrbitResult<Vec<Element>> {
    let mut elements = Vec::new();
    let mut first: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if first.is_none() && line.len() == NAME_LINE_LEN {
            continue;
        }
        if line.len() != TLE_LINE_LEN {
            return Err(OrbitError::InvalidLength(line.len()));
        }

        match first.take() {
            None => first = Some(line),
            Some(row1) => match Element::new(&row1, &line) {
                Ok(element) => {
                    if element.sid != sid {
                        continue;
                    }
                    if element.bstar.abs() > bstar_limit.abs() {
                        return Err(OrbitError::Drag(element.bstar));
                    }
                    elements.push(element);
                }
                Err(err) => {
                    if satellite_of(&row1) == Some(sid) {
                        return Err(err);
                    }
                }
            },
        }
    }

    if first.is_some() {
        return Err(OrbitError::MissingRow(1));
    }
    Ok(elements)
}

/// Best-effort satellite number of a data line, for error attribution.
fn satellite_of(line: &str) -> Option<u32> {
    line.get(2..7)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LINE1: &str = "1 25544U 98067A   18304.35925926  .00001207  00000-0  25703-4 0  9998";
    const LINE2: &str = "2 25544  51.6416 264.9105 0005411 308.4548 133.5520 15.53872777139582";

    fn with_sid(line: &str, sid: &str) -> String {
        let mut line = line.to_string();
        line.replace_range(2..7, sid);
        line
    }

    #[test]
    fn test_scan_single_record() {
        let input = format!("{LINE1}\n{LINE2}\n");
        let elements = scan(Cursor::new(input), 25_544, 0.001).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].sid, 25_544);
    }

    #[test]
    fn test_scan_with_name_line_and_blanks() {
        let name = format!("{:<24}", "ISS (ZARYA)");
        let input = format!("{name}\n{LINE1}\n{LINE2}\n\n   \n{LINE1}\n{LINE2}\n");
        let elements = scan(Cursor::new(input), 25_544, 0.001).unwrap();
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn test_scan_filters_other_satellites() {
        let other1 = with_sid(LINE1, "20580");
        let other2 = with_sid(LINE2, "20580");
        let input = format!("{other1}\n{other2}\n{LINE1}\n{LINE2}\n");
        let elements = scan(Cursor::new(input), 25_544, 0.001).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].sid, 25_544);
    }

    #[test]
    fn test_scan_truncated_line_errors() {
        let input = format!("{}\n{LINE2}\n", &LINE1[..68]);
        match scan(Cursor::new(input), 25_544, 0.001) {
            Err(OrbitError::InvalidLength(68)) => {}
            other => panic!("expected InvalidLength(68), got {other:?}"),
        }
    }

    #[test]
    fn test_scan_missing_second_row() {
        let input = format!("{LINE1}\n");
        match scan(Cursor::new(input), 25_544, 0.001) {
            Err(OrbitError::MissingRow(_)) => {}
            other => panic!("expected MissingRow, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_bad_record_of_other_satellite_is_skipped() {
        let mut other1 = with_sid(LINE1, "20580");
        other1.replace_range(20..32, "xxxxxxxxxxxx");
        let other2 = with_sid(LINE2, "20580");
        let input = format!("{other1}\n{other2}\n{LINE1}\n{LINE2}\n");
        let elements = scan(Cursor::new(input), 25_544, 0.001).unwrap();
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn test_scan_bad_record_of_interest_errors() {
        let mut bad1 = LINE1.to_string();
        bad1.replace_range(20..32, "xxxxxxxxxxxx");
        let input = format!("{bad1}\n{LINE2}\n");
        match scan(Cursor::new(input), 25_544, 0.001) {
            Err(OrbitError::Parse { row: 1, .. }) => {}
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_drag_limit() {
        let input = format!("{LINE1}\n{LINE2}\n");
        match scan(Cursor::new(input), 25_544, 1e-6) {
            Err(OrbitError::Drag(bstar)) => assert!((bstar - 2.5703e-5).abs() < 1e-12),
            other => panic!("expected Drag, got {other:?}"),
        }
    }
}
