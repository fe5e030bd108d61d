//! TOML configuration of crossing regions.
//!
//! ```toml
//! file = "trajectory.csv"
//! list = false
//! csv = true
//! duration = "2m"
//!
//! [[area]]
//! label = "saa"
//! latitude = -30.0
//! longitude = -40.0
//! margin = 25.0
//! night = true
//! dtstart = "2018-11-01 00:00:00"
//! dtend = "2018-11-03 00:00:00"
//! ```

use crate::errors::{AnalysisError, AnalysisResult};
use crate::predicate::{Conjunction, Eclipse, Predicate, Square, Window};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Input trajectory path; the command line may override it.
    pub file: Option<PathBuf>,
    /// Emit accepted points instead of aggregated passes.
    pub list: bool,
    /// Comma-separated output instead of pipe-delimited.
    pub csv: bool,
    /// Minimum pass duration literal, e.g. `"2m"`.
    pub duration: Option<String>,

    #[serde(rename = "area")]
    pub areas: Vec<Area>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Area {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub margin: f64,
    pub night: bool,
    /// Window bounds as time literals; absent means unbounded.
    pub dtstart: Option<String>,
    pub dtend: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|err| AnalysisError::Config(err.to_string()))
    }

    /// One predicate per configured area.
    pub fn predicates(&self) -> AnalysisResult<Vec<Predicate>> {
        self.areas.iter().map(Area::predicate).collect()
    }

    pub fn min_duration(&self) -> AnalysisResult<Option<Duration>> {
        self.duration
            .as_deref()
            .map(|literal| sattrack_time::parse_duration(literal).map_err(AnalysisError::from))
            .transpose()
    }
}

impl Area {
    /// The labelled conjunction of this area's box, window and eclipse
    /// condition.
    pub fn predicate(&self) -> AnalysisResult<Predicate> {
        let square = Square::new(self.latitude, self.longitude, self.margin)?;
        let window = Window::new(bound(self.dtstart.as_deref())?, bound(self.dtend.as_deref())?);
        Ok(Predicate::All(Conjunction::new(
            self.label.clone(),
            vec![
                Predicate::Area(square),
                Predicate::Window(window),
                Predicate::Eclipse(Eclipse(self.night)),
            ],
        )))
    }
}

fn bound(literal: Option<&str>) -> AnalysisResult<Option<DateTime<Utc>>> {
    literal
        .map(|s| sattrack_time::parse_time(s).map_err(AnalysisError::from))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    const CONFIG: &str = r#"
file = "trajectory.csv"
list = true
csv = false
duration = "2m"

[[area]]
label = "saa"
latitude = -30.0
longitude = -40.0
margin = 25.0
night = false
dtstart = "2018-11-01 00:00:00"

[[area]]
label = "station"
latitude = 48.0
longitude = 11.0
margin = 5.0
night = true
"#;

    #[test]
    fn test_decode() {
        let settings: Settings = toml::from_str(CONFIG).unwrap();
        assert_eq!(settings.file.as_deref(), Some(Path::new("trajectory.csv")));
        assert!(settings.list);
        assert!(!settings.csv);
        assert_eq!(settings.areas.len(), 2);
        assert_eq!(settings.areas[0].label, "saa");
        assert_eq!(settings.areas[1].margin, 5.0);
        assert!(settings.areas[1].night);
        assert_eq!(
            settings.min_duration().unwrap(),
            Some(Duration::from_secs(120))
        );
    }

    #[test]
    fn test_predicates_from_config() {
        let settings: Settings = toml::from_str(CONFIG).unwrap();
        let predicates = settings.predicates().unwrap();
        assert_eq!(predicates.len(), 2);

        let inside = Point {
            when: sattrack_time::parse_time("2018-11-02 00:00:00").unwrap(),
            lat: -30.0,
            lon: -40.0,
            alt: 408.0,
            eclipse: false,
            saa: false,
        };
        let (ok, label) = predicates[0].accept(&inside);
        assert!(ok);
        assert_eq!(label, "saa");

        // Before dtstart the window rejects.
        let early = Point {
            when: sattrack_time::parse_time("2018-10-20 00:00:00").unwrap(),
            ..inside
        };
        assert!(!predicates[0].accept(&early).0);

        // The night-only area needs the eclipse flag.
        let munich = Point {
            lat: 48.0,
            lon: 11.0,
            ..inside
        };
        assert!(!predicates[1].accept(&munich).0);
        let dark = Point {
            eclipse: true,
            ..munich
        };
        assert!(predicates[1].accept(&dark).0);
    }

    #[test]
    fn test_zero_margin_area_fails() {
        let settings: Settings = toml::from_str("[[area]]\nlabel = \"x\"\n").unwrap();
        assert!(matches!(
            settings.predicates(),
            Err(AnalysisError::ZeroMargin)
        ));
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let result: AnalysisResult<Settings> =
            toml::from_str("not toml at all [").map_err(|e| AnalysisError::Config(e.to_string()));
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }
}
