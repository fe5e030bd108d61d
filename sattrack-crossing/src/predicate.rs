//! Accept predicates over analyzer points.
//!
//! The variants form a closed set: a geographic square, a half-open time
//! window, an eclipse requirement, and a labelled conjunction of the
//! three. `accept` answers with the pass label on success, the empty
//! string otherwise.

use crate::errors::{AnalysisError, AnalysisResult};
use crate::point::Point;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Predicate {
    Area(Square),
    Window(Window),
    Eclipse(Eclipse),
    All(Conjunction),
}

impl Predicate {
    pub fn accept(&self, point: &Point) -> (bool, &str) {
        match self {
            Self::Area(square) => (square.accept(point), ""),
            Self::Window(window) => (window.accept(point), ""),
            Self::Eclipse(eclipse) => (eclipse.accept(point), ""),
            Self::All(conjunction) => conjunction.accept(point),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Area(square) => fmt::Display::fmt(square, f),
            Self::Window(window) => fmt::Display::fmt(window, f),
            Self::Eclipse(eclipse) => fmt::Display::fmt(eclipse, f),
            Self::All(conjunction) => fmt::Display::fmt(conjunction, f),
        }
    }
}

/// A latitude/longitude box built as center±margin, inclusive on all
/// edges.
///
/// The lesser longitude bound is named `east` and the greater `west`
/// because of how the construction reads for the South Atlantic box this
/// tool grew up around; `accept` tests `lon ∈ [east, west]`. Regions
/// straddling the ±180° antimeridian are not representable and will
/// under-match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub east: f64,
    pub west: f64,
    pub north: f64,
    pub south: f64,
}

impl Square {
    /// Fails on a zero margin, which would describe an empty box.
    pub fn new(lat: f64, lon: f64, margin: f64) -> AnalysisResult<Self> {
        if margin == 0.0 {
            return Err(AnalysisError::ZeroMargin);
        }
        Ok(Self {
            east: lon - margin,
            west: lon + margin,
            north: lat + margin,
            south: lat - margin,
        })
    }

    fn accept(&self, point: &Point) -> bool {
        let ns = point.lat >= self.south && point.lat <= self.north;
        let ew = point.lon >= self.east && point.lon <= self.west;
        ns && ew
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "crossing area: [{:.3}S,{:.3}N]x[{:.3}W,{:.3}E]",
            self.south, self.north, self.west, self.east
        )
    }
}

/// A half-open `[starts, ends)` time window; either bound may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub starts: Option<DateTime<Utc>>,
    pub ends: Option<DateTime<Utc>>,
}

impl Window {
    pub fn new(starts: Option<DateTime<Utc>>, ends: Option<DateTime<Utc>>) -> Self {
        Self { starts, ends }
    }

    pub fn is_unbounded(&self) -> bool {
        self.starts.is_none() && self.ends.is_none()
    }

    fn accept(&self, point: &Point) -> bool {
        if let Some(starts) = self.starts {
            if point.when < starts {
                return false;
            }
        }
        match self.ends {
            Some(ends) => point.when < ends,
            None => true,
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return write!(f, "crossing time range [,]");
        }
        let fmt_bound = |bound: Option<DateTime<Utc>>| {
            bound
                .map(|t| t.to_rfc3339())
                .unwrap_or_default()
        };
        write!(
            f,
            "crossing time range [{},{}]",
            fmt_bound(self.starts),
            fmt_bound(self.ends)
        )
    }
}

/// Requires the full-eclipse flag when set; accepts everything otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eclipse(pub bool);

impl Eclipse {
    fn accept(&self, point: &Point) -> bool {
        !self.0 || point.eclipse
    }
}

impl fmt::Display for Eclipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 {
            write!(f, "crossing night only passes")
        } else {
            write!(f, "crossing day and night passes")
        }
    }
}

/// Accepts when every child accepts, answering with its label.
#[derive(Debug, Clone, Default)]
pub struct Conjunction {
    pub label: String,
    children: Vec<Predicate>,
}

impl Conjunction {
    pub fn new(label: impl Into<String>, children: Vec<Predicate>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    fn accept(&self, point: &Point) -> (bool, &str) {
        for child in &self.children {
            let (ok, _) = child.accept(point);
            if !ok {
                return (false, "");
            }
        }
        (true, &self.label)
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            fmt::Display::fmt(child, f)?;
        }
        Ok(())
    }
}
