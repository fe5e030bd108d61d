//! Crossing-pass aggregation.

use crate::point::Point;
use crate::predicate::Predicate;
use chrono::TimeDelta;

/// A contiguous run of accepted samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub label: String,
    pub first: Point,
    pub last: Point,
}

impl Pass {
    pub fn duration(&self) -> TimeDelta {
        self.last.when - self.first.when
    }

    /// Chord distance between the end points, kilometers.
    pub fn distance(&self) -> f64 {
        self.last.distance(&self.first)
    }
}

/// Tracks open passes across a point stream, one slot per predicate.
///
/// A pass opens at the first accepted point, extends while consecutive
/// points stay accepted, and closes at the first rejection. Closed passes
/// shorter than the optional minimum duration are dropped silently.
pub struct PassTracker {
    predicates: Vec<Predicate>,
    open: Vec<Option<Pass>>,
    minimum: Option<TimeDelta>,
}

impl PassTracker {
    pub fn new(predicates: Vec<Predicate>, minimum: Option<TimeDelta>) -> Self {
        let open = predicates.iter().map(|_| None).collect();
        Self {
            predicates,
            open,
            minimum,
        }
    }

    /// Returns the first accepting predicate's label for a point, if any.
    pub fn matches(&self, point: &Point) -> Option<&str> {
        self.predicates
            .iter()
            .map(|predicate| predicate.accept(point))
            .find(|(ok, _)| *ok)
            .map(|(_, label)| label)
    }

    /// Feeds one point; returns the passes that closed on it.
    pub fn update(&mut self, point: &Point) -> Vec<Pass> {
        let mut closed = Vec::new();
        for (predicate, slot) in self.predicates.iter().zip(self.open.iter_mut()) {
            let (ok, label) = predicate.accept(point);
            match (ok, slot.as_mut()) {
                (true, Some(pass)) => pass.last = *point,
                (true, None) => {
                    *slot = Some(Pass {
                        label: label.to_string(),
                        first: *point,
                        last: *point,
                    });
                }
                (false, Some(_)) => {
                    if let Some(pass) = slot.take() {
                        closed.push(pass);
                    }
                }
                (false, None) => {}
            }
        }
        self.keep_long_enough(closed)
    }

    /// Closes every open pass at the end of the stream.
    pub fn finish(&mut self) -> Vec<Pass> {
        let closed = self.open.iter_mut().filter_map(Option::take).collect();
        self.keep_long_enough(closed)
    }

    fn keep_long_enough(&self, closed: Vec<Pass>) -> Vec<Pass> {
        match self.minimum {
            Some(minimum) => closed
                .into_iter()
                .filter(|pass| pass.duration() >= minimum)
                .collect(),
            None => closed,
        }
    }
}
