//! Single-element prediction.

use crate::element::Element;
use crate::errors::{OrbitError, OrbitResult};
use crate::kernel::Kernel;
use crate::point::{Region, TemePoint};
use chrono::{DateTime, TimeDelta, Utc};
use sattrack_core::Vector3;
use sattrack_ephemeris::classify_track;
use sattrack_time::JulianDate;
use std::time::Duration;

/// The annotated samples produced from one element, together with the
/// element's raw TLE pair and epoch.
///
/// When a kernel failure cuts the prediction short, `points` holds the
/// samples produced up to the failure and `error` the cause.
#[derive(Debug)]
pub struct TrackResult {
    pub tle: [String; 2],
    /// Epoch of the originating element as a Julian date.
    pub epoch: JulianDate,
    /// Epoch of the originating element as a civil instant.
    pub when: DateTime<Utc>,
    pub points: Vec<TemePoint>,
    pub error: Option<OrbitError>,
}

/// A `std` duration as a chrono delta, millisecond resolution.
pub(crate) fn delta(duration: Duration) -> TimeDelta {
    TimeDelta::milliseconds(duration.as_millis() as i64)
}

/// Snaps an instant up to the next multiple of `step`.
pub(crate) fn snap(t: DateTime<Utc>, step: Duration) -> DateTime<Utc> {
    let step_ms = step.as_millis() as i64;
    let shifted = t + delta(step);
    let over = shifted.timestamp_millis().rem_euclid(step_ms);
    shifted - TimeDelta::milliseconds(over)
}

impl Element {
    /// Predicts `⌈period/step⌉` samples starting at `base`, or at the
    /// element epoch snapped up to the step grid when no base is given.
    ///
    /// Eclipse state is computed in one batch over the whole track once
    /// the kernel loop finishes; the optional region marks each sample's
    /// crossing flag from its geodetic conversion.
    pub fn predict(
        &self,
        period: Duration,
        step: Duration,
        base: Option<DateTime<Utc>>,
        region: Option<&dyn Region>,
    ) -> OrbitResult<TrackResult> {
        if step.is_zero() || period < step {
            return Err(OrbitError::ShortPeriod);
        }
        let kernel = Kernel::init(self)?;

        let start = base.unwrap_or_else(|| snap(self.when, step));
        let count = period.as_millis().div_ceil(step.as_millis()) as usize;

        let mut points = Vec::with_capacity(count);
        let mut error = None;
        for k in 0..count {
            let when = start + delta(step) * k as i32;
            let offset = match (when - self.when).num_microseconds() {
                Some(us) => us as f64 / 60e6,
                None => (when - self.when).num_milliseconds() as f64 / 60e3,
            };

            let (position, _velocity) = match kernel.step(offset) {
                Ok(state) => state,
                Err(err) => {
                    error = Some(err);
                    break;
                }
            };
            points.push(TemePoint {
                when,
                epoch: self.epoch.add_minutes(offset).value(),
                position,
                saa: false,
                total: false,
                partial: false,
            });
        }

        let meters: Vec<Vector3> = points.iter().map(|p| p.position * 1_000.0).collect();
        let dates: Vec<f64> = points.iter().map(|p| p.epoch).collect();
        for (point, status) in points.iter_mut().zip(classify_track(&meters, &dates)) {
            point.total = status.umbra;
            point.partial = status.penumbra;
        }

        if let Some(region) = region {
            for point in points.iter_mut() {
                point.saa = region.contains(&point.geodetic());
            }
        }

        Ok(TrackResult {
            tle: self.lines.clone(),
            epoch: self.epoch,
            when: self.when,
            points,
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    const LINE1: &str = "1 25544U 98067A   18304.35925926  .00001207  00000-0  25703-4 0  9998";
    const LINE2: &str = "2 25544  51.6416 264.9105 0005411 308.4548 133.5520 15.53872777139582";

    fn minute() -> Duration {
        Duration::from_secs(60)
    }

    #[test]
    fn test_snap_rounds_up_to_grid() {
        let t = Utc.with_ymd_and_hms(2018, 10, 31, 8, 37, 20).unwrap();
        let snapped = snap(t, minute());
        assert_eq!(
            snapped,
            Utc.with_ymd_and_hms(2018, 10, 31, 8, 38, 0).unwrap()
        );

        let aligned = Utc.with_ymd_and_hms(2018, 10, 31, 8, 38, 0).unwrap();
        assert_eq!(
            snap(aligned, minute()),
            Utc.with_ymd_and_hms(2018, 10, 31, 8, 39, 0).unwrap()
        );
    }

    #[test]
    fn test_short_period_is_rejected() {
        let element = Element::new(LINE1, LINE2).unwrap();
        match element.predict(Duration::from_secs(30), minute(), None, None) {
            Err(OrbitError::ShortPeriod) => {}
            other => panic!("expected ShortPeriod, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_count_and_spacing() {
        let element = Element::new(LINE1, LINE2).unwrap();
        let result = element
            .predict(Duration::from_secs(600), minute(), None, None)
            .unwrap();
        assert!(result.error.is_none());
        assert_eq!(result.points.len(), 10);

        for pair in result.points.windows(2) {
            assert_eq!(pair[1].when - pair[0].when, TimeDelta::seconds(60));
        }
        assert_eq!(result.points[0].when.second(), 0);
    }

    #[test]
    fn test_base_overrides_snap() {
        let element = Element::new(LINE1, LINE2).unwrap();
        let base = Utc.with_ymd_and_hms(2018, 10, 31, 9, 15, 30).unwrap();
        let result = element
            .predict(Duration::from_secs(300), minute(), Some(base), None)
            .unwrap();
        assert_eq!(result.points[0].when, base);
    }

    #[test]
    fn test_ceil_partial_step() {
        let element = Element::new(LINE1, LINE2).unwrap();
        let result = element
            .predict(Duration::from_secs(90), minute(), None, None)
            .unwrap();
        assert_eq!(result.points.len(), 2);
    }

    #[test]
    fn test_points_carry_epoch_julian_dates() {
        let element = Element::new(LINE1, LINE2).unwrap();
        let result = element
            .predict(Duration::from_secs(120), minute(), None, None)
            .unwrap();
        let first = &result.points[0];
        // 2018-10-31 08:38:00 UT
        assert!(
            (first.epoch - 2_458_422.859_722_222).abs() < 1e-8,
            "epoch = {}",
            first.epoch
        );
    }
}
