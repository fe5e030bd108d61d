//! Trajectory writers: CSV, pipe-delimited, JSON and XML.

use crate::cli::{Format, Frame};
use anyhow::Result;
use sattrack_core::angle::{to_dms, wrap_degrees, Hemisphere};
use sattrack_orbit::{GeoPoint, OrbitError, TemePoint, TrackResult};
use serde::Serialize;
use std::io::Write;
use std::sync::mpsc::Receiver;

const PROGRAM: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Printer {
    pub format: Format,
    pub frame: Frame,
    pub dms: bool,
    pub round: bool,
}

#[derive(Serialize)]
#[serde(rename = "trajectory")]
struct XmlTrajectory<'a> {
    point: &'a [GeoPoint],
}

#[derive(Serialize)]
#[serde(rename = "trajectory")]
struct XmlRawTrajectory {
    point: Vec<XmlRawPoint>,
}

/// Raw TEME sample with the position components spelled out; the XML
/// serializer cannot flatten the nested vector the way JSON does.
#[derive(Serialize)]
struct XmlRawPoint {
    dtstamp: chrono::DateTime<chrono::Utc>,
    jd: f64,
    x: f64,
    y: f64,
    z: f64,
    eclipse: bool,
    crossing: bool,
}

impl From<&TemePoint> for XmlRawPoint {
    fn from(point: &TemePoint) -> Self {
        Self {
            dtstamp: point.when,
            jd: point.epoch,
            x: point.position.x,
            y: point.position.y,
            z: point.position.z,
            eclipse: point.total,
            crossing: point.saa,
        }
    }
}

impl Printer {
    /// Drains the result stream into the writer.
    ///
    /// Returns the propagation error that terminated the stream, if any,
    /// so the caller can map it to an exit code after the partial output.
    pub fn print(
        &self,
        writer: &mut dyn Write,
        results: Receiver<TrackResult>,
    ) -> Result<Option<OrbitError>> {
        if self.format == Format::Csv {
            writeln!(writer, "#{PROGRAM}-{VERSION}")?;
            writeln!(
                writer,
                "#dtstamp,mjd,altitude,latitude,longitude,eclipse,crossing,epoch"
            )?;
        }

        let mut failure = None;
        for mut result in results {
            match self.format {
                Format::Csv => self.print_csv(writer, &result)?,
                Format::Pipe => self.print_pipe(writer, &result)?,
                Format::Json => self.print_json(writer, &result)?,
                Format::Xml => self.print_xml(writer, &result)?,
            }
            if let Some(error) = result.error.take() {
                failure = Some(error);
            }
        }
        Ok(failure)
    }

    fn raw(&self) -> bool {
        self.frame == Frame::Teme
    }

    /// Output columns `(altitude, latitude, longitude)` of one sample. In
    /// the raw frame the TEME components ride in those slots unchanged.
    fn columns(&self, point: &TemePoint) -> (f64, f64, f64) {
        match self.frame {
            Frame::Teme => (point.position.z, point.position.x, point.position.y),
            Frame::Geodetic => {
                let converted = point.geodetic();
                (converted.alt, converted.lat, self.longitude(converted.lon))
            }
            Frame::Geocentric => {
                let converted = point.geocentric();
                (converted.alt, converted.lat, self.longitude(converted.lon))
            }
        }
    }

    fn longitude(&self, lon: f64) -> f64 {
        if self.round {
            wrap_degrees(lon)
        } else {
            lon
        }
    }

    fn convert(&self, point: &TemePoint) -> GeoPoint {
        match self.frame {
            Frame::Geocentric => point.geocentric(),
            _ => point.geodetic(),
        }
    }

    fn print_csv(&self, writer: &mut dyn Write, result: &TrackResult) -> Result<()> {
        writeln!(writer, "#{}", result.tle[0])?;
        writeln!(writer, "#{}", result.tle[1])?;
        let epoch = result.epoch.value();
        for point in &result.points {
            let (alt, lat, lon) = self.columns(point);
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{}",
                point.when.format("%Y-%m-%dT%H:%M:%S%.6f"),
                point.mjd(),
                alt,
                lat,
                lon,
                u8::from(point.total),
                u8::from(point.saa),
                epoch
            )?;
        }
        Ok(())
    }

    fn print_pipe(&self, writer: &mut dyn Write, result: &TrackResult) -> Result<()> {
        for point in &result.points {
            let (alt, lat, lon) = self.columns(point);
            let when = point.when.format("%Y-%m-%d %H:%M:%S%.6f");
            let eclipse = u8::from(point.total);
            let saa = u8::from(point.saa);
            if self.dms && !self.raw() {
                writeln!(
                    writer,
                    "{} | {:.6} | {:18.5} | {} | {} | {} | {}",
                    when,
                    point.mjd(),
                    alt,
                    to_dms(lat, Hemisphere::Lat),
                    to_dms(lon, Hemisphere::Lon),
                    eclipse,
                    saa
                )?;
            } else {
                writeln!(
                    writer,
                    "{} | {:.6} | {:18.5} | {:18.5} | {:18.5} | {} | {}",
                    when,
                    point.mjd(),
                    alt,
                    lat,
                    lon,
                    eclipse,
                    saa
                )?;
            }
        }
        Ok(())
    }

    fn print_json(&self, writer: &mut dyn Write, result: &TrackResult) -> Result<()> {
        if self.raw() {
            serde_json::to_writer(&mut *writer, &result.points)?;
        } else {
            let points: Vec<GeoPoint> = result.points.iter().map(|p| self.convert(p)).collect();
            serde_json::to_writer(&mut *writer, &points)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn print_xml(&self, writer: &mut dyn Write, result: &TrackResult) -> Result<()> {
        let document = if self.raw() {
            quick_xml::se::to_string(&XmlRawTrajectory {
                point: result.points.iter().map(XmlRawPoint::from).collect(),
            })?
        } else {
            let points: Vec<GeoPoint> = result.points.iter().map(|p| self.convert(p)).collect();
            quick_xml::se::to_string(&XmlTrajectory { point: &points })?
        };
        writeln!(writer, "{document}")?;
        Ok(())
    }
}
