//! SRID-tagged text codec.
//!
//! Two input families are accepted:
//! - the bare pair `(lat, lon)`, producing SRID 0;
//! - extended text `SRID=<n>;POINT(<lon> <lat>)`, `LINESTRING(...)`, `POLYGON((...))`.
//!
//! On the wire the axis order is longitude first. In memory it is latitude
//! first. This module is the only place that swaps them.
//!
//! Text that cannot be parsed is [`DecodeError::Malformed`]. Text that parses
//! but describes an impossible value (latitude beyond 90, open polygon ring,
//! too few points) is [`DecodeError::Invalid`], carrying the
//! [`GeometryError`] raised by the value constructor.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::types::{Geometry, GeometryError, LineString, Point, Polygon, WGS84_SRID};

static EXTENDED_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*(?:SRID\s*=\s*([^;]*);)?\s*(POINT|LINESTRING|POLYGON)\s*\((.*)\)\s*$")
        .expect("extended text pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("malformed geometry text: {0}")]
    Malformed(String),

    #[error("invalid geometry: {0}")]
    Invalid(#[from] GeometryError),
}

fn malformed(msg: impl Into<String>) -> DecodeError {
    DecodeError::Malformed(msg.into())
}

/// How a missing or zero SRID is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SridMode {
    /// Plain geometry columns: an explicit SRID of 0 is kept.
    #[default]
    Geometry,
    /// Geography columns: an explicit SRID of 0 becomes WGS-84.
    Geography,
}

/// Encoder/decoder for geometry text.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryCodec {
    mode: SridMode,
}

impl GeometryCodec {
    pub const fn geometry() -> Self {
        Self {
            mode: SridMode::Geometry,
        }
    }

    pub const fn geography() -> Self {
        Self {
            mode: SridMode::Geography,
        }
    }

    pub fn mode(&self) -> SridMode {
        self.mode
    }

    fn normalize_srid(&self, srid: Option<u32>) -> u32 {
        match (srid, self.mode) {
            (None, _) => WGS84_SRID,
            (Some(0), SridMode::Geography) => WGS84_SRID,
            (Some(srid), _) => srid,
        }
    }

    /// Decode raw bytes, rejecting anything that is not UTF-8 text
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Geometry, DecodeError> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| malformed(format!("not text: {}", e)))?;
        self.decode(text)
    }

    pub fn decode(&self, text: &str) -> Result<Geometry, DecodeError> {
        let trimmed = text.trim();
        if trimmed.starts_with('(') {
            return decode_pair(trimmed).map(Geometry::Point);
        }

        let caps = EXTENDED_TEXT
            .captures(trimmed)
            .ok_or_else(|| malformed(format!("unrecognized geometry text '{}'", trimmed)))?;

        let srid = match caps.get(1) {
            Some(m) => Some(
                m.as_str()
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| malformed(format!("bad SRID '{}'", m.as_str())))?,
            ),
            None => None,
        };
        let srid = self.normalize_srid(srid);
        let body = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

        let tag = caps
            .get(2)
            .map(|m| m.as_str().to_ascii_uppercase())
            .unwrap_or_default();
        debug!("Decoding {} with SRID {}", tag, srid);

        match tag.as_str() {
            "POINT" => Ok(Geometry::Point(parse_vertex(body, srid)?)),
            "LINESTRING" => Ok(Geometry::LineString(LineString::new(parse_vertices(
                body, srid,
            )?)?)),
            "POLYGON" => {
                let ring = single_ring(body)?;
                Ok(Geometry::Polygon(Polygon::new(parse_vertices(ring, srid)?)?))
            }
            other => Err(malformed(format!("unsupported geometry type '{}'", other))),
        }
    }

    /// Encode to SRID-tagged text, longitude first
    pub fn encode(&self, geometry: &Geometry) -> String {
        let body = match geometry {
            Geometry::Point(p) => format_vertex(p),
            Geometry::LineString(line) => format_vertices(line.points()),
            Geometry::Polygon(polygon) => format!("({})", format_vertices(polygon.ring())),
        };
        format!("SRID={};{}({})", geometry.srid(), geometry.type_name(), body)
    }

    /// Encode a point in the bare `(lat, lon)` form; the SRID is dropped
    pub fn encode_pair(point: &Point) -> String {
        format!("({}, {})", point.latitude(), point.longitude())
    }
}

/// Bare `(lat, lon)` pair
fn decode_pair(text: &str) -> Result<Point, DecodeError> {
    let inner = text
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| malformed(format!("unbalanced parentheses in '{}'", text)))?;

    let values: Vec<f64> = inner
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed(format!("expected two numbers in '{}'", text)))?;

    match values.as_slice() {
        [lat, lon] => Ok(Point::new(*lat, *lon, 0)?),
        _ => Err(malformed(format!(
            "expected exactly two numbers in '{}', got {}",
            text,
            values.len()
        ))),
    }
}

/// `<lon> <lat>`
fn parse_vertex(text: &str, srid: u32) -> Result<Point, DecodeError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [lon, lat] = parts.as_slice() else {
        return Err(malformed(format!("vertex '{}' is not two numbers", text.trim())));
    };
    let lon: f64 = lon
        .parse()
        .map_err(|_| malformed(format!("bad longitude '{}'", lon)))?;
    let lat: f64 = lat
        .parse()
        .map_err(|_| malformed(format!("bad latitude '{}'", lat)))?;
    Ok(Point::new(lat, lon, srid)?)
}

fn parse_vertices(text: &str, srid: u32) -> Result<Vec<Point>, DecodeError> {
    text.split(',').map(|v| parse_vertex(v, srid)).collect()
}

/// Strip the ring parentheses of a polygon body. Interior rings are rejected.
fn single_ring(body: &str) -> Result<&str, DecodeError> {
    let ring = body
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| malformed("polygon ring must be parenthesized"))?;
    if ring.contains(['(', ')']) {
        return Err(malformed("polygons with interior rings are not supported"));
    }
    Ok(ring)
}

fn format_vertex(p: &Point) -> String {
    format!("{} {}", p.longitude(), p.latitude())
}

fn format_vertices(points: &[Point]) -> String {
    points
        .iter()
        .map(format_vertex)
        .collect::<Vec<_>>()
        .join(",")
}
