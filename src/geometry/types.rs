//! Geometry value types anchoring every record in space.
//!
//! Values are always stored latitude-first. The longitude-first wire order is
//! handled exclusively by [`super::GeometryCodec`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// WGS-84 longitude/latitude
pub const WGS84_SRID: u32 = 4326;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Errors raised when constructing an invalid geometry value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("{kind} needs at least {min} points, got {found}")]
    TooFewPoints {
        kind: &'static str,
        min: usize,
        found: usize,
    },

    #[error("mixed SRIDs: expected {expected}, found {found}")]
    MixedSrid { expected: u32, found: u32 },

    #[error("polygon ring is not closed")]
    OpenRing,
}

/// Point on the earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    latitude: f64,
    longitude: f64,
    srid: u32,
}

#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    srid: u32,
}

impl TryFrom<RawPoint> for Point {
    type Error = GeometryError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Point::new(raw.latitude, raw.longitude, raw.srid)
    }
}

impl Point {
    pub fn new(latitude: f64, longitude: f64, srid: u32) -> Result<Self, GeometryError> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(GeometryError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(GeometryError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            srid,
        })
    }

    /// Point in WGS-84
    pub fn wgs84(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        Self::new(latitude, longitude, WGS84_SRID)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn srid(&self) -> u32 {
        self.srid
    }

    /// Same position tagged with another SRID
    pub fn with_srid(self, srid: u32) -> Self {
        Self { srid, ..self }
    }

    /// Same position, ignoring the SRID tag
    pub fn same_position(&self, other: &Point) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

impl From<&Point> for geo::Point<f64> {
    fn from(p: &Point) -> Self {
        geo::Point::new(p.longitude, p.latitude)
    }
}

impl From<&Point> for geo::Coord<f64> {
    fn from(p: &Point) -> Self {
        geo::Coord {
            x: p.longitude,
            y: p.latitude,
        }
    }
}

/// Checks the shared-SRID invariant and returns the common SRID
fn common_srid(points: &[Point]) -> Result<u32, GeometryError> {
    let expected = points.first().map(Point::srid).unwrap_or(WGS84_SRID);
    match points.iter().find(|p| p.srid != expected) {
        Some(p) => Err(GeometryError::MixedSrid {
            expected,
            found: p.srid,
        }),
        None => Ok(expected),
    }
}

fn to_geo_line(points: &[Point]) -> geo::LineString<f64> {
    geo::LineString::new(points.iter().map(geo::Coord::from).collect())
}

/// Ordered sequence of at least two points sharing one SRID.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: Vec<Point>,
}

impl LineString {
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < Self::MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                kind: "linestring",
                min: Self::MIN_POINTS,
                found: points.len(),
            });
        }
        common_srid(&points)?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn srid(&self) -> u32 {
        self.points[0].srid
    }
}

impl From<&LineString> for geo::LineString<f64> {
    fn from(line: &LineString) -> Self {
        to_geo_line(&line.points)
    }
}

/// Closed ring of at least four points (first equals last) sharing one SRID.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<Point>,
}

impl Polygon {
    pub const MIN_POINTS: usize = 4;

    pub fn new(ring: Vec<Point>) -> Result<Self, GeometryError> {
        if ring.len() < Self::MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                kind: "polygon",
                min: Self::MIN_POINTS,
                found: ring.len(),
            });
        }
        common_srid(&ring)?;
        if !to_geo_line(&ring).is_closed() {
            return Err(GeometryError::OpenRing);
        }
        Ok(Self { ring })
    }

    /// Build a polygon from an open ring, closing it if needed
    pub fn close(mut ring: Vec<Point>) -> Result<Self, GeometryError> {
        let needs_closing = match (ring.first(), ring.last()) {
            (Some(first), Some(last)) => ring.len() >= 3 && !first.same_position(last),
            _ => false,
        };
        if needs_closing {
            ring.push(ring[0]);
        }
        Self::new(ring)
    }

    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    pub fn srid(&self) -> u32 {
        self.ring[0].srid
    }

    /// Planar containment test in longitude/latitude space
    pub fn contains(&self, point: &Point) -> bool {
        use geo::Contains;
        geo::Polygon::from(self).contains(&geo::Point::from(point))
    }
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        geo::Polygon::new(to_geo_line(&polygon.ring), vec![])
    }
}

/// Any of the supported geometry values.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
}

impl Geometry {
    pub fn srid(&self) -> u32 {
        match self {
            Geometry::Point(p) => p.srid(),
            Geometry::LineString(l) => l.srid(),
            Geometry::Polygon(p) => p.srid(),
        }
    }

    /// Tag used in the text representation
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::Polygon(_) => "POLYGON",
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Geometry::Point(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Geometry::Point(p)
    }
}

impl From<LineString> for Geometry {
    fn from(l: LineString) -> Self {
        Geometry::LineString(l)
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::encode_geometry(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> Point {
        Point::wgs84(lat, lon).unwrap()
    }

    #[test]
    fn test_point_range_checks() {
        assert!(matches!(
            Point::new(90.5, 0.0, 4326),
            Err(GeometryError::InvalidLatitude(_))
        ));
        assert!(matches!(
            Point::new(0.0, -180.5, 4326),
            Err(GeometryError::InvalidLongitude(_))
        ));
        assert!(matches!(
            Point::new(f64::NAN, 0.0, 4326),
            Err(GeometryError::InvalidLatitude(_))
        ));
        assert!(Point::new(-90.0, 180.0, 0).is_ok());
    }

    #[test]
    fn test_linestring_requires_two_points() {
        let err = LineString::new(vec![p(1.0, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::TooFewPoints {
                kind: "linestring",
                min: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_linestring_rejects_mixed_srid() {
        let err = LineString::new(vec![p(1.0, 1.0), p(2.0, 2.0).with_srid(3857)]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::MixedSrid {
                expected: 4326,
                found: 3857
            }
        );
    }

    #[test]
    fn test_polygon_must_be_closed() {
        let open = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        assert_eq!(Polygon::new(open.clone()), Err(GeometryError::OpenRing));

        let closed = Polygon::close(open).unwrap();
        assert_eq!(closed.ring().len(), 5);
        assert_eq!(closed.ring().first(), closed.ring().last());
    }

    #[test]
    fn test_polygon_contains() {
        let square =
            Polygon::close(vec![p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)]).unwrap();
        assert!(square.contains(&p(1.0, 1.0)));
        assert!(!square.contains(&p(3.0, 1.0)));
    }

    #[test]
    fn test_geo_conversion_swaps_axes() {
        let point = geo::Point::from(&p(52.5, 13.4));
        assert_eq!(point.x(), 13.4);
        assert_eq!(point.y(), 52.5);
    }

    #[test]
    fn test_point_deserialize_validates() {
        let ok: Point =
            serde_json::from_str(r#"{"latitude": 52.5, "longitude": 13.4, "srid": 4326}"#)
                .unwrap();
        assert_eq!(ok, p(52.5, 13.4));

        let bad = serde_json::from_str::<Point>(r#"{"latitude": 152.5, "longitude": 13.4}"#);
        assert!(bad.is_err());
    }
}
