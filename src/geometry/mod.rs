//! Geometry values and their SRID-tagged text representation.

mod codec;
mod types;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub use codec::{DecodeError, GeometryCodec, SridMode};
pub use types::{
    Geometry, GeometryError, LineString, Point, Polygon, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
    WGS84_SRID,
};

/// Decode geometry text with plain-geometry SRID handling
pub fn decode_geometry(text: &str) -> Result<Geometry, DecodeError> {
    GeometryCodec::geometry().decode(text)
}

/// Encode a geometry to SRID-tagged text
pub fn encode_geometry(geometry: &Geometry) -> String {
    GeometryCodec::geometry().encode(geometry)
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_geometry(self))
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode_geometry(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_text_form() {
        let geometry = decode_geometry("SRID=4326;POINT(13.4 52.5)").unwrap();
        let json = serde_json::to_string(&geometry).unwrap();
        assert_eq!(json, r#""SRID=4326;POINT(13.4 52.5)""#);

        let back: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geometry);
        assert_eq!(back.to_string(), "SRID=4326;POINT(13.4 52.5)");
    }

    #[test]
    fn test_serde_rejects_malformed_text() {
        assert!(serde_json::from_str::<Geometry>(r#""SRID=4326;POINT(oops)""#).is_err());
    }
}
