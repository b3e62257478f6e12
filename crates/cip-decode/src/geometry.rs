use cip_schemas::{Geometry, Position, RawFeature, RawGeometry};
use serde::de::DeserializeOwned;

use crate::DecodeError;

/// Decode facility geometry. `Ok(None)` when the upstream sent no coordinates.
pub fn decode_geometry(raw: &RawGeometry) -> Result<Option<Geometry>, DecodeError> {
    let Some(coords) = raw.coordinates.as_deref().map(|v| v.get()) else {
        return Ok(None);
    };

    let geometry = match raw.kind.as_str() {
        "Point" => Geometry::Point(parse::<Position>(coords)?),
        "LineString" => Geometry::LineString(parse(coords)?),
        "MultiLineString" => Geometry::MultiLineString(parse(coords)?),
        "Polygon" => Geometry::Polygon(parse(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(parse(coords)?),
        other => return Err(DecodeError::UnsupportedGeometry(other.to_string())),
    };
    Ok(Some(geometry))
}

/// Parse and decode the geometry member of a facility feature.
pub fn feature_geometry(feature: &RawFeature) -> Result<Option<Geometry>, DecodeError> {
    match feature.parse_geometry() {
        Ok(Some(raw)) => decode_geometry(&raw),
        Ok(None) => Ok(None),
        Err(e) => Err(DecodeError::Geometry(e.to_string())),
    }
}

fn parse<T: DeserializeOwned>(coords: &str) -> Result<T, DecodeError> {
    serde_json::from_str(coords).map_err(|e| DecodeError::Geometry(e.to_string()))
}
