//! Disruption ("city work") feed payload.
//!
//! Coordinates are SWEREF 99 TM grid pairs `[easting, northing]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisruptionResponse {
    #[serde(default)]
    pub features: Vec<DisruptionFeature>,
    /// Set by the upstream when it answers 200 OK with an error document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisruptionFeature {
    #[serde(default)]
    pub geometry: DisruptionGeometry,
    pub properties: DisruptionProps,
}

/// A GeoJSON geometry collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisruptionGeometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub geometries: Vec<GeometryMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryMember {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisruptionProps {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub restrictions: Option<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default, alias = "disruptionStart")]
    pub start: String,
    #[serde(default, alias = "disruptionEnd")]
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_upstream_date_aliases() {
        let doc = r#"{"features":[{
            "geometry":{"type":"GeometryCollection","geometries":[
                {"type":"Point","coordinates":[620761.4,6922510.66]}]},
            "properties":{"title":"Norbergsvägen","description":"schakt","restrictions":null,
                "level":"SMALL","disruptionStart":"2022-05-01Z","disruptionEnd":"2022-06-29Z"}}]}"#;

        let r: DisruptionResponse = serde_json::from_str(doc).unwrap();
        assert!(r.error.is_none());
        let p = &r.features[0].properties;
        assert_eq!(p.start, "2022-05-01Z");
        assert_eq!(p.end, "2022-06-29Z");
        assert_eq!(r.features[0].geometry.geometries[0].kind, "Point");
    }

    #[test]
    fn error_member_is_captured() {
        let r: DisruptionResponse = serde_json::from_str(r#"{"error":"quota"}"#).unwrap();
        assert_eq!(r.error.as_deref(), Some("quota"));
        assert!(r.features.is_empty());
    }
}
