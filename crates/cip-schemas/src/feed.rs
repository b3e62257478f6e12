//! Facility feed payload (`GET {base}/list`).
//!
//! The field catalog and the geometry stay as verbatim JSON text. Their
//! interpretation depends on the feature type and the field id, which only
//! the decoder knows about, and a malformed member must only fail its own
//! feature instead of the whole collection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::{to_raw_value, RawValue};

/// Top-level document returned by the facility feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<RawFeature>,
}

/// One upstream facility record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeature {
    pub id: i64,
    pub properties: FeatureProps,
    /// Verbatim geometry object; see [`RawFeature::parse_geometry`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Box<RawValue>>,
}

impl RawFeature {
    /// The upstream type tag (Swedish label, e.g. `"Motionsspår"`).
    pub fn type_tag(&self) -> &str {
        &self.properties.kind
    }

    /// Published and not flagged as deleted.
    pub fn is_live(&self) -> bool {
        self.properties.published && self.properties.deleted.is_none()
    }

    /// `Ok(None)` when the member is absent or `null`.
    pub fn parse_geometry(&self) -> Result<Option<RawGeometry>, serde_json::Error> {
        match self.geometry.as_deref().map(RawValue::get) {
            None | Some("null") => Ok(None),
            Some(raw) => serde_json::from_str(raw).map(Some),
        }
    }

    pub fn set_geometry(&mut self, geometry: &RawGeometry) {
        self.geometry = to_raw_value(geometry).ok();
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureProps {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    /// Verbatim field catalog; see [`FeatureProps::parse_fields`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Box<RawValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<Organisation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Organisation>,
}

impl FeatureProps {
    /// Empty when the catalog is absent or `null`.
    pub fn parse_fields(&self) -> Result<Vec<RawField>, serde_json::Error> {
        match self.fields.as_deref().map(RawValue::get) {
            None | Some("null") => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw),
        }
    }

    pub fn set_fields(&mut self, fields: &[RawField]) {
        self.fields = RawField::catalog(fields);
    }
}

/// Organisation reference attached to a facility (manager or owner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    #[serde(rename = "organizationID")]
    pub organization_id: i64,
    #[serde(default)]
    pub name: String,
}

/// One `(fieldID, rawValue)` entry of the field catalog.
///
/// `value` is absent for some field types (combined trails carry
/// `referencedObjects` instead).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawField {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<RawValue>>,
}

impl RawField {
    /// Build a field from verbatim JSON text, e.g. `RawField::new(109, "\"Lätt\"")`.
    ///
    /// Text that is not valid JSON yields a field without a value.
    pub fn new(id: i64, raw_json: &str) -> Self {
        Self {
            id,
            value: RawValue::from_string(raw_json.to_string()).ok(),
        }
    }

    /// Encode a field list as a verbatim catalog member.
    pub fn catalog(fields: &[RawField]) -> Option<Box<RawValue>> {
        to_raw_value(fields).ok()
    }

    /// Verbatim JSON text of the value, if any.
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref().map(RawValue::get)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Box<RawValue>>,
}

impl RawGeometry {
    pub fn new(kind: impl Into<String>, coordinates_json: &str) -> Self {
        Self {
            kind: kind.into(),
            coordinates: RawValue::from_string(coordinates_json.to_string()).ok(),
        }
    }

    /// Encode as a verbatim feature geometry member.
    pub fn to_raw(&self) -> Option<Box<RawValue>> {
        to_raw_value(self).ok()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
