//! NGSI-LD document model and the mapping from domain entities to it.
//!
//! Attributes are kept in a `serde_json::Map`, so documents serialize with
//! a stable key order.

use chrono::{DateTime, SecondsFormat, Utc};
use cip_schemas::{DomainEntity, EntityCommon, ExerciseTrail, Geometry};
use serde_json::{json, Map, Value};

/// Context attached to every document sent to the broker.
pub const DEFAULT_CONTEXT: &str = "https://uri.etsi.org/ngsi-ld/v1/ngsi-ld-core-context.jsonld";

pub type Attributes = Map<String, Value>;

/// A full entity: id, type and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct NgsiEntity {
    pub id: String,
    pub kind: String,
    pub attributes: Attributes,
}

impl NgsiEntity {
    /// Create body: `id`, `type`, attributes and `@context`.
    pub fn to_document(&self) -> Value {
        let mut doc = self.attributes.clone();
        doc.insert("id".to_string(), Value::String(self.id.clone()));
        doc.insert("type".to_string(), Value::String(self.kind.clone()));
        doc.insert("@context".to_string(), json!([DEFAULT_CONTEXT]));
        Value::Object(doc)
    }
}

/// Merge body: the attributes plus `@context`.
pub fn fragment_document(attributes: &Attributes) -> Value {
    let mut doc = attributes.clone();
    doc.insert("@context".to_string(), json!([DEFAULT_CONTEXT]));
    Value::Object(doc)
}

// ---------------------------------------------------------------------------
// Attribute encoders
// ---------------------------------------------------------------------------

pub fn property(value: impl Into<Value>) -> Value {
    json!({ "type": "Property", "value": value.into() })
}

pub fn number(value: f64, unit_code: Option<&str>) -> Value {
    let mut p = json!({ "type": "Property", "value": value });
    if let (Some(unit), Some(obj)) = (unit_code, p.as_object_mut()) {
        obj.insert("unitCode".to_string(), Value::String(unit.to_string()));
    }
    p
}

pub fn date_time(value: &DateTime<Utc>) -> Value {
    date_time_text(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn date_time_text(rfc3339: &str) -> Value {
    property(json!({ "@type": "DateTime", "@value": rfc3339 }))
}

pub fn relationship(object: impl Into<Value>) -> Value {
    json!({ "type": "Relationship", "object": object.into() })
}

pub fn geo_property(geometry: &Geometry) -> Value {
    json!({ "type": "GeoProperty", "value": geometry })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (value * f).round() / f
}

// ---------------------------------------------------------------------------
// Domain → NGSI-LD
// ---------------------------------------------------------------------------

impl From<&DomainEntity> for NgsiEntity {
    fn from(entity: &DomainEntity) -> Self {
        let mut attrs = common_attributes(entity.common());

        match entity {
            DomainEntity::Beach(b) => {
                if let Some(sensor) = &b.sensor {
                    attrs.insert("refSeeAlso".to_string(), relationship(json!([sensor])));
                }
            }
            DomainEntity::ExerciseTrail(t) => trail_attributes(t, &mut attrs),
            DomainEntity::SportsField(f) => {
                insert_text(&mut attrs, "publicAccess", f.public_access.as_deref());
            }
            DomainEntity::SportsVenue(v) => {
                insert_text(&mut attrs, "publicAccess", v.public_access.as_deref());
            }
            DomainEntity::CityWork(cw) => {
                attrs.insert("startDate".to_string(), date_time_text(&cw.start_date));
                attrs.insert("endDate".to_string(), date_time_text(&cw.end_date));
            }
        }

        NgsiEntity {
            id: entity.id().to_string(),
            kind: entity.kind().type_name().to_string(),
            attributes: attrs,
        }
    }
}

fn insert_text(attrs: &mut Attributes, key: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        attrs.insert(key.to_string(), property(v));
    }
}

fn common_attributes(c: &EntityCommon) -> Attributes {
    let mut attrs = Attributes::new();

    attrs.insert("name".to_string(), property(c.name.as_str()));
    insert_text(&mut attrs, "description", Some(c.description.as_str()));

    if let Some(g) = &c.geometry {
        attrs.insert("location".to_string(), geo_property(g));
    }
    if !c.category.is_empty() {
        attrs.insert("category".to_string(), property(c.category.clone()));
    }
    if !c.see_also.is_empty() {
        attrs.insert("seeAlso".to_string(), property(c.see_also.clone()));
    }
    if let Some(urn) = &c.managed_by {
        attrs.insert("managedBy".to_string(), relationship(urn.as_str()));
    }
    if let Some(urn) = &c.owner {
        attrs.insert("owner".to_string(), relationship(urn.as_str()));
    }
    if let Some(dt) = &c.date_created {
        attrs.insert("dateCreated".to_string(), date_time(dt));
    }
    if let Some(dt) = &c.date_modified {
        attrs.insert("dateModified".to_string(), date_time(dt));
    }
    if let Some(dt) = &c.date_last_prepared {
        attrs.insert("dateLastPreparation".to_string(), date_time(dt));
    }
    insert_text(&mut attrs, "source", c.source.as_deref());

    attrs
}

fn trail_attributes(t: &ExerciseTrail, attrs: &mut Attributes) {
    let payment = if t.payment_required { "yes" } else { "no" };
    attrs.insert("paymentRequired".to_string(), property(payment));

    insert_text(attrs, "areaServed", t.area_served.as_deref());
    insert_text(attrs, "status", t.status.as_deref());
    insert_text(attrs, "publicAccess", t.public_access.as_deref());
    insert_text(attrs, "annotations", t.annotations.as_deref());

    if let Some(km) = t.length_km.filter(|v| *v > 0.0) {
        attrs.insert("length".to_string(), number(km, None));
    }
    if let Some(cm) = t.width_cm.map(|v| round_to(v, 1)).filter(|v| *v > 0.0) {
        attrs.insert("width".to_string(), number(cm, Some("CMT")));
    }
    // 0.0 is the easiest level, not "unset"
    if let Some(d) = t.difficulty {
        attrs.insert("difficulty".to_string(), number(round_to(d, 2), None));
    }
    if let Some(m) = t.elevation_gain.map(|v| round_to(v, 1)).filter(|v| *v > 0.0) {
        attrs.insert("elevationGain".to_string(), number(m, Some("MTR")));
    }
}
