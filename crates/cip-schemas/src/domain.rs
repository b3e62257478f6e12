//! Typed domain records produced by the decoder and consumed by the sink.
//!
//! Invariants:
//! - `id` is derived from the upstream identity only, never from content,
//!   so it stays stable across polls.
//! - `category` only grows: tags are appended once and never replaced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix inserted between the NGSI-LD type prefix and the upstream numeric id.
pub const FACILITY_ID_PREFIX: &str = "se:sundsvall:facilities:";

const ORGANISATION_URN_PREFIX: &str = "urn:ngsi-ld:Organisation:se:sundsvall:facilities:org:";

/// Device URN prefix used for beach temperature sensors.
pub const SENSOR_URN_PREFIX: &str = "urn:ngsi-ld:Device:se:servanet:lora:";

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Beach,
    ExerciseTrail,
    SportsField,
    SportsVenue,
    CityWork,
}

impl EntityKind {
    /// NGSI-LD entity type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Beach => "Beach",
            EntityKind::ExerciseTrail => "ExerciseTrail",
            EntityKind::SportsField => "SportsField",
            EntityKind::SportsVenue => "SportsVenue",
            EntityKind::CityWork => "CityWork",
        }
    }

    pub fn id_prefix(&self) -> &'static str {
        match self {
            EntityKind::Beach => "urn:ngsi-ld:Beach:",
            EntityKind::ExerciseTrail => "urn:ngsi-ld:ExerciseTrail:",
            EntityKind::SportsField => "urn:ngsi-ld:SportsField:",
            EntityKind::SportsVenue => "urn:ngsi-ld:SportsVenue:",
            EntityKind::CityWork => "urn:ngsi-ld:CityWork:",
        }
    }
}

/// Stable entity id for a facility: type prefix + facility prefix + upstream id.
pub fn facility_entity_id(kind: EntityKind, upstream_id: i64) -> String {
    format!("{}{}{}", kind.id_prefix(), FACILITY_ID_PREFIX, upstream_id)
}

pub fn organisation_urn(organization_id: i64) -> String {
    format!("{ORGANISATION_URN_PREFIX}{organization_id}")
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A position is `[longitude, latitude]`, optionally followed by altitude.
pub type Position = Vec<f64>;

/// Geographic geometry. Serializes as a GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

// ---------------------------------------------------------------------------
// Shared attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCommon {
    pub id: String,
    pub name: String,
    pub description: String,
    pub geometry: Option<Geometry>,
    pub category: Vec<String>,
    pub see_also: Vec<String>,
    pub managed_by: Option<String>,
    pub owner: Option<String>,
    pub date_created: Option<DateTime<Utc>>,
    pub date_modified: Option<DateTime<Utc>>,
    pub date_last_prepared: Option<DateTime<Utc>>,
    pub source: Option<String>,
}

impl EntityCommon {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            geometry: None,
            category: Vec::new(),
            see_also: Vec::new(),
            managed_by: None,
            owner: None,
            date_created: None,
            date_modified: None,
            date_last_prepared: None,
            source: None,
        }
    }

    /// Append a category tag unless it is already present.
    pub fn push_category(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.category.contains(&tag) {
            self.category.push(tag);
        }
    }
}

// ---------------------------------------------------------------------------
// Kind-specific records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beach {
    pub common: EntityCommon,
    /// Device URN of the water temperature sensor.
    pub sensor: Option<String>,
    pub nuts_code: Option<String>,
    pub wikidata_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTrail {
    pub common: EntityCommon,
    pub length_km: Option<f64>,
    pub width_cm: Option<f64>,
    /// Normalized to `0.0..=1.0`.
    pub difficulty: Option<f64>,
    pub elevation_gain: Option<f64>,
    /// `"open"` | `"closed"`
    pub status: Option<String>,
    pub payment_required: bool,
    pub area_served: Option<String>,
    pub public_access: Option<String>,
    pub annotations: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportsField {
    pub common: EntityCommon,
    pub public_access: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportsVenue {
    pub common: EntityCommon,
    pub public_access: Option<String>,
}

/// A traffic disruption. The location is carried in `common.geometry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWork {
    pub common: EntityCommon,
    /// RFC 3339, start of the first day.
    pub start_date: String,
    /// RFC 3339, end of the last day.
    pub end_date: String,
}

/// Decoded output, one variant per supported kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainEntity {
    Beach(Beach),
    ExerciseTrail(ExerciseTrail),
    SportsField(SportsField),
    SportsVenue(SportsVenue),
    CityWork(CityWork),
}

impl DomainEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            DomainEntity::Beach(_) => EntityKind::Beach,
            DomainEntity::ExerciseTrail(_) => EntityKind::ExerciseTrail,
            DomainEntity::SportsField(_) => EntityKind::SportsField,
            DomainEntity::SportsVenue(_) => EntityKind::SportsVenue,
            DomainEntity::CityWork(_) => EntityKind::CityWork,
        }
    }

    pub fn common(&self) -> &EntityCommon {
        match self {
            DomainEntity::Beach(e) => &e.common,
            DomainEntity::ExerciseTrail(e) => &e.common,
            DomainEntity::SportsField(e) => &e.common,
            DomainEntity::SportsVenue(e) => &e.common,
            DomainEntity::CityWork(e) => &e.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        match self {
            DomainEntity::Beach(e) => &mut e.common,
            DomainEntity::ExerciseTrail(e) => &mut e.common,
            DomainEntity::SportsField(e) => &mut e.common,
            DomainEntity::SportsVenue(e) => &mut e.common,
            DomainEntity::CityWork(e) => &mut e.common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.common_mut().source = Some(source.into());
    }
}
