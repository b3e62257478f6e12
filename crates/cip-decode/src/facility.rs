//! Facility classification and the parts of decoding every kind shares.

use cip_schemas::{
    facility_entity_id, organisation_urn, parse_upstream_time, DomainEntity, EntityCommon,
    EntityKind, RawFeature, SportsField, SportsVenue,
};

use crate::geometry::feature_geometry;
use crate::{beach, sports_field, sports_venue, trail, DecodeError};

/// Result of decoding one facility feature.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Entity(DomainEntity),
    /// Supported type, but this record is deliberately not represented
    /// (e.g. a sports field without an ice surface).
    Ignored(&'static str),
    Failed(DecodeError),
}

/// Map the upstream type tag to an entity kind. `None` for everything the
/// sink does not model.
pub fn classify(type_tag: &str) -> Option<EntityKind> {
    match type_tag {
        "Strandbad" => Some(EntityKind::Beach),
        "Cykelled" | "Motionsspår" | "Långfärdsskridskoled" | "Skidlift" | "Skidpist"
        | "Skidspår" => Some(EntityKind::ExerciseTrail),
        "Aktivitetsyta" => Some(EntityKind::SportsField),
        "Badhus" | "Ishall" | "Sporthall" => Some(EntityKind::SportsVenue),
        _ => None,
    }
}

/// Decode one facility feature.
///
/// A feature that is no longer live decodes to a minimal entity carrying
/// only id and name. Its fields and geometry are not read, so a retired
/// record with broken content can still be deleted downstream.
pub fn decode(feature: &RawFeature) -> DecodeOutcome {
    let Some(kind) = classify(feature.type_tag()) else {
        return DecodeOutcome::Ignored("unsupported facility type");
    };

    if !feature.is_live() {
        return match minimal_entity(kind, feature) {
            Some(entity) => DecodeOutcome::Entity(entity),
            None => DecodeOutcome::Ignored("not a facility kind"),
        };
    }

    let decoded = match kind {
        EntityKind::Beach => beach::decode(feature).map(Some),
        EntityKind::ExerciseTrail => trail::decode(feature).map(Some),
        EntityKind::SportsField => sports_field::decode(feature),
        EntityKind::SportsVenue => sports_venue::decode(feature).map(Some),
        EntityKind::CityWork => return DecodeOutcome::Ignored("not a facility kind"),
    };

    match decoded {
        Ok(Some(entity)) => DecodeOutcome::Entity(entity),
        Ok(None) => DecodeOutcome::Ignored("no recognized surface"),
        Err(e) => DecodeOutcome::Failed(e),
    }
}

fn minimal_entity(kind: EntityKind, feature: &RawFeature) -> Option<DomainEntity> {
    let common = base_common(kind, feature);
    let entity = match kind {
        EntityKind::Beach => DomainEntity::Beach(beach::empty(common)),
        EntityKind::ExerciseTrail => DomainEntity::ExerciseTrail(trail::empty(common)),
        EntityKind::SportsField => DomainEntity::SportsField(SportsField {
            common,
            public_access: None,
        }),
        EntityKind::SportsVenue => DomainEntity::SportsVenue(SportsVenue {
            common,
            public_access: None,
        }),
        EntityKind::CityWork => return None,
    };
    Some(entity)
}

fn base_common(kind: EntityKind, feature: &RawFeature) -> EntityCommon {
    EntityCommon::new(
        facility_entity_id(kind, feature.id),
        feature.properties.name.clone(),
    )
}

/// Id, name, dates, organisations and geometry of a live feature.
pub(crate) fn live_common(
    kind: EntityKind,
    feature: &RawFeature,
) -> Result<EntityCommon, DecodeError> {
    let props = &feature.properties;
    let mut common = base_common(kind, feature);

    common.date_created = props.created.as_deref().and_then(parse_upstream_time);
    common.date_modified = props.updated.as_deref().and_then(parse_upstream_time);
    common.managed_by = props
        .manager
        .as_ref()
        .map(|o| organisation_urn(o.organization_id));
    common.owner = props
        .owner
        .as_ref()
        .map(|o| organisation_urn(o.organization_id));
    common.geometry = feature_geometry(feature)?;

    Ok(common)
}
