//! Indoor venues: swimming pools, ice halls and sports halls.

use cip_schemas::{DomainEntity, EntityKind, RawFeature, SportsVenue};

use crate::facility::live_common;
use crate::field::{apply_fields, field_catalog, FieldFn, FieldValue, PUBLIC_ACCESS};
use crate::DecodeError;

const FIELDS: &[(i64, FieldFn<SportsVenue>)] =
    &[(78, description), (151, see_also), (200, public_access)];

pub(crate) fn decode(feature: &RawFeature) -> Result<DomainEntity, DecodeError> {
    let mut venue = SportsVenue {
        common: live_common(EntityKind::SportsVenue, feature)?,
        public_access: None,
    };

    if let Some(tag) = type_category(feature.type_tag()) {
        venue.common.push_category(tag);
    }
    apply_fields(&mut venue, &field_catalog(feature)?, FIELDS)?;

    Ok(DomainEntity::SportsVenue(venue))
}

fn type_category(type_tag: &str) -> Option<&'static str> {
    match type_tag {
        "Badhus" => Some("swimming-pool"),
        "Ishall" => Some("ice-rink"),
        "Sporthall" => Some("sports-hall"),
        _ => None,
    }
}

fn description(v: &mut SportsVenue, f: &FieldValue) -> Result<(), DecodeError> {
    v.common.description = f.text().to_string();
    Ok(())
}

fn see_also(v: &mut SportsVenue, f: &FieldValue) -> Result<(), DecodeError> {
    v.common.see_also = vec![f.unescaped()];
    Ok(())
}

fn public_access(v: &mut SportsVenue, f: &FieldValue) -> Result<(), DecodeError> {
    v.public_access = Some(f.lookup(PUBLIC_ACCESS)?.to_string());
    Ok(())
}
