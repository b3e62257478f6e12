//! Outdoor activity surfaces. Only ice surfaces are kept; any other
//! activity area decodes to `None`.

use cip_schemas::{DomainEntity, EntityKind, RawFeature, SportsField};

use crate::facility::live_common;
use crate::field::{apply_fields, field_catalog, FieldFn, FieldValue, PUBLIC_ACCESS};
use crate::DecodeError;

struct Builder {
    field: SportsField,
    ice_surface: bool,
}

const FIELDS: &[(i64, FieldFn<Builder>)] = &[
    (1, description),
    (137, skating),
    (138, hockey),
    (139, bandy),
    (153, public_access),
    (279, floodlit),
];

pub(crate) fn decode(feature: &RawFeature) -> Result<Option<DomainEntity>, DecodeError> {
    let mut b = Builder {
        field: SportsField {
            common: live_common(EntityKind::SportsField, feature)?,
            public_access: None,
        },
        ice_surface: false,
    };
    apply_fields(&mut b, &field_catalog(feature)?, FIELDS)?;

    if !b.ice_surface {
        return Ok(None);
    }
    b.field.common.push_category("ice-rink");
    Ok(Some(DomainEntity::SportsField(b.field)))
}

fn description(b: &mut Builder, v: &FieldValue) -> Result<(), DecodeError> {
    b.field.common.description = v.text().to_string();
    Ok(())
}

fn surface(b: &mut Builder, v: &FieldValue, tag: &str) {
    if v.is_yes() {
        b.ice_surface = true;
        b.field.common.push_category(tag);
    }
}

fn skating(b: &mut Builder, v: &FieldValue) -> Result<(), DecodeError> {
    surface(b, v, "skating");
    Ok(())
}

fn hockey(b: &mut Builder, v: &FieldValue) -> Result<(), DecodeError> {
    surface(b, v, "hockey");
    Ok(())
}

fn bandy(b: &mut Builder, v: &FieldValue) -> Result<(), DecodeError> {
    surface(b, v, "bandy");
    Ok(())
}

fn public_access(b: &mut Builder, v: &FieldValue) -> Result<(), DecodeError> {
    b.field.public_access = Some(v.lookup(PUBLIC_ACCESS)?.to_string());
    Ok(())
}

fn floodlit(b: &mut Builder, v: &FieldValue) -> Result<(), DecodeError> {
    if v.is_yes() {
        b.field.common.push_category("floodlit");
    }
    Ok(())
}
