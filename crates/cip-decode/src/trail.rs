//! Exercise trails: ski tracks, bike trails, slopes, lifts, skating routes.

use cip_schemas::{DomainEntity, EntityCommon, EntityKind, ExerciseTrail, RawFeature};

use crate::facility::live_common;
use crate::field::{apply_fields, field_catalog, FieldFn, FieldValue, PUBLIC_ACCESS};
use crate::DecodeError;

const STATUS: &[(&str, &str)] = &[("Ja", "open"), ("Nej", "closed")];

const DIFFICULTY: &[(&str, f64)] = &[
    ("Mycket lätt", 0.0),
    ("Lätt", 1.0),
    ("Medelsvår", 2.0),
    ("Svår", 3.0),
    ("Mycket svår", 4.0),
];

const BIKE_TRACK: &[(&str, &str)] = &[
    ("Crosscountry", "bike-track-xc"),
    ("Enduro", "bike-track-enduro"),
    ("Flow", "bike-track-flow"),
];

const LIFT: &[(&str, &str)] = &[("Bygellift", "anchor-lift"), ("Knapplift", "button-lift")];

const FIELDS: &[(i64, FieldFn<ExerciseTrail>)] = &[
    (99, length),
    (100, elevation_gain),
    (102, status),
    (103, floodlit),
    (104, payment),
    (109, difficulty),
    (110, description),
    (114, bike_track),
    (134, area_served),
    (248, ski_classic),
    (250, ski_classic),
    (249, ski_skate),
    (251, ski_skate),
    (282, public_access),
    (283, see_also),
    (284, lift),
    (294, annotations),
    (313, width),
];

pub(crate) fn empty(common: EntityCommon) -> ExerciseTrail {
    ExerciseTrail {
        common,
        length_km: None,
        width_cm: None,
        difficulty: None,
        elevation_gain: None,
        status: None,
        payment_required: false,
        area_served: None,
        public_access: None,
        annotations: None,
    }
}

pub(crate) fn decode(feature: &RawFeature) -> Result<DomainEntity, DecodeError> {
    let mut trail = empty(live_common(EntityKind::ExerciseTrail, feature)?);

    if let Some(tag) = type_category(feature.type_tag()) {
        trail.common.push_category(tag);
    }
    apply_fields(&mut trail, &field_catalog(feature)?, FIELDS)?;

    tracing::debug!(feature_id = feature.id, name = %trail.common.name, "decoded exercise trail");
    Ok(DomainEntity::ExerciseTrail(trail))
}

fn type_category(type_tag: &str) -> Option<&'static str> {
    match type_tag {
        "Långfärdsskridskoled" => Some("ice-skating"),
        "Cykelled" => Some("bike-track"),
        "Skidpist" => Some("ski-slope"),
        "Skidlift" => Some("ski-lift"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Field decoders
// ---------------------------------------------------------------------------

fn length(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.length_km = v.number()?.map(|m| m / 1000.0);
    Ok(())
}

fn elevation_gain(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.elevation_gain = v.number()?;
    Ok(())
}

fn status(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.status = Some(v.lookup(STATUS)?.to_string());
    Ok(())
}

fn floodlit(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    if v.is_yes() {
        t.common.push_category("floodlit");
    }
    Ok(())
}

fn payment(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.payment_required = v.text() != "Nej";
    Ok(())
}

fn difficulty(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.difficulty = Some(v.lookup(DIFFICULTY)? / 4.0);
    Ok(())
}

fn description(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.common.description = v.text().to_string();
    Ok(())
}

fn bike_track(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.common.push_category(v.lookup(BIKE_TRACK)?);
    Ok(())
}

fn area_served(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.area_served = Some(v.text().to_string());
    Ok(())
}

fn ski_classic(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    if v.is_yes() {
        t.common.push_category("ski-classic");
    }
    Ok(())
}

fn ski_skate(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    if v.is_yes() {
        t.common.push_category("ski-skate");
    }
    Ok(())
}

fn public_access(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.public_access = Some(v.lookup(PUBLIC_ACCESS)?.to_string());
    Ok(())
}

fn see_also(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.common.see_also = vec![v.unescaped()];
    Ok(())
}

fn lift(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.common.push_category(v.lookup(LIFT)?);
    Ok(())
}

fn annotations(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    t.annotations = Some(v.unescaped());
    Ok(())
}

/// `"150 cm"`; the unit suffix is optional.
fn width(t: &mut ExerciseTrail, v: &FieldValue) -> Result<(), DecodeError> {
    let text = v.text().trim();
    let number = text.strip_suffix("cm").unwrap_or(text).trim();
    if number.is_empty() {
        return Ok(());
    }
    t.width_cm = Some(number.parse().map_err(|_| v.invalid_number(text))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cip_schemas::{FeatureProps, RawField, RawGeometry};

    fn trail(kind: &str, fields: Vec<RawField>) -> RawFeature {
        RawFeature {
            id: 641,
            properties: FeatureProps {
                name: "Motionsspår Stadsbacken".to_string(),
                kind: kind.to_string(),
                published: true,
                fields: RawField::catalog(&fields),
                ..Default::default()
            },
            geometry: RawGeometry::new("LineString", "[[17.30,62.36],[17.31,62.37]]").to_raw(),
        }
    }

    fn decoded(kind: &str, fields: Vec<RawField>) -> ExerciseTrail {
        match decode(&trail(kind, fields)).unwrap() {
            DomainEntity::ExerciseTrail(t) => t,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn difficulty_label_is_normalized() {
        let t = decoded("Motionsspår", vec![RawField::new(109, "\"Lätt\"")]);
        assert_eq!(t.difficulty, Some(0.25));

        let t = decoded("Motionsspår", vec![RawField::new(109, "\"Mycket svår\"")]);
        assert_eq!(t.difficulty, Some(1.0));
    }

    #[test]
    fn unknown_difficulty_fails() {
        let err = decode(&trail("Motionsspår", vec![RawField::new(109, "\"Okänd\"")])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownEnumValue {
                field_id: 109,
                value: "Okänd".to_string()
            }
        );
    }

    #[test]
    fn numbers_and_units() {
        let t = decoded(
            "Skidspår",
            vec![
                RawField::new(99, "4700"),
                RawField::new(100, "35"),
                RawField::new(313, "\"150 cm\""),
            ],
        );
        assert_eq!(t.length_km, Some(4.7));
        assert_eq!(t.elevation_gain, Some(35.0));
        assert_eq!(t.width_cm, Some(150.0));
    }

    #[test]
    fn bad_width_is_invalid_number() {
        let err = decode(&trail("Skidspår", vec![RawField::new(313, "\"bred cm\"")])).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidNumber { field_id: 313, .. }));
    }

    #[test]
    fn categories_accumulate_in_order() {
        let t = decoded(
            "Cykelled",
            vec![
                RawField::new(103, "\"Ja\""),
                RawField::new(114, "\"Enduro\""),
                RawField::new(248, "Ja"),
                RawField::new(250, "\"Ja\""),
                RawField::new(249, "\"Nej\""),
            ],
        );
        assert_eq!(
            t.common.category,
            vec!["bike-track", "floodlit", "bike-track-enduro", "ski-classic"]
        );
    }

    #[test]
    fn status_payment_and_access() {
        let t = decoded(
            "Motionsspår",
            vec![
                RawField::new(102, "\"Nej\""),
                RawField::new(104, "\"Ja, vintertid\""),
                RawField::new(282, "\"Hela dygnet\""),
                RawField::new(134, "\"Matfors motionsspår\""),
            ],
        );
        assert_eq!(t.status.as_deref(), Some("closed"));
        assert!(t.payment_required);
        assert_eq!(t.public_access.as_deref(), Some("always"));
        assert_eq!(t.area_served.as_deref(), Some("Matfors motionsspår"));

        let t = decoded("Motionsspår", vec![RawField::new(104, "\"Nej\"")]);
        assert!(!t.payment_required);
    }

    #[test]
    fn unknown_lift_type_fails() {
        let err = decode(&trail("Skidlift", vec![RawField::new(284, "\"Stollift\"")])).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownEnumValue { field_id: 284, .. }));
    }

    #[test]
    fn see_also_and_annotations_are_unescaped() {
        let t = decoded(
            "Skidpist",
            vec![
                RawField::new(283, r#""https:\/\/example.se\/pist""#),
                RawField::new(294, r#""se https:\/\/example.se""#),
                RawField::new(110, "\"Pist i Södra berget\""),
            ],
        );
        assert_eq!(t.common.see_also, vec!["https://example.se/pist"]);
        assert_eq!(t.annotations.as_deref(), Some("se https://example.se"));
        assert_eq!(t.common.description, "Pist i Södra berget");
        assert_eq!(t.common.category, vec!["ski-slope"]);
    }

    #[test]
    fn combined_trail_reference_without_value_is_tolerated() {
        let t = decoded(
            "Skidspår",
            vec![RawField { id: 274, value: None }, RawField::new(99, "6000")],
        );
        assert_eq!(t.length_km, Some(6.0));
    }
}
