//! Decoding a facility list as the register serves it.

use cip_decode::{decode, DecodeError, DecodeOutcome};
use cip_schemas::{organisation_urn, DomainEntity, EntityKind};
use cip_testkit::fixtures::facility_list;

fn outcomes() -> Vec<(i64, DecodeOutcome)> {
    facility_list()
        .features
        .iter()
        .map(|f| (f.id, decode(f)))
        .collect()
}

#[test]
fn live_trail_decodes_every_known_field() {
    let all = outcomes();
    let DecodeOutcome::Entity(DomainEntity::ExerciseTrail(trail)) = &all[0].1 else {
        panic!("641 should decode to a trail, got {:?}", all[0].1);
    };

    assert_eq!(
        trail.common.id,
        "urn:ngsi-ld:ExerciseTrail:se:sundsvall:facilities:641"
    );
    assert_eq!(trail.common.name, "Motionsspår Stadsbacken");
    assert_eq!(trail.length_km, Some(4.7));
    assert_eq!(trail.difficulty, Some(0.25));
    assert_eq!(trail.status.as_deref(), Some("open"));
    assert!(trail.common.category.contains(&"floodlit".to_string()));
    assert_eq!(trail.common.managed_by, Some(organisation_urn(888)));
    assert!(trail.common.date_created.is_some());
    assert!(trail.common.geometry.is_some());
    assert!(trail
        .common
        .see_also
        .iter()
        .any(|u| u == "https://sundsvall.se/spar"));
}

#[test]
fn each_feature_gets_its_own_outcome() {
    let all = outcomes();
    let kinds: Vec<(i64, &'static str)> = all
        .iter()
        .map(|(id, o)| {
            let label = match o {
                DecodeOutcome::Entity(e) if e.kind() == EntityKind::ExerciseTrail => "trail",
                DecodeOutcome::Entity(_) => "other",
                DecodeOutcome::Ignored(_) => "ignored",
                DecodeOutcome::Failed(_) => "failed",
            };
            (*id, label)
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            (641, "trail"),
            (1211, "trail"),
            (796, "ignored"),
            (2001, "ignored"),
            (2002, "failed"),
        ]
    );
}

#[test]
fn unknown_difficulty_names_field_and_label() {
    let all = outcomes();
    let DecodeOutcome::Failed(err) = &all[4].1 else {
        panic!("2002 should fail");
    };
    assert!(matches!(
        err,
        DecodeError::UnknownEnumValue { field_id: 109, value } if value == "Okänd"
    ));
}
