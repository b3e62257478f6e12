//! Beaches. Besides the field catalog, a fixed table keyed by the upstream
//! id supplies external reference codes (EU bathing-water NUTS code and
//! Wikidata item).

use cip_schemas::{Beach, DomainEntity, EntityCommon, EntityKind, RawFeature, SENSOR_URN_PREFIX};

use crate::facility::live_common;
use crate::field::{apply_fields, field_catalog, FieldFn, FieldValue};
use crate::DecodeError;

const BATHING_WATER_URL: &str = "https://badplatsen.havochvatten.se/badplatsen/karta/#/bath/";
const WIKIDATA_URL: &str = "https://www.wikidata.org/wiki/";

/// `(upstream id, NUTS code, Wikidata id)`
const REFERENCES: &[(i64, &str, Option<&str>)] = &[
    (283, "SE0712281000003473", Some("Q10671745")),
    (284, "SE0712281000003472", Some("Q680645")),
    (295, "SE0712281000003474", Some("Q106657132")),
    (315, "SE0712281000003471", Some("Q106657054")),
    (322, "SE0712281000003478", Some("Q106710721")),
    (323, "SE0712281000003477", Some("Q106710719")),
    (337, "SE0712281000003450", None),
    (357, "SE0712281000003479", Some("Q106710722")),
    (414, "SE0712281000003464", Some("Q106710690")),
    (421, "SE0712281000003461", Some("Q106710684")),
    (430, "SE0712281000003462", Some("Q106710685")),
    (442, "SE0712281000003469", Some("Q106710700")),
    (456, "SE0712281000003468", Some("Q106710698")),
    (469, "SE0712281000003452", Some("Q106710670")),
    (488, "SE0712281000003470", Some("Q106710701")),
    (495, "SE0712281000003467", Some("Q106710696")),
    (513, "SE0712281000003463", Some("Q106710688")),
    (526, "SE0712281000003466", Some("Q106710694")),
    (553, "SE0712281000003475", Some("Q16498519")),
    (560, "SE0712281000003455", Some("Q106710675")),
    (656, "SE0712281000003459", Some("Q106710678")),
    (658, "SE0712281000003460", Some("Q106710681")),
    (659, "SE0712281000003453", Some("Q106710672")),
    (660, "SE0712281000004229", None),
    (897, "SE0712281000003456", Some("Q106710677")),
    (1234, "SE0712281000003476", Some("Q106710717")),
    (1618, "SE0712281000003454", Some("Q106947945")),
    (1631, "SE0712281000003480", None),
];

const FIELDS: &[(i64, FieldFn<Beach>)] = &[(1, description), (230, sensor)];

pub(crate) fn empty(common: EntityCommon) -> Beach {
    Beach {
        common,
        sensor: None,
        nuts_code: None,
        wikidata_id: None,
    }
}

pub(crate) fn decode(feature: &RawFeature) -> Result<DomainEntity, DecodeError> {
    let mut beach = empty(live_common(EntityKind::Beach, feature)?);
    apply_fields(&mut beach, &field_catalog(feature)?, FIELDS)?;

    if let Some((_, nuts, wikidata)) = REFERENCES.iter().find(|(id, _, _)| *id == feature.id) {
        beach.common.see_also.push(format!("{BATHING_WATER_URL}{nuts}"));
        beach.nuts_code = Some(nuts.to_string());
        if let Some(q) = wikidata {
            beach.common.see_also.push(format!("{WIKIDATA_URL}{q}"));
            beach.wikidata_id = Some(q.to_string());
        }
    }

    Ok(DomainEntity::Beach(beach))
}

fn description(b: &mut Beach, v: &FieldValue) -> Result<(), DecodeError> {
    b.common.description = v.text().to_string();
    Ok(())
}

fn sensor(b: &mut Beach, v: &FieldValue) -> Result<(), DecodeError> {
    if !v.text().is_empty() {
        b.sensor = Some(format!("{SENSOR_URN_PREFIX}{}", v.text()));
    }
    Ok(())
}
