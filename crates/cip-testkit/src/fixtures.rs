//! Feed fixtures shared by scenario tests.

use chrono::{Duration, Utc};
use cip_schemas::{
    format_upstream_time, DisruptionFeature, DisruptionGeometry, DisruptionProps,
    DisruptionResponse, FeatureCollection, FeatureProps, GeometryMember, Organisation, RawFeature,
    RawField, RawGeometry,
};
use serde_json::json;

/// A small facility list as the register serves it: a live trail, a ski
/// track, a sports field without ice, a dog park (unsupported) and a trail
/// with an unknown difficulty label.
pub const FACILITY_LIST_JSON: &str = r#"{"type":"FeatureCollection","features":[
 {"id":641,"type":"Feature","properties":{"name":"Motionsspår Stadsbacken","type":"Motionsspår",
  "created":"2019-01-23 10:01:59","updated":"2021-12-17 16:54:02","published":true,
  "manager":{"organizationID":888,"name":"Sundsvalls kommun"},
  "fields":[{"id":99,"name":"Längd (meter)","type":"INTEGER","value":4700},
   {"id":102,"name":"Öppen","type":"TOGGLE","value":"Ja"},
   {"id":103,"name":"Belysning","type":"TOGGLE","value":"Ja"},
   {"id":109,"name":"Svårighet","type":"DROPDOWN","value":"Lätt"},
   {"id":283,"name":"Länk","type":"FREETEXT","value":"https:\/\/sundsvall.se\/spar"}]},
  "geometry":{"type":"LineString","coordinates":[[17.30,62.36],[17.31,62.37]]}},
 {"id":1211,"type":"Feature","properties":{"name":"Rännösjöspåret","type":"Skidspår",
  "created":"2019-11-22 12:02:58","updated":"2021-09-08 17:01:19","published":true,
  "fields":[{"id":248,"type":"TOGGLE","value":"Ja"},
   {"id":274,"name":"Led","type":"COMBINEDTRAIL","referencedObjects":[{"objectID":2701}]},
   {"id":109,"type":"DROPDOWN","value":"Mycket lätt"},{"id":104,"type":"FREETEXT","value":"Ja"}]},
  "geometry":{"type":"LineString","coordinates":[[17.01,62.34],[17.02,62.35]]}},
 {"id":796,"type":"Feature","properties":{"name":"Bollplan","type":"Aktivitetsyta","published":true,
  "fields":[{"id":279,"type":"TOGGLE","value":"Ja"}]},
  "geometry":{"type":"Point","coordinates":[17.3,62.4]}},
 {"id":2001,"type":"Feature","properties":{"name":"Hundrastgård","type":"Hundrastgård","published":true,
  "fields":[]},"geometry":{"type":"Point","coordinates":[17.3,62.4]}},
 {"id":2002,"type":"Feature","properties":{"name":"Okänt spår","type":"Motionsspår","published":true,
  "fields":[{"id":109,"type":"DROPDOWN","value":"Okänd"}]},
  "geometry":{"type":"Point","coordinates":[17.3,62.4]}}
]}"#;

pub fn facility_list() -> FeatureCollection {
    // fixture text is static and known-good
    serde_json::from_str(FACILITY_LIST_JSON).unwrap_or_default()
}

/// A live exercise trail with a few decodable fields.
pub fn live_trail(id: i64, name: &str) -> RawFeature {
    RawFeature {
        id,
        properties: FeatureProps {
            name: name.to_string(),
            kind: "Motionsspår".to_string(),
            published: true,
            fields: RawField::catalog(&[
                RawField::new(99, "4700"),
                RawField::new(109, "\"Lätt\""),
            ]),
            created: Some("2019-01-23 10:01:59".to_string()),
            updated: Some("2021-12-17 16:54:02".to_string()),
            deleted: None,
            manager: Some(Organisation {
                organization_id: 888,
                name: "Sundsvalls kommun".to_string(),
            }),
            owner: None,
        },
        geometry: RawGeometry::new("LineString", "[[17.30,62.36],[17.31,62.37]]").to_raw(),
    }
}

/// Mark `feature` deleted `days` days ago.
pub fn deleted_days_ago(mut feature: RawFeature, days: i64) -> RawFeature {
    feature.properties.deleted = Some(format_upstream_time(Utc::now() - Duration::days(days)));
    feature
}

pub fn collection(features: Vec<RawFeature>) -> FeatureCollection {
    FeatureCollection {
        kind: "FeatureCollection".to_string(),
        features,
    }
}

/// A disruption at grid position `[easting, northing]`.
pub fn disruption(easting: f64, northing: f64, start: &str, end: &str) -> DisruptionFeature {
    DisruptionFeature {
        geometry: DisruptionGeometry {
            kind: "GeometryCollection".to_string(),
            geometries: vec![GeometryMember {
                kind: "Point".to_string(),
                coordinates: json!([easting, northing]),
            }],
        },
        properties: DisruptionProps {
            title: "Norbergsvägen".to_string(),
            description: "Schaktarbete i gatan".to_string(),
            restrictions: None,
            level: "SMALL".to_string(),
            start: start.to_string(),
            end: end.to_string(),
        },
    }
}

pub fn disruptions(features: Vec<DisruptionFeature>) -> DisruptionResponse {
    DisruptionResponse {
        features,
        error: None,
    }
}
