//! Disruption ("city work") decoding.
//!
//! The upstream carries no stable id, so identity is a fingerprint of the
//! rounded grid position and the date span.

use chrono::{DateTime, NaiveDate, Utc};
use cip_geodesy::GeodeticProjector;
use cip_schemas::{CityWork, DisruptionFeature, DomainEntity, EntityCommon, EntityKind, Geometry};

use crate::DecodeError;

/// Grid position `(easting, northing)` of the first point in the collection.
pub fn grid_point(feature: &DisruptionFeature) -> Result<(f64, f64), DecodeError> {
    let point = feature
        .geometry
        .geometries
        .iter()
        .find(|g| g.kind == "Point")
        .ok_or_else(|| DecodeError::Geometry("no point in geometry collection".to_string()))?;

    let coords: Vec<f64> = serde_json::from_value(point.coordinates.clone())
        .map_err(|e| DecodeError::Geometry(e.to_string()))?;
    match coords.as_slice() {
        [easting, northing, ..] => Ok((*easting, *northing)),
        _ => Err(DecodeError::Geometry(format!(
            "point needs two coordinates, got {}",
            coords.len()
        ))),
    }
}

/// `<round(easting)>:<round(northing)>:<start>:<end>` with every `-` removed.
pub fn fingerprint(feature: &DisruptionFeature) -> Result<String, DecodeError> {
    let (easting, northing) = grid_point(feature)?;
    let p = &feature.properties;
    let raw = format!(
        "{}:{}:{}:{}",
        easting.round() as i64,
        northing.round() as i64,
        p.start,
        p.end
    );
    Ok(raw.replace('-', ""))
}

/// `YYYY-MM-DD`, tolerating a trailing `Z`.
fn day(value: &str) -> Result<NaiveDate, DecodeError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DecodeError::InvalidDate(value.to_string()))
}

/// Build a `CityWork` entity for one disruption.
pub fn decode_city_work(
    feature: &DisruptionFeature,
    projector: &GeodeticProjector,
    now: DateTime<Utc>,
) -> Result<DomainEntity, DecodeError> {
    let (easting, northing) = grid_point(feature)?;
    let fp = fingerprint(feature)?;
    let p = &feature.properties;

    let start = day(&p.start)?;
    let end = day(&p.end)?;

    let (lon, lat) = projector.project(northing, easting);

    let mut common = EntityCommon::new(format!("{}{fp}", EntityKind::CityWork.id_prefix()), &p.title);
    common.description = p.description.clone();
    common.geometry = Some(Geometry::Point(vec![lon, lat]));
    common.date_created = Some(now);

    Ok(DomainEntity::CityWork(CityWork {
        common,
        start_date: format!("{}T00:00:00Z", start.format("%Y-%m-%d")),
        end_date: format!("{}T23:59:59Z", end.format("%Y-%m-%d")),
    }))
}
