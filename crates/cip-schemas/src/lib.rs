//! cip-schemas
//!
//! Wire types for the two upstream feeds and the typed domain records the
//! rest of the workspace passes around.
//!
//! No IO and no decoding rules live here; `cip-decode` owns the mapping from
//! raw features to domain entities.

pub mod citywork;
pub mod domain;
pub mod feed;
pub mod time;

pub use citywork::{
    DisruptionFeature, DisruptionGeometry, DisruptionProps, DisruptionResponse, GeometryMember,
};
pub use domain::*;
pub use feed::{FeatureCollection, FeatureProps, Organisation, RawFeature, RawField, RawGeometry};
pub use time::{format_upstream_time, parse_upstream_time, UPSTREAM_TIME_FORMAT};
