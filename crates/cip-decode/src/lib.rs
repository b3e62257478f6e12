//! cip-decode
//!
//! Turns raw upstream records into typed domain entities.
//!
//! - facility features: classified by type tag, then decoded through a
//!   per-kind field table
//! - disruptions: reprojected from the national grid and fingerprinted
//!
//! Pure logic: no IO, no clocks (callers pass `now` where it matters).

pub mod citywork;
mod beach;
mod error;
mod facility;
pub mod field;
mod geometry;
mod sports_field;
mod sports_venue;
mod trail;

pub use citywork::{decode_city_work, fingerprint};
pub use error::DecodeError;
pub use facility::{classify, decode, DecodeOutcome};
pub use geometry::{decode_geometry, feature_geometry};
