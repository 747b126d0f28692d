//! Radiant Geo - Geometry conversion, validation, and AOI coverage
//!
//! Footprints and AOIs are carried as GeoJSON-shaped [`Geometry`] values;
//! this crate converts them to `geo` types for union and containment and
//! builds the coverage accumulator on top.
//!
//! [`Geometry`]: radiant_core::models::Geometry

pub mod coverage;
pub mod models;
pub mod spatial;
pub mod validation;

pub use coverage::{fill_aoi, Coverage, CoverageAccumulator};
