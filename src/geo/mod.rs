//! Geocoding Module
//!
//! Resolves missing record coordinates from a static town/province table and
//! spreads co-located map markers apart with a deterministic spiral offset.

mod geocode;
mod locations;

pub use geocode::apply_geocoding;
pub use locations::coordinates_for;
