//! Geo projection: latitude/longitude to sphere surface points, and arched
//! connector curves between two surface points.
//!
//! # Axis convention
//! Right-handed, +Y up. Latitude 0 / longitude 0 maps to -X, longitude +90°
//! maps to +Z (towards a camera sitting on +Z).
//!
//! # Invariants
//! - Every function here is pure; nothing holds state between calls.
//! - Invalid numeric input is rejected at the boundary, never clamped.

mod arc;
mod error;
mod projection;
mod spline;

pub use arc::{ArcCurve, ArcParams, build_arc, build_arc_with};
pub use error::GeoError;
pub use projection::{GeoPoint, SpherePoint, project};
pub use spline::CatmullRom;

pub fn crate_info() -> &'static str {
    "starlight-geo v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("geo"));
    }
}
