use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// A geographic coordinate in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point from degrees, as maps and GPS fixes usually give them.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude.to_radians(), longitude.to_radians())
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A point on (or above) a sphere centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpherePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpherePoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the sphere center.
    pub fn magnitude(&self) -> f64 {
        self.to_dvec3().length()
    }

    pub fn distance(&self, other: SpherePoint) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Single-precision copy for GPU-facing buffers.
    pub fn as_vec3(self) -> Vec3 {
        self.to_dvec3().as_vec3()
    }

    pub fn is_finite(&self) -> bool {
        self.to_dvec3().is_finite()
    }
}

impl From<DVec3> for SpherePoint {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<SpherePoint> for DVec3 {
    fn from(p: SpherePoint) -> Self {
        p.to_dvec3()
    }
}

/// Project a geographic coordinate onto the surface of a sphere of `radius`.
///
/// Finite latitudes outside [-π/2, π/2] (or longitudes outside [-π, π]) are
/// accepted and wrap around the sphere.
pub fn project(point: GeoPoint, radius: f64) -> Result<SpherePoint, GeoError> {
    if !point.is_finite() {
        return Err(GeoError::NonFiniteCoordinate {
            latitude: point.latitude,
            longitude: point.longitude,
        });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeoError::InvalidRadius(radius));
    }

    let (sin_lat, cos_lat) = point.latitude.sin_cos();
    let (sin_lng, cos_lng) = point.longitude.sin_cos();

    Ok(SpherePoint {
        x: -radius * cos_lat * cos_lng,
        y: radius * sin_lat,
        z: radius * cos_lat * sin_lng,
    })
}
