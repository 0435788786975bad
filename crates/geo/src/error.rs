/// Errors from projection and arc construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("coordinate is not finite: lat={latitude}, lng={longitude}")]
    NonFiniteCoordinate { latitude: f64, longitude: f64 },
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f64),
    #[error("bulge must be finite and non-negative, got {0}")]
    InvalidBulge(f64),
    #[error("segment count must be at least 1")]
    InvalidSegments,
    #[error("arc endpoint must be finite and away from the origin: ({x}, {y}, {z})")]
    InvalidEndpoint { x: f64, y: f64, z: f64 },
    #[error("arc endpoints are antipodal; the chord passes through the sphere center")]
    AntipodalEndpoints,
    #[error("curve needs at least 2 control points, got {0}")]
    TooFewPoints(usize),
}
