use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::projection::SpherePoint;
use crate::spline::CatmullRom;

/// Shape parameters for an arc connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcParams {
    /// Radius of the sphere the arc starts and ends on.
    pub base_radius: f64,
    /// Extra height at the arc midpoint.
    pub bulge: f64,
    /// Number of interpolation steps; the arc has `segments + 1` points.
    pub segments: u32,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            base_radius: 1.3,
            bulge: 0.4,
            segments: 100,
        }
    }
}

impl ArcParams {
    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.base_radius.is_finite() || self.base_radius <= 0.0 {
            return Err(GeoError::InvalidRadius(self.base_radius));
        }
        if !self.bulge.is_finite() || self.bulge < 0.0 {
            return Err(GeoError::InvalidBulge(self.bulge));
        }
        if self.segments == 0 {
            return Err(GeoError::InvalidSegments);
        }
        Ok(())
    }
}

/// Ordered points of an arc that rises off the sphere and comes back down.
///
/// Always holds at least two finite points, including after deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArcCurve")]
pub struct ArcCurve {
    points: Vec<SpherePoint>,
    params: ArcParams,
}

#[derive(Deserialize)]
struct RawArcCurve {
    points: Vec<SpherePoint>,
    #[serde(default)]
    params: ArcParams,
}

impl TryFrom<RawArcCurve> for ArcCurve {
    type Error = GeoError;

    fn try_from(raw: RawArcCurve) -> Result<Self, Self::Error> {
        raw.params.validate()?;
        if raw.points.len() < 2 {
            return Err(GeoError::TooFewPoints(raw.points.len()));
        }
        if let Some(p) = raw.points.iter().find(|p| !p.is_finite()) {
            return Err(GeoError::InvalidEndpoint {
                x: p.x,
                y: p.y,
                z: p.z,
            });
        }
        Ok(Self {
            points: raw.points,
            params: raw.params,
        })
    }
}

impl ArcCurve {
    pub fn points(&self) -> &[SpherePoint] {
        &self.points
    }

    pub fn params(&self) -> ArcParams {
        self.params
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> SpherePoint {
        self.points[0]
    }

    pub fn end(&self) -> SpherePoint {
        self.points[self.points.len() - 1]
    }

    /// Largest distance from the sphere center along the arc.
    pub fn max_magnitude(&self) -> f64 {
        self.points
            .iter()
            .map(SpherePoint::magnitude)
            .fold(0.0, f64::max)
    }

    /// Height of the highest point above the base sphere.
    pub fn peak_height(&self) -> f64 {
        self.max_magnitude() - self.params.base_radius
    }

    /// Smooth curve through the arc points, for tube/ribbon tessellation.
    pub fn spline(&self) -> Result<CatmullRom, GeoError> {
        CatmullRom::new(self.points.iter().map(|p| p.to_dvec3()).collect())
    }
}

/// Build an arc with the default bulge.
pub fn build_arc(
    start: SpherePoint,
    end: SpherePoint,
    base_radius: f64,
    segments: u32,
) -> Result<ArcCurve, GeoError> {
    build_arc_with(
        start,
        end,
        ArcParams {
            base_radius,
            segments,
            ..ArcParams::default()
        },
    )
}

/// Build an arc between two surface points.
///
/// Each sample lerps along the chord, pushes the result back out to the
/// sphere and lifts it by `bulge * sin(π t)`, so both ends sit on the base
/// sphere and the peak is at the middle.
pub fn build_arc_with(
    start: SpherePoint,
    end: SpherePoint,
    params: ArcParams,
) -> Result<ArcCurve, GeoError> {
    params.validate()?;
    let a = checked_endpoint(start)?;
    let b = checked_endpoint(end)?;

    if (a.normalize() + b.normalize()).length() < 1e-12 {
        return Err(GeoError::AntipodalEndpoints);
    }

    let n = params.segments;
    let mut points = Vec::with_capacity(n as usize + 1);
    for i in 0..=n {
        let t = f64::from(i) / f64::from(n);
        let dir = a
            .lerp(b, t)
            .try_normalize()
            .ok_or(GeoError::AntipodalEndpoints)?;
        let wave = (PI * t).sin();
        points.push(SpherePoint::from(
            dir * (params.base_radius + params.bulge * wave),
        ));
    }

    tracing::debug!(
        segments = n,
        base_radius = params.base_radius,
        bulge = params.bulge,
        "built arc"
    );

    Ok(ArcCurve { points, params })
}

fn checked_endpoint(p: SpherePoint) -> Result<DVec3, GeoError> {
    let v = p.to_dvec3();
    if !v.is_finite() || v.length_squared() == 0.0 {
        return Err(GeoError::InvalidEndpoint {
            x: p.x,
            y: p.y,
            z: p.z,
        });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{GeoPoint, project};

    const EPS: f64 = 1e-6;

    fn seoul() -> SpherePoint {
        project(GeoPoint::from_degrees(37.56668, 126.97841), 1.3).unwrap()
    }

    fn accra() -> SpherePoint {
        project(GeoPoint::from_degrees(5.55363, -0.196481), 1.3).unwrap()
    }

    #[test]
    fn seoul_to_accra() {
        let arc = build_arc(seoul(), accra(), 1.3, 100).unwrap();
        assert_eq!(arc.len(), 101);
        assert!(arc.start().distance(seoul()) < EPS);
        assert!(arc.end().distance(accra()) < EPS);
        assert!(arc.max_magnitude() > 1.3);
        assert!((arc.peak_height() - 0.4).abs() < EPS);
    }

    #[test]
    fn point_count_is_segments_plus_one() {
        for n in [1, 2, 7, 64, 100] {
            let arc = build_arc(seoul(), accra(), 1.3, n).unwrap();
            assert_eq!(arc.len(), n as usize + 1);
        }
    }

    #[test]
    fn midpoint_bulges_outward() {
        let arc = build_arc(seoul(), accra(), 1.3, 50).unwrap();
        let mid = arc.points()[25];
        assert!(mid.magnitude() >= 1.3);
        assert!((mid.magnitude() - 1.7).abs() < EPS);
    }

    #[test]
    fn never_dips_below_base_radius() {
        let arc = build_arc(seoul(), accra(), 1.3, 37).unwrap();
        for p in arc.points() {
            assert!(p.magnitude() >= 1.3 - EPS);
        }
    }

    #[test]
    fn height_profile_is_symmetric() {
        let arc = build_arc(seoul(), accra(), 1.3, 40).unwrap();
        let pts = arc.points();
        let n = pts.len() - 1;
        for i in 0..=n {
            assert!((pts[i].magnitude() - pts[n - i].magnitude()).abs() < EPS);
        }
    }

    #[test]
    fn consecutive_points_are_distinct() {
        let arc = build_arc(seoul(), accra(), 1.3, 100).unwrap();
        for w in arc.points().windows(2) {
            assert!(w[0].distance(w[1]) > 0.0);
        }
    }

    #[test]
    fn same_start_and_end_is_defined() {
        for n in [1, 2, 3, 100] {
            let arc = build_arc(seoul(), seoul(), 1.3, n).unwrap();
            assert_eq!(arc.len(), n as usize + 1);
            assert!(arc.start().distance(seoul()) < EPS);
            assert!(arc.end().distance(seoul()) < EPS);
        }
    }

    #[test]
    fn zero_bulge_stays_on_sphere() {
        let params = ArcParams {
            bulge: 0.0,
            ..ArcParams::default()
        };
        let arc = build_arc_with(seoul(), accra(), params).unwrap();
        for p in arc.points() {
            assert!((p.magnitude() - 1.3).abs() < EPS);
        }
    }

    #[test]
    fn rejects_zero_segments() {
        let err = build_arc(seoul(), accra(), 1.3, 0).unwrap_err();
        assert_eq!(err, GeoError::InvalidSegments);
    }

    #[test]
    fn rejects_bad_radius_and_bulge() {
        assert!(matches!(
            build_arc(seoul(), accra(), -1.0, 10),
            Err(GeoError::InvalidRadius(_))
        ));
        let params = ArcParams {
            bulge: f64::NAN,
            ..ArcParams::default()
        };
        assert!(matches!(
            build_arc_with(seoul(), accra(), params),
            Err(GeoError::InvalidBulge(_))
        ));
    }

    #[test]
    fn rejects_antipodal_endpoints() {
        let a = SpherePoint::new(1.3, 0.0, 0.0);
        let b = SpherePoint::new(-1.3, 0.0, 0.0);
        assert_eq!(
            build_arc(a, b, 1.3, 100).unwrap_err(),
            GeoError::AntipodalEndpoints
        );
        // Odd segment counts never sample the center but are still rejected.
        assert_eq!(
            build_arc(a, b, 1.3, 9).unwrap_err(),
            GeoError::AntipodalEndpoints
        );
    }

    #[test]
    fn rejects_degenerate_endpoints() {
        let origin = SpherePoint::new(0.0, 0.0, 0.0);
        assert!(matches!(
            build_arc(origin, accra(), 1.3, 10),
            Err(GeoError::InvalidEndpoint { .. })
        ));
        let nan = SpherePoint::new(f64::NAN, 0.0, 1.0);
        assert!(matches!(
            build_arc(seoul(), nan, 1.3, 10),
            Err(GeoError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn deserialized_arc_keeps_point_invariant() {
        let err = serde_json::from_str::<ArcCurve>(r#"{"points":[],"params":{}}"#).unwrap_err();
        assert!(err.to_string().contains("at least 2"), "{err}");

        let one = r#"{"points":[{"x":1.3,"y":0.0,"z":0.0}]}"#;
        assert!(serde_json::from_str::<ArcCurve>(one).is_err());

        let bad_params = r#"{"points":[{"x":1.3,"y":0.0,"z":0.0},{"x":0.0,"y":1.3,"z":0.0}],
            "params":{"segments":0}}"#;
        assert!(serde_json::from_str::<ArcCurve>(bad_params).is_err());

        let arc = build_arc(seoul(), accra(), 1.3, 10).unwrap();
        let json = serde_json::to_string(&arc).unwrap();
        let back: ArcCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 11);
        assert!(back.start().distance(arc.start()) < EPS);
        assert!(back.end().distance(arc.end()) < EPS);
    }

    #[test]
    fn spline_passes_through_arc_ends() {
        let arc = build_arc(seoul(), accra(), 1.3, 100).unwrap();
        let spline = arc.spline().unwrap();
        assert!(spline.point(0.0).distance(arc.start().to_dvec3()) < EPS);
        assert!(spline.point(1.0).distance(arc.end().to_dvec3()) < EPS);
    }
}
