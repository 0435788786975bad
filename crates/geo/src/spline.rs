use glam::DVec3;

use crate::error::GeoError;

/// Divisions used for the arc-length lookup table.
const LENGTH_DIVISIONS: usize = 200;

/// Open centripetal Catmull-Rom spline through a list of control points.
///
/// The curve passes through every control point. End segments use
/// reflected phantom points, so the curve starts and stops exactly on the
/// first and last points.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<DVec3>,
    /// Cumulative chord length at `LENGTH_DIVISIONS + 1` evenly spaced t values.
    lengths: Vec<f64>,
}

impl CatmullRom {
    pub fn new(points: Vec<DVec3>) -> Result<Self, GeoError> {
        if points.len() < 2 {
            return Err(GeoError::TooFewPoints(points.len()));
        }
        let mut curve = Self {
            points,
            lengths: Vec::new(),
        };
        curve.lengths = curve.build_lengths();
        Ok(curve)
    }

    pub fn control_points(&self) -> &[DVec3] {
        &self.points
    }

    /// Approximate total curve length.
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at parameter `t` in [0, 1]; t is spread evenly over the control
    /// segments, not over arc length.
    pub fn point(&self, t: f64) -> DVec3 {
        let l = self.points.len();
        let p = (l - 1) as f64 * t.clamp(0.0, 1.0);
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f64;
        if seg >= l - 1 {
            seg = l - 2;
            weight = 1.0;
        }

        let p1 = self.points[seg];
        let p2 = self.points[seg + 1];
        let p0 = if seg > 0 {
            self.points[seg - 1]
        } else {
            2.0 * p1 - p2
        };
        let p3 = if seg + 2 < l {
            self.points[seg + 2]
        } else {
            2.0 * p2 - p1
        };

        // Centripetal knot spacing: |d|^0.5.
        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        hermite(p1, p2, m1, m2, weight)
    }

    /// Point at fraction `u` of the curve's arc length.
    pub fn point_at(&self, u: f64) -> DVec3 {
        self.point(self.arc_length_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u`. Zero if the curve is
    /// locally degenerate.
    pub fn tangent_at(&self, u: f64) -> DVec3 {
        let t = self.arc_length_to_t(u);
        let delta = 1e-4;
        let a = self.point((t - delta).max(0.0));
        let b = self.point((t + delta).min(1.0));
        (b - a).normalize_or_zero()
    }

    /// Evenly spaced samples (by arc length), `divisions + 1` of them.
    pub fn spaced_points(&self, divisions: usize) -> Vec<DVec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }

    fn arc_length_to_t(&self, u: f64) -> f64 {
        let total = self.length();
        let u = u.clamp(0.0, 1.0);
        if total <= 0.0 {
            return u;
        }
        let target = u * total;
        let k = self.lengths.partition_point(|&l| l < target);
        if k == 0 {
            return 0.0;
        }
        if k >= self.lengths.len() {
            return 1.0;
        }
        let i = k - 1;
        let span = self.lengths[k] - self.lengths[i];
        let frac = if span > 0.0 {
            (target - self.lengths[i]) / span
        } else {
            0.0
        };
        (i as f64 + frac) / LENGTH_DIVISIONS as f64
    }

    fn build_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(LENGTH_DIVISIONS + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for d in 1..=LENGTH_DIVISIONS {
            let p = self.point(d as f64 / LENGTH_DIVISIONS as f64);
            sum += p.distance(last);
            lengths.push(sum);
            last = p;
        }
        lengths
    }
}

/// Cubic Hermite segment from `a` to `b` with end tangents `ta`, `tb`.
fn hermite(a: DVec3, b: DVec3, ta: DVec3, tb: DVec3, w: f64) -> DVec3 {
    let c2 = -3.0 * a + 3.0 * b - 2.0 * ta - tb;
    let c3 = 2.0 * a - 2.0 * b + ta + tb;
    a + ta * w + c2 * (w * w) + c3 * (w * w * w)
}
