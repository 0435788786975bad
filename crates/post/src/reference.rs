//! CPU versions of the custom passes, used for tests and offline previews.
//! UVs here use a bottom-left origin.

use glam::{Vec2, Vec4};

use crate::distortion::DistortionParams;

/// Where the distortion pass samples from for output coordinate `uv`.
pub fn distort_uv(uv: Vec2, params: &DistortionParams) -> Vec2 {
    Vec2::new(uv.x, uv.y + (uv.x * 20.0).cos() * 0.1 + params.position.y)
}

/// Color the distortion pass writes for a sampled texel.
pub fn shade(texel: Vec4, params: &DistortionParams) -> Vec4 {
    let tinted = Vec4::new(
        texel.x + params.color.x,
        texel.y + params.color.y,
        texel.z + params.color.z,
        texel.w,
    );
    tinted / params.brightness
}

/// Linear to sRGB transfer, per channel.
pub fn linear_to_srgb(c: f32) -> f32 {
    if c < 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn uv_offset_follows_cosine_wave() {
        let p = DistortionParams::default();
        let out = distort_uv(Vec2::new(0.0, 0.5), &p);
        assert!((out.y - 0.6).abs() < EPS);
        assert_eq!(out.x, 0.0);

        // cos(20 * π/20) = -1
        let x = std::f32::consts::PI / 20.0;
        let out = distort_uv(Vec2::new(x, 0.5), &p);
        assert!((out.y - 0.4).abs() < EPS);
    }

    #[test]
    fn position_y_shifts_lookup() {
        let mut p = DistortionParams::default();
        p.set_position(0.9, 0.25).unwrap();
        let out = distort_uv(Vec2::new(0.0, 0.0), &p);
        assert!((out.y - 0.35).abs() < EPS);
        // x offset has no effect on the lookup
        assert_eq!(out.x, 0.0);
    }

    #[test]
    fn shade_tints_and_divides() {
        let mut p = DistortionParams::default();
        let texel = Vec4::new(0.2, 0.2, 0.2, 1.0);
        let out = shade(texel, &p);
        assert!((out - Vec4::new(0.2, 0.2, 0.5, 1.0)).abs().max_element() < EPS);

        p.set_brightness(0.5).unwrap();
        let out = shade(texel, &p);
        assert!((out - Vec4::new(0.4, 0.4, 1.0, 2.0)).abs().max_element() < EPS);
    }

    #[test]
    fn srgb_curve() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < EPS);
        assert!((linear_to_srgb(0.001) - 0.01292).abs() < EPS);
        // mid grey
        assert!((linear_to_srgb(0.2140) - 0.5).abs() < 1e-3);
    }
}
