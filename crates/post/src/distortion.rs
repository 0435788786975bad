use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::PostError;

/// Tunables for the wave distortion pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistortionParams {
    /// Output is divided by this; must be in (0, 1].
    pub brightness: f32,
    /// Screen offset; only `y` shifts the sample lookup.
    pub position: Vec2,
    /// Tint added to every texel.
    pub color: Vec3,
    pub alpha: f32,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            position: Vec2::ZERO,
            color: Vec3::new(0.0, 0.0, 0.3),
            alpha: 0.5,
        }
    }
}

impl DistortionParams {
    pub fn validate(&self) -> Result<(), PostError> {
        check_brightness(self.brightness)?;
        check_position("position.x", self.position.x)?;
        check_position("position.y", self.position.y)?;
        for (name, c) in [
            ("color.r", self.color.x),
            ("color.g", self.color.y),
            ("color.b", self.color.z),
        ] {
            if !c.is_finite() {
                return Err(invalid(name, c));
            }
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(invalid("alpha", self.alpha));
        }
        Ok(())
    }

    /// Move the distortion offset. Both axes must lie in [-1, 1].
    pub fn set_position(&mut self, x: f32, y: f32) -> Result<(), PostError> {
        check_position("position.x", x)?;
        check_position("position.y", y)?;
        self.position = Vec2::new(x, y);
        Ok(())
    }

    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), PostError> {
        check_brightness(brightness)?;
        self.brightness = brightness;
        Ok(())
    }

    /// Pack into the layout the distortion shader expects.
    pub fn uniforms(&self) -> DistortionUniforms {
        DistortionUniforms {
            position: self.position.to_array(),
            brightness: self.brightness,
            alpha: self.alpha,
            color: self.color.to_array(),
            _pad: 0.0,
        }
    }
}

/// Uniform block for `DISTORTION_SHADER`; 32 bytes, std140-compatible.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DistortionUniforms {
    pub position: [f32; 2],
    pub brightness: f32,
    pub alpha: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

fn check_brightness(b: f32) -> Result<(), PostError> {
    if b > 0.0 && b <= 1.0 {
        Ok(())
    } else {
        Err(invalid("brightness", b))
    }
}

fn check_position(name: &'static str, v: f32) -> Result<(), PostError> {
    if (-1.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(name, v))
    }
}

fn invalid(name: &'static str, value: f32) -> PostError {
    PostError::InvalidParameter {
        pass: "distortion",
        name,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DistortionParams::default().validate().is_ok());
    }

    #[test]
    fn uniform_block_layout() {
        assert_eq!(std::mem::size_of::<DistortionUniforms>(), 32);
        let u = DistortionParams::default().uniforms();
        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), 32);
        // brightness sits right after the vec2
        assert_eq!(&bytes[8..12], &1.0_f32.to_le_bytes());
        // color.b at offset 16 + 8
        assert_eq!(&bytes[24..28], &0.3_f32.to_le_bytes());
    }

    #[test]
    fn set_position_checks_range() {
        let mut p = DistortionParams::default();
        p.set_position(0.25, -1.0).unwrap();
        assert_eq!(p.position, Vec2::new(0.25, -1.0));

        let err = p.set_position(0.0, 1.01).unwrap_err();
        assert!(matches!(
            err,
            PostError::InvalidParameter {
                name: "position.y",
                ..
            }
        ));
        assert_eq!(p.position, Vec2::new(0.25, -1.0));
    }

    #[test]
    fn brightness_must_be_positive() {
        let mut p = DistortionParams::default();
        assert!(p.set_brightness(0.0).is_err());
        assert!(p.set_brightness(f32::NAN).is_err());
        assert!(p.set_brightness(1.5).is_err());
        p.set_brightness(0.4).unwrap();
        assert_eq!(p.brightness, 0.4);
    }
}
