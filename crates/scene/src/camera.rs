use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Camera orbiting a target point, with damped rotation.
/// Camera motion lives outside the scene; stepping the scene never moves it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub damping: f32,
    pub sensitivity: f32,
    pub pixel_ratio: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;
    const MIN_DISTANCE: f32 = 0.1;
    const MAX_PIXEL_RATIO: f32 = 2.0;

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: config.distance,
            yaw: 0.0,
            pitch: 0.0,
            fov: config.fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: config.near,
            far: config.far,
            damping: config.damping,
            sensitivity: 0.005,
            pixel_ratio: 1.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    /// Eye position; yaw 0 / pitch 0 sits on +Z.
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Feed a pointer drag (in pixels) into the orbit velocity.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * self.sensitivity;
        self.pitch_velocity += dy * self.sensitivity;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(Self::MIN_DISTANCE);
    }

    /// Apply pending velocity, then decay it by the damping factor.
    pub fn update(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
        let keep = 1.0 - self.damping;
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
    }

    pub fn is_settled(&self) -> bool {
        self.yaw_velocity.abs() < 1e-6 && self.pitch_velocity.abs() < 1e-6
    }

    /// Track a new surface size. Zero sides are treated as 1.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
        self.pixel_ratio = device_pixel_ratio.min(Self::MAX_PIXEL_RATIO);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = OrbitCamera::default();
        assert!((cam.position() - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-6);
        assert!((cam.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = OrbitCamera::default();
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn damping_decays_velocity() {
        let mut cam = OrbitCamera::default();
        cam.rotate(100.0, 0.0);
        cam.update();
        let first_step = cam.yaw;
        assert!(first_step < 0.0);
        cam.update();
        let second_step = cam.yaw - first_step;
        assert!((second_step / first_step - 0.9).abs() < 1e-4);

        for _ in 0..500 {
            cam.update();
        }
        assert!(cam.is_settled());
        assert!((cam.position().length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 100_000.0);
        cam.update();
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
        assert!(cam.position().y < 3.0);
    }

    #[test]
    fn zoom_keeps_minimum_distance() {
        let mut cam = OrbitCamera::default();
        cam.zoom(-10.0);
        assert_eq!(cam.distance, 0.1);
        cam.zoom(1.0);
        assert!((cam.distance - 1.1).abs() < 1e-6);
    }

    #[test]
    fn resize_caps_pixel_ratio() {
        let mut cam = OrbitCamera::default();
        cam.resize(1920, 1080, 3.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(cam.pixel_ratio, 2.0);

        cam.resize(800, 0, 1.0);
        assert_eq!(cam.aspect, 800.0);
        assert_eq!(cam.pixel_ratio, 1.0);
    }

    #[test]
    fn minimized_surface_keeps_projection_finite() {
        let mut cam = OrbitCamera::default();
        cam.resize(0, 600, 1.0);
        assert!(cam.aspect > 0.0);
        assert!(cam.projection_matrix().is_finite());

        cam.resize(0, 0, 1.0);
        assert_eq!(cam.aspect, 1.0);
        assert!(cam.view_projection().is_finite());
    }
}
