use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use starlight_geo::ArcParams;
use starlight_post::PostChain;

use crate::error::SceneError;

/// An sRGB color written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::from_u32(0xffffff);

    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn from_hex(s: &str) -> Result<Self, SceneError> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| SceneError::InvalidColor(s.to_string()))?;
        let hex =
            u32::from_str_radix(digits, 16).map_err(|_| SceneError::InvalidColor(s.to_string()))?;
        Ok(Self::from_u32(hex))
    }

    /// Channels in [0, 1] with full alpha.
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            1.0,
        ]
    }

    /// Componentwise blend in [0, 1] space.
    pub fn lerp(self, other: Rgb, t: f32) -> [f32; 4] {
        let a = self.to_rgba_f32();
        let b = other.to_rgba_f32();
        std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = SceneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// Which faces of a shell are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

/// One textured, translucent sphere around the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    pub radius: f64,
    pub opacity: f32,
    pub side: Side,
    #[serde(default = "default_shell_segments")]
    pub segments: [u32; 2],
    /// Color map path, relative to the asset root. `None` draws untextured.
    #[serde(default = "default_earth_texture")]
    pub texture: Option<String>,
    #[serde(default = "default_true")]
    pub transparent: bool,
}

fn default_shell_segments() -> [u32; 2] {
    [50, 50]
}

fn default_earth_texture() -> Option<String> {
    Some("assets/earth-night-map.jpg".into())
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub shells: Vec<ShellConfig>,
    /// Fixed yaw applied to every shell so the texture lines up with the
    /// projection's longitude origin.
    pub texture_yaw: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            shells: vec![
                ShellConfig {
                    radius: 1.3,
                    opacity: 0.6,
                    side: Side::Front,
                    segments: default_shell_segments(),
                    texture: default_earth_texture(),
                    transparent: true,
                },
                ShellConfig {
                    radius: 1.5,
                    opacity: 0.9,
                    side: Side::Back,
                    segments: default_shell_segments(),
                    texture: default_earth_texture(),
                    transparent: true,
                },
            ],
            texture_yaw: -std::f32::consts::FRAC_PI_2,
        }
    }
}

/// A torus pinned to a geographic location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default = "default_surface_radius")]
    pub radius: f64,
    /// Euler XYZ rotation of the torus, radians.
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_marker_color")]
    pub color: Rgb,
    #[serde(default)]
    pub torus: TorusConfig,
}

/// Ring geometry drawn at a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusConfig {
    pub radius: f32,
    /// Thickness of the ring's tube.
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
}

impl TorusConfig {
    fn validate(&self, marker: &str) -> Result<(), SceneError> {
        for (name, v) in [("radius", self.radius), ("tube", self.tube)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SceneError::invalid(
                    format!("markers.{marker}.torus.{name}"),
                    "must be positive",
                ));
            }
        }
        if self.radial_segments < 3 || self.tubular_segments < 3 {
            return Err(SceneError::invalid(
                format!("markers.{marker}.torus"),
                "need at least 3 segments each way",
            ));
        }
        Ok(())
    }
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            radius: 0.02,
            tube: 0.002,
            radial_segments: 20,
            tubular_segments: 20,
        }
    }
}

fn default_surface_radius() -> f64 {
    1.3
}

fn default_marker_color() -> Rgb {
    Rgb::from_u32(0x263d64)
}

/// An arc drawn between two named markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub arc: ArcParams,
}

/// Tessellation and coloring of arc tubes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeConfig {
    pub tubular_segments: u32,
    pub radius: f64,
    pub radial_segments: u32,
    pub gradient_start: Rgb,
    pub gradient_end: Rgb,
}

impl TubeConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.tubular_segments == 0 {
            return Err(SceneError::invalid("tube.tubular_segments", "must be at least 1"));
        }
        if self.radial_segments < 3 {
            return Err(SceneError::invalid("tube.radial_segments", "must be at least 3"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SceneError::invalid("tube.radius", "must be positive"));
        }
        Ok(())
    }
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            tubular_segments: 20,
            radius: 0.003,
            radial_segments: 8,
            gradient_start: Rgb::from_u32(0x757f94),
            gradient_end: Rgb::from_u32(0x263d74),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube the stars are scattered in.
    pub spread: f32,
    pub size: f32,
    pub color: Rgb,
    pub seed: u64,
    /// Point sprite texture.
    pub sprite: Option<String>,
    pub alpha_map: Option<String>,
    pub transparent: bool,
    /// Stars are blended without writing depth so they never occlude each other.
    pub depth_write: bool,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            spread: 5.0,
            size: 0.01,
            color: Rgb::from_u32(0xbcc6c6),
            seed: 42,
            sprite: Some("assets/particle.png".into()),
            alpha_map: Some("assets/particle.png".into()),
            transparent: true,
            depth_write: false,
        }
    }
}

/// Cube map shown behind the scene and used for image-based lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Face images in +X, -X, +Y, -Y, +Z, -Z order. Empty means no environment.
    pub faces: Vec<String>,
    pub background: bool,
    pub lighting: bool,
    /// Faces are sRGB-encoded.
    pub srgb: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            faces: ["px", "nx", "py", "ny", "pz", "nz"]
                .iter()
                .map(|f| format!("assets/environments/{f}.png"))
                .collect(),
            background: true,
            lighting: true,
            srgb: true,
        }
    }
}

impl EnvironmentConfig {
    pub fn is_enabled(&self) -> bool {
        !self.faces.is_empty()
    }
}

/// Final framebuffer format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Encode the final image as sRGB.
    pub srgb: bool,
    /// Keep an alpha channel so the page behind the canvas shows through.
    pub transparent: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            srgb: true,
            transparent: true,
        }
    }
}

/// Per-frame Euler rotation increments, radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub globe: Vec3,
    pub stars: Vec3,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            globe: Vec3::new(0.0005, 0.0005, 0.0),
            stars: Vec3::new(0.001, 0.001, 0.0),
        }
    }
}

/// Single directional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.65, 2.13, 1.02),
            color: Rgb::WHITE,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    /// Fraction of orbit velocity lost per update, in [0, 1).
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            distance: 3.0,
            damping: 0.1,
        }
    }
}

/// Everything needed to assemble a scene. Missing fields in a config file
/// fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub globe: GlobeConfig,
    pub markers: Vec<MarkerConfig>,
    pub connections: Vec<ConnectionConfig>,
    pub tube: TubeConfig,
    pub starfield: StarfieldConfig,
    pub motion: MotionConfig,
    pub light: LightConfig,
    pub camera: CameraConfig,
    pub environment: EnvironmentConfig,
    pub output: OutputConfig,
    pub post: PostChain,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            globe: GlobeConfig::default(),
            markers: vec![
                MarkerConfig {
                    name: "seoul".into(),
                    latitude_deg: 37.56668,
                    longitude_deg: 126.97841,
                    radius: default_surface_radius(),
                    rotation: Vec3::new(0.9, 2.46, 1.0),
                    color: default_marker_color(),
                    torus: TorusConfig::default(),
                },
                MarkerConfig {
                    name: "accra".into(),
                    latitude_deg: 5.55363,
                    longitude_deg: -0.196481,
                    radius: default_surface_radius(),
                    rotation: Vec3::ZERO,
                    color: default_marker_color(),
                    torus: TorusConfig::default(),
                },
            ],
            connections: vec![ConnectionConfig {
                from: "seoul".into(),
                to: "accra".into(),
                arc: ArcParams::default(),
            }],
            tube: TubeConfig::default(),
            starfield: StarfieldConfig::default(),
            motion: MotionConfig::default(),
            light: LightConfig::default(),
            camera: CameraConfig::default(),
            environment: EnvironmentConfig::default(),
            output: OutputConfig::default(),
            post: PostChain::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SceneError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, SceneError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn marker(&self, name: &str) -> Option<&MarkerConfig> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        for (i, shell) in self.globe.shells.iter().enumerate() {
            if !shell.radius.is_finite() || shell.radius <= 0.0 {
                return Err(SceneError::invalid(
                    format!("globe.shells[{i}].radius"),
                    "must be positive",
                ));
            }
            if !(0.0..=1.0).contains(&shell.opacity) {
                return Err(SceneError::invalid(
                    format!("globe.shells[{i}].opacity"),
                    "must be in [0, 1]",
                ));
            }
            if shell.segments.iter().any(|&s| s < 3) {
                return Err(SceneError::invalid(
                    format!("globe.shells[{i}].segments"),
                    "need at least 3 in each direction",
                ));
            }
        }

        let mut radii = HashMap::new();
        for m in &self.markers {
            if radii.insert(m.name.as_str(), m.radius).is_some() {
                return Err(SceneError::DuplicateMarker(m.name.clone()));
            }
            if !m.radius.is_finite() || m.radius <= 0.0 {
                return Err(SceneError::invalid(
                    format!("markers.{}.radius", m.name),
                    "must be positive",
                ));
            }
            m.torus.validate(&m.name)?;
        }

        // Arcs start and end on the marker positions, so they share the markers' sphere.
        for (i, c) in self.connections.iter().enumerate() {
            c.arc.validate()?;
            for end in [&c.from, &c.to] {
                let radius = *radii
                    .get(end.as_str())
                    .ok_or_else(|| SceneError::UnknownMarker(end.clone()))?;
                if (radius - c.arc.base_radius).abs() > 1e-9 {
                    return Err(SceneError::invalid(
                        format!("connections[{i}].arc.base_radius"),
                        "must equal the radius of both markers",
                    ));
                }
            }
        }

        self.tube.validate()?;

        if !self.starfield.spread.is_finite() || self.starfield.spread <= 0.0 {
            return Err(SceneError::invalid("starfield.spread", "must be positive"));
        }

        if !self.environment.faces.is_empty() && self.environment.faces.len() != 6 {
            return Err(SceneError::invalid(
                "environment.faces",
                "need exactly 6 cube faces, or none",
            ));
        }

        if !(0.0..1.0).contains(&self.camera.damping) {
            return Err(SceneError::invalid("camera.damping", "must be in [0, 1)"));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(SceneError::invalid("camera.near/far", "need 0 < near < far"));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(SceneError::invalid("camera.fov_degrees", "must be in (0, 180)"));
        }

        self.post.validate()?;
        Ok(())
    }
}
