use glam::{EulerRot, Mat4, Quat, Vec3};
use starlight_geo::{ArcCurve, GeoPoint, SpherePoint, build_arc_with, project};
use starlight_post::PostChain;

use crate::config::{
    EnvironmentConfig, LightConfig, MotionConfig, OutputConfig, Rgb, SceneConfig, ShellConfig,
    StarfieldConfig, TorusConfig,
};
use crate::error::SceneError;
use crate::starfield::Starfield;
use crate::tube::{TubeMesh, tessellate};

/// A torus marker resolved to its place on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub geo: GeoPoint,
    pub position: SpherePoint,
    pub rotation: Vec3,
    pub color: Rgb,
    pub torus: TorusConfig,
}

/// An arc between two markers plus its tube mesh.
#[derive(Debug, Clone)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub arc: ArcCurve,
    pub tube: TubeMesh,
}

/// Assembled scene: everything a backend needs to draw a frame.
///
/// The shells, markers and arcs form the globe group and rotate together.
/// The starfield rotates on its own. Stepping only touches rotation and the
/// frame counter; geometry is fixed at build time.
#[derive(Debug, Clone)]
pub struct Scene {
    shells: Vec<ShellConfig>,
    texture_yaw: f32,
    markers: Vec<Marker>,
    connections: Vec<Connection>,
    starfield: Starfield,
    star_style: StarfieldConfig,
    light: LightConfig,
    environment: EnvironmentConfig,
    output: OutputConfig,
    motion: MotionConfig,
    post: PostChain,
    globe_euler: Vec3,
    star_euler: Vec3,
    frame: u64,
}

impl Scene {
    pub fn build(config: &SceneConfig) -> Result<Self, SceneError> {
        let _span = tracing::info_span!("scene_build").entered();
        config.validate()?;

        let markers = config
            .markers
            .iter()
            .map(|m| {
                let geo = GeoPoint::from_degrees(m.latitude_deg, m.longitude_deg);
                Ok(Marker {
                    name: m.name.clone(),
                    geo,
                    position: project(geo, m.radius)?,
                    rotation: m.rotation,
                    color: m.color,
                    torus: m.torus,
                })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;

        let mut connections = Vec::with_capacity(config.connections.len());
        for c in &config.connections {
            let from = find_marker(&markers, &c.from)?;
            let to = find_marker(&markers, &c.to)?;
            let arc = build_arc_with(from.position, to.position, c.arc)?;
            let tube = tessellate(&arc.spline()?, &config.tube)?;
            tracing::debug!(
                from = %c.from,
                to = %c.to,
                points = arc.len(),
                triangles = tube.triangle_count(),
                "connection built"
            );
            connections.push(Connection {
                from: c.from.clone(),
                to: c.to.clone(),
                arc,
                tube,
            });
        }

        let sf = &config.starfield;
        let starfield = Starfield::generate(sf.count, sf.spread, sf.seed);

        tracing::info!(
            shells = config.globe.shells.len(),
            markers = markers.len(),
            connections = connections.len(),
            stars = starfield.len(),
            "scene built"
        );

        Ok(Self {
            shells: config.globe.shells.clone(),
            texture_yaw: config.globe.texture_yaw,
            markers,
            connections,
            starfield,
            star_style: sf.clone(),
            light: config.light,
            environment: config.environment.clone(),
            output: config.output,
            motion: config.motion,
            post: config.post.clone(),
            globe_euler: Vec3::ZERO,
            star_euler: Vec3::ZERO,
            frame: 0,
        })
    }

    /// Advance one frame of idle rotation.
    pub fn step(&mut self) {
        self.globe_euler += self.motion.globe;
        self.star_euler += self.motion.stars;
        self.frame += 1;
        tracing::trace!(frame = self.frame, "scene stepped");
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn shells(&self) -> &[ShellConfig] {
        &self.shells
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn star_size(&self) -> f32 {
        self.star_style.size
    }

    pub fn star_color(&self) -> Rgb {
        self.star_style.color
    }

    /// Point material of the starfield: sprite, blending and depth writes.
    pub fn star_style(&self) -> &StarfieldConfig {
        &self.star_style
    }

    pub fn light(&self) -> &LightConfig {
        &self.light
    }

    pub fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    pub fn output(&self) -> OutputConfig {
        self.output
    }

    pub fn post(&self) -> &PostChain {
        &self.post
    }

    pub fn post_mut(&mut self) -> &mut PostChain {
        &mut self.post
    }

    /// Accumulated globe rotation as Euler XYZ angles.
    pub fn globe_euler(&self) -> Vec3 {
        self.globe_euler
    }

    pub fn star_euler(&self) -> Vec3 {
        self.star_euler
    }

    pub fn globe_rotation(&self) -> Quat {
        euler_xyz(self.globe_euler)
    }

    pub fn star_rotation(&self) -> Quat {
        euler_xyz(self.star_euler)
    }

    /// Model matrix of a shell: group rotation, then the texture yaw.
    pub fn shell_transform(&self) -> Mat4 {
        Mat4::from_quat(self.globe_rotation()) * Mat4::from_rotation_y(self.texture_yaw)
    }

    /// Where a marker currently is, after the globe group rotation.
    pub fn marker_world_position(&self, name: &str) -> Option<Vec3> {
        self.marker(name)
            .map(|m| self.globe_rotation() * m.position.as_vec3())
    }
}

fn euler_xyz(e: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z)
}

fn find_marker<'a>(markers: &'a [Marker], name: &str) -> Result<&'a Marker, SceneError> {
    markers
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| SceneError::UnknownMarker(name.to_string()))
}
