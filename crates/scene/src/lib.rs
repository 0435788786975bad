//! Scene description for the rotating Earth: two translucent globe shells,
//! torus markers at geographic points, tube arcs between markers, a seeded
//! starfield, one directional light and the post chain.
//!
//! # Invariants
//! - Geometry (marker positions, arcs, tubes, stars) is fixed when the scene is built.
//! - Stepping a scene only advances rotation and the frame counter.
//! - Camera state is owned by the caller, never by the scene.

mod camera;
mod config;
mod error;
mod scene;
mod starfield;
mod tube;

pub use camera::OrbitCamera;
pub use config::{
    CameraConfig, ConnectionConfig, EnvironmentConfig, GlobeConfig, LightConfig, MarkerConfig,
    MotionConfig, OutputConfig, Rgb, SceneConfig, ShellConfig, Side, StarfieldConfig,
    TorusConfig, TubeConfig,
};
pub use error::SceneError;
pub use scene::{Connection, Marker, Scene};
pub use starfield::Starfield;
pub use tube::{TubeMesh, TubeVertex, tessellate};

pub fn crate_info() -> &'static str {
    "starlight-scene v0.1.0"
}
