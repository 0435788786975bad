//! Rendering adapter: renderer-agnostic interface over an assembled scene.
//!
//! # Invariants
//! - Renderers read the scene and camera; they never mutate either.
//! - Everything a frame needs (geometry, rotation, post chain) comes from the scene.
//!
//! A GPU backend implements [`Renderer`] the same way the debug text
//! renderer does, consuming tube meshes, star positions and the post chain.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "starlight-render v0.1.0"
}
