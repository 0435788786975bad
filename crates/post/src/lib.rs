//! Post-processing: the ordered pass chain applied after the scene render,
//! GPU uniform blocks, and the WGSL sources for the custom passes.
//!
//! # Invariants
//! - The scene render pass is always the first stage.
//! - SMAA, when enabled, is always the last enabled stage.
//! - The CPU reference functions compute the same thing as the matching shader.

mod chain;
mod distortion;
mod error;
mod reference;
mod shaders;

pub use chain::{BloomParams, FilmParams, PostChain, PostPass, PostStage};
pub use distortion::{DistortionParams, DistortionUniforms};
pub use error::PostError;
pub use reference::{distort_uv, linear_to_srgb, shade};
pub use shaders::{DISTORTION_SHADER, GAMMA_SHADER, ShaderKind};

pub fn crate_info() -> &'static str {
    "starlight-post v0.1.0"
}
