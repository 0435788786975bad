/// WGSL for the wave distortion pass.
///
/// Bindings: uniforms at 0, the previous pass's color at 1, its sampler at 2.
/// The UV math runs bottom-left-origin so it matches `distort_uv`.
pub const DISTORTION_SHADER: &str = r#"
struct DistortionUniforms {
    position: vec2<f32>,
    brightness: f32,
    alpha: f32,
    color: vec3<f32>,
    _pad: f32,
};

@group(0) @binding(0)
var<uniform> params: DistortionUniforms;
@group(0) @binding(1)
var t_diffuse: texture_2d<f32>;
@group(0) @binding(2)
var s_diffuse: sampler;

struct FullscreenOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) index: u32) -> FullscreenOutput {
    let x = f32((index << 1u) & 2u);
    let y = f32(index & 2u);
    var out: FullscreenOutput;
    out.clip_position = vec4<f32>(x * 2.0 - 1.0, 1.0 - y * 2.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, y);
    return out;
}

@fragment
fn fs_distortion(in: FullscreenOutput) -> @location(0) vec4<f32> {
    let uv = vec2<f32>(in.uv.x, 1.0 - in.uv.y);
    let warped = vec2<f32>(uv.x, uv.y + cos(uv.x * 20.0) * 0.1 + params.position.y);
    var tex = textureSample(t_diffuse, s_diffuse, vec2<f32>(warped.x, 1.0 - warped.y));
    tex = vec4<f32>(tex.rgb + params.color, tex.a);
    return tex / params.brightness;
}
"#;

/// WGSL for linear to sRGB gamma correction.
pub const GAMMA_SHADER: &str = r#"
@group(0) @binding(1)
var t_diffuse: texture_2d<f32>;
@group(0) @binding(2)
var s_diffuse: sampler;

struct FullscreenOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) index: u32) -> FullscreenOutput {
    let x = f32((index << 1u) & 2u);
    let y = f32(index & 2u);
    var out: FullscreenOutput;
    out.clip_position = vec4<f32>(x * 2.0 - 1.0, 1.0 - y * 2.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, y);
    return out;
}

fn linear_to_srgb(c: vec3<f32>) -> vec3<f32> {
    let low = c * 12.92;
    let high = 1.055 * pow(c, vec3<f32>(1.0 / 2.4)) - 0.055;
    return select(high, low, c < vec3<f32>(0.0031308));
}

@fragment
fn fs_gamma(in: FullscreenOutput) -> @location(0) vec4<f32> {
    let tex = textureSample(t_diffuse, s_diffuse, in.uv);
    return vec4<f32>(linear_to_srgb(tex.rgb), tex.a);
}
"#;

/// The custom passes this crate ships shader source for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Distortion,
    Gamma,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 2] = [ShaderKind::Distortion, ShaderKind::Gamma];

    pub fn source(self) -> &'static str {
        match self {
            ShaderKind::Distortion => DISTORTION_SHADER,
            ShaderKind::Gamma => GAMMA_SHADER,
        }
    }

    /// (vertex, fragment) entry point names.
    pub fn entry_points(self) -> (&'static str, &'static str) {
        match self {
            ShaderKind::Distortion => ("vs_fullscreen", "fs_distortion"),
            ShaderKind::Gamma => ("vs_fullscreen", "fs_gamma"),
        }
    }
}
