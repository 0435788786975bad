use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{DQuat, DVec3};
use starlight_geo::CatmullRom;

use crate::config::TubeConfig;
use crate::error::SceneError;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// Indexed triangle mesh of a thin tube swept along a curve.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    pub vertices: Vec<TubeVertex>,
    pub indices: Vec<u32>,
}

impl TubeMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Sweep a circle of `config.radius` along `curve`.
///
/// Rings are placed evenly by arc length. Ring orientation is carried
/// along the curve by parallel transport, so the tube does not twist. Vertex
/// colors blend from `gradient_start` to `gradient_end` along the tube.
pub fn tessellate(curve: &CatmullRom, config: &TubeConfig) -> Result<TubeMesh, SceneError> {
    config.validate()?;

    let tubular = config.tubular_segments as usize;
    let radial = config.radial_segments as usize;

    let frames = frames(curve, tubular)?;

    let mut vertices = Vec::with_capacity((tubular + 1) * (radial + 1));
    for (i, frame) in frames.iter().enumerate() {
        let u = i as f64 / tubular as f64;
        let center = curve.point_at(u);
        let color = config
            .gradient_start
            .lerp(config.gradient_end, u as f32);
        for j in 0..=radial {
            let v = j as f64 / radial as f64;
            let (sin, cos) = (v * TAU).sin_cos();
            let normal = (-cos * frame.normal + sin * frame.binormal).normalize();
            let position = center + config.radius * normal;
            vertices.push(TubeVertex {
                position: position.as_vec3().to_array(),
                normal: normal.as_vec3().to_array(),
                uv: [u as f32, v as f32],
                color,
            });
        }
    }

    let stride = (radial + 1) as u32;
    let mut indices = Vec::with_capacity(tubular * radial * 6);
    for j in 1..=tubular as u32 {
        for i in 1..=radial as u32 {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Ok(TubeMesh { vertices, indices })
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    normal: DVec3,
    binormal: DVec3,
}

fn frames(curve: &CatmullRom, segments: usize) -> Result<Vec<Frame>, SceneError> {
    let mut tangents: Vec<DVec3> = (0..=segments)
        .map(|i| curve.tangent_at(i as f64 / segments as f64))
        .collect();

    // Patch locally degenerate samples from their neighbours.
    let first = tangents
        .iter()
        .copied()
        .find(|t| *t != DVec3::ZERO)
        .ok_or(SceneError::DegenerateCurve)?;
    let mut last = first;
    for t in &mut tangents {
        if *t == DVec3::ZERO {
            *t = last;
        } else {
            last = *t;
        }
    }

    let t0 = tangents[0];
    let axis = least_aligned_axis(t0);
    let side = t0.cross(axis).normalize();
    let mut normal = t0.cross(side);
    let mut out = Vec::with_capacity(tangents.len());
    out.push(Frame {
        normal,
        binormal: t0.cross(normal),
    });

    for w in tangents.windows(2) {
        let (prev, cur) = (w[0], w[1]);
        let axis = prev.cross(cur);
        if axis.length() > f64::EPSILON {
            let theta = prev.dot(cur).clamp(-1.0, 1.0).acos();
            normal = DQuat::from_axis_angle(axis.normalize(), theta) * normal;
        }
        out.push(Frame {
            normal,
            binormal: cur.cross(normal),
        });
    }
    Ok(out)
}

/// World axis most perpendicular to `t`.
fn least_aligned_axis(t: DVec3) -> DVec3 {
    let a = t.abs();
    if a.x <= a.y && a.x <= a.z {
        DVec3::X
    } else if a.y <= a.z {
        DVec3::Y
    } else {
        DVec3::Z
    }
}
