use std::fmt::Write as _;

use starlight_post::PostPass;
use starlight_scene::{OrbitCamera, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a camera, then produces output. It
/// never mutates the scene; rotation is advanced by `Scene::step`.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and camera.
    fn render(&self, scene: &Scene, camera: &OrbitCamera) -> Self::Output;
}

/// Human-readable frame report.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &OrbitCamera) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_report(&mut out, scene, camera);
        tracing::trace!(frame = scene.frame(), bytes = out.len(), "debug frame rendered");
        out
    }
}

fn write_report(out: &mut String, scene: &Scene, camera: &OrbitCamera) -> std::fmt::Result {
    let g = scene.globe_euler();
    let s = scene.star_euler();
    writeln!(out, "=== Scene (frame={}) ===", scene.frame())?;
    writeln!(
        out,
        "Globe rotation: ({:.4}, {:.4}, {:.4})  Stars rotation: ({:.4}, {:.4}, {:.4})",
        g.x, g.y, g.z, s.x, s.y, s.z
    )?;

    writeln!(out, "Shells: {}", scene.shells().len())?;
    for shell in scene.shells() {
        writeln!(
            out,
            "  r={:.2} opacity={:.2} side={:?} segments={}x{} texture={}",
            shell.radius,
            shell.opacity,
            shell.side,
            shell.segments[0],
            shell.segments[1],
            asset(shell.texture.as_deref())
        )?;
    }

    writeln!(out, "Markers: {}", scene.markers().len())?;
    for m in scene.markers() {
        let p = m.position;
        let t = m.torus;
        writeln!(
            out,
            "  [{}] lat={:.4} lng={:.4} pos=({:.3}, {:.3}, {:.3}) color={} torus={}/{} {}x{}",
            m.name,
            m.geo.latitude.to_degrees(),
            m.geo.longitude.to_degrees(),
            p.x,
            p.y,
            p.z,
            m.color,
            t.radius,
            t.tube,
            t.radial_segments,
            t.tubular_segments
        )?;
    }

    writeln!(out, "Arcs: {}", scene.connections().len())?;
    for c in scene.connections() {
        writeln!(
            out,
            "  {} -> {}: points={} peak={:.3} tube_vertices={} tube_triangles={}",
            c.from,
            c.to,
            c.arc.len(),
            c.arc.peak_height(),
            c.tube.vertices.len(),
            c.tube.triangle_count()
        )?;
    }

    let stars = scene.star_style();
    writeln!(
        out,
        "Stars: {} (spread={:.1}, seed={}, size={}, color={}, sprite={}, alpha_map={}, transparent={}, depth_write={})",
        scene.starfield().len(),
        scene.starfield().spread(),
        scene.starfield().seed(),
        scene.star_size(),
        scene.star_color(),
        asset(stars.sprite.as_deref()),
        asset(stars.alpha_map.as_deref()),
        stars.transparent,
        stars.depth_write
    )?;

    let env = scene.environment();
    if env.is_enabled() {
        writeln!(
            out,
            "Environment: {} faces [{}] background={} lighting={} srgb={}",
            env.faces.len(),
            env.faces.join(", "),
            env.background,
            env.lighting,
            env.srgb
        )?;
    } else {
        writeln!(out, "Environment: none")?;
    }

    let light = scene.light();
    writeln!(
        out,
        "Light: pos=({:.2}, {:.2}, {:.2}) color={} intensity={:.1}",
        light.position.x, light.position.y, light.position.z, light.color, light.intensity
    )?;

    let eye = camera.position();
    writeln!(
        out,
        "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.2}",
        eye.x,
        eye.y,
        eye.z,
        camera.target.x,
        camera.target.y,
        camera.target.z,
        camera.fov.to_degrees(),
        camera.aspect
    )?;

    let output = scene.output();
    writeln!(
        out,
        "Output: srgb={} transparent={}",
        output.srgb, output.transparent
    )?;

    let post = scene.post();
    let passes: Vec<String> = post.enabled_passes().map(describe_pass).collect();
    writeln!(
        out,
        "Post (msaa={}): {}",
        post.msaa_samples,
        passes.join(" -> ")
    )?;
    Ok(())
}

fn asset(path: Option<&str>) -> &str {
    path.unwrap_or("none")
}

fn describe_pass(pass: &PostPass) -> String {
    match pass {
        PostPass::Film(f) => format!(
            "film(noise={:.2}, scanlines={:.2}x{})",
            f.noise_intensity, f.scanline_intensity, f.scanline_count
        ),
        PostPass::Distortion(d) => format!(
            "distortion(brightness={:.2}, y={:.2})",
            d.brightness, d.position.y
        ),
        PostPass::Bloom(b) => format!("bloom(strength={:.1})", b.strength),
        other => other.name().to_string(),
    }
}
