use serde::{Deserialize, Serialize};

use crate::distortion::DistortionParams;
use crate::error::PostError;

/// Film grain and scanline overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmParams {
    /// Grain strength in [0, 1].
    pub noise_intensity: f32,
    /// Scanline strength in [0, 1].
    pub scanline_intensity: f32,
    pub scanline_count: u32,
    pub grayscale: bool,
}

impl Default for FilmParams {
    fn default() -> Self {
        Self {
            noise_intensity: 1.0,
            scanline_intensity: 1.0,
            scanline_count: 4096,
            grayscale: false,
        }
    }
}

/// Bright-pass bloom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    /// Luminance cutoff in [0, 1].
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: 10.0,
            radius: 0.9,
            threshold: 0.03,
        }
    }
}

/// A single pass of the post chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pass", rename_all = "snake_case")]
pub enum PostPass {
    /// Renders the scene into the chain's first target.
    Render,
    Film(FilmParams),
    GammaCorrection,
    Distortion(DistortionParams),
    Bloom(BloomParams),
    Smaa,
}

impl PostPass {
    pub fn name(&self) -> &'static str {
        match self {
            PostPass::Render => "render",
            PostPass::Film(_) => "film",
            PostPass::GammaCorrection => "gamma_correction",
            PostPass::Distortion(_) => "distortion",
            PostPass::Bloom(_) => "bloom",
            PostPass::Smaa => "smaa",
        }
    }

    pub fn validate(&self) -> Result<(), PostError> {
        match self {
            PostPass::Film(f) => {
                unit_range("film", "noise_intensity", f.noise_intensity)?;
                unit_range("film", "scanline_intensity", f.scanline_intensity)?;
                if f.scanline_count == 0 {
                    return Err(PostError::InvalidParameter {
                        pass: "film",
                        name: "scanline_count",
                        value: 0.0,
                    });
                }
                Ok(())
            }
            PostPass::Bloom(b) => {
                non_negative("bloom", "strength", b.strength)?;
                non_negative("bloom", "radius", b.radius)?;
                unit_range("bloom", "threshold", b.threshold)
            }
            PostPass::Distortion(d) => d.validate(),
            PostPass::Render | PostPass::GammaCorrection | PostPass::Smaa => Ok(()),
        }
    }
}

/// A pass plus whether it currently runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostStage {
    #[serde(flatten)]
    pub pass: PostPass,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl PostStage {
    pub fn enabled(pass: PostPass) -> Self {
        Self {
            pass,
            enabled: true,
        }
    }

    pub fn disabled(pass: PostPass) -> Self {
        Self {
            pass,
            enabled: false,
        }
    }
}

/// Ordered post-processing chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostChain {
    /// Multisample count of the render target the chain draws into.
    pub msaa_samples: u32,
    pub stages: Vec<PostStage>,
}

impl Default for PostChain {
    fn default() -> Self {
        Self {
            msaa_samples: 2,
            stages: vec![
                PostStage::enabled(PostPass::Render),
                PostStage::disabled(PostPass::Film(FilmParams::default())),
                PostStage::enabled(PostPass::Distortion(DistortionParams::default())),
                PostStage::disabled(PostPass::Bloom(BloomParams::default())),
                PostStage::enabled(PostPass::GammaCorrection),
                PostStage::enabled(PostPass::Smaa),
            ],
        }
    }
}

impl PostChain {
    /// Passes that will actually run, in order.
    pub fn enabled_passes(&self) -> impl Iterator<Item = &PostPass> {
        self.stages.iter().filter(|s| s.enabled).map(|s| &s.pass)
    }

    /// Toggle every stage whose pass has the given name. Returns how many
    /// stages matched.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> usize {
        let mut hits = 0;
        for stage in self.stages.iter_mut().filter(|s| s.pass.name() == name) {
            stage.enabled = enabled;
            hits += 1;
        }
        if hits > 0 {
            tracing::debug!(pass = name, enabled, "post stage toggled");
        }
        hits
    }

    /// First distortion pass, for live tuning.
    pub fn distortion_mut(&mut self) -> Option<&mut DistortionParams> {
        self.stages.iter_mut().find_map(|s| match &mut s.pass {
            PostPass::Distortion(d) => Some(d),
            _ => None,
        })
    }

    pub fn validate(&self) -> Result<(), PostError> {
        if !matches!(self.msaa_samples, 1 | 2 | 4 | 8) {
            return Err(PostError::InvalidSampleCount(self.msaa_samples));
        }

        let renders = self
            .stages
            .iter()
            .filter(|s| matches!(s.pass, PostPass::Render))
            .count();
        match renders {
            0 => return Err(PostError::MissingRenderPass),
            1 => {}
            _ => return Err(PostError::DuplicateRenderPass),
        }
        match self.stages.first() {
            Some(s) if s.enabled && matches!(s.pass, PostPass::Render) => {}
            _ => return Err(PostError::RenderPassNotFirst),
        }

        let enabled: Vec<&PostPass> = self.enabled_passes().collect();
        if let Some(pos) = enabled.iter().position(|p| matches!(p, PostPass::Smaa)) {
            if pos != enabled.len() - 1 {
                return Err(PostError::SmaaNotLast);
            }
        }

        for stage in &self.stages {
            stage.pass.validate()?;
        }
        Ok(())
    }
}

fn unit_range(pass: &'static str, name: &'static str, value: f32) -> Result<(), PostError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PostError::InvalidParameter { pass, name, value })
    }
}

fn non_negative(pass: &'static str, name: &'static str, value: f32) -> Result<(), PostError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PostError::InvalidParameter { pass, name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_is_valid() {
        let chain = PostChain::default();
        chain.validate().unwrap();
        let names: Vec<&str> = chain.enabled_passes().map(PostPass::name).collect();
        assert_eq!(names, ["render", "distortion", "gamma_correction", "smaa"]);
    }

    #[test]
    fn distortion_runs_before_gamma_encoding() {
        let chain = PostChain::default();
        let position = |name: &str| chain.stages.iter().position(|s| s.pass.name() == name);
        let distortion = position("distortion").unwrap();
        let gamma = position("gamma_correction").unwrap();
        assert!(distortion < gamma);
        // Film and bloom are configured but off.
        assert!(position("film").is_some_and(|i| !chain.stages[i].enabled));
        assert!(position("bloom").is_some_and(|i| !chain.stages[i].enabled && i < gamma));
    }

    #[test]
    fn render_must_come_first() {
        let mut chain = PostChain::default();
        chain.stages.swap(0, 1);
        assert_eq!(chain.validate(), Err(PostError::RenderPassNotFirst));
    }

    #[test]
    fn render_cannot_be_disabled() {
        let mut chain = PostChain::default();
        chain.set_enabled("render", false);
        assert_eq!(chain.validate(), Err(PostError::RenderPassNotFirst));
    }

    #[test]
    fn missing_or_duplicate_render() {
        let mut chain = PostChain::default();
        chain.stages.remove(0);
        assert_eq!(chain.validate(), Err(PostError::MissingRenderPass));

        let mut chain = PostChain::default();
        chain.stages.push(PostStage::enabled(PostPass::Render));
        assert_eq!(chain.validate(), Err(PostError::DuplicateRenderPass));
    }

    #[test]
    fn smaa_must_be_last_enabled() {
        let mut chain = PostChain::default();
        // Bloom after SMAA, disabled: still fine.
        let bloom = chain.stages.remove(3);
        chain.stages.push(bloom);
        chain.validate().unwrap();

        chain.set_enabled("bloom", true);
        assert_eq!(chain.validate(), Err(PostError::SmaaNotLast));
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut chain = PostChain::default();
        chain.stages[1] = PostStage::enabled(PostPass::Film(FilmParams {
            noise_intensity: 2.0,
            ..FilmParams::default()
        }));
        assert!(matches!(
            chain.validate(),
            Err(PostError::InvalidParameter {
                pass: "film",
                name: "noise_intensity",
                ..
            })
        ));

        let mut chain = PostChain::default();
        chain.msaa_samples = 3;
        assert_eq!(chain.validate(), Err(PostError::InvalidSampleCount(3)));
    }

    #[test]
    fn toggle_and_tune() {
        let mut chain = PostChain::default();
        assert_eq!(chain.set_enabled("bloom", true), 1);
        assert_eq!(chain.set_enabled("nope", true), 0);
        assert_eq!(chain.enabled_passes().count(), 5);

        chain.distortion_mut().unwrap().set_brightness(0.5).unwrap();
        let d = chain
            .enabled_passes()
            .find_map(|p| match p {
                PostPass::Distortion(d) => Some(*d),
                _ => None,
            })
            .unwrap();
        assert_eq!(d.brightness, 0.5);
    }

    #[test]
    fn yaml_stage_list() {
        let yaml = r#"
msaa_samples: 4
stages:
  - pass: render
  - pass: film
    noise_intensity: 0.5
    grayscale: true
  - pass: bloom
    enabled: false
  - pass: smaa
"#;
        let chain: PostChain = serde_yaml::from_str(yaml).unwrap();
        chain.validate().unwrap();
        assert_eq!(chain.msaa_samples, 4);
        assert_eq!(chain.stages.len(), 4);
        assert_eq!(
            chain.stages[1].pass,
            PostPass::Film(FilmParams {
                noise_intensity: 0.5,
                grayscale: true,
                ..FilmParams::default()
            })
        );
        assert!(!chain.stages[2].enabled);
    }
}
