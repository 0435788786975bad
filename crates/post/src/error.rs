/// Errors from post chain validation and parameter updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PostError {
    #[error("post chain has no render pass")]
    MissingRenderPass,
    #[error("render pass must be the first enabled stage")]
    RenderPassNotFirst,
    #[error("post chain has more than one render pass")]
    DuplicateRenderPass,
    #[error("SMAA must be the last enabled stage")]
    SmaaNotLast,
    #[error("{pass}: {name} out of range ({value})")]
    InvalidParameter {
        pass: &'static str,
        name: &'static str,
        value: f32,
    },
    #[error("unsupported MSAA sample count: {0}")]
    InvalidSampleCount(u32),
}
