use starlight_geo::GeoError;
use starlight_post::PostError;

/// Errors from scene configuration and assembly.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("geometry error: {0}")]
    Geo(#[from] GeoError),
    #[error("post chain error: {0}")]
    Post(#[from] PostError),
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("connection refers to unknown marker {0:?}")]
    UnknownMarker(String),
    #[error("marker name {0:?} used more than once")]
    DuplicateMarker(String),
    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: &'static str },
    #[error("curve has no direction to build a tube along")]
    DegenerateCurve,
}

impl SceneError {
    pub(crate) fn invalid(field: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid {
            field: field.into(),
            reason,
        }
    }
}
