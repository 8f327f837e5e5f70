use thiserror::Error;

/// Why a settings record was rejected before building a flock
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("population must be between {min} and {max}, got {value}")]
    Population { value: usize, min: usize, max: usize },

    #[error("invalid settings JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
