use std::path::PathBuf;

use line_profile_core::ProfileError;

/// Errors produced by the analysis pipeline. All are fatal to the run.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error("failed to load image {path}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Sample(#[from] ProfileError),

    #[error("failed to write {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode image {path}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("chart rendering failed for {path}: {message}")]
    Chart { path: PathBuf, message: String },

    #[cfg(feature = "display")]
    #[error("preview window failed: {0}")]
    Display(String),
}

/// Errors loading or writing JSON configs and reports.
#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
