use std::path::PathBuf;

use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// Case data decoded fine but its coordinates cannot be fitted on a canvas.
    #[error("undrawable geometry: {0}")]
    UndrawableGeometry(String),

    #[error("i/o failure at `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlotError {
    /// Returns `true` for errors that only invalidate the test case being
    /// processed. The pipeline skips such cases and keeps going.
    #[must_use]
    pub fn is_case_scoped(&self) -> bool {
        matches!(
            self,
            Self::MalformedPayload(_) | Self::SchemaViolation(_) | Self::UndrawableGeometry(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
