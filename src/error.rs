//! Error type shared by the history loaders and the chart renderers.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A required metric series is absent from a loaded record, or empty
    /// at render time.
    #[error("metric series `{0}` is missing or empty")]
    MissingMetric(&'static str),

    /// Two metric series that must be plotted against the same epoch axis
    /// have different lengths.
    #[error("metric series `{first}` has {first_len} entries but `{second}` has {second_len}")]
    ShapeMismatch {
        first: &'static str,
        first_len: usize,
        second: &'static str,
        second_len: usize,
    },

    /// An activation index does not refer to a captured layer.
    #[error("activation index {index} is out of range for a set of {len} layers")]
    IndexOutOfRange { index: usize, len: usize },

    /// A grid layout asks for more channel slices than the selected tensor holds.
    #[error("a {row_size}x{col_size} grid needs {needed} channel slices but the tensor has {available}")]
    GridOverflow {
        row_size: usize,
        col_size: usize,
        needed: usize,
        available: usize,
    },

    /// A grid layout with a zero row or column count.
    #[error("grid layout dimensions must be positive, got {row_size}x{col_size}")]
    EmptyGridLayout { row_size: usize, col_size: usize },

    /// An activation tensor with a zero-length dimension.
    #[error("activation tensor has an empty dimension, shape {shape:?}")]
    EmptyActivation { shape: [usize; 4] },

    /// A metric cell in a CSV log that does not parse as a number.
    #[error("invalid value for `{metric}` at data row {row}: {source}")]
    InvalidValue {
        metric: &'static str,
        row: usize,
        source: std::num::ParseFloatError,
    },

    /// Failure reported by the plotters drawing backend.
    #[error("drawing backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Error::Backend(err.to_string())
    }
}
