/// Errors raised by the matrix engine and the primitive generators
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("dimension mismatch: {left_rows}x{left_cols} cannot multiply {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },
    #[error("column {index} out of range for matrix with {cols} columns")]
    IndexOutOfRange { index: usize, cols: usize },
    #[error("unknown rotation axis '{0}' (expected x, y or z)")]
    UnknownAxis(String),
    #[error("unknown curve type '{0}' (expected bezier or hermite)")]
    UnknownCurveType(String),
    #[error("tessellation step must be finite and positive, got {0}")]
    InvalidStep(f64),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
