/// Homogeneous matrix engine: products, column access and transform builders
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, DVector, Matrix4, Vector3};

use crate::error::{GeometryError, Result};

/// Dense row/column matrix of doubles. Transforms are 4x4, edge batches 4xN.
pub type Matrix = DMatrix<f64>;

/// Owned copy of a single matrix column
pub type Vector = DVector<f64>;

/// Axis of a rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl FromStr for Axis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(GeometryError::UnknownAxis(other.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Overwrite `m` with the identity pattern. A non-square matrix gets ones
/// along its leading diagonal.
pub fn identity(m: &mut Matrix) {
    m.fill_with_identity();
}

/// A fresh 4x4 identity matrix
pub fn new_identity() -> Matrix {
    Matrix::identity(4, 4)
}

/// Compute `a × b` and store the product in `b`.
///
/// The second operand is the one replaced: applying a transform to an edge
/// matrix is `multiply(&transform, &mut edges)`.
pub fn multiply(a: &Matrix, b: &mut Matrix) -> Result<()> {
    if a.ncols() != b.nrows() {
        return Err(GeometryError::DimensionMismatch {
            left_rows: a.nrows(),
            left_cols: a.ncols(),
            right_rows: b.nrows(),
            right_cols: b.ncols(),
        });
    }
    *b = a * &*b;
    Ok(())
}

/// Copy column `index` out of `m`
pub fn extract_column(m: &Matrix, index: usize) -> Result<Vector> {
    if index >= m.ncols() {
        return Err(GeometryError::IndexOutOfRange {
            index,
            cols: m.ncols(),
        });
    }
    Ok(m.column(index).into_owned())
}

/// Sum of elementwise products
pub fn dot(u: &Vector, v: &Vector) -> Result<f64> {
    if u.len() != v.len() {
        return Err(GeometryError::DimensionMismatch {
            left_rows: 1,
            left_cols: u.len(),
            right_rows: v.len(),
            right_cols: 1,
        });
    }
    Ok(u.dot(v))
}

fn dynamic(m: Matrix4<f64>) -> Matrix {
    Matrix::from_column_slice(4, 4, m.as_slice())
}

/// Create a translation matrix
pub fn translation(tx: f64, ty: f64, tz: f64) -> Matrix {
    dynamic(Matrix4::new_translation(&Vector3::new(tx, ty, tz)))
}

/// Create a scale matrix
pub fn dilation(sx: f64, sy: f64, sz: f64) -> Matrix {
    dynamic(Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)))
}

fn radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Rotation about X, angle in degrees
pub fn rotation_x(degrees: f64) -> Matrix {
    let (sin, cos) = radians(degrees).sin_cos();
    let mut m = new_identity();
    m[(1, 1)] = cos;
    m[(1, 2)] = -sin;
    m[(2, 1)] = sin;
    m[(2, 2)] = cos;
    m
}

/// Rotation about Y, angle in degrees
pub fn rotation_y(degrees: f64) -> Matrix {
    let (sin, cos) = radians(degrees).sin_cos();
    let mut m = new_identity();
    m[(0, 0)] = cos;
    m[(0, 2)] = sin;
    m[(2, 0)] = -sin;
    m[(2, 2)] = cos;
    m
}

/// Rotation about Z, angle in degrees
pub fn rotation_z(degrees: f64) -> Matrix {
    let (sin, cos) = radians(degrees).sin_cos();
    let mut m = new_identity();
    m[(0, 0)] = cos;
    m[(0, 1)] = -sin;
    m[(1, 0)] = sin;
    m[(1, 1)] = cos;
    m
}

pub fn rotation(axis: Axis, degrees: f64) -> Matrix {
    match axis {
        Axis::X => rotation_x(degrees),
        Axis::Y => rotation_y(degrees),
        Axis::Z => rotation_z(degrees),
    }
}

/// Maps Bezier control values `[p0, p1, p2, p3]` to cubic coefficients
pub fn bezier_basis() -> Matrix {
    Matrix::from_row_slice(
        4,
        4,
        &[
            -1.0, 3.0, -3.0, 1.0, //
            3.0, -6.0, 3.0, 0.0, //
            -3.0, 3.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 0.0,
        ],
    )
}

/// Maps Hermite values `[p0, p1, r0, r1]` to cubic coefficients
pub fn hermite_basis() -> Matrix {
    Matrix::from_row_slice(
        4,
        4,
        &[
            2.0, -2.0, 1.0, 1.0, //
            -3.0, 3.0, -2.0, -1.0, //
            0.0, 0.0, 1.0, 0.0, //
            1.0, 0.0, 0.0, 0.0,
        ],
    )
}
