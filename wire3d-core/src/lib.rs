/// wire3d core - matrices, edge batches and line rasterization
///
/// Everything a wireframe script needs below the command layer: the
/// homogeneous transform engine, the edge matrix with its primitive
/// generators, and an incremental rasterizer writing into an RGB screen.

pub mod edges;
pub mod error;
pub mod matrix;
pub mod raster;
pub mod screen;

// Re-export commonly used types
pub use edges::{CurveKind, CurvePoints, EdgeMatrix, Point3};
pub use error::{GeometryError, Result};
pub use matrix::{Axis, Matrix};
pub use raster::{draw_all, draw_line, LineWalker, Octant};
pub use screen::{Canvas, Color, Screen};
