/// Edge matrix: a growing batch of homogeneous points, paired into edges
use std::f64::consts::PI;
use std::str::FromStr;

use log::trace;

use crate::error::{GeometryError, Result};
use crate::matrix::{self, Matrix};

/// Default sampling step for circles
pub const CIRCLE_STEP: f64 = 0.001;
/// Default sampling step for Bezier and Hermite curves
pub const CURVE_STEP: f64 = 0.001;
/// Default grid step for sphere and torus surfaces
pub const SURFACE_STEP: f64 = 0.01;

const ROWS: usize = 4;

/// A point in model space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Cubic curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Bezier,
    Hermite,
}

impl CurveKind {
    pub fn basis(self) -> Matrix {
        match self {
            CurveKind::Bezier => matrix::bezier_basis(),
            CurveKind::Hermite => matrix::hermite_basis(),
        }
    }
}

impl FromStr for CurveKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bezier" => Ok(CurveKind::Bezier),
            "hermite" => Ok(CurveKind::Hermite),
            other => Err(GeometryError::UnknownCurveType(other.to_string())),
        }
    }
}

/// Four 2D control values of a cubic curve.
///
/// For Bezier these are the four control points. For Hermite they are the
/// two endpoints followed by the two tangent vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoints {
    pub xs: [f64; 4],
    pub ys: [f64; 4],
}

impl CurvePoints {
    /// Build from the flat script order `x0 y0 x1 y1 x2 y2 x3 y3`
    pub fn from_flat(v: [f64; 8]) -> Self {
        Self {
            xs: [v[0], v[2], v[4], v[6]],
            ys: [v[1], v[3], v[5], v[7]],
        }
    }
}

/// Number of samples `i * step` that fall in `[0, span)`
fn sample_count(span: f64, step: f64) -> Result<usize> {
    if !step.is_finite() || step <= 0.0 {
        return Err(GeometryError::InvalidStep(step));
    }
    Ok((span / step - 1e-9).ceil().max(0.0) as usize)
}

/// Coefficients `[c0, c1, c2, c3]` of `c0·t³ + c1·t² + c2·t + c3`
fn curve_coefficients(basis: &Matrix, values: [f64; 4]) -> Result<[f64; 4]> {
    let mut coefs = Matrix::from_column_slice(4, 1, &values);
    matrix::multiply(basis, &mut coefs)?;
    Ok([coefs[0], coefs[1], coefs[2], coefs[3]])
}

/// Evaluate a cubic with coefficients ordered highest degree first
pub fn cubic_eval(t: f64, coefs: &[f64; 4]) -> f64 {
    ((coefs[0] * t + coefs[1]) * t + coefs[2]) * t + coefs[3]
}

/// Homogeneous 4xN point batch. Columns `2k` and `2k + 1` form edge `k`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeMatrix {
    // Column-major: x, y, z, w per point
    data: Vec<f64>,
}

impl EdgeMatrix {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(points: usize) -> Self {
        Self {
            data: Vec::with_capacity(points * ROWS),
        }
    }

    /// Number of point columns
    pub fn len_points(&self) -> usize {
        self.data.len() / ROWS
    }

    /// Number of complete edges; a trailing unpaired point is not counted
    pub fn edge_count(&self) -> usize {
        self.len_points() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Homogeneous column `index` as `[x, y, z, w]`
    pub fn column(&self, index: usize) -> Result<[f64; 4]> {
        if index >= self.len_points() {
            return Err(GeometryError::IndexOutOfRange {
                index,
                cols: self.len_points(),
            });
        }
        let c = &self.data[index * ROWS..(index + 1) * ROWS];
        Ok([c[0], c[1], c[2], c[3]])
    }

    /// Iterate over complete edges as pairs of homogeneous columns
    pub fn edges(&self) -> impl Iterator<Item = ([f64; 4], [f64; 4])> + '_ {
        self.data.chunks_exact(ROWS * 2).map(|pair| {
            (
                [pair[0], pair[1], pair[2], pair[3]],
                [pair[4], pair[5], pair[6], pair[7]],
            )
        })
    }

    /// Copy out as a 4xN matrix
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_column_slice(ROWS, self.len_points(), &self.data)
    }

    /// Replace the contents with the columns of a 4xN matrix
    pub fn replace_with(&mut self, m: &Matrix) -> Result<()> {
        if m.nrows() != ROWS {
            return Err(GeometryError::DimensionMismatch {
                left_rows: m.nrows(),
                left_cols: m.ncols(),
                right_rows: ROWS,
                right_cols: m.ncols(),
            });
        }
        self.data.clear();
        self.data.extend_from_slice(m.as_slice());
        Ok(())
    }

    /// Multiply `transform` into every point, replacing the stored columns
    pub fn apply(&mut self, transform: &Matrix) -> Result<()> {
        let mut m = self.to_matrix();
        matrix::multiply(transform, &mut m)?;
        self.replace_with(&m)
    }

    pub fn add_point(&mut self, x: f64, y: f64, z: f64) {
        self.data.extend_from_slice(&[x, y, z, 1.0]);
    }

    pub fn add_edge(&mut self, p0: Point3, p1: Point3) {
        self.add_point(p0.x, p0.y, p0.z);
        self.add_point(p1.x, p1.y, p1.z);
    }

    /// Circle of radius `r` around `(cx, cy)` in the XY plane.
    ///
    /// Samples are appended as individual points, so consecutive samples
    /// end up paired into short chords. The center's z is not used.
    pub fn add_circle(&mut self, cx: f64, cy: f64, _cz: f64, r: f64, step: f64) -> Result<()> {
        let n = sample_count(1.0, step)?;
        self.data.reserve(n * ROWS);
        for i in 0..n {
            let angle = 2.0 * PI * (i as f64 * step);
            self.add_point(r * angle.cos() + cx, r * angle.sin() + cy, 0.0);
        }
        trace!("circle at ({cx}, {cy}) r={r}: {n} points");
        Ok(())
    }

    /// Tessellate a cubic curve, one `(x, y, 0)` point per sample
    pub fn add_curve(&mut self, points: CurvePoints, step: f64, kind: CurveKind) -> Result<()> {
        let n = sample_count(1.0, step)?;
        let basis = kind.basis();
        let xc = curve_coefficients(&basis, points.xs)?;
        let yc = curve_coefficients(&basis, points.ys)?;

        self.data.reserve(n * ROWS);
        for i in 0..n {
            let t = i as f64 * step;
            self.add_point(cubic_eval(t, &xc), cubic_eval(t, &yc), 0.0);
        }
        trace!("{kind:?} curve: {n} points");
        Ok(())
    }

    /// The 12 edges of an axis-aligned box. `(x, y, z)` is the near top
    /// left corner; the box extends +width in x, -height in y, -depth in z.
    pub fn add_box(&mut self, x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) {
        let (x1, y1, z1) = (x + width, y - height, z - depth);
        let p = Point3::new;

        self.add_edge(p(x, y, z), p(x1, y, z));
        self.add_edge(p(x, y, z), p(x, y1, z));
        self.add_edge(p(x, y, z), p(x, y, z1));

        self.add_edge(p(x, y1, z), p(x, y1, z1));
        self.add_edge(p(x, y1, z), p(x1, y1, z));
        self.add_edge(p(x, y1, z1), p(x1, y1, z1));
        self.add_edge(p(x1, y1, z), p(x1, y1, z1));

        self.add_edge(p(x, y, z1), p(x1, y, z1));
        self.add_edge(p(x, y, z1), p(x, y1, z1));

        self.add_edge(p(x1, y, z), p(x1, y1, z));
        self.add_edge(p(x1, y, z), p(x1, y, z1));
        self.add_edge(p(x1, y, z1), p(x1, y1, z1));
    }

    /// Sphere as a dot cloud: each surface sample becomes the edge
    /// `p -> p + (1, 1, 1)`.
    pub fn add_sphere(&mut self, cx: f64, cy: f64, cz: f64, r: f64, step: f64) -> Result<()> {
        let points = sphere_points(Point3::new(cx, cy, cz), r, step)?;
        self.add_dots(&points);
        Ok(())
    }

    /// Torus as a dot cloud. `tube_radius` is the cross-section radius and
    /// `ring_radius` the distance from the center to the tube's center.
    pub fn add_torus(
        &mut self,
        cx: f64,
        cy: f64,
        cz: f64,
        tube_radius: f64,
        ring_radius: f64,
        step: f64,
    ) -> Result<()> {
        let points = torus_points(Point3::new(cx, cy, cz), tube_radius, ring_radius, step)?;
        self.add_dots(&points);
        Ok(())
    }

    fn add_dots(&mut self, points: &[Point3]) {
        self.data.reserve(points.len() * ROWS * 2);
        for p in points {
            self.add_edge(*p, Point3::new(p.x + 1.0, p.y + 1.0, p.z + 1.0));
        }
    }
}

/// Surface samples of a sphere over `i ∈ [0, 1)`, `j ∈ [0, 0.5)`
pub fn sphere_points(center: Point3, r: f64, step: f64) -> Result<Vec<Point3>> {
    let rotations = sample_count(1.0, step)?;
    let arcs = sample_count(0.5, step)?;
    let mut points = Vec::with_capacity(rotations * arcs);

    for i in 0..rotations {
        let phi = 2.0 * PI * (i as f64 * step);
        for j in 0..arcs {
            let theta = 2.0 * PI * (j as f64 * step);
            points.push(Point3::new(
                r * theta.cos() + center.x,
                r * theta.sin() * phi.cos() + center.y,
                r * theta.sin() * phi.sin() + center.z,
            ));
        }
    }
    Ok(points)
}

/// Surface samples of a torus over `i, j ∈ [0, 1)`
pub fn torus_points(
    center: Point3,
    tube_radius: f64,
    ring_radius: f64,
    step: f64,
) -> Result<Vec<Point3>> {
    let n = sample_count(1.0, step)?;
    let mut points = Vec::with_capacity(n * n);

    for i in 0..n {
        let phi = 2.0 * PI * (i as f64 * step);
        for j in 0..n {
            let theta = 2.0 * PI * (j as f64 * step);
            let reach = tube_radius * theta.cos() + ring_radius;
            points.push(Point3::new(
                phi.cos() * reach + center.x,
                tube_radius * theta.sin() + center.y,
                -phi.sin() * reach + center.z,
            ));
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_pairing() {
        let mut edges = EdgeMatrix::new();
        for k in 0..5 {
            let k = k as f64;
            edges.add_edge(Point3::new(k, 0.0, 0.0), Point3::new(k, 10.0, -k));
        }
        assert_eq!(edges.len_points(), 10);
        assert_eq!(edges.edge_count(), 5);

        for (i, (a, b)) in edges.edges().enumerate() {
            assert_eq!(a, edges.column(2 * i).unwrap());
            assert_eq!(b, edges.column(2 * i + 1).unwrap());
            assert_eq!(a[0], i as f64);
            assert_eq!(b, [i as f64, 10.0, -(i as f64), 1.0]);
        }
    }

    #[test]
    fn test_column_out_of_range() {
        let mut edges = EdgeMatrix::new();
        edges.add_point(1.0, 2.0, 3.0);
        assert_eq!(edges.column(0).unwrap(), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(
            edges.column(1).unwrap_err(),
            GeometryError::IndexOutOfRange { index: 1, cols: 1 }
        );
    }

    #[test]
    fn test_circle_points_on_radius() {
        let mut edges = EdgeMatrix::new();
        edges.add_circle(0.0, 0.0, 0.0, 5.0, CIRCLE_STEP).unwrap();
        assert_eq!(edges.len_points(), 1000);
        for j in 0..edges.len_points() {
            let [x, y, z, w] = edges.column(j).unwrap();
            assert!((x * x + y * y - 25.0).abs() < 1e-6);
            assert_eq!(z, 0.0);
            assert_eq!(w, 1.0);
        }
    }

    #[test]
    fn test_circle_ignores_center_z() {
        let mut edges = EdgeMatrix::new();
        edges.add_circle(10.0, 20.0, 30.0, 1.0, 0.25).unwrap();
        assert_eq!(edges.len_points(), 4);
        let [x, y, z, _] = edges.column(0).unwrap();
        assert_eq!((x, y, z), (11.0, 20.0, 0.0));
    }

    #[test]
    fn test_invalid_step() {
        let mut edges = EdgeMatrix::new();
        assert_eq!(
            edges.add_circle(0.0, 0.0, 0.0, 1.0, 0.0).unwrap_err(),
            GeometryError::InvalidStep(0.0)
        );
        assert!(edges.add_sphere(0.0, 0.0, 0.0, 1.0, -0.5).is_err());
        assert!(edges.is_empty());
    }

    #[test]
    fn test_sample_count_half_open() {
        assert_eq!(sample_count(1.0, 0.001).unwrap(), 1000);
        assert_eq!(sample_count(1.0, 0.01).unwrap(), 100);
        assert_eq!(sample_count(0.5, 0.01).unwrap(), 50);
        assert_eq!(sample_count(1.0, 0.3).unwrap(), 4);
    }

    #[test]
    fn test_bezier_hits_first_control_point() {
        let mut edges = EdgeMatrix::new();
        let points = CurvePoints::from_flat([0.0, 0.0, 10.0, 40.0, 30.0, 40.0, 40.0, 0.0]);
        edges.add_curve(points, CURVE_STEP, CurveKind::Bezier).unwrap();
        assert_eq!(edges.len_points(), 1000);
        assert_eq!(edges.column(0).unwrap(), [0.0, 0.0, 0.0, 1.0]);

        // Midpoint of a cubic Bezier is (p0 + 3p1 + 3p2 + p3) / 8
        let [x, y, _, _] = edges.column(500).unwrap();
        assert!((x - 20.0).abs() < 1e-9);
        assert!((y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_hermite_matches_endpoint_and_tangent() {
        // p0 = (0, 0), p1 = (10, 0), r0 = (10, 0), r1 = (10, 0): a straight line
        let points = CurvePoints::from_flat([0.0, 0.0, 10.0, 0.0, 10.0, 0.0, 10.0, 0.0]);
        let mut edges = EdgeMatrix::new();
        edges.add_curve(points, 0.25, CurveKind::Hermite).unwrap();
        assert_eq!(edges.len_points(), 4);
        for j in 0..4 {
            let [x, y, _, _] = edges.column(j).unwrap();
            assert!((x - 2.5 * j as f64).abs() < 1e-9);
            assert_eq!(y, 0.0);
        }
    }

    #[test]
    fn test_cubic_eval_highest_degree_first() {
        assert_eq!(cubic_eval(2.0, &[1.0, 0.0, 0.0, 0.0]), 8.0);
        assert_eq!(cubic_eval(2.0, &[0.0, 0.0, 3.0, 1.0]), 7.0);
    }

    #[test]
    fn test_curve_kind_parsing() {
        assert_eq!("hermite".parse::<CurveKind>().unwrap(), CurveKind::Hermite);
        assert!(matches!(
            "spline".parse::<CurveKind>(),
            Err(GeometryError::UnknownCurveType(name)) if name == "spline"
        ));
    }

    #[test]
    fn test_box_has_twelve_distinct_axis_aligned_edges() {
        let mut edges = EdgeMatrix::new();
        edges.add_box(0.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        assert_eq!(edges.len_points(), 24);

        let mut seen = Vec::new();
        for (a, b) in edges.edges() {
            let differing = (0..3).filter(|&k| a[k] != b[k]).count();
            assert_eq!(differing, 1, "edge {a:?} -> {b:?} is not axis aligned");
            for v in a[..3].iter().chain(&b[..3]) {
                assert!(*v == 0.0 || v.abs() == 10.0);
            }
            let key = if a < b { (a, b) } else { (b, a) };
            assert!(!seen.contains(&key), "duplicate edge {key:?}");
            seen.push(key);
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_sphere_dots() {
        let mut edges = EdgeMatrix::new();
        edges.add_sphere(1.0, 2.0, 3.0, 4.0, SURFACE_STEP).unwrap();
        assert_eq!(edges.edge_count(), 100 * 50);
        for (a, b) in edges.edges() {
            let (dx, dy, dz) = (a[0] - 1.0, a[1] - 2.0, a[2] - 3.0);
            assert!((dx * dx + dy * dy + dz * dz - 16.0).abs() < 1e-9);
            for k in 0..3 {
                assert!((b[k] - a[k] - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_torus_dots() {
        let (tube, ring) = (2.0, 10.0);
        let points = torus_points(Point3::new(0.0, 0.0, 0.0), tube, ring, 0.05).unwrap();
        assert_eq!(points.len(), 20 * 20);
        for p in &points {
            // Distance from the ring circle equals the tube radius
            let planar = (p.x * p.x + p.z * p.z).sqrt() - ring;
            assert!((planar * planar + p.y * p.y - tube * tube).abs() < 1e-9);
        }

        let mut edges = EdgeMatrix::new();
        edges.add_torus(0.0, 0.0, 0.0, tube, ring, 0.05).unwrap();
        assert_eq!(edges.edge_count(), points.len());
    }

    #[test]
    fn test_apply_replaces_points() {
        let mut edges = EdgeMatrix::new();
        edges.add_edge(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0));
        edges.apply(&matrix::translation(5.0, 5.0, 5.0)).unwrap();
        assert_eq!(edges.column(0).unwrap(), [6.0, 5.0, 5.0, 1.0]);
        assert_eq!(edges.column(1).unwrap(), [5.0, 7.0, 5.0, 1.0]);

        let bad = Matrix::identity(3, 3);
        assert!(matches!(
            edges.apply(&bad),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_apply_to_empty_edges() {
        let mut edges = EdgeMatrix::new();
        edges.apply(&matrix::dilation(2.0, 2.0, 2.0)).unwrap();
        assert!(edges.is_empty());
    }
}
