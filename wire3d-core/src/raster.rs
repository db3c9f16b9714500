//! Incremental line rasterization.
//!
//! Lines are walked with a midpoint decision variable kept at double scale,
//! so every update is an integer-valued step for integer endpoints. Each
//! line is classified once into one of five regimes and the walk runs that
//! regime's recurrence to the far endpoint.
//!
//! The walk length is fixed up front from the dominant extent, so it ends
//! even where `+ 1.0` no longer changes a coordinate. Lines reaching far
//! outside the canvas are clipped to a margin around it before walking.

use log::debug;

use crate::edges::EdgeMatrix;
use crate::screen::Canvas;

/// Cells of slack kept around the canvas when clipping long lines
pub const CLIP_MARGIN: f64 = 1024.0;

/// Slope regime of a line, after ordering its endpoints left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Octant {
    /// `x0 == x1`
    Vertical,
    /// slope in `[0, 1]`
    ShallowPos,
    /// slope in `(1, ∞)`
    SteepPos,
    /// slope in `[-1, 0)`
    ShallowNeg,
    /// slope in `(-∞, -1)`
    SteepNeg,
}

impl Octant {
    /// Classify a line whose endpoints satisfy `x0 <= x1`
    pub fn classify(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let a = y1 - y0;
        let b = x0 - x1;
        if b == 0.0 {
            return Octant::Vertical;
        }

        let slope = a / -b;
        if (0.0..=1.0).contains(&slope) {
            Octant::ShallowPos
        } else if slope > 1.0 {
            Octant::SteepPos
        } else if slope >= -1.0 {
            Octant::ShallowNeg
        } else {
            Octant::SteepNeg
        }
    }
}

/// Iterator over the cells visited by a line, in walk order
#[derive(Debug, Clone)]
pub struct LineWalker {
    octant: Octant,
    x: f64,
    y: f64,
    x1: f64,
    y1: f64,
    a: f64,
    b: f64,
    d: f64,
    remaining: u64,
}

impl LineWalker {
    pub fn new(mut x0: f64, mut y0: f64, mut x1: f64, mut y1: f64) -> Self {
        if x1 < x0 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let octant = Octant::classify(x0, y0, x1, y1);
        let a = y1 - y0;
        let b = x0 - x1;

        let (y0, y1) = match octant {
            Octant::Vertical if y1 < y0 => (y1, y0),
            _ => (y0, y1),
        };

        let d = match octant {
            Octant::Vertical => 0.0,
            Octant::ShallowPos => 2.0 * a + b,
            Octant::SteepPos => a + 2.0 * b,
            Octant::ShallowNeg => 2.0 * a - b,
            Octant::SteepNeg => a - 2.0 * b,
        };

        // Saturating cast; NaN extents give an empty walk
        let extent = a.abs().max(b.abs());
        let remaining = if extent.is_nan() {
            0
        } else {
            (extent.floor() as u64).saturating_add(1)
        };

        Self {
            octant,
            x: x0,
            y: y0,
            x1,
            y1,
            a,
            b,
            d,
            remaining,
        }
    }

    pub fn octant(&self) -> Octant {
        self.octant
    }
}

impl Iterator for LineWalker {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let cell = (self.x, self.y);

        match self.octant {
            Octant::Vertical => {
                if self.y > self.y1 {
                    return None;
                }
                self.y += 1.0;
            }
            Octant::ShallowPos => {
                if !(self.x <= self.x1 && self.y <= self.y1) {
                    return None;
                }
                if self.d > 0.0 {
                    self.y += 1.0;
                    self.d += 2.0 * self.b;
                }
                self.x += 1.0;
                self.d += 2.0 * self.a;
            }
            Octant::SteepPos => {
                if !(self.x <= self.x1 && self.y <= self.y1) {
                    return None;
                }
                if self.d < 0.0 {
                    self.x += 1.0;
                    self.d += 2.0 * self.a;
                }
                self.y += 1.0;
                self.d += 2.0 * self.b;
            }
            Octant::ShallowNeg => {
                if !(self.x <= self.x1 && self.y >= self.y1) {
                    return None;
                }
                if self.d < 0.0 {
                    self.y -= 1.0;
                    self.d -= 2.0 * self.b;
                }
                self.x += 1.0;
                self.d += 2.0 * self.a;
            }
            Octant::SteepNeg => {
                if !(self.x <= self.x1 && self.y >= self.y1) {
                    return None;
                }
                if self.d > 0.0 {
                    self.x += 1.0;
                    self.d += 2.0 * self.a;
                }
                self.y -= 1.0;
                self.d -= 2.0 * self.b;
            }
        }

        self.remaining -= 1;
        Some(cell)
    }
}

/// Clip a segment to the box `[min, max]` (Liang-Barsky). `None` when no
/// part of it lies inside.
fn clip_segment(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    (min_x, min_y): (f64, f64),
    (max_x, max_y): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (x1 - x0, y1 - y0);
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0 - min_x), (dx, max_x - x0), (-dy, y0 - min_y), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
}

/// Draw a line onto the canvas in its current colour
pub fn draw_line(canvas: &mut Canvas, x0: f64, y0: f64, x1: f64, y1: f64) {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        debug!("skipping non-finite line ({x0}, {y0}) -> ({x1}, {y1})");
        return;
    }

    let min = (-CLIP_MARGIN, -CLIP_MARGIN);
    let max = (
        canvas.screen.width() as f64 + CLIP_MARGIN,
        canvas.screen.height() as f64 + CLIP_MARGIN,
    );
    let inside = |x: f64, y: f64| x >= min.0 && x <= max.0 && y >= min.1 && y <= max.1;
    let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);
    if !(inside(x0, y0) && inside(x1, y1)) {
        match clip_segment((x0, y0), (x1, y1), min, max) {
            Some(((cx0, cy0), (cx1, cy1))) => {
                (x0, y0, x1, y1) = (cx0, cy0, cx1, cy1);
            }
            None => {
                debug!("skipping off-canvas line ({x0}, {y0}) -> ({x1}, {y1})");
                return;
            }
        }
    }

    for (x, y) in LineWalker::new(x0, y0, x1, y1) {
        canvas.plot(x, y);
    }
}

/// Draw every complete edge, dropping z
pub fn draw_all(edges: &EdgeMatrix, canvas: &mut Canvas) {
    for (p, q) in edges.edges() {
        draw_line(canvas, p[0], p[1], q[0], q[1]);
    }
    debug!("rasterized {} edges", edges.edge_count());
}
