/// Typed script commands
use std::path::PathBuf;

use wire3d_core::{Axis, CurveKind, CurvePoints, Point3};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Line {
        p0: Point3,
        p1: Point3,
    },
    Circle {
        center: Point3,
        radius: f64,
    },
    Curve {
        kind: CurveKind,
        points: CurvePoints,
    },
    Box {
        corner: Point3,
        width: f64,
        height: f64,
        depth: f64,
    },
    Sphere {
        center: Point3,
        radius: f64,
    },
    Torus {
        center: Point3,
        tube_radius: f64,
        ring_radius: f64,
    },
    Ident,
    Move([f64; 3]),
    Scale([f64; 3]),
    Rotate {
        axis: Axis,
        degrees: f64,
    },
    Apply,
    Clear,
    Draw,
    Display,
    Show,
    Color(String),
    Save(PathBuf),
    Quit,
}

impl Command {
    /// The script keyword for this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Line { .. } => "line",
            Command::Circle { .. } => "circle",
            Command::Curve {
                kind: CurveKind::Bezier,
                ..
            } => "bezier",
            Command::Curve {
                kind: CurveKind::Hermite,
                ..
            } => "hermite",
            Command::Box { .. } => "box",
            Command::Sphere { .. } => "sphere",
            Command::Torus { .. } => "torus",
            Command::Ident => "ident",
            Command::Move(_) => "move",
            Command::Scale(_) => "scale",
            Command::Rotate { .. } => "rotate",
            Command::Apply => "apply",
            Command::Clear => "clear",
            Command::Draw => "draw",
            Command::Display => "display",
            Command::Show => "show",
            Command::Color(_) => "color",
            Command::Save(_) => "save",
            Command::Quit => "quit",
        }
    }
}

/// A command and the 1-based line its keyword appeared on
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}
