//! Script execution.
//!
//! A [`Session`] owns everything a script mutates: the running transform,
//! the edge matrix, and the canvas with its draw colour. Statements run in
//! order and the first failure ends the run.

use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};
use wire3d_core::{draw_all, matrix, Canvas, EdgeMatrix, Matrix, Screen};

use crate::command::{Command, Statement};
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::parser::parse_script;
use crate::preview::TerminalPreview;

/// Whether execution continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    config: Config,
    transform: Option<Matrix>,
    edges: EdgeMatrix,
    canvas: Canvas,
    preview: TerminalPreview,
    out: W,
}

impl<W: Write> Session<W> {
    /// Start a session that presents `display`/`show` output on `out`
    pub fn new(config: Config, out: W) -> Self {
        let canvas = Canvas::new(config.width, config.height);
        let preview = TerminalPreview::new(
            config.preview_columns as usize,
            config.preview_rows as usize,
        );
        Self {
            config,
            transform: None,
            edges: EdgeMatrix::new(),
            canvas,
            preview,
            out,
        }
    }

    pub fn transform(&self) -> Option<&Matrix> {
        self.transform.as_ref()
    }

    pub fn edges(&self) -> &EdgeMatrix {
        &self.edges
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn screen(&self) -> &Screen {
        &self.canvas.screen
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Parse and run a script source
    pub fn run_source(&mut self, source: &str) -> Result<()> {
        let statements = parse_script(source)?;
        self.run(&statements)
    }

    pub fn run(&mut self, statements: &[Statement]) -> Result<()> {
        info!("running {} statements", statements.len());
        for statement in statements {
            let flow = self
                .execute(&statement.command)
                .map_err(|e| e.at(statement.line, statement.command.name()))?;
            if flow == Flow::Quit {
                debug!("quit at line {}", statement.line);
                break;
            }
        }
        info!(
            "finished with {} edges, {} lit pixels",
            self.edges.edge_count(),
            self.canvas.screen.lit_count()
        );
        Ok(())
    }

    pub fn execute(&mut self, command: &Command) -> Result<Flow> {
        debug!("{command:?}");

        match command {
            Command::Line { p0, p1 } => self.edges.add_edge(*p0, *p1),
            Command::Circle { center, radius } => {
                self.edges
                    .add_circle(center.x, center.y, center.z, *radius, self.config.circle_step)?
            }
            Command::Curve { kind, points } => {
                self.edges.add_curve(*points, self.config.curve_step, *kind)?
            }
            Command::Box {
                corner,
                width,
                height,
                depth,
            } => self
                .edges
                .add_box(corner.x, corner.y, corner.z, *width, *height, *depth),
            Command::Sphere { center, radius } => {
                self.edges
                    .add_sphere(center.x, center.y, center.z, *radius, self.config.surface_step)?
            }
            Command::Torus {
                center,
                tube_radius,
                ring_radius,
            } => self.edges.add_torus(
                center.x,
                center.y,
                center.z,
                *tube_radius,
                *ring_radius,
                self.config.surface_step,
            )?,
            Command::Ident => self.reset_transform(),
            Command::Move([tx, ty, tz]) => self.compose_step(matrix::translation(*tx, *ty, *tz))?,
            Command::Scale([sx, sy, sz]) => self.compose_step(matrix::dilation(*sx, *sy, *sz))?,
            Command::Rotate { axis, degrees } => {
                self.compose_step(matrix::rotation(*axis, *degrees))?
            }
            Command::Apply => self.apply_transform()?,
            Command::Clear => self.clear_edges(),
            Command::Draw => self.rasterize(),
            Command::Display => {
                self.reset_buffer();
                self.rasterize();
                self.present()?;
            }
            Command::Show => self.present()?,
            Command::Color(name) => {
                self.set_color(name);
            }
            Command::Save(path) => self.save(path)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Make the running transform the identity
    pub fn reset_transform(&mut self) {
        self.transform = Some(matrix::new_identity());
    }

    /// Fold a step into the running transform. The step acts after what
    /// has been accumulated so far: `transform = step × transform`.
    pub fn compose_step(&mut self, mut step: Matrix) -> Result<()> {
        if let Some(transform) = &self.transform {
            let mut product = transform.clone();
            matrix::multiply(&step, &mut product)?;
            step = product;
        }
        self.transform = Some(step);
        Ok(())
    }

    /// Multiply the running transform into the edge matrix
    pub fn apply_transform(&mut self) -> Result<()> {
        match &self.transform {
            Some(transform) => self.edges.apply(transform)?,
            None => warn!("apply with no transform; edges unchanged"),
        }
        Ok(())
    }

    pub fn clear_edges(&mut self) {
        self.edges.clear();
    }

    pub fn rasterize(&mut self) {
        draw_all(&self.edges, &mut self.canvas);
    }

    pub fn set_color(&mut self, name: &str) -> bool {
        self.canvas.set_color(name)
    }

    pub fn reset_buffer(&mut self) {
        self.canvas.reset();
    }

    pub fn present(&mut self) -> Result<()> {
        self.preview.draw(&self.canvas.screen, &mut self.out)?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        output::save(&self.canvas.screen, path)
    }
}
