/// Terminal preview of a screen using half-block characters
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use std::ops::Range;
use wire3d_core::{Color, Screen};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Downsamples a screen onto a grid of terminal cells
pub struct TerminalPreview {
    columns: usize,
    rows: usize,
}

impl TerminalPreview {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// Cells across and down for a screen, never upsampling
    fn grid(&self, screen: &Screen) -> (usize, usize) {
        let columns = self.columns.min(screen.width()).max(1);
        let rows = self.rows.min(screen.height().div_ceil(2)).max(1);
        (columns, rows)
    }

    pub fn draw<W: Write>(&self, screen: &Screen, writer: &mut W) -> std::io::Result<()> {
        let (columns, rows) = self.grid(screen);
        let pixel_rows = rows * 2;

        writer.queue(cursor::MoveTo(0, 0))?;
        for row in 0..rows {
            let top = span(2 * row, pixel_rows, screen.height());
            let bottom = span(2 * row + 1, pixel_rows, screen.height());
            for col in 0..columns {
                let xs = span(col, columns, screen.width());
                let upper = brightest(screen, xs.clone(), top.clone());
                let lower = brightest(screen, xs, bottom.clone());

                writer.queue(SetForegroundColor(term_color(upper)))?;
                writer.queue(SetBackgroundColor(term_color(lower)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
            writer.queue(ResetColor)?;
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        writer.flush()
    }
}

/// Source pixel range covered by cell `index` of `cells`
fn span(index: usize, cells: usize, pixels: usize) -> Range<usize> {
    let start = index * pixels / cells;
    let end = ((index + 1) * pixels / cells).max(start + 1).min(pixels);
    start..end
}

/// Brightest pixel of a block, so one-pixel lines survive downsampling
fn brightest(screen: &Screen, xs: Range<usize>, ys: Range<usize>) -> Color {
    let mut best = Color::BLACK;
    let mut best_sum = 0u16;
    for row in ys {
        for x in xs.clone() {
            if let Some(c) = screen.get(x, row) {
                let sum = c.r as u16 + c.g as u16 + c.b as u16;
                if sum > best_sum {
                    best = c;
                    best_sum = sum;
                }
            }
        }
    }
    best
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
