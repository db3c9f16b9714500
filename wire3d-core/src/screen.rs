/// Pixel buffer and the draw colour that goes with it
use log::warn;

/// Default raster width
pub const XRES: usize = 500;
/// Default raster height
pub const YRES: usize = 500;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up a palette colour by script name
    pub fn named(name: &str) -> Option<Color> {
        match name {
            "black" => Some(Color::BLACK),
            "white" => Some(Color::WHITE),
            "yellow" => Some(Color::YELLOW),
            _ => None,
        }
    }
}

/// Fixed-size RGB raster. Row 0 is the top row of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate as all black
    pub fn reset(&mut self) {
        self.pixels = vec![Color::BLACK; self.width * self.height];
    }

    /// Pixel at buffer column `x`, buffer row `row` (top-down)
    pub fn get(&self, x: usize, row: usize) -> Option<Color> {
        if x < self.width && row < self.height {
            Some(self.pixels[row * self.width + x])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, row: usize, color: Color) {
        if x < self.width && row < self.height {
            self.pixels[row * self.width + x] = color;
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Packed `r g b` bytes, row-major from the top
    pub fn as_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for c in &self.pixels {
            out.extend_from_slice(&[c.r, c.g, c.b]);
        }
        out
    }

    /// Count of pixels that are not black
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != Color::BLACK).count()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(XRES, YRES)
    }
}

/// A screen plus the colour new plots are written with
#[derive(Debug, Clone)]
pub struct Canvas {
    pub screen: Screen,
    color: Color,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            screen: Screen::new(width, height),
            color: Color::BLACK,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_rgb(&mut self, color: Color) {
        self.color = color;
    }

    /// Switch to a palette colour. Unknown names leave the colour alone.
    pub fn set_color(&mut self, name: &str) -> bool {
        match Color::named(name) {
            Some(color) => {
                self.color = color;
                true
            }
            None => {
                warn!("ignoring unknown colour '{name}'");
                false
            }
        }
    }

    /// Clear the pixels; the draw colour is kept
    pub fn reset(&mut self) {
        self.screen.reset();
    }

    /// Write the draw colour at logical `(x, y)`, origin bottom-left.
    /// Cells outside the screen and non-finite coordinates are dropped.
    pub fn plot(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let px = round_half_up(x);
        let py = round_half_up(y);
        let (width, height) = (self.screen.width as i64, self.screen.height as i64);
        if !(0..width).contains(&px) || !(0..height).contains(&py) {
            return;
        }
        let row = height - 1 - py;
        self.screen.set(px as usize, row as usize, self.color);
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(XRES, YRES)
    }
}

/// Round to the nearest integer, halves going up.
///
/// Works on the fractional part left after truncation, so negative inputs
/// round toward zero.
pub fn round_half_up(f: f64) -> i64 {
    let whole = f.trunc();
    if f - whole < 0.5 {
        whole as i64
    } else {
        (whole as i64).saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_black() {
        let screen = Screen::new(4, 3);
        assert_eq!(screen.rows().count(), 3);
        assert!(screen.rows().all(|row| row.iter().all(|&c| c == Color::BLACK)));
        assert_eq!(screen.as_rgb_bytes().len(), 4 * 3 * 3);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.0), 2);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.99), 3);
        assert_eq!(round_half_up(-0.7), 0);
        assert_eq!(round_half_up(-1.2), -1);
    }

    #[test]
    fn test_plot_flips_y() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_rgb(Color::WHITE);
        canvas.plot(2.0, 0.0);
        assert_eq!(canvas.screen.get(2, 9), Some(Color::WHITE));
        canvas.plot(3.4, 8.6);
        assert_eq!(canvas.screen.get(3, 0), Some(Color::WHITE));
        assert_eq!(canvas.screen.lit_count(), 2);
    }

    #[test]
    fn test_plot_clips_silently() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_rgb(Color::YELLOW);
        for (x, y) in [(-1.0, 0.0), (10.0, 0.0), (0.0, 10.0), (0.0, -1.0), (1e9, 1e9)] {
            canvas.plot(x, y);
        }
        assert_eq!(canvas.screen.lit_count(), 0);
    }

    #[test]
    fn test_plot_extreme_and_non_finite_coordinates() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_rgb(Color::WHITE);
        for (x, y) in [
            (0.0, -1e30),
            (0.0, 1e30),
            (-1e30, 0.0),
            (1e30, 0.0),
            (f64::NAN, 0.0),
            (0.0, f64::NAN),
            (f64::INFINITY, 0.0),
            (0.0, f64::NEG_INFINITY),
        ] {
            canvas.plot(x, y);
        }
        assert_eq!(canvas.screen.lit_count(), 0);
    }

    #[test]
    fn test_set_color() {
        let mut canvas = Canvas::default();
        assert_eq!(canvas.color(), Color::BLACK);
        assert!(canvas.set_color("yellow"));
        assert_eq!(canvas.color(), Color::YELLOW);
        assert!(!canvas.set_color("magenta"));
        assert_eq!(canvas.color(), Color::YELLOW);
    }

    #[test]
    fn test_reset_keeps_color() {
        let mut canvas = Canvas::new(5, 5);
        canvas.set_color("white");
        canvas.plot(1.0, 1.0);
        canvas.reset();
        assert_eq!(canvas.screen.lit_count(), 0);
        assert_eq!(canvas.color(), Color::WHITE);
    }
}
