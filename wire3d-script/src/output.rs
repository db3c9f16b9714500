/// Raster encoding: plain PPM written directly, everything else via `image`
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use wire3d_core::Screen;

use crate::error::Result;

/// Write an ASCII (P3) PPM, rows top to bottom
pub fn write_ppm<W: Write>(screen: &Screen, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3 {} {} 255", screen.width(), screen.height())?;
    for row in screen.rows() {
        for c in row {
            write!(writer, "{} {} {} ", c.r, c.g, c.b)?;
        }
    }
    writer.flush()
}

fn dim_mismatch_err() -> image::ImageError {
    image::ImageError::Parameter(image::error::ParameterError::from_kind(
        image::error::ParameterErrorKind::DimensionMismatch,
    ))
}

/// Save the screen, picking the encoding from the file extension
pub fn save<P: AsRef<Path>>(screen: &Screen, path: P) -> Result<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("ppm"))
        .unwrap_or(false);

    if is_ppm {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(screen, &mut writer)?;
    } else {
        let img = image::RgbImage::from_raw(
            screen.width() as u32,
            screen.height() as u32,
            screen.as_rgb_bytes(),
        )
        .ok_or_else(dim_mismatch_err)?;
        img.save(path)?;
    }

    info!(
        "saved {}x{} image to {}",
        screen.width(),
        screen.height(),
        path.display()
    );
    Ok(())
}
