//! Writing rendered grids to image files.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{ColorGrid, RenderResult};

/// Pixels written per line of a PPM body.
const PPM_PIXELS_PER_LINE: usize = 4;

/// Write a grid as a plain-text (P3) PPM.
///
/// The header carries a `# name` comment; the body holds four pixel
/// triplets per line.
pub fn write_ppm<W: Write>(grid: &ColorGrid, writer: &mut W, name: &str) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "# {}", name)?;
    writeln!(writer, "{} {}", grid.width, grid.height)?;
    writeln!(writer, "255")?;

    for line in grid.pixels().chunks(PPM_PIXELS_PER_LINE) {
        let triplets: Vec<String> = line
            .iter()
            .map(|[r, g, b]| format!("{} {} {}", r, g, b))
            .collect();
        writeln!(writer, "{}", triplets.join(" "))?;
    }

    writer.flush()
}

/// Save a grid, choosing the format from the file extension.
///
/// `.ppm` is written as plain-text PPM; anything else goes through the
/// `image` crate.
pub fn save_image<P: AsRef<Path>>(grid: &ColorGrid, path: P) -> RenderResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("render");
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(grid, &mut writer, name)?;
    } else {
        grid.to_rgb_image().save(path)?;
    }

    log::info!("Saved {}x{} image to {}", grid.width, grid.height, path.display());
    Ok(())
}
