use crate::cells::GridCoordinate;
use crate::errors::{ErrorKind, Result, ResultExt};
use crate::grid::Grid;

use image::{Rgb, RgbImage};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Rendering options for the monochrome raster image.
///
/// The maze is drawn on a unit grid of (2 * width + 1) by (2 * height + 1)
/// units: cell interiors and open passages take `colour_on`, walls and
/// junctions take `colour_off`. Each unit becomes a square of
/// `pixels_per_unit` pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RasterStyle {
    pub colour_on: Rgb<u8>,
    pub colour_off: Rgb<u8>,
    pub pixels_per_unit: u32,
}
impl Default for RasterStyle {
    fn default() -> RasterStyle {
        RasterStyle {
            colour_on: Rgb([255, 255, 255]),
            colour_off: Rgb([0, 0, 0]),
            pixels_per_unit: 2,
        }
    }
}

/// Rendering options for the text serialisation.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct TextStyle {
    /// Trim trailing blanks from each line.
    pub clip: bool,
    /// Draw walls with unicode box-drawing characters instead of '#'.
    pub line_char: bool,
    /// Write every blank as a tab. A reader with single-width tab stops
    /// reproduces the layout. Incompatible with `line_char`.
    pub tab: bool,
}
impl Default for TextStyle {
    fn default() -> TextStyle {
        TextStyle { clip: true, line_char: false, tab: false }
    }
}

/// Render the grid to an in-memory image. Pure - no maze-present or path
/// checks, those live in `save_raster`.
pub fn raster_image(grid: &Grid, style: &RasterStyle) -> RgbImage {
    let units_wide = 2 * grid.width() as u32 + 1;
    let units_high = 2 * grid.height() as u32 + 1;
    let ppu = style.pixels_per_unit.max(1);
    let mut image = RgbImage::from_pixel(units_wide * ppu, units_high * ppu, style.colour_off);

    let mut paint_unit = |ux: u32, uy: u32| {
        for py in uy * ppu..(uy + 1) * ppu {
            for px in ux * ppu..(ux + 1) * ppu {
                image.put_pixel(px, py, style.colour_on);
            }
        }
    };

    for coord in grid.iter() {
        paint_unit(2 * coord.x + 1, 2 * coord.y + 1);
    }
    for (a, b) in grid.iter_links() {
        // The unit between two adjacent cell units.
        paint_unit(a.x + b.x + 1, a.y + b.y + 1);
    }
    image
}

/// Save the maze as a monochrome bitmap image. The format is taken from the
/// file extension, as `image` does.
///
/// Fails with `NoMaze` when no maze has been generated on the grid,
/// `NoDestination` when the path is empty and `OpenFailure` when the file
/// cannot be written.
pub fn save_raster<P: AsRef<Path>>(grid: &Grid, style: &RasterStyle, path: P) -> Result<()> {
    let path = path.as_ref();
    if !grid.is_generated() {
        return Err(ErrorKind::NoMaze.into());
    }
    if path.as_os_str().is_empty() {
        return Err(ErrorKind::NoDestination.into());
    }
    let image = raster_image(grid, style);
    image.save(path)
        .chain_err(|| ErrorKind::OpenFailure(path.display().to_string()))?;
    Ok(())
}

/// Render the grid as text lines on the same unit grid the raster uses.
/// Pure except for the style validation: `line_char` and `tab` together are
/// an `UnknownCommand` error, tabs cannot express box-drawing output.
pub fn text_lines(grid: &Grid, style: &TextStyle) -> Result<Vec<String>> {
    if style.line_char && style.tab {
        return Err(ErrorKind::UnknownCommand(
            "text output cannot combine line characters with tabs".into()).into());
    }
    let mut lines = unit_rows(grid, style.line_char);
    if style.clip {
        for line in &mut lines {
            let trimmed = line.trim_end_matches(' ').len();
            line.truncate(trimmed);
        }
    }
    if style.tab {
        for line in &mut lines {
            *line = line.replace(' ', "\t");
        }
    }
    Ok(lines)
}

/// Save the maze as text, one unit row per line.
///
/// Fails with `NoMaze` when no maze has been generated on the grid,
/// `NoDestination` when the path is empty, `UnknownCommand` for an
/// inexpressible style and `OpenFailure` when the file cannot be written.
pub fn save_text<P: AsRef<Path>>(grid: &Grid, style: &TextStyle, path: P) -> Result<()> {
    let path = path.as_ref();
    if !grid.is_generated() {
        return Err(ErrorKind::NoMaze.into());
    }
    if path.as_os_str().is_empty() {
        return Err(ErrorKind::NoDestination.into());
    }
    let lines = text_lines(grid, style)?;
    let open_failure = || ErrorKind::OpenFailure(path.display().to_string());
    let mut file = File::create(path).chain_err(open_failure)?;
    for line in &lines {
        writeln!(file, "{}", line).chain_err(open_failure)?;
    }
    Ok(())
}

/// One string per unit row, untrimmed. Walls are '#' or a box-drawing
/// character picked from the wall connectivity of the four neighbouring
/// units, open units are blanks.
fn unit_rows(grid: &Grid, line_char: bool) -> Vec<String> {
    let units_wide = 2 * grid.width() as i64 + 1;
    let units_high = 2 * grid.height() as i64 + 1;
    let mut lines = Vec::with_capacity(units_high as usize);

    for uy in 0..units_high {
        let mut line = String::with_capacity(units_wide as usize);
        for ux in 0..units_wide {
            let glyph = if !wall_at_unit(grid, ux, uy) {
                ' '
            } else if line_char {
                box_drawing_char(wall_at_unit(grid, ux, uy - 1),
                                 wall_at_unit(grid, ux, uy + 1),
                                 wall_at_unit(grid, ux + 1, uy),
                                 wall_at_unit(grid, ux - 1, uy))
            } else {
                '#'
            };
            line.push(glyph);
        }
        lines.push(line);
    }
    lines
}

/// Whether the given unit is wall. Units outside the frame are open, cell
/// interiors are open, junction units are always wall and the unit between
/// two adjacent cells is wall unless their shared passage is carved.
fn wall_at_unit(grid: &Grid, ux: i64, uy: i64) -> bool {
    let max_x = 2 * grid.width() as i64;
    let max_y = 2 * grid.height() as i64;
    if ux < 0 || uy < 0 || ux > max_x || uy > max_y {
        return false;
    }
    match (ux % 2 == 1, uy % 2 == 1) {
        (true, true) => false,
        (false, false) => true,
        (true, false) => {
            if uy == 0 || uy == max_y {
                return true;
            }
            let x = ((ux - 1) / 2) as u32;
            let y = (uy / 2) as u32;
            !grid.is_linked(GridCoordinate::new(x, y - 1), GridCoordinate::new(x, y))
        }
        (false, true) => {
            if ux == 0 || ux == max_x {
                return true;
            }
            let x = (ux / 2) as u32;
            let y = ((uy - 1) / 2) as u32;
            !grid.is_linked(GridCoordinate::new(x - 1, y), GridCoordinate::new(x, y))
        }
    }
}

fn box_drawing_char(north: bool, south: bool, east: bool, west: bool) -> char {
    match (north, south, east, west) {
        (true, true, true, true) => '┼',
        (true, true, true, false) => '├',
        (true, true, false, true) => '┤',
        (true, true, false, false) => '│',
        (true, false, true, true) => '┴',
        (false, true, true, true) => '┬',
        (true, false, true, false) => '└',
        (true, false, false, true) => '┘',
        (false, true, true, false) => '┌',
        (false, true, false, true) => '┐',
        (false, false, true, true) => '─',
        (true, false, false, false) => '╵',
        (false, true, false, false) => '╷',
        (false, false, true, false) => '╶',
        (false, false, false, true) => '╴',
        (false, false, false, false) => '·',
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in unit_rows(self, true) {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
