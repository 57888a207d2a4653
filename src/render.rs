use crate::CellOffset;
use crate::grid::Grid;

/// Turns a grid into console text.
///
/// Implementations keep their own frame buffer, so the returned `&str` borrows the renderer and
/// not the grid that was drawn.
pub trait Render {
    fn render(&mut self, grid: &Grid) -> &str;
}

/// One glyph per cell, one line per row.
pub struct GlyphRenderer {
    alive: char,
    dead: char,

    /// The frame buffer.
    fb: String,
}

impl GlyphRenderer {
    pub const DEFAULT_ALIVE: char = '#';
    pub const DEFAULT_DEAD: char = ' ';

    pub fn new(alive: char, dead: char) -> Self {
        Self {
            alive,
            dead,
            fb: String::new(),
        }
    }
}

impl Default for GlyphRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALIVE, Self::DEFAULT_DEAD)
    }
}

impl Render for GlyphRenderer {
    fn render(&mut self, grid: &Grid) -> &str {
        self.fb.clear();

        for row in grid.rows() {
            for cell in row {
                self.fb
                    .push(if cell.is_alive() { self.alive } else { self.dead });
            }
            self.fb.push('\n');
        }

        &self.fb
    }
}

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Packs 2x4 blocks of cells into a single braille character, so a grid takes an eighth of the
/// screen space it would with [`GlyphRenderer`].
#[derive(Default)]
pub struct BrailleRenderer {
    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,
}

impl BrailleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_hex_value(x: CellOffset, y: CellOffset) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

impl Render for BrailleRenderer {
    fn render(&mut self, grid: &Grid) -> &str {
        // Let `w` and `h` refer to width and height of the grid. Then `bw = ceil(w / 2)` and
        // `bh = ceil(h / 4)` are the width and height of the frame in braille characters (not
        // accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (grid.width().div_ceil(2), grid.height().div_ceil(4));

        // compute new codepoints
        self.cp.clear();
        self.cp.resize(bw * bh, BRAILLE_EMPTY);

        for (y, row) in grid.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_alive() {
                    self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
                }
            }
        }

        // Each braille character is 3 bytes, and newlines one byte
        self.fb.clear();
        self.fb.reserve(3 * (bw * bh) + bh);

        for line in self.cp.chunks_exact(bw) {
            // every codepoint lies in U+2800..=U+28FF, all of which are valid chars
            self.fb
                .extend(line.iter().filter_map(|&c| char::from_u32(c)));
            self.fb.push('\n');
        }

        &self.fb
    }
}

#[cfg(test)]
mod test {
    use super::BrailleRenderer;
    use super::GlyphRenderer;
    use super::Render;
    use crate::cell::Cell;
    use crate::grid::Grid;

    #[test]
    fn glyph_rows_end_in_newlines() {
        let mut grid = Grid::new(3, 2);
        grid.set(0, 0, Cell::Alive);
        grid.set(2, 1, Cell::Alive);

        let mut renderer = GlyphRenderer::default();
        assert_eq!(renderer.render(&grid), "#  \n  #\n");
    }

    #[test]
    fn glyph_buffer_is_reused() {
        let mut renderer = GlyphRenderer::new('O', '.');

        let first = renderer.render(&Grid::new(4, 4)).to_owned();
        let second = renderer.render(&Grid::new(2, 1)).to_owned();

        assert_eq!(first, "....\n....\n....\n....\n");
        assert_eq!(second, "..\n");
    }

    #[test]
    fn braille_single_dots() {
        let mut renderer = BrailleRenderer::new();

        let mut grid = Grid::new(2, 4);
        grid.set(0, 0, Cell::Alive);
        assert_eq!(renderer.render(&grid), "\u{2801}\n");

        let mut grid = Grid::new(2, 4);
        grid.set(1, 3, Cell::Alive);
        assert_eq!(renderer.render(&grid), "\u{2880}\n");
    }

    #[test]
    fn braille_full_block_and_partial_edges() {
        let mut renderer = BrailleRenderer::new();

        let full: Grid = "
            ##
            ##
            ##
            ##
        "
        .parse()
        .unwrap();
        assert_eq!(renderer.render(&full), "\u{28FF}\n");

        // 3x5 rounds up to 2x2 braille characters
        let empty = Grid::new(3, 5);
        assert_eq!(renderer.render(&empty), "\u{2800}\u{2800}\n\u{2800}\u{2800}\n");
    }
}
