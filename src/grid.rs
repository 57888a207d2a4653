use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use crate::CellOffset;
use crate::NeighborCount;
use crate::cell::Cell;

/// A finite toroidal grid of cells.
///
/// Cells are stored row-major, so `(x, y)` lives at index `y * width + x`. The dimensions are
/// fixed once the grid is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: CellOffset,
    height: CellOffset,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid where every cell is dead.
    pub fn new(width: CellOffset, height: CellOffset) -> Self {
        assert!(width > 0, "grid width must be positive");
        assert!(height > 0, "grid height must be positive");

        let Some(len) = width.checked_mul(height) else {
            panic!("grid of {width}x{height} cells is too large");
        };

        Self {
            width,
            height,
            cells: vec![Cell::Dead; len],
        }
    }

    /// Create a grid where every cell is independently alive with probability 1/2.
    pub fn random<R>(width: CellOffset, height: CellOffset, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut grid = Self::new(width, height);
        grid.randomize(rng);

        grid
    }

    /// Re-roll every cell of the grid with a fair coin
    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for cell in self.cells.iter_mut() {
            *cell = Cell::from(rng.gen_bool(0.5));
        }
    }

    pub fn width(&self) -> CellOffset {
        self.width
    }

    pub fn height(&self) -> CellOffset {
        self.height
    }

    pub fn get(&self, x: CellOffset, y: CellOffset) -> Cell {
        self.cells[self.xy_from(x, y)]
    }

    pub fn set(&mut self, x: CellOffset, y: CellOffset, cell: Cell) {
        let i = self.xy_from(x, y);
        self.cells[i] = cell;
    }

    /// Iterate over the rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Count the live cells among the 8 neighbors of `(x, y)`.
    ///
    /// Neighbors wrap around the edges: the column left of `x = 0` is `width - 1`, and the row
    /// above `y = 0` is `height - 1`.
    pub fn live_neighbors(&self, x: CellOffset, y: CellOffset) -> NeighborCount {
        let (w, h) = (self.width, self.height);

        let left = (x + w - 1) % w;
        let right = (x + 1) % w;
        let above = (y + h - 1) % h;
        let below = (y + 1) % h;

        [
            (left, above),
            (x, above),
            (right, above),
            (left, y),
            (right, y),
            (left, below),
            (x, below),
            (right, below),
        ]
        .into_iter()
        .filter(|&(nx, ny)| self.get(nx, ny) == Cell::Alive)
        .count() as NeighborCount
    }

    fn xy_from(&self, x: CellOffset, y: CellOffset) -> usize {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        y * self.width + x
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern contains no rows")]
    Empty,

    #[error("Row {row} has width {got}, expected {exp}")]
    RaggedRow { row: usize, exp: usize, got: usize },

    #[error("Unknown cell glyph '{glyph}' on row {row}")]
    UnknownGlyph { row: usize, glyph: char },
}

/// Parse a plaintext picture of a grid, one line per row.
///
/// `#`, `O` and `*` are alive; `.` and `-` are dead. Surrounding whitespace on each line and
/// blank lines are ignored, so patterns can be written as indented string literals.
impl FromStr for Grid {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            return Err(PatternError::Empty);
        };

        let width = first.chars().count();
        let mut grid = Grid::new(width, lines.len());

        for (y, line) in lines.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(PatternError::RaggedRow {
                    row: y,
                    exp: width,
                    got,
                });
            }

            for (x, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '#' | 'O' | '*' => Cell::Alive,
                    '.' | '-' => Cell::Dead,
                    glyph => return Err(PatternError::UnknownGlyph { row: y, glyph }),
                };

                grid.set(x, y, cell);
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Grid;
    use super::PatternError;
    use crate::cell::Cell;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(7, 3);

        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    #[should_panic(expected = "grid width must be positive")]
    fn zero_width_panics() {
        Grid::new(0, 4);
    }

    #[test]
    #[should_panic(expected = "is too large")]
    fn overflowing_dimensions_panic() {
        Grid::new(usize::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "x is out of bounds")]
    fn out_of_bounds_get_panics() {
        Grid::new(4, 4).get(4, 0);
    }

    #[test]
    fn random_grid_is_roughly_half_alive() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let grid = Grid::random(100, 100, &mut rng);

        let pop = grid.population();
        assert!((4_000..=6_000).contains(&pop), "population was {pop}");
    }

    #[test]
    fn same_seed_same_grid() {
        let a = Grid::random(79, 20, &mut StdRng::seed_from_u64(7));
        let b = Grid::random(79, 20, &mut StdRng::seed_from_u64(7));

        assert_eq!(a, b);
    }

    #[test]
    fn neighbors_wrap_at_corners() {
        let mut grid = Grid::new(5, 4);
        grid.set(0, 0, Cell::Alive);

        assert_eq!(grid.live_neighbors(4, 3), 1);
        assert_eq!(grid.live_neighbors(4, 0), 1);
        assert_eq!(grid.live_neighbors(0, 3), 1);
        assert_eq!(grid.live_neighbors(2, 2), 0);

        // a cell never counts itself
        assert_eq!(grid.live_neighbors(0, 0), 0);
    }

    #[test]
    fn neighbors_count_all_eight() {
        let grid: Grid = "
            ###
            #.#
            ###
            ...
        "
        .parse()
        .unwrap();

        assert_eq!(grid.live_neighbors(1, 1), 8);
    }

    #[test]
    fn parse_pattern() {
        let grid: Grid = "
            .#.
            O-*
        "
        .parse()
        .unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 0), Cell::Alive);
        assert_eq!(grid.get(1, 1), Cell::Dead);
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn parse_pattern_errors() {
        assert_eq!("".parse::<Grid>(), Err(PatternError::Empty));
        assert_eq!(
            "..\n...".parse::<Grid>(),
            Err(PatternError::RaggedRow {
                row: 1,
                exp: 2,
                got: 3
            })
        );
        assert_eq!(
            ".x".parse::<Grid>(),
            Err(PatternError::UnknownGlyph { row: 0, glyph: 'x' })
        );
    }
}
