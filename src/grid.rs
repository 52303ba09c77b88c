use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::Direction;

/// Row/column address of one grid cell.
///
/// Serialized as a `[row, col]` pair.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u16; 2]", into = "[u16; 2]")]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Returns true when the cell lies inside `size`.
    #[must_use]
    pub fn is_within(self, size: GridSize) -> bool {
        self.row < size.height && self.col < size.width
    }

    /// Returns the neighbouring cell in `direction`, wrapping each axis
    /// independently.
    ///
    /// `self` must already lie inside `size`.
    #[must_use]
    pub fn wrapping_step(self, direction: Direction, size: GridSize) -> Self {
        debug_assert!(self.is_within(size));

        match direction {
            Direction::Up => Self {
                row: wrap_decrement(self.row, size.height),
                col: self.col,
            },
            Direction::Down => Self {
                row: wrap_increment(self.row, size.height),
                col: self.col,
            },
            Direction::Left => Self {
                row: self.row,
                col: wrap_decrement(self.col, size.width),
            },
            Direction::Right => Self {
                row: self.row,
                col: wrap_increment(self.col, size.width),
            },
        }
    }

    /// Returns the direction leading from `self` to an adjacent `other`,
    /// taking wrap-around into account.
    ///
    /// A direct neighbour wins over a wrapped one; on two-cell axes both exist.
    #[must_use]
    pub fn direction_to(self, other: Self, size: GridSize) -> Option<Direction> {
        let row_delta = i32::from(other.row) - i32::from(self.row);
        let col_delta = i32::from(other.col) - i32::from(self.col);
        let direct = match (row_delta, col_delta) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        };

        direct.or_else(|| {
            Direction::ALL
                .into_iter()
                .find(|&direction| self.wrapping_step(direction, size) == other)
        })
    }
}

impl From<[u16; 2]> for Cell {
    fn from([row, col]: [u16; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Cell> for [u16; 2] {
    fn from(cell: Cell) -> Self {
        [cell.row, cell.col]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

fn wrap_increment(value: u16, extent: u16) -> u16 {
    if value + 1 >= extent { 0 } else { value + 1 }
}

fn wrap_decrement(value: u16, extent: u16) -> u16 {
    if value == 0 { extent - 1 } else { value - 1 }
}

/// What occupies one grid cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Tile {
    #[default]
    Empty,
    Head,
    Body,
    Tail,
    Item,
    Obstacle,
}

impl Tile {
    /// Returns true for the three tags the snake leaves on the board.
    #[must_use]
    pub fn is_snake(self) -> bool {
        matches!(self, Self::Head | Self::Body | Self::Tail)
    }

    /// Returns true when a head may move onto this tile.
    ///
    /// A tail is passable because any step onto it is a non-growth step,
    /// which vacates the tail in the same tick.
    #[must_use]
    pub fn is_passable(self) -> bool {
        match self {
            Self::Empty | Self::Item | Self::Tail => true,
            Self::Head | Self::Body | Self::Obstacle => false,
        }
    }

    /// Single-character glyph used by the text dump.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Head => 'H',
            Self::Body => '*',
            Self::Tail => 'E',
            Self::Item => '$',
            Self::Obstacle => '#',
        }
    }
}

/// Fixed-size row-major board of tiles.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Allocates an all-empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            tiles: vec![Tile::Empty; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the tile at `cell`, or `None` when the cell is outside the grid.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<Tile> {
        cell.is_within(self.size).then(|| self[cell])
    }

    /// Iterates rows top to bottom, each as a slice of tiles left to right.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(usize::from(self.size.width).max(1))
    }

    /// Iterates every cell with its tile in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        let width = usize::from(self.size.width).max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let cell = Cell {
                row: (index / width) as u16,
                col: (index % width) as u16,
            };
            (cell, *tile)
        })
    }

    /// Counts the cells holding `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == tile).count()
    }

    fn offset(&self, cell: Cell) -> usize {
        debug_assert!(
            cell.is_within(self.size),
            "cell {cell} outside {}x{} grid",
            self.size.width,
            self.size.height
        );
        usize::from(cell.row) * usize::from(self.size.width) + usize::from(cell.col)
    }
}

impl Index<Cell> for Grid {
    type Output = Tile;

    fn index(&self, cell: Cell) -> &Tile {
        &self.tiles[self.offset(cell)]
    }
}

impl IndexMut<Cell> for Grid {
    fn index_mut(&mut self, cell: Cell) -> &mut Tile {
        let offset = self.offset(cell);
        &mut self.tiles[offset]
    }
}

/// Text dump: one glyph per tile, one row per line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for tile in row {
                write!(f, "{}", tile.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
