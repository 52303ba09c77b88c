use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Cell;

/// Reasons a starting layout cannot seed a game.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum InitError {
    #[error("grid must have non-zero dimensions, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("snake needs at least 2 cells, got {len}")]
    SnakeTooShort { len: usize },

    #[error("{what} cell {cell} lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        cell: Cell,
        width: u16,
        height: u16,
    },

    #[error("cell {cell} is claimed more than once")]
    Overlap { cell: Cell },

    #[error("snake cells {from} and {to} are not adjacent")]
    DisjointSnake { from: Cell, to: Cell },
}

/// Failures while loading or extending a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid layout JSON")]
    Json(#[from] serde_json::Error),

    #[error("cannot place {requested} items, only {available} free cells remain")]
    NoFreeCells { requested: usize, available: usize },
}
