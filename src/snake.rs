use std::collections::VecDeque;

use crate::grid::Cell;

/// Cells occupied by the snake, ordered tail (front) to head (back).
///
/// Only tracks order; the board tags are kept in step by the engine.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a snake from explicit cells listed tail first.
    ///
    /// Callers guarantee at least one cell; the engine validates a minimum
    /// of two before constructing one.
    #[must_use]
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        debug_assert!(!body.is_empty());
        Self { body }
    }

    /// Appends a new head.
    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    /// Removes and returns the tail cell.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_front()
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over segments from tail to head.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> + ExactSizeIterator {
        self.body.iter()
    }
}
