use crate::config::GridSize;
use crate::grid::Cell;
use crate::input::{Direction, direction_change_is_valid};

/// Two-slot direction buffer.
///
/// `committed` drives the tick being executed; `pending` collects the latest
/// accepted request and becomes committed at the start of the next tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Motion {
    committed: Direction,
    pending: Direction,
}

impl Motion {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            committed: direction,
            pending: direction,
        }
    }

    /// Buffers `requested` as the next direction unless it lies on the
    /// committed direction's axis. Returns whether the request was accepted.
    ///
    /// Validation is against the committed direction, so several requests
    /// between two ticks cannot chain into a reversal.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if !direction_change_is_valid(self.committed, requested) {
            return false;
        }
        self.pending = requested;
        true
    }

    /// Promotes the pending direction and returns it.
    pub fn commit(&mut self) -> Direction {
        self.committed = self.pending;
        self.committed
    }

    #[must_use]
    pub fn committed(&self) -> Direction {
        self.committed
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }
}

/// Returns the cell the head enters when moving one step in `direction`.
#[must_use]
pub fn next_cell(head: Cell, direction: Direction, size: GridSize) -> Cell {
    head.wrapping_step(direction, size)
}
