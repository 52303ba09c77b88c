use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::GridSize;
use crate::error::InitError;
use crate::grid::{Cell, Grid, Tile};
use crate::input::{Direction, GameInput};
use crate::layout::Layout;
use crate::motion::{Motion, next_cell};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    Stopped,
    GameOver,
}

/// What one call to [`Game::step`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The game was not running; nothing changed.
    Idle,
    /// The snake advanced one cell at constant length.
    Moved,
    /// The snake ate an item and grew by one.
    Grew,
    /// The next cell held `tile`; the game is over and the board untouched.
    Blocked { tile: Tile },
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    snake: Snake,
    motion: Motion,
    status: GameStatus,
    tick_count: u64,
}

impl Game {
    /// Seeds a running game from `layout`.
    ///
    /// The starting direction continues the line from the second-to-last
    /// snake cell to the head.
    pub fn new(layout: &Layout) -> Result<Self, InitError> {
        let size = layout.size();
        if size.is_empty() {
            return Err(InitError::EmptyGrid {
                width: size.width,
                height: size.height,
            });
        }

        if layout.snake.len() < 2 {
            return Err(InitError::SnakeTooShort {
                len: layout.snake.len(),
            });
        }

        let obstacles = layout.obstacle_cells();
        let mut claimed = HashSet::new();
        for (what, cells) in [
            ("snake", layout.snake.as_slice()),
            ("item", layout.items.as_slice()),
            ("obstacle", obstacles.as_slice()),
        ] {
            for &cell in cells {
                check_in_bounds(what, cell, size)?;
                if !claimed.insert(cell) {
                    return Err(InitError::Overlap { cell });
                }
            }
        }

        let mut direction = Direction::Right;
        for pair in layout.snake.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            direction = from
                .direction_to(to, size)
                .ok_or(InitError::DisjointSnake { from, to })?;
        }

        let mut grid = Grid::new(size);
        for &cell in &obstacles {
            grid[cell] = Tile::Obstacle;
        }
        for &cell in &layout.items {
            grid[cell] = Tile::Item;
        }

        let snake = Snake::from_cells(layout.snake.iter().copied());
        for &cell in snake.segments() {
            grid[cell] = Tile::Body;
        }
        grid[snake.tail()] = Tile::Tail;
        grid[snake.head()] = Tile::Head;

        debug!(
            width = size.width,
            height = size.height,
            length = snake.len(),
            items = layout.items.len(),
            obstacles = obstacles.len(),
            ?direction,
            "game initialized"
        );

        Ok(Self {
            grid,
            snake,
            motion: Motion::new(direction),
            status: GameStatus::Running,
            tick_count: 0,
        })
    }

    /// Advances simulation by one gameplay tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Running {
            return StepOutcome::Idle;
        }

        let direction = self.motion.commit();
        let head = self.snake.head();
        let next = next_cell(head, direction, self.grid.size());
        let tile = self.grid[next];

        if !tile.is_passable() {
            self.status = GameStatus::GameOver;
            info!(
                tick = self.tick_count,
                length = self.snake.len(),
                %next,
                ?tile,
                "movement blocked, game over"
            );
            return StepOutcome::Blocked { tile };
        }

        self.tick_count += 1;
        let grows = tile == Tile::Item;

        // Re-tag the old head before the tail bookkeeping so a two-cell snake
        // stepping into its own tail keeps a tail tag.
        self.grid[head] = Tile::Body;

        if !grows {
            if let Some(old_tail) = self.snake.pop_tail() {
                self.grid[old_tail] = Tile::Empty;
            }
            let new_tail = self.snake.tail();
            self.grid[new_tail] = Tile::Tail;
        }

        self.grid[next] = Tile::Head;
        self.snake.push_head(next);

        if grows {
            debug!(tick = self.tick_count, length = self.snake.len(), %next, "item eaten");
            StepOutcome::Grew
        } else {
            StepOutcome::Moved
        }
    }

    /// Buffers a direction change for the next tick.
    ///
    /// Ignored unless running, and for turns onto the committed axis.
    pub fn request_direction_change(&mut self, direction: Direction) {
        if self.status != GameStatus::Running {
            return;
        }

        if self.motion.change_direction(direction) {
            debug!(?direction, "direction change buffered");
        }
    }

    /// Suspends ticking; only a running game can be paused.
    pub fn request_pause(&mut self) {
        if self.status == GameStatus::Running {
            self.set_status(GameStatus::Paused);
        }
    }

    /// Resumes a paused game.
    pub fn request_resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.set_status(GameStatus::Running);
        }
    }

    /// Ends a running or paused game at the player's request.
    pub fn request_stop(&mut self) {
        if matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            self.set_status(GameStatus::Stopped);
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.request_direction_change(direction),
            GameInput::Pause => match self.status {
                GameStatus::Running => self.request_pause(),
                GameStatus::Paused => self.request_resume(),
                GameStatus::Stopped | GameStatus::GameOver => {}
            },
            GameInput::Quit => self.request_stop(),
            GameInput::Restart => {}
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    /// Direction used by the most recent tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.motion.committed()
    }

    /// Direction the next tick will use.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.motion.pending()
    }

    /// Number of ticks that moved the snake.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn set_status(&mut self, status: GameStatus) {
        debug!(from = ?self.status, to = ?status, "status changed");
        self.status = status;
    }
}

fn check_in_bounds(what: &'static str, cell: Cell, size: GridSize) -> Result<(), InitError> {
    if cell.is_within(size) {
        Ok(())
    } else {
        Err(InitError::OutOfBounds {
            what,
            cell,
            width: size.width,
            height: size.height,
        })
    }
}
