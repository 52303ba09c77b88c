use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Movement axis a direction lies on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the axis this direction moves along.
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
    Restart,
}

/// Returns whether a direction change is legal.
///
/// Only turns onto the other axis are accepted; continuing straight is a
/// no-op and reversing would run the head into the neck.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    current.axis() != next.axis()
}

/// Maps one key press onto a game intent.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => GameInput::Direction(Direction::Right),
        KeyCode::Char('p' | 'P' | ' ') => GameInput::Pause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        KeyCode::Enter | KeyCode::Char('r' | 'R') => GameInput::Restart,
        _ => return None,
    };

    Some(input)
}

/// Polls the terminal for key presses.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Waits up to the poll timeout and returns the first mapped input, if any.
    ///
    /// Unmapped keys, releases and non-key events are drained and skipped.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    return Ok(Some(input));
                }
            }

            if !event::poll(Duration::ZERO)? {
                return Ok(None);
            }
        }
    }
}
