//! Snake on a toroidal grid.
//!
//! The simulation core is [`game::Game`]: a fixed [`grid::Grid`] of tile tags,
//! the [`snake::Snake`] cell queue and the [`motion::Motion`] direction
//! buffer, advanced one cell per [`game::Game::step`]. Terminal rendering and
//! input live alongside it for the `grid-snake` binary.

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod layout;
pub mod motion;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
