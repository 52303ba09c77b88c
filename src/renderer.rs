use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{BORDER_PLAY_AREA, GLYPH_TILE, GridSize, TILE_COLUMNS, TilePalette};
use crate::game::{Game, GameStatus};
use crate::grid::{Cell, Grid, Tile};
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, game: &Game, palette: &TilePalette) {
    let [board_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let play_area = centered_board(board_area, game.size());
    let block = Block::bordered()
        .border_set(BORDER_PLAY_AREA)
        .border_style(Style::new().fg(palette.border_fg))
        .title(" grid-snake ");
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_grid(frame, inner, game.grid(), palette);
    render_status_line(frame, status_area, game, palette);

    match game.status() {
        GameStatus::Paused => render_pause_menu(frame, play_area, palette),
        GameStatus::GameOver => render_game_over_menu(frame, play_area, game.snake().len(), palette),
        GameStatus::Running | GameStatus::Stopped => {}
    }
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, grid: &Grid, palette: &TilePalette) {
    let buffer = frame.buffer_mut();
    for (cell, tile) in grid.cells() {
        let Some((x, y)) = cell_to_terminal(inner, cell) else {
            continue;
        };

        let style = Style::new().fg(tile_color(tile, palette));
        let style = if tile == Tile::Head {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        };
        buffer.set_string(x, y, GLYPH_TILE, style);
    }
}

fn render_status_line(frame: &mut Frame<'_>, area: Rect, game: &Game, palette: &TilePalette) {
    let status = match game.status() {
        GameStatus::Running => "running",
        GameStatus::Paused => "paused",
        GameStatus::Stopped => "stopped",
        GameStatus::GameOver => "game over",
    };
    let text = format!(
        "length {}  ticks {}  {}   [arrows] move  [p] pause  [q] quit",
        game.snake().len(),
        game.tick_count(),
        status,
    );

    frame.render_widget(
        Paragraph::new(Line::from(text))
            .alignment(Alignment::Center)
            .style(Style::new().fg(palette.status_fg)),
        area,
    );
}

/// Maps a tile onto its palette color.
#[must_use]
pub fn tile_color(tile: Tile, palette: &TilePalette) -> ratatui::style::Color {
    match tile {
        Tile::Empty => palette.empty,
        Tile::Head => palette.head,
        Tile::Body => palette.body,
        Tile::Tail => palette.tail,
        Tile::Item => palette.item,
        Tile::Obstacle => palette.obstacle,
    }
}

/// Centers a bordered box sized for `size` inside `area`, clipped to `area`.
fn centered_board(area: Rect, size: GridSize) -> Rect {
    let width = size
        .width
        .saturating_mul(TILE_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = size.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn cell_to_terminal(inner: Rect, cell: Cell) -> Option<(u16, u16)> {
    let x = inner
        .x
        .checked_add(cell.col.checked_mul(TILE_COLUMNS)?)?;
    let y = inner.y.checked_add(cell.row)?;

    if x.checked_add(TILE_COLUMNS)? > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
