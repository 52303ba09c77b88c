use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::TilePalette;

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, palette: &TilePalette) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        title_line("PAUSED", palette),
        Line::from(""),
        Line::from("[P]/[Space] Resume"),
        Line::from("[Q]/[Esc] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    final_length: usize,
    palette: &TilePalette,
) {
    let popup = centered_popup(area, 70, 45);
    frame.render_widget(Clear, popup);

    let lines = vec![
        title_line("GAME OVER", palette),
        Line::from(""),
        Line::from(format!("Final length: {final_length}")),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn title_line(text: &'static str, palette: &TilePalette) -> Line<'static> {
    Line::from(text).style(
        Style::default()
            .fg(palette.popup_title)
            .add_modifier(Modifier::BOLD),
    )
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
