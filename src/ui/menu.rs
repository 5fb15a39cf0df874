use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;

/// Draws the pause banner in the middle of the board.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 11, 3);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(Line::from("Pause"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.hud_text)
                    .bg(theme.hud_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::bordered().border_style(Style::default().fg(theme.border_fg))),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(mid);

    center
}
