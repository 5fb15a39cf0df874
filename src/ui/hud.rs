use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

/// Rows taken by the HUD above the board.
pub const HUD_HEIGHT: u16 = 2;

const HUD_INNER_MARGIN_X: u16 = 1;

/// Renders the speed, top score and score rows into `area`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let score = state.score();
    // The live score counts towards the top score before the round ends.
    let top = score.max(state.round.top_score);

    let hud_style = Style::default().fg(theme.hud_text).bg(theme.hud_bg);
    frame.render_widget(Paragraph::new("").style(hud_style), area);

    let lines = vec![
        Line::from(vec![
            label("Speed:"),
            value(state.round.speed.to_string()),
            Span::raw("  "),
            label("Top:"),
            value(top.to_string()),
        ]),
        Line::from(vec![label("Score:"), value(score.to_string())]),
    ];
    frame.render_widget(
        Paragraph::new(lines).style(hud_style),
        inset_horizontal(area, HUD_INNER_MARGIN_X),
    );
}

fn label(text: &'static str) -> Span<'static> {
    Span::raw(text)
}

fn value(text: String) -> Span<'static> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::THEME_CLASSIC;
    use crate::food::RandomCells;
    use crate::game::GameState;

    use super::{inset_horizontal, render_hud};

    #[test]
    fn inset_shrinks_both_sides() {
        let area = Rect::new(2, 1, 10, 2);

        assert_eq!(inset_horizontal(area, 1), Rect::new(3, 1, 8, 2));
        assert_eq!(inset_horizontal(area, 9).width, 0);
    }

    #[test]
    fn top_shows_live_score_when_higher() {
        let mut terminal = Terminal::new(TestBackend::new(24, 2)).expect("test terminal");
        let mut state = GameState::new(&mut RandomCells::seeded(8));
        state.snake.extend_tail();
        state.snake.extend_tail();
        state.round.top_score = 4;

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_hud(frame, area, &state, &THEME_CLASSIC);
            })
            .expect("draw should succeed");

        let rows: Vec<String> = terminal
            .backend()
            .buffer()
            .content()
            .chunks(24)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect())
            .collect();
        assert_eq!(rows[0].trim(), "Speed:40  Top:5");
        assert_eq!(rows[1].trim(), "Score:5");
    }
}
