use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_WIDTH, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SEGMENT, GridSize, Theme};
use crate::game::{GameState, RoundPhase};
use crate::snake::Position;
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::render_pause_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let bounds = state.bounds();
    let [hud_area, board_area] = centered_layout(frame.area(), bounds);

    render_hud(frame, hud_area, state, theme);

    let block = Block::bordered().border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_board(frame, inner, bounds, theme);
    if !state.snake.current_direction().is_none() {
        render_food(frame, inner, state, theme);
    }
    render_snake(frame, inner, state, theme);

    if state.phase() != RoundPhase::Running {
        render_pause_menu(frame, inner, theme);
    }
}

/// Splits `area` into the HUD rows and a bordered board sized to `bounds`,
/// centred horizontally.
fn centered_layout(area: Rect, bounds: GridSize) -> [Rect; 2] {
    let board_width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let board_height = bounds.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(area);
    let [hud_area, board_area, _] = Layout::vertical([
        Constraint::Length(HUD_HEIGHT),
        Constraint::Length(board_height),
        Constraint::Min(0),
    ])
    .areas(column);

    [hud_area, board_area]
}

fn render_board(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let Some((column, row)) = logical_to_terminal(inner, bounds, Position { x, y }) else {
                continue;
            };

            let tile = if (x + y) % 2 == 0 {
                theme.board_light
            } else {
                theme.board_dark
            };
            buffer.set_string(column, row, GLYPH_EMPTY, Style::new().bg(tile));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), state.food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments().skip(1) {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_SEGMENT, Style::new().fg(theme.snake_body));
    }

    // Drawn last so a duplicated tail or a wrapped body never hides it.
    if let Some((x, y)) = logical_to_terminal(inner, state.bounds(), head) {
        buffer.set_string(
            x,
            y,
            GLYPH_SEGMENT,
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
        );
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{GRID, GridSize, THEME_CLASSIC};
    use crate::food::{Food, RandomCells};
    use crate::game::GameState;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{logical_to_terminal, render};

    #[test]
    fn cells_map_to_two_columns_each() {
        let inner = Rect::new(1, 3, 32, 16);

        assert_eq!(
            logical_to_terminal(inner, GRID, Position::new(0, 0)),
            Some((1, 3))
        );
        assert_eq!(
            logical_to_terminal(inner, GRID, Position::new(15, 15)),
            Some((31, 18))
        );
        assert_eq!(logical_to_terminal(inner, GRID, Position::new(16, 0)), None);
    }

    #[test]
    fn clipped_area_drops_cells() {
        let inner = Rect::new(0, 0, 5, 2);
        let bounds = GridSize {
            width: 4,
            height: 4,
        };

        assert_eq!(
            logical_to_terminal(inner, bounds, Position::new(1, 1)),
            Some((2, 1))
        );
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(2, 1)), None);
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(0, 2)), None);
    }

    #[test]
    fn idle_frame_shows_hud_and_pause() {
        let mut terminal = Terminal::new(TestBackend::new(40, 22)).expect("test terminal");
        let state = GameState::new(&mut RandomCells::seeded(4));

        terminal
            .draw(|frame| render(frame, &state, &THEME_CLASSIC))
            .expect("draw should succeed");

        let text = buffer_text(&terminal);
        assert!(text.contains("Speed:40"));
        assert!(text.contains("Score:3"));
        assert!(text.contains("Pause"));
        assert!(!text.contains("◖◗"));
    }

    #[test]
    fn running_frame_draws_food() {
        let mut terminal = Terminal::new(TestBackend::new(40, 22)).expect("test terminal");
        let mut state = GameState::new(&mut RandomCells::seeded(4));
        state.snake = Snake::from_segments(vec![Position::new(4, 4)], Direction::Left);
        state.food = Food::new(Position::new(8, 2));
        state.round.paused = false;

        terminal
            .draw(|frame| render(frame, &state, &THEME_CLASSIC))
            .expect("draw should succeed");

        let text = buffer_text(&terminal);
        assert!(text.contains("◖◗"));
        assert!(!text.contains("Pause"));
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }
}
