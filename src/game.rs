use crate::config::{BASE_SPEED, GRID, GridSize};
use crate::food::{CellSource, Food};
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Where a round is in its lifecycle, derived from the pause flag and the
/// snake's heading.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoundPhase {
    /// Freshly restarted, waiting for the first direction.
    Idle,
    Running,
    Paused,
}

/// Per-round flags and counters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RoundState {
    pub paused: bool,
    /// Counts down once per frame; the grid advances when it reaches zero.
    pub tick_counter: u32,
    pub speed: u32,
    /// Best score seen by this process, seeded from the score store.
    pub top_score: u16,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            paused: true,
            tick_counter: 0,
            speed: BASE_SPEED,
            top_score: 0,
        }
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub round: RoundState,
    bounds: GridSize,
}

impl GameState {
    /// Creates an idle round on the standard grid.
    #[must_use]
    pub fn new<C: CellSource + ?Sized>(cells: &mut C) -> Self {
        let snake = Snake::spawn(GRID);
        let mut state = Self {
            food: Food::new(snake.head()),
            snake,
            round: RoundState::default(),
            bounds: GRID,
        };

        let placed = state.spawn_food(cells);
        debug_assert!(placed, "a fresh snake leaves free cells");
        state
    }

    /// Puts a fresh snake and food on the board and pauses.
    ///
    /// `top_score` and the frame counter carry over, as does the buffered
    /// direction so a restart forced by the first key press still moves off
    /// in that direction.
    pub fn restart<C: CellSource + ?Sized>(&mut self, cells: &mut C) {
        let pending = self.snake.pending_direction();

        self.snake = Snake::spawn(self.bounds);
        self.snake.set_pending_direction(pending);
        let placed = self.spawn_food(cells);
        debug_assert!(placed, "a fresh snake leaves free cells");

        self.round.speed = BASE_SPEED;
        self.round.paused = true;
    }

    /// Moves the food to a random cell off the snake.
    ///
    /// Returns false, leaving the food where it was, when the snake fills the
    /// board.
    pub fn spawn_food<C: CellSource + ?Sized>(&mut self, cells: &mut C) -> bool {
        match Food::spawn(cells, self.bounds, &self.snake) {
            Some(food) => {
                self.food = food;
                true
            }
            None => false,
        }
    }

    /// Returns true if the snake covers `cell`.
    #[must_use]
    pub fn contains_cell(&self, cell: Position) -> bool {
        self.snake.contains_cell(cell)
    }

    /// Buffers the next heading; reversals are ignored.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// Current score, which is the snake's length.
    #[must_use]
    pub fn score(&self) -> u16 {
        u16::try_from(self.snake.len()).unwrap_or(u16::MAX)
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        match (self.round.paused, self.snake.current_direction()) {
            (false, _) => RoundPhase::Running,
            (true, Direction::None) => RoundPhase::Idle,
            (true, _) => RoundPhase::Paused,
        }
    }

    /// Returns the logical board size.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{BASE_SPEED, START_LENGTH};
    use crate::food::{Food, RandomCells};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{GameState, RoundPhase};

    #[test]
    fn new_round_is_idle_with_food_off_the_snake() {
        let mut cells = RandomCells::seeded(1);
        let state = GameState::new(&mut cells);

        assert_eq!(state.phase(), RoundPhase::Idle);
        assert_eq!(state.score(), START_LENGTH);
        assert_eq!(state.round.speed, BASE_SPEED);
        assert!(!state.contains_cell(state.food.position));
    }

    #[test]
    fn restart_keeps_top_score_and_buffered_direction() {
        let mut cells = RandomCells::seeded(2);
        let mut state = GameState::new(&mut cells);
        state.snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(1, 4),
            ],
            Direction::Up,
        );
        state.set_pending_direction(Direction::Left);
        state.round.top_score = 9;
        state.round.speed = 44;
        state.round.paused = false;
        state.round.tick_counter = 5;

        state.restart(&mut cells);

        assert_eq!(state.snake, {
            let mut expected = Snake::spawn(state.bounds());
            expected.set_pending_direction(Direction::Left);
            expected
        });
        assert_eq!(state.round.top_score, 9);
        assert_eq!(state.round.tick_counter, 5);
        assert_eq!(state.round.speed, BASE_SPEED);
        assert!(state.round.paused);
        assert!(!state.contains_cell(state.food.position));
    }

    #[test]
    fn phase_follows_pause_flag_and_heading() {
        let mut cells = RandomCells::seeded(3);
        let mut state = GameState::new(&mut cells);
        state.food = Food::new(Position::new(0, 0));

        state.round.paused = false;
        assert_eq!(state.phase(), RoundPhase::Running);

        state.snake = Snake::from_segments(vec![Position::new(4, 4)], Direction::Down);
        state.round.paused = true;
        assert_eq!(state.phase(), RoundPhase::Paused);
    }
}
