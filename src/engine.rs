use log::{debug, info, warn};

use crate::config::{BASE_SPEED, FRAME_RATE, MAX_SPEED};
use crate::feedback::{Cue, Feedback};
use crate::food::CellSource;
use crate::game::GameState;
use crate::input::{EdgeDetector, GameInput, InputSource};
use crate::score::ScoreStore;
use crate::snake::HeadMove;

/// What one call to [`TickEngine::on_frame`] did to the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Paused or between steps; nothing moved.
    Held,
    /// The snake advanced one cell.
    Stepped { grew: bool },
    /// The head ran into the body; the round was restarted.
    GameOver { score: u16 },
}

/// Speed for a snake of `length` segments: logarithmic growth over
/// [`BASE_SPEED`], capped at [`MAX_SPEED`].
#[must_use]
pub fn speed_for_length(length: usize) -> u32 {
    let growth = (length.max(1) as f64).ln();
    let speed = (f64::from(BASE_SPEED) + growth).min(f64::from(MAX_SPEED));
    speed as u32
}

/// Frames between two grid steps at `speed`.
#[must_use]
pub fn step_interval(speed: u32) -> u32 {
    FRAME_RATE.saturating_sub(speed).max(1)
}

/// Drives a [`GameState`] frame by frame against its collaborators.
///
/// The engine owns the capabilities it talks to and the previous frame's
/// button mask; the state itself stays with the caller.
pub struct TickEngine<I, S, F, C> {
    input: I,
    store: S,
    feedback: F,
    cells: C,
    edges: EdgeDetector,
}

impl<I, S, F, C> TickEngine<I, S, F, C>
where
    I: InputSource,
    S: ScoreStore,
    F: Feedback,
    C: CellSource,
{
    #[must_use]
    pub fn new(input: I, store: S, feedback: F, cells: C) -> Self {
        Self {
            input,
            store,
            feedback,
            cells,
            edges: EdgeDetector::default(),
        }
    }

    /// Builds an idle round using the engine's cell source.
    #[must_use]
    pub fn new_state(&mut self) -> GameState {
        GameState::new(&mut self.cells)
    }

    /// Initial restart; loads the persisted top score.
    pub fn on_start(&mut self, state: &mut GameState) {
        self.reload_top_score(state);
        self.restart(state);
    }

    /// Runs one frame of game logic, then draws.
    pub fn on_frame(&mut self, state: &mut GameState) -> FrameOutcome {
        let outcome = self.update(state);
        self.feedback.draw_frame(state);
        outcome
    }

    fn update(&mut self, state: &mut GameState) -> FrameOutcome {
        state.round.speed = speed_for_length(state.snake.len());
        let interval = step_interval(state.round.speed);
        state.round.tick_counter = (i64::from(state.round.tick_counter) - 1)
            .rem_euclid(i64::from(interval)) as u32;

        let pressed = self.edges.update(self.input.read_buttons());
        if let Some(input) = GameInput::decode(pressed, state.snake.current_direction()) {
            self.apply_input(state, input);
        }

        if !state.round.paused && state.snake.current_direction().is_none() {
            self.restart(state);
            state.round.paused = false;
        }

        if state.round.paused || state.round.tick_counter != 0 {
            return FrameOutcome::Held;
        }

        self.step(state)
    }

    fn apply_input(&mut self, state: &mut GameState, input: GameInput) {
        match input {
            GameInput::Pause => state.round.paused = true,
            GameInput::Extend => {
                self.feedback.play_tone(Cue::Extend.tone());
                state.snake.extend_tail();
            }
            GameInput::Steer(direction) => {
                state.round.paused = false;
                state.set_pending_direction(direction);
            }
        }
    }

    fn step(&mut self, state: &mut GameState) -> FrameOutcome {
        state.snake.commit_direction();
        let new_head = state.snake.next_head(state.bounds());

        // Food is tested against the body before the head moves, so it is
        // eaten one step after the head reaches it.
        let grew = state.contains_cell(state.food.position);
        let moved = if grew {
            self.feedback.play_tone(Cue::Eat.tone());
            if state.spawn_food(&mut self.cells) {
                state.snake.grow_head(new_head)
            } else {
                // The body fills the board, so the head has nowhere to go.
                HeadMove::Collided
            }
        } else {
            self.feedback.play_tone(Cue::Move.tone());
            state.snake.advance_head(new_head)
        };

        match moved {
            HeadMove::Moved => FrameOutcome::Stepped { grew },
            HeadMove::Collided => {
                let score = state.score();
                self.game_over(state, score);
                FrameOutcome::GameOver { score }
            }
        }
    }

    fn game_over(&mut self, state: &mut GameState, score: u16) {
        self.feedback.play_tone(Cue::GameOver.tone());
        debug!("game over at length {score}");

        if score > state.round.top_score {
            info!("new top score {score}");
        }
        state.round.top_score = state.round.top_score.max(score);
        if let Err(error) = self.store.save_top_score(state.round.top_score) {
            warn!("failed to save top score: {error}");
        }

        self.reload_top_score(state);
        self.restart(state);
    }

    /// Loads the persisted top score. Runs on start and after a game over,
    /// never from the per-frame restart of an idle round.
    fn reload_top_score(&mut self, state: &mut GameState) {
        match self.store.load_top_score() {
            Ok(top_score) => state.round.top_score = top_score,
            Err(error) => warn!(
                "failed to load top score, keeping {}: {error}",
                state.round.top_score
            ),
        }
    }

    fn restart(&mut self, state: &mut GameState) {
        state.restart(&mut self.cells);
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}
