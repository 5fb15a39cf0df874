use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Supplies candidate cells for food placement.
pub trait CellSource {
    /// Returns a uniformly drawn cell inside `bounds`.
    fn random_cell(&mut self, bounds: GridSize) -> Position;
}

/// [`CellSource`] backed by a seedable PRNG.
#[derive(Debug, Clone)]
pub struct RandomCells {
    rng: StdRng,
}

impl RandomCells {
    /// Creates a deterministic source for tests and reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl CellSource for RandomCells {
    fn random_cell(&mut self, bounds: GridSize) -> Position {
        Position {
            x: self.rng.gen_range(0..i32::from(bounds.width)),
            y: self.rng.gen_range(0..i32::from(bounds.height)),
        }
    }
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell the snake does not occupy, or `None` when the
    /// snake covers the whole board.
    #[must_use]
    pub fn spawn<C: CellSource + ?Sized>(
        cells: &mut C,
        bounds: GridSize,
        snake: &Snake,
    ) -> Option<Self> {
        spawn_position(cells, bounds, snake).map(Self::new)
    }
}

/// Draws candidates from `cells` until one is off the snake.
///
/// Returns `None` without drawing when no free cell is left.
#[must_use]
pub fn spawn_position<C: CellSource + ?Sized>(
    cells: &mut C,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let occupied: HashSet<&Position> = snake.segments().collect();
    if occupied.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = cells.random_cell(bounds);
        if !snake.contains_cell(candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::config::{GRID, GridSize};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{CellSource, Food, RandomCells, spawn_position};

    struct ScriptedCells(VecDeque<Position>);

    impl CellSource for ScriptedCells {
        fn random_cell(&mut self, _bounds: GridSize) -> Position {
            self.0.pop_front().expect("script ran out of cells")
        }
    }

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut cells = RandomCells::seeded(7);
        let snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 2, y: 0 },
            ],
            Direction::Right,
        );

        for _ in 0..100 {
            let food_position = spawn_position(
                &mut cells,
                GridSize {
                    width: 4,
                    height: 2,
                },
                &snake,
            )
            .expect("free cells remain");
            assert!(!snake.contains_cell(food_position));
        }
    }

    #[test]
    fn rejected_candidates_are_redrawn() {
        let snake = Snake::spawn(GRID);
        let mut cells = ScriptedCells(VecDeque::from(vec![
            Position::new(8, 8),
            Position::new(10, 10),
            Position::new(3, 4),
        ]));

        let food = Food::spawn(&mut cells, GRID, &snake).expect("free cells remain");

        assert_eq!(food.position, Position::new(3, 4));
        assert!(cells.0.is_empty());
    }

    #[test]
    fn last_free_cell_is_found() {
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
            ],
            Direction::Up,
        );
        let mut cells = RandomCells::seeded(11);

        assert_eq!(
            spawn_position(&mut cells, bounds, &snake),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn seeded_sources_agree() {
        let mut a = RandomCells::seeded(99);
        let mut b = RandomCells::seeded(99);

        for _ in 0..20 {
            let cell = a.random_cell(GRID);
            assert!(cell.is_within_bounds(GRID));
            assert_eq!(cell, b.random_cell(GRID));
        }
    }

    #[test]
    fn full_board_has_no_food_cell() {
        let bounds = GridSize {
            width: 2,
            height: 1,
        };
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(1, 0)],
            Direction::Right,
        );
        let mut cells = ScriptedCells(VecDeque::new());

        assert_eq!(spawn_position(&mut cells, bounds, &snake), None);
    }
}
