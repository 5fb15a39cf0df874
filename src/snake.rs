use std::collections::VecDeque;

use crate::config::{GridSize, START_LENGTH};
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// The neighbouring cell in `direction`, re-entering from the opposite
    /// edge when it leaves the grid.
    #[must_use]
    pub fn stepped(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }
}

/// What happened when a new head was pushed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HeadMove {
    Moved,
    /// The head landed on a segment and was not inserted.
    Collided,
}

/// Snake body and its two-stage direction state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    current_direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Spawns the starting diagonal in the middle of `bounds`, at rest.
    #[must_use]
    pub fn spawn(bounds: GridSize) -> Self {
        let length = i32::from(START_LENGTH);
        let origin_x = i32::from(bounds.width / 2) - length / 2;
        let origin_y = i32::from(bounds.height / 2) - length / 2;

        let mut body = VecDeque::with_capacity(usize::from(START_LENGTH));
        for i in (1..=length).rev() {
            body.push_front(Position::new(origin_x + i, origin_y + i));
        }

        Self {
            body,
            current_direction: Direction::None,
            pending_direction: Direction::None,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            current_direction: direction,
            pending_direction: direction,
        }
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn contains_cell(&self, cell: Position) -> bool {
        self.body.contains(&cell)
    }

    /// Buffers the direction applied on the next step.
    ///
    /// A reversal of the current direction is ignored.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.current_direction, direction) {
            self.pending_direction = direction;
        }
    }

    /// Makes the buffered direction current and returns it.
    pub fn commit_direction(&mut self) -> Direction {
        self.current_direction = self.pending_direction;
        self.current_direction
    }

    /// Cell the head moves into on the next step with the current direction.
    #[must_use]
    pub fn next_head(&self, bounds: GridSize) -> Position {
        self.head().stepped(self.current_direction, bounds)
    }

    /// Pushes `cell` as the new head, keeping every existing segment.
    pub fn grow_head(&mut self, cell: Position) -> HeadMove {
        if self.contains_cell(cell) {
            return HeadMove::Collided;
        }

        self.body.push_front(cell);
        HeadMove::Moved
    }

    /// Drops the tail, then pushes `cell` as the new head.
    ///
    /// The tail is gone even when the head collides, so the body that was
    /// hit is what [`Snake::len`] reports afterwards.
    pub fn advance_head(&mut self, cell: Position) -> HeadMove {
        // A one-segment body is empty here, so the push below always lands.
        let _ = self.body.pop_back();
        self.grow_head(cell)
    }

    /// Duplicates the tail cell; the copy unfolds over the following steps.
    pub fn extend_tail(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The direction applied on the last step.
    #[must_use]
    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    /// The direction the next step will apply.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
