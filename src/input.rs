use std::ops::BitOr;

/// Movement directions, plus the resting state a round starts in.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Directional buttons in the order they are checked when several are
    /// pressed on the same frame.
    pub const PRIORITY: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction. `None` is its own opposite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// Unit step on the grid, y growing downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    fn button(self) -> Buttons {
        match self {
            Self::Up => Buttons::UP,
            Self::Down => Buttons::DOWN,
            Self::Left => Buttons::LEFT,
            Self::Right => Buttons::RIGHT,
            Self::None => Buttons::NONE,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Raw gamepad state as a bitmask, one bit per button.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Buttons(u8);

impl Buttons {
    pub const NONE: Self = Self(0);
    /// Primary action button.
    pub const BUTTON_1: Self = Self(1);
    /// Confirm button.
    pub const BUTTON_2: Self = Self(2);
    pub const LEFT: Self = Self(16);
    pub const RIGHT: Self = Self(32);
    pub const UP: Self = Self(64);
    pub const DOWN: Self = Self(128);

    /// Every single button.
    pub const ALL: [Self; 6] = [
        Self::BUTTON_1,
        Self::BUTTON_2,
        Self::LEFT,
        Self::RIGHT,
        Self::UP,
        Self::DOWN,
    ];

    /// Returns true when every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    /// `self` with every bit of `other` cleared.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Buttons held now that were not held in `previous`.
    #[must_use]
    pub const fn newly_pressed(self, previous: Self) -> Self {
        self.without(previous)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// High-level input events consumed by the tick engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    /// Confirm button: pause the round.
    Pause,
    /// Action button: grow by one segment on the spot.
    Extend,
    /// A direction that is legal from the current heading.
    Steer(Direction),
}

impl GameInput {
    /// Decodes a set of freshly pressed buttons into at most one event.
    ///
    /// Confirm wins over action, which wins over directions. Directions are
    /// tried in [`Direction::PRIORITY`] order and reversals of `current` are
    /// skipped, so a reversal pressed together with a legal turn still turns.
    #[must_use]
    pub fn decode(pressed: Buttons, current: Direction) -> Option<Self> {
        if pressed.contains(Buttons::BUTTON_2) {
            return Some(Self::Pause);
        }
        if pressed.contains(Buttons::BUTTON_1) {
            return Some(Self::Extend);
        }

        Direction::PRIORITY
            .into_iter()
            .find(|direction| {
                pressed.contains(direction.button())
                    && direction_change_is_valid(current, *direction)
            })
            .map(Self::Steer)
    }
}

/// Source of raw button state, polled once per frame.
pub trait InputSource {
    fn read_buttons(&mut self) -> Buttons;
}

/// Turns level-triggered button state into edge-triggered events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    last: Buttons,
}

impl EdgeDetector {
    /// Records `current` and returns the buttons that went down this frame.
    pub fn update(&mut self, current: Buttons) -> Buttons {
        let pressed = current.newly_pressed(self.last);
        self.last = current;
        pressed
    }
}
