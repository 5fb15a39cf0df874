use std::time::Duration;

use ratatui::style::Color;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Cells along each edge of the square play field.
pub const GRID_SIZE: u16 = 16;

/// The fixed play field.
pub const GRID: GridSize = GridSize {
    width: GRID_SIZE,
    height: GRID_SIZE,
};

/// Frames per second the engine expects to be driven at.
pub const FRAME_RATE: u32 = 60;

/// Wall-clock length of one frame at [`FRAME_RATE`].
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Snake length right after a restart.
pub const START_LENGTH: u16 = 3;

/// Speed of a freshly spawned round.
pub const BASE_SPEED: u32 = 40;

/// Upper bound for speed; keeps the step interval well above one frame.
pub const MAX_SPEED: u32 = FRAME_RATE * 9 / 10;

/// Colors for every visual element of the terminal front-end.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    /// Checkerboard tiles of the play field.
    pub board_light: Color,
    pub board_dark: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_bg: Color,
}

/// Handheld-console greens.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::Rgb(0x07, 0x18, 0x21),
    snake_body: Color::Rgb(0x30, 0x68, 0x50),
    food: Color::Rgb(0x07, 0x18, 0x21),
    board_light: Color::Rgb(0x86, 0xc0, 0x6c),
    board_dark: Color::Rgb(0x7a, 0xb4, 0x62),
    border_fg: Color::Rgb(0x30, 0x68, 0x50),
    hud_text: Color::Rgb(0x07, 0x18, 0x21),
    hud_bg: Color::Rgb(0xe0, 0xf8, 0xcf),
};

/// Terminal columns used to draw one grid cell, keeping cells roughly square.
pub const CELL_WIDTH: u16 = 2;

/// One snake segment, [`CELL_WIDTH`] columns wide.
pub const GLYPH_SEGMENT: &str = "██";
pub const GLYPH_FOOD: &str = "◖◗";
pub const GLYPH_EMPTY: &str = "  ";
