use std::time::Duration;

use ratatui::style::Color;

use crate::snake::Cell;

/// Square playing field of `tile_count × tile_count` cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    tile_count: u16,
}

impl Board {
    /// Creates a board with `tile_count` cells per edge.
    ///
    /// # Panics
    ///
    /// Panics when `tile_count` is below [`MIN_TILE_COUNT`]: smaller boards
    /// have no free cell for the first food.
    #[must_use]
    pub const fn new(tile_count: u16) -> Self {
        assert!(
            tile_count >= MIN_TILE_COUNT,
            "board needs at least 2 cells per edge"
        );
        Self { tile_count }
    }

    #[must_use]
    pub const fn tile_count(self) -> u16 {
        self.tile_count
    }

    /// Returns true when `cell` lies on the board.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        let size = i32::from(self.tile_count);
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    /// Cell the snake starts from after a restart.
    #[must_use]
    pub fn start_cell(self) -> Cell {
        let mid = i32::from(self.tile_count / 2);
        Cell::new(mid, mid)
    }

    /// Fixed food cell of the very first game.
    #[must_use]
    pub fn initial_food_cell(self) -> Cell {
        let quarter = i32::from(self.tile_count / 4);
        Cell::new(quarter, quarter)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_COUNT)
    }
}

/// Board edge length in cells.
pub const DEFAULT_TILE_COUNT: u16 = 20;

/// Smallest board edge that keeps the start cell and first food apart.
pub const MIN_TILE_COUNT: u16 = 2;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Fastest selectable tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Slowest selectable tick interval in milliseconds.
pub const MAX_TICK_INTERVAL_MS: u64 = 200;

/// Interval change applied by one speed-up / slow-down key press.
pub const TICK_INTERVAL_STEP_MS: u64 = 10;

/// Key the high score is persisted under.
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Clamps a raw interval value into the selectable range.
#[must_use]
pub fn clamp_tick_interval_ms(raw_ms: u64) -> u64 {
    raw_ms.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS)
}

/// Converts a clamped interval into a [`Duration`].
#[must_use]
pub fn tick_interval(raw_ms: u64) -> Duration {
    Duration::from_millis(clamp_tick_interval_ms(raw_ms))
}

/// Human label for a tick interval in milliseconds.
#[must_use]
pub fn speed_label(interval_ms: u64) -> &'static str {
    match interval_ms {
        0..70 => "fast",
        70..90 => "quick",
        90..110 => "normal",
        110..150 => "slow",
        _ => "very slow",
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_eye: Color,
    pub food: Color,
    pub play_bg: Color,
    pub grid: Color,
    pub hud_value: Color,
    pub hud_accent: Color,
    pub overlay_fg: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::Rgb(0x27, 0xae, 0x60),
    snake_body: Color::Rgb(0x2e, 0xcc, 0x71),
    snake_eye: Color::White,
    food: Color::Rgb(0xe7, 0x4c, 0x3c),
    play_bg: Color::Rgb(0xf8, 0xf8, 0xf8),
    grid: Color::Rgb(0xe0, 0xe0, 0xe0),
    hud_value: Color::White,
    hud_accent: Color::Green,
    overlay_fg: Color::White,
};

/// Empty-cell glyph (two columns per cell keep the board roughly square).
pub const GLYPH_EMPTY: &str = "· ";
pub const GLYPH_FOOD: &str = "● ";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▀▀";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▄▄";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";

/// Terminal columns used per board cell.
pub const CELL_WIDTH: u16 = 2;

#[cfg(test)]
mod tests {
    use super::{Board, clamp_tick_interval_ms, speed_label};
    use crate::snake::Cell;

    #[test]
    fn speed_label_breakpoints() {
        assert_eq!(speed_label(50), "fast");
        assert_eq!(speed_label(69), "fast");
        assert_eq!(speed_label(70), "quick");
        assert_eq!(speed_label(89), "quick");
        assert_eq!(speed_label(90), "normal");
        assert_eq!(speed_label(109), "normal");
        assert_eq!(speed_label(110), "slow");
        assert_eq!(speed_label(149), "slow");
        assert_eq!(speed_label(150), "very slow");
        assert_eq!(speed_label(200), "very slow");
    }

    #[test]
    fn interval_is_clamped_into_range() {
        assert_eq!(clamp_tick_interval_ms(0), 50);
        assert_eq!(clamp_tick_interval_ms(120), 120);
        assert_eq!(clamp_tick_interval_ms(10_000), 200);
    }

    #[test]
    fn default_board_matches_classic_layout() {
        let board = Board::default();

        assert_eq!(board.start_cell(), Cell::new(10, 10));
        assert_eq!(board.initial_food_cell(), Cell::new(5, 5));
    }

    #[test]
    fn smallest_board_keeps_first_food_off_the_start_cell() {
        let board = Board::new(2);

        assert_eq!(board.start_cell(), Cell::new(1, 1));
        assert_eq!(board.initial_food_cell(), Cell::new(0, 0));
    }

    #[test]
    #[should_panic(expected = "at least 2 cells")]
    fn single_cell_board_is_rejected() {
        let _ = Board::new(1);
    }

    #[test]
    fn board_contains_rejects_cells_past_each_edge() {
        let board = Board::new(4);

        assert!(board.contains(Cell::new(0, 0)));
        assert!(board.contains(Cell::new(3, 3)));
        assert!(!board.contains(Cell::new(-1, 2)));
        assert!(!board.contains(Cell::new(2, 4)));
    }
}
