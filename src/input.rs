use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fallback scan order used by the autopilot.
    pub const SCAN_ORDER: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
}

/// Axis-aligned step applied to the snake head each tick.
///
/// Only the zero vector and the four unit vectors are representable.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    #[must_use]
    pub fn dx(self) -> i32 {
        self.dx
    }

    #[must_use]
    pub fn dy(self) -> i32 {
        self.dy
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Returns the direction this velocity points in, `None` when stationary.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match (self.dx, self.dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Returns true when `direction` exactly reverses this velocity on its axis.
    #[must_use]
    pub fn is_reversed_by(self, direction: Direction) -> bool {
        let step = Self::from(direction);
        (step.dx != 0 && step.dx == -self.dx) || (step.dy != 0 && step.dy == -self.dy)
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self { dx: 0, dy: -1 },
            Direction::Down => Self { dx: 0, dy: 1 },
            Direction::Left => Self { dx: -1, dy: 0 },
            Direction::Right => Self { dx: 1, dy: 0 },
        }
    }
}

/// High-level input events consumed by the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Start,
    Pause,
    /// Space bar: restart after game over, pause while running, start otherwise.
    StartPauseToggle,
    Restart,
    ToggleAutopilot,
    SpeedUp,
    SlowDown,
    /// Raw tick interval in milliseconds; clamped before it reaches the game.
    SetSpeed(u64),
    Quit,
}

/// Maps one key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ') => GameInput::StartPauseToggle,
        KeyCode::Enter => GameInput::Start,
        KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Char('r' | 'R') => GameInput::Restart,
        KeyCode::Char('i' | 'I') | KeyCode::Tab => GameInput::ToggleAutopilot,
        KeyCode::Char('+' | '=') => GameInput::SpeedUp,
        KeyCode::Char('-' | '_') => GameInput::SlowDown,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Polls crossterm for keyboard input.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one event and maps it to a game input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}
