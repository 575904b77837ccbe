use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::autopilot;
use crate::config::Board;
use crate::food::Food;
use crate::input::{Direction, Velocity};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting for the first direction or an explicit start.
    Idle,
    Running,
    Paused,
    /// Terminal until restarted.
    GameOver,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running; nothing happened.
    Skipped,
    /// Running without a direction yet.
    Stationary,
    Moved,
    Ate { new_high_score: bool },
    Crashed(DeathReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    current: Velocity,
    pending: Velocity,
    autopilot: bool,
    board: Board,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from OS entropy.
    #[must_use]
    pub fn new(board: Board, high_score: u32) -> Self {
        Self::with_rng(board, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(board: Board, high_score: u32, seed: u64) -> Self {
        Self::with_rng(board, high_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Board, high_score: u32, rng: StdRng) -> Self {
        Self {
            snake: Snake::new(board.start_cell()),
            food: Food::at(board.initial_food_cell()),
            score: 0,
            high_score,
            status: GameStatus::Idle,
            death_reason: None,
            tick_count: 0,
            current: Velocity::ZERO,
            pending: Velocity::ZERO,
            autopilot: false,
            board,
            rng,
        }
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Velocity applied on the most recent tick.
    #[must_use]
    pub fn current_velocity(&self) -> Velocity {
        self.current
    }

    /// Velocity the next tick will apply.
    #[must_use]
    pub fn pending_velocity(&self) -> Velocity {
        self.pending
    }

    #[must_use]
    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Overwrites both velocity slots, e.g. to set up a mid-game position.
    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.current = velocity;
        self.pending = velocity;
    }

    /// Requests a direction change for the next tick.
    ///
    /// Exact reversals of the current velocity are rejected. In `Idle` an
    /// accepted request also aims the snake at once and starts the game.
    /// Returns whether the request was accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.status == GameStatus::GameOver || self.current.is_reversed_by(direction) {
            return false;
        }

        self.pending = Velocity::from(direction);

        if self.status == GameStatus::Idle {
            self.current = self.pending;
            self.set_status(GameStatus::Running);
        }

        true
    }

    /// Starts from `Idle` or resumes from `Paused`.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Idle | GameStatus::Paused => {
                self.set_status(GameStatus::Running);
                true
            }
            GameStatus::Running | GameStatus::GameOver => false,
        }
    }

    /// Pauses a running game.
    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        self.set_status(GameStatus::Paused);
        true
    }

    /// Resumes a paused game.
    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }

        self.set_status(GameStatus::Running);
        true
    }

    /// Resets to a one-cell snake at the start cell with fresh food.
    ///
    /// The high score is kept and the autopilot is switched off.
    pub fn restart(&mut self) {
        self.snake = Snake::new(self.board.start_cell());
        self.current = Velocity::ZERO;
        self.pending = Velocity::ZERO;
        self.score = 0;
        self.tick_count = 0;
        self.death_reason = None;
        self.autopilot = false;
        self.food = Food::spawn(&mut self.rng, self.board, &self.snake);
        self.set_status(GameStatus::Idle);
    }

    /// Flips the autopilot flag and returns its new value.
    ///
    /// Turning it on while idle plans a first move and launches the game;
    /// while paused it resumes.
    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;

        if self.autopilot && matches!(self.status, GameStatus::Idle | GameStatus::Paused) {
            self.steer_with_autopilot();
            self.start();
        }

        self.autopilot
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }

        if self.autopilot {
            self.steer_with_autopilot();
        }

        self.current = self.pending;
        if self.current.is_zero() {
            return TickOutcome::Stationary;
        }

        self.tick_count += 1;
        let new_head = self.snake.head().offset(self.current);

        if !self.board.contains(new_head) {
            return self.crash(DeathReason::Wall);
        }

        if self.snake.occupies(new_head) {
            return self.crash(DeathReason::SelfCollision);
        }

        self.snake.push_head(new_head);

        if new_head != self.food.cell {
            self.snake.drop_tail();
            return TickOutcome::Moved;
        }

        self.score += 1;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        self.food = Food::spawn(&mut self.rng, self.board, &self.snake);

        TickOutcome::Ate { new_high_score }
    }

    fn steer_with_autopilot(&mut self) {
        if let Some(direction) =
            autopilot::plan_move(self.board, &self.snake, self.food.cell, self.current)
        {
            self.change_direction(direction);
        }
    }

    fn crash(&mut self, reason: DeathReason) -> TickOutcome {
        self.death_reason = Some(reason);
        self.set_status(GameStatus::GameOver);
        TickOutcome::Crashed(reason)
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            debug!("status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }
}
