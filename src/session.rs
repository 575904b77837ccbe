use log::{info, warn};

use crate::config::{
    Board, DEFAULT_TICK_INTERVAL_MS, HIGH_SCORE_KEY, TICK_INTERVAL_STEP_MS, clamp_tick_interval_ms,
    tick_interval,
};
use crate::game::{GameState, GameStatus, TickOutcome};
use crate::input::GameInput;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::score::ScoreStore;
use crate::sound::{SoundCue, SoundSink};

/// Startup parameters for a [`Session`].
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub board: Board,
    /// Raw tick interval; clamped on use.
    pub tick_interval_ms: u64,
    /// Fixed food seed, `None` for OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: Board::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

/// Drives one [`GameState`] with injected storage, timer and sound.
///
/// Owns the single live tick timer: it exists exactly while the game is
/// running and is replaced whenever the interval changes.
#[derive(Debug)]
pub struct Session<S, C, A> {
    state: GameState,
    store: S,
    scheduler: C,
    sound: A,
    timer: Option<TimerHandle>,
    tick_interval_ms: u64,
}

impl<S: ScoreStore, C: Scheduler, A: SoundSink> Session<S, C, A> {
    /// Creates an idle session, reading the high score from `store`.
    #[must_use]
    pub fn new(config: SessionConfig, store: S, scheduler: C, sound: A) -> Self {
        let high_score = store.get(HIGH_SCORE_KEY).unwrap_or(0);
        let state = match config.seed {
            Some(seed) => GameState::new_with_seed(config.board, high_score, seed),
            None => GameState::new(config.board, high_score),
        };

        Self {
            state,
            store,
            scheduler,
            sound,
            timer: None,
            tick_interval_ms: clamp_tick_interval_ms(config.tick_interval_ms),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for setting up positions; call [`Self::sync_timer`]
    /// after changing `status` directly.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Applies one input event. `Quit` is left to the caller.
    pub fn handle_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                self.state.change_direction(direction);
            }
            GameInput::Start => {
                self.state.start();
            }
            GameInput::Pause => {
                if !self.state.pause() {
                    self.state.resume();
                }
            }
            GameInput::StartPauseToggle => match self.state.status {
                GameStatus::GameOver => self.state.restart(),
                GameStatus::Running => {
                    self.state.pause();
                }
                GameStatus::Idle | GameStatus::Paused => {
                    self.state.start();
                }
            },
            GameInput::Restart => self.state.restart(),
            GameInput::ToggleAutopilot => {
                let enabled = self.state.toggle_autopilot();
                info!("autopilot {}", if enabled { "on" } else { "off" });
            }
            GameInput::SpeedUp => {
                let faster = self.tick_interval_ms.saturating_sub(TICK_INTERVAL_STEP_MS);
                self.set_tick_interval(faster);
            }
            GameInput::SlowDown => {
                self.set_tick_interval(self.tick_interval_ms + TICK_INTERVAL_STEP_MS);
            }
            GameInput::SetSpeed(raw_ms) => self.set_tick_interval(raw_ms),
            GameInput::Quit => {}
        }

        self.sync_timer();
    }

    /// Timer callback: runs one tick and reacts to its outcome.
    pub fn on_timer(&mut self) -> TickOutcome {
        let outcome = self.state.tick();

        match outcome {
            TickOutcome::Ate { new_high_score } => {
                self.play(SoundCue::Eat);
                if new_high_score {
                    self.persist_high_score();
                }
            }
            TickOutcome::Crashed(reason) => {
                info!(
                    "game over after {} ticks: {reason:?}, score {}",
                    self.state.tick_count, self.state.score
                );
                self.play(SoundCue::GameOver);
            }
            TickOutcome::Skipped | TickOutcome::Stationary | TickOutcome::Moved => {}
        }

        self.sync_timer();
        outcome
    }

    /// Changes the tick interval, restarting a live timer with the new value.
    pub fn set_tick_interval(&mut self, raw_ms: u64) {
        let interval_ms = clamp_tick_interval_ms(raw_ms);
        if interval_ms == self.tick_interval_ms {
            return;
        }

        self.tick_interval_ms = interval_ms;
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
            self.timer = Some(self.scheduler.schedule_repeating(tick_interval(interval_ms)));
        }
    }

    /// Starts or stops the timer so it is live exactly while running.
    pub fn sync_timer(&mut self) {
        let running = self.state.status == GameStatus::Running;

        match (running, self.timer) {
            (true, None) => {
                let interval = tick_interval(self.tick_interval_ms);
                self.timer = Some(self.scheduler.schedule_repeating(interval));
            }
            (false, Some(handle)) => {
                self.scheduler.cancel(handle);
                self.timer = None;
            }
            _ => {}
        }
    }

    fn persist_high_score(&mut self) {
        let high_score = self.state.high_score;
        info!("new high score {high_score}");

        if let Err(error) = self.store.set(HIGH_SCORE_KEY, high_score) {
            warn!("failed to save high score: {error}");
        }
    }

    fn play(&mut self, cue: SoundCue) {
        if let Err(error) = self.sound.play(cue) {
            warn!("failed to play {cue:?} cue: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::time::Duration;

    use crate::config::{Board, HIGH_SCORE_KEY};
    use crate::food::Food;
    use crate::game::{GameStatus, TickOutcome};
    use crate::input::{Direction, GameInput, Velocity};
    use crate::scheduler::{Scheduler, TimerHandle};
    use crate::score::{MemoryScoreStore, ScoreStore};
    use crate::snake::{Cell, Snake};
    use crate::sound::{SoundCue, SoundSink};

    use super::{Session, SessionConfig};

    #[derive(Debug, Default)]
    struct ManualScheduler {
        next_id: u64,
        scheduled: Vec<Duration>,
        cancelled: usize,
    }

    impl Scheduler for ManualScheduler {
        fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
            self.next_id += 1;
            self.scheduled.push(interval);
            TimerHandle::from_raw(self.next_id)
        }

        fn cancel(&mut self, _handle: TimerHandle) {
            self.cancelled += 1;
        }
    }

    /// Records cues and fails every one of them.
    #[derive(Debug, Default)]
    struct BrokenSpeaker {
        cues: Vec<SoundCue>,
    }

    impl SoundSink for BrokenSpeaker {
        fn play(&mut self, cue: SoundCue) -> io::Result<()> {
            self.cues.push(cue);
            Err(io::Error::other("no audio device"))
        }
    }

    type TestSession = Session<MemoryScoreStore, ManualScheduler, BrokenSpeaker>;

    fn session(high_score: u32) -> TestSession {
        Session::new(
            SessionConfig {
                board: Board::default(),
                tick_interval_ms: 100,
                seed: Some(9),
            },
            MemoryScoreStore::with_entry(HIGH_SCORE_KEY, high_score),
            ManualScheduler::default(),
            BrokenSpeaker::default(),
        )
    }

    #[test]
    fn high_score_is_read_at_startup() {
        let session = session(12);

        assert_eq!(session.state().high_score, 12);
        assert_eq!(session.state().status, GameStatus::Idle);
    }

    #[test]
    fn first_direction_schedules_exactly_one_timer() {
        let mut session = session(0);

        session.handle_input(GameInput::Direction(Direction::Right));
        session.handle_input(GameInput::Direction(Direction::Up));

        assert_eq!(session.state().status, GameStatus::Running);
        assert_eq!(session.scheduler().scheduled, vec![Duration::from_millis(100)]);
    }

    #[test]
    fn interval_change_while_running_replaces_the_timer() {
        let mut session = session(0);
        session.handle_input(GameInput::Direction(Direction::Right));

        session.handle_input(GameInput::SetSpeed(60));

        assert_eq!(session.scheduler().cancelled, 1);
        assert_eq!(
            session.scheduler().scheduled,
            vec![Duration::from_millis(100), Duration::from_millis(60)]
        );
    }

    #[test]
    fn interval_change_while_paused_only_updates_the_setting() {
        let mut session = session(0);
        session.handle_input(GameInput::Direction(Direction::Right));
        session.handle_input(GameInput::Pause);

        session.handle_input(GameInput::SlowDown);
        assert_eq!(session.tick_interval_ms(), 110);
        assert_eq!(session.scheduler().scheduled.len(), 1);

        session.handle_input(GameInput::Pause);
        assert_eq!(session.state().status, GameStatus::Running);
        assert_eq!(
            session.scheduler().scheduled.last(),
            Some(&Duration::from_millis(110))
        );
    }

    #[test]
    fn speed_keys_stay_inside_the_slider_range() {
        let mut session = session(0);

        for _ in 0..20 {
            session.handle_input(GameInput::SpeedUp);
        }
        assert_eq!(session.tick_interval_ms(), 50);

        session.handle_input(GameInput::SetSpeed(5_000));
        assert_eq!(session.tick_interval_ms(), 200);
    }

    #[test]
    fn new_high_score_is_persisted_and_sound_errors_are_swallowed() {
        let mut session = session(0);
        session.handle_input(GameInput::Direction(Direction::Right));
        session.state_mut().food = Food::at(Cell::new(11, 10));

        assert_eq!(session.on_timer(), TickOutcome::Ate { new_high_score: true });

        assert_eq!(session.store().get(HIGH_SCORE_KEY), Some(1));
        assert_eq!(session.store().writes, 1);
        assert_eq!(session.sound.cues, vec![SoundCue::Eat]);
        assert_eq!(session.state().status, GameStatus::Running);
    }

    #[test]
    fn meal_below_the_high_score_skips_the_store_write() {
        let mut session = session(5);
        session.handle_input(GameInput::Direction(Direction::Right));
        session.state_mut().food = Food::at(Cell::new(11, 10));

        assert_eq!(session.on_timer(), TickOutcome::Ate { new_high_score: false });

        assert_eq!(session.state().score, 1);
        assert_eq!(session.store().get(HIGH_SCORE_KEY), Some(5));
        assert_eq!(session.store().writes, 0);
        assert_eq!(session.sound.cues, vec![SoundCue::Eat]);
    }

    #[test]
    fn crash_stops_the_timer_and_space_restarts() {
        let mut session = session(0);
        session.handle_input(GameInput::Direction(Direction::Left));
        {
            let state = session.state_mut();
            state.snake = Snake::new(Cell::new(0, 5));
            state.set_velocity(Velocity::from(Direction::Left));
        }

        session.on_timer();
        assert_eq!(session.state().status, GameStatus::GameOver);
        assert_eq!(session.scheduler().cancelled, 1);
        assert_eq!(session.sound.cues, vec![SoundCue::GameOver]);

        session.handle_input(GameInput::StartPauseToggle);
        assert_eq!(session.state().status, GameStatus::Idle);
        assert_eq!(session.state().snake.head(), Cell::new(10, 10));
    }

    #[test]
    fn restart_cancels_a_running_timer_and_autopilot() {
        let mut session = session(0);
        session.handle_input(GameInput::ToggleAutopilot);
        assert!(session.state().autopilot());
        assert_eq!(session.state().status, GameStatus::Running);

        session.handle_input(GameInput::Restart);

        assert!(!session.state().autopilot());
        assert_eq!(session.state().status, GameStatus::Idle);
        assert_eq!(session.scheduler().cancelled, 1);
    }
}
