use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use autopilot_snake::config::{Board, DEFAULT_TICK_INTERVAL_MS, clamp_tick_interval_ms};
use autopilot_snake::input::{GameInput, InputHandler};
use autopilot_snake::scheduler::IntervalTimer;
use autopilot_snake::score::{JsonScoreStore, MemoryScoreStore, ScoreStore, scores_path};
use autopilot_snake::session::{Session, SessionConfig};
use autopilot_snake::sound::{Silent, SoundSink, TerminalBell};
use autopilot_snake::terminal_runtime::GameScreen;
use autopilot_snake::ui::hud::HudInfo;
use clap::Parser;
use log::{info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Longest the loop waits for input before redrawing.
const MAX_FRAME_WAIT: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Tick interval in milliseconds (50-200).
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    speed: u64,

    /// Start with the autopilot enabled.
    #[arg(long)]
    autopilot: bool,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound cues.
    #[arg(long)]
    mute: bool,

    /// High score file (defaults to the platform data directory).
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// Log file.
    #[arg(long = "log-file", default_value = "autopilot-snake.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long = "log-level", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let store = open_store(cli.scores_file.clone().unwrap_or_else(scores_path));
    let sound: Box<dyn SoundSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell)
    };
    let config = SessionConfig {
        board: Board::default(),
        tick_interval_ms: clamp_tick_interval_ms(cli.speed),
        seed: cli.seed,
    };
    info!(
        "starting: {0}x{0} board, {1} ms ticks, autopilot {2}",
        config.board.tile_count(), config.tick_interval_ms, cli.autopilot
    );

    let mut session = Session::new(config, store, IntervalTimer::new(), sound);
    if cli.autopilot {
        session.handle_input(GameInput::ToggleAutopilot);
    }

    let mut screen = GameScreen::open()?;
    run(&mut screen, &mut session)
}

fn run<S, A>(
    screen: &mut GameScreen,
    session: &mut Session<S, IntervalTimer, A>,
) -> io::Result<()>
where
    S: ScoreStore,
    A: SoundSink,
{
    let mut input = InputHandler::new();

    loop {
        let hud_info = HudInfo {
            tick_interval_ms: session.tick_interval_ms(),
        };
        screen.draw(session.state(), &hud_info)?;

        let wait = session
            .scheduler()
            .time_until_due(Instant::now())
            .map_or(MAX_FRAME_WAIT, |due| due.min(MAX_FRAME_WAIT));

        if let Some(game_input) = input.poll_input(wait)? {
            if game_input == GameInput::Quit {
                break;
            }
            session.handle_input(game_input);
        }

        if session.scheduler_mut().fire_due(Instant::now()) {
            session.on_timer();
        }
    }

    info!("quit with score {}", session.state().score);
    Ok(())
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let file = File::create(&cli.log_file)?;
    WriteLogger::init(cli.log_level, Config::default(), file)
        .map_err(|error| io::Error::other(error.to_string()))
}

fn open_store(path: PathBuf) -> Box<dyn ScoreStore> {
    match JsonScoreStore::open(&path) {
        Ok(store) => {
            info!("high scores at {}", store.path().display());
            Box::new(store)
        }
        Err(error) => {
            warn!(
                "ignoring unusable score file {}: {error}; scores will not be saved",
                path.display()
            );
            Box::new(MemoryScoreStore::new())
        }
    }
}
