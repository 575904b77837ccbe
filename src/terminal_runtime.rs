use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::warn;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::game::GameState;
use crate::renderer;
use crate::ui::hud::HudInfo;

/// Raw-mode alternate screen the board is drawn on.
///
/// The shell gets its screen back when this is dropped, and also when the
/// game panics.
pub struct GameScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl GameScreen {
    /// Takes over the terminal for the game.
    pub fn open() -> io::Result<Self> {
        install_restore_on_panic();
        enable_raw_mode()?;

        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())))
            .map(|terminal| Self { terminal })
            .inspect_err(|_| leave_game_screen())
    }

    /// Draws one frame of `state` with the HUD values in `hud_info`.
    pub fn draw(&mut self, state: &GameState, hud_info: &HudInfo) -> io::Result<()> {
        self.terminal.draw(|frame| renderer::render(frame, state, hud_info))?;
        Ok(())
    }
}

impl Drop for GameScreen {
    fn drop(&mut self) {
        leave_game_screen();
    }
}

fn install_restore_on_panic() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        leave_game_screen();
        previous(info);
    }));
}

fn leave_game_screen() {
    if let Err(error) = disable_raw_mode() {
        warn!("could not leave raw mode: {error}");
    }
    if let Err(error) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
        warn!("could not leave the alternate screen: {error}");
    }
}
