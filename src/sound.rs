use std::io::{self, Write};

/// Audible feedback for game events.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SoundCue {
    Eat,
    GameOver,
}

/// Fire-and-forget sound output. Callers log and drop errors.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue) -> io::Result<()>;
}

/// Rings the terminal bell; game over rings twice.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        let bell: &[u8] = match cue {
            SoundCue::Eat => b"\x07",
            SoundCue::GameOver => b"\x07\x07",
        };

        let mut stdout = io::stdout();
        stdout.write_all(bell)?;
        stdout.flush()
    }
}

/// Discards every cue (`--mute`).
#[derive(Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) -> io::Result<()> {
        Ok(())
    }
}

impl<S: SoundSink + ?Sized> SoundSink for Box<S> {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        (**self).play(cue)
    }
}
