//! Terminal session for the dashboard.
//!
//! [`Tui::enter`] puts the terminal into raw mode on the alternate screen
//! and returns a session; the terminal is handed back when the session is
//! dropped or [`Tui::exit`] is called, whichever comes first. A panic hook
//! does the same restore so a crash never leaves the shell in raw mode.

use std::io::{Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tracing::{debug, error};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
    frames: u64,
}

impl Tui {
    /// Take over the terminal.
    pub fn enter() -> Result<Self> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal::enable_raw_mode()?;
        // From here on a failure must still give the terminal back.
        let setup = stdout()
            .execute(EnterAlternateScreen)
            .and_then(|out| out.execute(cursor::Hide))
            .map(|_| ())
            .and_then(|()| terminal.clear());
        if let Err(e) = setup {
            restore_terminal();
            return Err(e.into());
        }
        debug!("terminal session started");
        Ok(Self {
            terminal,
            active: true,
            frames: 0,
        })
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn exit(&mut self) {
        if self.active {
            self.active = false;
            restore_terminal();
            debug!(frames = self.frames, "terminal session ended");
        }
    }

    /// Draw one full frame.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        self.frames += 1;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.exit();
    }
}

/// Best-effort; each step is attempted even if an earlier one fails.
fn restore_terminal() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Install color-eyre's report hook and a panic hook that restores the
/// terminal and logs the panic before color-eyre prints it.
///
/// Call before [`Tui::enter`] so panics during setup are covered too.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();

    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        error!(panic = %info, "dashboard panicked");
        panic_hook(info);
    }));

    Ok(())
}
