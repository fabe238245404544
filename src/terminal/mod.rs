//! Terminal management with RAII cleanup.
//!
//! [`TerminalManager`] puts the terminal into raw, alternate-screen mode and
//! restores it when dropped, so an early return never strands the user's
//! shell. The panic hook from [`setup_panic_hook`] covers the panic path.
//!
//! ```no_run
//! use apibench::terminal::{setup_panic_hook, TerminalManager};
//!
//! fn main() -> color_eyre::Result<()> {
//!     setup_panic_hook();
//!     let mut term = TerminalManager::new()?;
//!     term.terminal().draw(|_frame| {})?;
//!     term.restore()?;
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Owns the ratatui terminal and undoes the setup on drop.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalManager {
    /// Enter raw mode and the alternate screen, with bracketed paste.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails; whatever was already
    /// switched on is switched off again.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = enter_tui_mode(&mut stdout) {
            leave_tui_mode(&mut stdout);
            return Err(e.into());
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                leave_tui_mode(&mut io::stdout());
                return Err(e.into());
            }
        };
        terminal.clear()?;

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal now. Later calls, and the drop, are no-ops.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        leave_tui_mode(self.terminal.backend_mut());
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        if !self.restored {
            self.restored = true;
            leave_tui_mode(self.terminal.backend_mut());
        }
    }
}
