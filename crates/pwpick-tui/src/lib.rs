mod keymap;
mod picker;
mod theme;
mod ui;

use std::io::{Stdout, stdout};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use pwpick_app::Inventory;
use pwpick_core::compile::{LaunchPlan, compile_run_args};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::picker::{PickerScreen, ScreenExit};

/// How the interactive session ended: with a compiled run to execute, or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Run(Vec<String>),
    Quit,
}

/// Takes over the terminal until the user submits a selection or quits.
/// All blocking external work (listing fetch, run execution) happens on the
/// caller's side of this function.
pub fn run_picker(inventory: &Inventory, plan: &LaunchPlan) -> Result<PickerOutcome> {
    let mut session = TerminalSession::enter()?;
    let mut screen = PickerScreen::new(inventory.catalogs.clone());

    loop {
        session.draw(|frame| screen.render(frame))?;

        let event = event::read().context("failed to read terminal event")?;
        let key = match event {
            Event::Resize(_, _) => {
                session.autoresize()?;
                continue;
            }
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => key,
            _ => continue,
        };

        if is_ctrl_c(key) {
            return Ok(PickerOutcome::Quit);
        }

        match screen.on_key(key) {
            Some(ScreenExit::Quit) => return Ok(PickerOutcome::Quit),
            Some(ScreenExit::Submit(items)) => {
                let args = compile_run_args(&items, &inventory.index, plan);
                return Ok(PickerOutcome::Run(args));
            }
            None => {}
        }
    }
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;

        let mut out = stdout();
        if let Err(error) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(anyhow::Error::new(error).context("failed to enter alternate screen"));
        }

        match Terminal::new(CrosstermBackend::new(stdout())) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let mut out = stdout();
                let _ = execute!(out, Show, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(anyhow::Error::new(error).context("failed to create terminal backend"))
            }
        }
    }

    pub(crate) fn draw<F>(&mut self, draw_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame<'_>),
    {
        self.terminal
            .draw(draw_fn)
            .context("failed to render terminal")?;
        Ok(())
    }

    pub(crate) fn autoresize(&mut self) -> Result<()> {
        self.terminal
            .autoresize()
            .context("failed to autoresize terminal")?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::is_ctrl_c;

    #[test]
    fn ctrl_c_requires_the_control_modifier() {
        assert!(is_ctrl_c(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_ctrl_c(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        )));
    }
}
