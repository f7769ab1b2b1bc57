pub mod cli;
mod diagnostics;
pub mod dispatch;

use anyhow::{Context, Result};
use clap::Parser;
use pwpick_app::App;
use pwpick_core::command_runner::SystemCommandRunner;

use crate::cli::Cli;
use crate::diagnostics::DiagnosticsSession;

pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    let diagnostics = DiagnosticsSession::initialize(cli.diagnostics)
        .context("failed to initialize diagnostics")?;
    if let Some(path) = diagnostics.path() {
        eprintln!("Diagnostics enabled: {}", path.display());
    }

    let command_runner = SystemCommandRunner::new();
    let app = App::new(&command_runner);

    dispatch::run_with_deps(cli, &app, &diagnostics)
}
