mod execute;
mod inventory;

pub use inventory::{Inventory, ListingSource};

use pwpick_core::command_runner::CommandRunner;

/// Use-case layer over the process-execution seam. The CLI wires in the real
/// runner; tests substitute a scripted one.
pub struct App<'a> {
    pub runner: &'a dyn CommandRunner,
}

impl<'a> App<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}
