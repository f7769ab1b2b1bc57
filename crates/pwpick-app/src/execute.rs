use anyhow::{Context, Result};

use crate::App;

impl<'a> App<'a> {
    /// Hands the compiled argument sequence to the launcher with inherited
    /// stdio and returns the child's exit status for the caller to propagate.
    pub fn execute_run(&self, launcher: &str, args: &[String]) -> Result<i32> {
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_interactive(launcher, &arg_refs, None)
            .with_context(|| format!("failed to launch {launcher} {}", args.join(" ")))
    }
}
