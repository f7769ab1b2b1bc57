use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use anyhow::anyhow;
use pwpick_core::command_runner::{CommandOutput, CommandRunner};

#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub interactive: bool,
}

#[derive(Default)]
pub struct QueueRunner {
    outputs: Mutex<VecDeque<anyhow::Result<CommandOutput>>>,
    interactive_statuses: Mutex<VecDeque<anyhow::Result<i32>>>,
    calls: Mutex<Vec<Call>>,
}

impl QueueRunner {
    pub fn new(
        outputs: Vec<anyhow::Result<CommandOutput>>,
        interactive_statuses: Vec<anyhow::Result<i32>>,
    ) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
            interactive_statuses: Mutex::new(interactive_statuses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl CommandRunner for QueueRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        _cwd: Option<&Path>,
    ) -> anyhow::Result<CommandOutput> {
        self.calls.lock().expect("calls lock").push(Call {
            program: program.to_string(),
            args: args.iter().map(|value| (*value).to_string()).collect(),
            interactive: false,
        });

        self.outputs
            .lock()
            .expect("outputs lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted output")))
    }

    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        _cwd: Option<&Path>,
    ) -> anyhow::Result<i32> {
        self.calls.lock().expect("calls lock").push(Call {
            program: program.to_string(),
            args: args.iter().map(|value| (*value).to_string()).collect(),
            interactive: true,
        });

        self.interactive_statuses
            .lock()
            .expect("interactive lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted status")))
    }
}

pub fn output(stdout: &str, stderr: &str, status_code: i32) -> anyhow::Result<CommandOutput> {
    Ok(CommandOutput {
        status_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}

pub const TWO_FILE_LISTING: &str = r#"{
    "suites": [
        {
            "title": "login.spec.ts",
            "file": "login.spec.ts",
            "specs": [{
                "title": "logs in",
                "tags": ["smoke"],
                "tests": [{"projectName": "chromium"}],
                "file": "login.spec.ts",
                "line": 4
            }]
        },
        {
            "title": "cart.spec.ts",
            "file": "cart.spec.ts",
            "specs": [{
                "title": "adds item",
                "tags": ["smoke", "slow"],
                "tests": [{"projectName": "chromium"}, {"projectName": "firefox"}],
                "file": "cart.spec.ts",
                "line": 9
            }]
        }
    ]
}"#;
