use std::env;
use std::fmt;
use std::path::Path;

use crate::command_runner::{CommandRunner, SystemCommandRunner};
use crate::config::{DEFAULT_LAUNCHER, load_config, resolve_config_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pass,
    Fail,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub state: CheckState,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.state == CheckState::Fail)
    }

    pub fn summary(&self) -> String {
        let passed = self
            .checks
            .iter()
            .filter(|check| check.state == CheckState::Pass)
            .count();
        let failed = self.checks.len().saturating_sub(passed);
        format!("{passed} passed, {failed} failed")
    }
}

pub fn run_doctor() -> DoctorReport {
    let runner = SystemCommandRunner::new();
    run_doctor_with_runner(&runner)
}

pub fn run_doctor_with_runner(runner: &dyn CommandRunner) -> DoctorReport {
    let mut checks = Vec::new();
    let mut launcher = DEFAULT_LAUNCHER.to_string();

    match resolve_config_path() {
        Ok(config_path) => {
            if config_path.exists() {
                match load_config(&config_path) {
                    Ok(config) => {
                        launcher = config.runner.program.clone();
                        checks.push(pass_check(
                            "config parses and validates",
                            format!("found at {}", config_path.display()),
                        ));
                    }
                    Err(error) => {
                        checks.push(fail_check("config parses and validates", error.to_string()));
                    }
                }
            } else {
                checks.push(pass_check(
                    "config file",
                    format!("not present at {}, defaults in use", config_path.display()),
                ));
            }
        }
        Err(error) => checks.push(fail_check("config path resolves", error.to_string())),
    }

    checks.push(if is_executable_in_path(&launcher) {
        pass_check(
            "launcher is installed",
            format!("{launcher} executable found in PATH"),
        )
    } else {
        fail_check(
            "launcher is installed",
            format!("{launcher} executable not found in PATH"),
        )
    });

    checks.push(check_runner_callable(runner, &launcher));

    DoctorReport { checks }
}

fn check_runner_callable(runner: &dyn CommandRunner, launcher: &str) -> DoctorCheck {
    match runner.run(launcher, &["playwright", "--version"], None) {
        Ok(output) if output.status_code == 0 => pass_check(
            "playwright responds through launcher",
            output.stdout.trim().to_string(),
        ),
        Ok(output) => fail_check(
            "playwright responds through launcher",
            format!(
                "{launcher} playwright --version exited {} with output: {}",
                output.status_code,
                output.stderr.trim()
            ),
        ),
        Err(error) => fail_check(
            "playwright responds through launcher",
            format!("failed to execute version check: {error}"),
        ),
    }
}

fn pass_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Pass,
        details: details.into(),
    }
}

fn fail_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Fail,
        details: details.into(),
    }
}

fn is_executable_in_path(program: &str) -> bool {
    let program_path = Path::new(program);

    if program_path.is_absolute() || program.contains('/') {
        return is_executable_file(program_path);
    }

    let path_value = match env::var_os("PATH") {
        Some(value) => value,
        None => return false,
    };

    env::split_paths(&path_value)
        .map(|directory| directory.join(program))
        .any(|candidate| is_executable_file(&candidate))
}

fn is_executable_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match path.metadata() {
            Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{ScriptedRunner, output};

    use super::*;

    #[test]
    fn check_state_display_is_uppercase_label() {
        assert_eq!(CheckState::Pass.to_string(), "PASS");
        assert_eq!(CheckState::Fail.to_string(), "FAIL");
    }

    #[test]
    fn doctor_summary_counts_pass_and_fail() {
        let report = DoctorReport {
            checks: vec![
                DoctorCheck {
                    name: "a".to_string(),
                    state: CheckState::Pass,
                    details: "ok".to_string(),
                },
                DoctorCheck {
                    name: "b".to_string(),
                    state: CheckState::Fail,
                    details: "no".to_string(),
                },
                DoctorCheck {
                    name: "c".to_string(),
                    state: CheckState::Pass,
                    details: "ok".to_string(),
                },
            ],
        };

        assert_eq!(report.summary(), "2 passed, 1 failed");
        assert!(report.has_failures());
    }

    #[test]
    fn version_check_passes_on_zero_exit() {
        let runner = ScriptedRunner::from_outputs(vec![output("Version 1.49.0\n", "", 0)]);
        let check = check_runner_callable(&runner, "npx");

        assert_eq!(check.state, CheckState::Pass);
        assert_eq!(check.details, "Version 1.49.0");

        let calls = runner.calls();
        assert_eq!(calls[0].program, "npx");
        assert_eq!(calls[0].args, vec!["playwright", "--version"]);
    }

    #[test]
    fn version_check_fails_on_nonzero_exit() {
        let runner =
            ScriptedRunner::from_outputs(vec![output("", "playwright not installed", 127)]);
        let check = check_runner_callable(&runner, "npx");

        assert_eq!(check.state, CheckState::Fail);
        assert!(check.details.contains("exited 127"));
        assert!(check.details.contains("playwright not installed"));
    }
}
