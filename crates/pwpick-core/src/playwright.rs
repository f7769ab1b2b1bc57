use thiserror::Error;

use crate::command_runner::CommandRunner;
use crate::listing::{ListingError, SuiteListing, parse_listing};

/// Options forwarded to the runner's list mode. All of these narrow what the
/// listing contains; the engine never re-applies them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRequest {
    pub projects: Vec<String>,
    pub only_changed: bool,
    pub last_failed: bool,
    pub grep: Option<String>,
    pub grep_invert: Option<String>,
    pub config_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to invoke {launcher}: {message}")]
    Launch { launcher: String, message: String },
    #[error(transparent)]
    Listing(#[from] ListingError),
}

pub fn list_args(request: &ListingRequest) -> Vec<String> {
    let mut args = vec![
        "playwright".to_string(),
        "test".to_string(),
        "--list".to_string(),
        "--reporter=json".to_string(),
    ];

    if request.only_changed {
        args.push("--only-changed".to_string());
    }
    if request.last_failed {
        args.push("--last-failed".to_string());
    }
    if let Some(config_path) = &request.config_path {
        args.push("--config".to_string());
        args.push(config_path.clone());
    }
    if let Some(grep) = &request.grep {
        args.push("--grep".to_string());
        args.push(grep.clone());
    }
    if let Some(grep_invert) = &request.grep_invert {
        args.push("--grep-invert".to_string());
        args.push(grep_invert.clone());
    }
    for project in &request.projects {
        args.push("--project".to_string());
        args.push(project.clone());
    }

    args
}

/// Invokes the runner's list mode through the launcher and validates stdout.
/// The exit status is deliberately ignored: a payload that parses cleanly and
/// carries no embedded errors is accepted even when the process reported
/// failure, and a clean exit does not rescue a bad payload.
pub fn fetch_listing(
    runner: &dyn CommandRunner,
    launcher: &str,
    request: &ListingRequest,
) -> Result<SuiteListing, FetchError> {
    let args = list_args(request);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    let output = runner
        .run(launcher, &arg_refs, None)
        .map_err(|error| FetchError::Launch {
            launcher: launcher.to_string(),
            message: error.to_string(),
        })?;

    match parse_listing(&output.stdout) {
        Ok(listing) => Ok(listing),
        Err(ListingError::Malformed { source, raw }) => {
            let stderr = output.stderr.trim();
            let raw = if stderr.is_empty() {
                raw
            } else {
                format!("{raw}\n{stderr}")
            };
            Err(ListingError::Malformed { source, raw }.into())
        }
        Err(error) => Err(error.into()),
    }
}
