use anyhow::{Context, Result};
use comfy_table::{Cell, ContentArrangement, Table};
use pwpick_app::{App, ListingSource};
use pwpick_core::compile::LaunchPlan;
use pwpick_core::config::{PwpickConfig, load_or_default};
use pwpick_core::doctor::{CheckState, DoctorReport};
use pwpick_core::listing::ListingError;
use pwpick_core::playwright::ListingRequest;
use pwpick_tui::PickerOutcome;

use crate::cli::{Cli, Command};
use crate::diagnostics::DiagnosticsSession;

pub fn run_with_deps(cli: Cli, app: &App<'_>, diagnostics: &DiagnosticsSession) -> Result<i32> {
    match cli.command {
        Some(Command::Doctor) => {
            let report = pwpick_core::doctor::run_doctor_with_runner(app.runner);
            print_doctor_report(&report);
            Ok(0)
        }
        None => run_picker_command(cli, app, diagnostics),
    }
}

fn run_picker_command(cli: Cli, app: &App<'_>, diagnostics: &DiagnosticsSession) -> Result<i32> {
    let config = load_or_default().context("failed to load pwpick config")?;
    let launcher = config.runner.program.clone();
    let projects = merged_projects(&cli.projects, &config);
    let source = listing_source(&cli, &projects);

    diagnostics.record("loading suite listing");
    let inventory = match app.load_inventory(&launcher, &source) {
        Ok(inventory) => inventory,
        Err(error) => {
            surface_runner_errors(&error);
            return Err(error);
        }
    };
    diagnostics.record(format!(
        "inventory ready: {} tests, {} files, {} tags",
        inventory.catalogs.tests.len(),
        inventory.catalogs.files.len(),
        inventory.catalogs.tags.len()
    ));

    let plan = LaunchPlan {
        config_path: cli.config,
        pass_through: cli.runner_args,
        projects,
    };

    match pwpick_tui::run_picker(&inventory, &plan)? {
        PickerOutcome::Quit => {
            diagnostics.record("picker closed without a run");
            Ok(0)
        }
        PickerOutcome::Run(args) => {
            diagnostics.record(format!("executing: {launcher} {}", args.join(" ")));
            let status = app.execute_run(&launcher, &args)?;
            diagnostics.record(format!("runner exited with status {status}"));
            Ok(status)
        }
    }
}

/// Command-line projects win; the config file only supplies defaults.
fn merged_projects(cli_projects: &[String], config: &PwpickConfig) -> Vec<String> {
    if cli_projects.is_empty() {
        config.runner.projects.clone()
    } else {
        cli_projects.to_vec()
    }
}

fn listing_source(cli: &Cli, projects: &[String]) -> ListingSource {
    match &cli.json_data_path {
        Some(path) => ListingSource::File(path.clone()),
        None => ListingSource::Runner(ListingRequest {
            projects: projects.to_vec(),
            only_changed: cli.only_changed,
            last_failed: cli.last_failed,
            grep: cli.grep.clone(),
            grep_invert: cli.grep_invert.clone(),
            config_path: cli.config.clone(),
        }),
    }
}

/// The listing can embed the runner's own config/compile errors; each one is
/// surfaced on its own line before the session aborts.
fn surface_runner_errors(error: &anyhow::Error) {
    let Some(ListingError::ReportedErrors { messages }) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ListingError>())
    else {
        return;
    };

    eprintln!("Playwright errors:");
    for message in messages {
        eprintln!("- {message}");
    }
}

fn print_doctor_report(report: &DoctorReport) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Check", "Status", "Details"]);

    for check in &report.checks {
        let status = match check.state {
            CheckState::Pass => "PASS",
            CheckState::Fail => "FAIL",
        };

        table.add_row(vec![
            Cell::new(check.name.as_str()),
            Cell::new(status),
            Cell::new(check.details.as_str()),
        ]);
    }

    println!("{table}");
    println!("{}", report.summary());
}
