use std::collections::HashSet;

use crate::catalog::{CatalogItem, ItemKind};
use crate::index::SuiteIndex;

/// Everything the compiler needs beyond the selection itself. Threaded in
/// explicitly; nothing here is read from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Runner config file, forwarded as `--config <path>`.
    pub config_path: Option<String>,
    /// Opaque tokens inserted verbatim after the invocation name.
    pub pass_through: Vec<String>,
    /// Project filters appended as `--project <name>` pairs, in order.
    pub projects: Vec<String>,
}

/// Compiles the items to run into the runner's execute-mode argument list:
/// invocation, pass-through arguments, de-duplicated location tokens, project
/// filters. The launcher program itself is supplied by the execution boundary.
pub fn compile_run_args(
    items: &[CatalogItem],
    index: &SuiteIndex,
    plan: &LaunchPlan,
) -> Vec<String> {
    let mut args = vec!["playwright".to_string(), "test".to_string()];
    if let Some(config_path) = &plan.config_path {
        args.push("--config".to_string());
        args.push(config_path.clone());
    }
    args.extend(plan.pass_through.iter().cloned());

    let mut seen = HashSet::new();
    for item in items {
        match item.kind {
            ItemKind::Tag => {
                for test in index.tests_for_tag(&item.title) {
                    push_location(&mut args, &mut seen, &test.location);
                }
            }
            ItemKind::Test => push_location(&mut args, &mut seen, &item.location),
            ItemKind::File => push_location(&mut args, &mut seen, &item.title),
        }
    }

    for project in &plan.projects {
        args.push("--project".to_string());
        args.push(project.clone());
    }

    args
}

fn push_location(args: &mut Vec<String>, seen: &mut HashSet<String>, token: &str) {
    if seen.insert(token.to_string()) {
        args.push(token.to_string());
    }
}
