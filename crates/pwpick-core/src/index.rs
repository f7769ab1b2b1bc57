use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use crate::catalog::CatalogItem;
use crate::listing::{SpecNode, SuiteNode};

/// Cross-reference indices produced by a single walk over the suite tree.
/// Key orderings are first-encountered, so catalog rows come out in the order
/// the runner listed them rather than map-iteration order.
#[derive(Debug, Clone, Default)]
pub struct SuiteIndex {
    tests: Vec<CatalogItem>,
    tag_order: Vec<String>,
    file_order: Vec<String>,
    tag_tests: HashMap<String, Vec<CatalogItem>>,
    file_tests: HashMap<String, Vec<CatalogItem>>,
    tag_projects: HashMap<String, HashSet<String>>,
    file_projects: HashMap<String, HashSet<String>>,
    file_tags: HashMap<String, BTreeSet<String>>,
}

impl SuiteIndex {
    pub fn tests(&self) -> &[CatalogItem] {
        &self.tests
    }

    pub fn tag_keys(&self) -> &[String] {
        &self.tag_order
    }

    pub fn file_keys(&self) -> &[String] {
        &self.file_order
    }

    pub fn tests_for_tag(&self, tag: &str) -> &[CatalogItem] {
        self.tag_tests.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tests_in_file(&self, file: &str) -> &[CatalogItem] {
        self.file_tests.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn project_count_for_tag(&self, tag: &str) -> usize {
        self.tag_projects.get(tag).map_or(0, HashSet::len)
    }

    pub fn project_count_in_file(&self, file: &str) -> usize {
        self.file_projects.get(file).map_or(0, HashSet::len)
    }

    /// Tag badges for a file, lexicographically sorted.
    pub fn tags_in_file(&self, file: &str) -> Vec<String> {
        self.file_tags
            .get(file)
            .map(|tags| tags.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Walks the suite tree depth-first (specs before child suites) and returns
/// the aggregate index in one pass.
pub fn index_suites(suites: &[SuiteNode]) -> SuiteIndex {
    let mut accumulator = Accumulator::default();
    for suite in suites {
        accumulator.visit_suite(suite, "");
    }
    accumulator.index
}

#[derive(Default)]
struct Accumulator {
    index: SuiteIndex,
    seen_tests: HashSet<String>,
}

impl Accumulator {
    fn visit_suite(&mut self, suite: &SuiteNode, inherited_title: &str) {
        let composed = compose_title(inherited_title, &suite.title, &suite.file);

        for spec in &suite.specs {
            self.visit_spec(spec, &composed);
        }

        for child in &suite.suites {
            self.visit_suite(child, &composed);
        }
    }

    fn visit_spec(&mut self, spec: &SpecNode, suite_title: &str) {
        // Project sets aggregate over every occurrence, before the test
        // de-duplication below has a chance to skip one.
        for run in &spec.tests {
            for tag in &spec.tags {
                self.index
                    .tag_projects
                    .entry(tag.clone())
                    .or_default()
                    .insert(run.project_name.clone());
            }
            self.index
                .file_projects
                .entry(spec.file.clone())
                .or_default()
                .insert(run.project_name.clone());
        }

        let key = format!("{}|{}|{}", spec.title, spec.file, spec.line);
        if self.seen_tests.insert(key) {
            let item = CatalogItem::test(
                display_title(suite_title, &spec.title),
                &spec.file,
                spec.line,
                spec.tags.clone(),
            );

            for tag in &spec.tags {
                if !self.index.tag_tests.contains_key(tag) {
                    self.index.tag_order.push(tag.clone());
                }
                self.index
                    .tag_tests
                    .entry(tag.clone())
                    .or_default()
                    .push(item.clone());
            }

            self.index
                .file_tests
                .entry(spec.file.clone())
                .or_default()
                .push(item.clone());
            self.index.tests.push(item);
        }

        // Badge aggregation is independent of test de-duplication: a repeated
        // spec still contributes its tags to the file's badge set.
        if !spec.file.is_empty() {
            if !self.index.file_tags.contains_key(&spec.file) {
                self.index.file_order.push(spec.file.clone());
            }
            let badges = self.index.file_tags.entry(spec.file.clone()).or_default();
            for tag in &spec.tags {
                badges.insert(tag.clone());
            }
        }
    }
}

/// A suite contributes its title to descendants unless the title is empty,
/// equals its own file path, or shares the file path's base name. Runners use
/// the file path as an implicit root suite title; this suppresses the
/// resulting "filename › filename" chains.
fn compose_title(inherited: &str, title: &str, file: &str) -> String {
    if title.is_empty() || title == file || base_name(title) == base_name(file) {
        return inherited.to_string();
    }

    if inherited.is_empty() {
        title.to_string()
    } else {
        format!("{inherited} › {title}")
    }
}

fn display_title(suite_title: &str, spec_title: &str) -> String {
    if suite_title.is_empty() {
        spec_title.to_string()
    } else {
        format!("{suite_title} › {spec_title}")
    }
}

fn base_name(value: &str) -> &str {
    Path::new(value)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(value)
}
