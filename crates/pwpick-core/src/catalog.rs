use crate::index::SuiteIndex;

/// Which catalog an item belongs to. Staged items keep their kind so they can
/// be returned to the right catalog and expanded correctly on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Test,
    File,
    Tag,
}

impl ItemKind {
    pub fn noun(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::File => "file",
            Self::Tag => "tag",
        }
    }
}

/// One browsable entry. Immutable once built; identity for de-duplication and
/// reinsertion is `(title, location)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub title: String,
    /// `file:line` for tests, empty for files and tags.
    pub location: String,
    pub kind: ItemKind,
    pub tags: Vec<String>,
    /// Count line shown for files and tags; empty for tests.
    pub summary: String,
}

impl CatalogItem {
    pub(crate) fn test(title: String, file: &str, line: u32, tags: Vec<String>) -> Self {
        Self {
            title,
            location: format!("{file}:{line}"),
            kind: ItemKind::Test,
            tags,
            summary: String::new(),
        }
    }

    pub fn identity(&self) -> (&str, &str) {
        (&self.title, &self.location)
    }
}

/// The three independent ordered catalogs presented for browsing.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub tests: Vec<CatalogItem>,
    pub files: Vec<CatalogItem>,
    pub tags: Vec<CatalogItem>,
}

pub fn build_catalogs(index: &SuiteIndex) -> Catalogs {
    let files = index
        .file_keys()
        .iter()
        .map(|file| CatalogItem {
            title: file.clone(),
            location: String::new(),
            kind: ItemKind::File,
            tags: index.tags_in_file(file),
            summary: run_summary(
                index.tests_in_file(file).len(),
                index.project_count_in_file(file),
            ),
        })
        .collect();

    let tags = index
        .tag_keys()
        .iter()
        .map(|tag| CatalogItem {
            title: tag.clone(),
            location: String::new(),
            kind: ItemKind::Tag,
            tags: Vec::new(),
            summary: run_summary(
                index.tests_for_tag(tag).len(),
                index.project_count_for_tag(tag),
            ),
        })
        .collect();

    Catalogs {
        tests: index.tests().to_vec(),
        files,
        tags,
    }
}

/// The displayed count is tests × projects. That overstates the scheduled runs
/// when project assignment is not a full cross-product, but it is the count
/// users of the runner's own UI are used to seeing.
fn run_summary(test_count: usize, project_count: usize) -> String {
    let runs = test_count * project_count;
    format!(
        "{runs} test{} across {project_count} project{}",
        plural(runs),
        plural(project_count)
    )
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use crate::index::index_suites;
    use crate::listing::parse_listing;

    use super::*;

    fn catalogs_from(raw: &str) -> Catalogs {
        let listing = parse_listing(raw).expect("valid listing");
        build_catalogs(&index_suites(&listing.suites))
    }

    #[test]
    fn plural_is_singular_only_for_exactly_one() {
        assert_eq!(plural(0), "s");
        assert_eq!(plural(1), "");
        assert_eq!(plural(2), "s");
    }

    #[test]
    fn run_summary_multiplies_tests_by_projects() {
        assert_eq!(run_summary(2, 2), "4 tests across 2 projects");
        assert_eq!(run_summary(1, 1), "1 test across 1 project");
        assert_eq!(run_summary(0, 3), "0 tests across 3 projects");
    }

    #[test]
    fn redundant_suite_title_collapses_into_file_and_tag_catalogs() {
        // Root suite titled like its file, two specs under overlapping
        // projects: the product counts come out per catalog, not per run.
        let raw = r#"{
            "suites": [{
                "title": "checkout.spec.ts",
                "file": "tests/checkout.spec.ts",
                "line": 0,
                "specs": [
                    {
                        "title": "adds to cart",
                        "tags": ["smoke"],
                        "tests": [{"projectName": "chromium"}],
                        "file": "tests/checkout.spec.ts",
                        "line": 3
                    },
                    {
                        "title": "pays",
                        "tags": ["smoke", "slow"],
                        "tests": [
                            {"projectName": "chromium"},
                            {"projectName": "firefox"}
                        ],
                        "file": "tests/checkout.spec.ts",
                        "line": 11
                    }
                ]
            }]
        }"#;

        let catalogs = catalogs_from(raw);

        assert_eq!(catalogs.tests.len(), 2);
        assert_eq!(catalogs.tests[0].title, "adds to cart");
        assert_eq!(catalogs.tests[0].location, "tests/checkout.spec.ts:3");

        assert_eq!(catalogs.files.len(), 1);
        assert_eq!(catalogs.files[0].title, "tests/checkout.spec.ts");
        assert_eq!(catalogs.files[0].summary, "4 tests across 2 projects");
        assert_eq!(catalogs.files[0].tags, vec!["slow", "smoke"]);

        assert_eq!(catalogs.tags.len(), 2);
        assert_eq!(catalogs.tags[0].title, "smoke");
        assert_eq!(catalogs.tags[0].summary, "4 tests across 2 projects");
        assert_eq!(catalogs.tags[1].title, "slow");
        assert_eq!(catalogs.tags[1].summary, "2 tests across 1 project");
    }

    #[test]
    fn file_catalog_keeps_first_encounter_order() {
        let raw = r#"{
            "suites": [
                {
                    "title": "b.spec.ts",
                    "file": "b.spec.ts",
                    "specs": [{
                        "title": "one",
                        "tests": [{"projectName": "chromium"}],
                        "file": "b.spec.ts",
                        "line": 1
                    }]
                },
                {
                    "title": "a.spec.ts",
                    "file": "a.spec.ts",
                    "specs": [{
                        "title": "two",
                        "tests": [{"projectName": "chromium"}],
                        "file": "a.spec.ts",
                        "line": 1
                    }]
                }
            ]
        }"#;

        let catalogs = catalogs_from(raw);
        let titles: Vec<&str> = catalogs
            .files
            .iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b.spec.ts", "a.spec.ts"]);
    }
}
