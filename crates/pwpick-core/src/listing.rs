use serde::Deserialize;
use thiserror::Error;

/// Envelope of the runner's `--list --reporter=json` output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuiteListing {
    pub suites: Vec<SuiteNode>,
    pub errors: Vec<RunnerError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuiteNode {
    pub title: String,
    pub file: String,
    pub line: u32,
    pub suites: Vec<SuiteNode>,
    pub specs: Vec<SpecNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpecNode {
    pub title: String,
    pub tags: Vec<String>,
    pub tests: Vec<TestRun>,
    pub file: String,
    pub line: u32,
}

/// One scheduled run of a spec under an execution project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestRun {
    #[serde(rename = "projectName")]
    pub project_name: String,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,
}

/// An error embedded in the listing itself, e.g. a config or compile failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunnerError {
    pub message: String,
    pub stack: String,
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to parse runner listing: {source}\nOutput:\n{raw}")]
    Malformed {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
    #[error("runner reported {} error(s)", messages.len())]
    ReportedErrors { messages: Vec<String> },
    #[error("no tests found in listing")]
    Empty,
}

/// Validates a raw listing payload against the acceptance rules: it must be
/// JSON, carry no embedded runner errors, and describe at least one suite.
/// Embedded errors are checked before the empty-suite rule so a broken runner
/// config is not masked by its (necessarily empty) suite list.
pub fn parse_listing(raw: &str) -> Result<SuiteListing, ListingError> {
    let listing: SuiteListing =
        serde_json::from_str(raw).map_err(|source| ListingError::Malformed {
            source,
            raw: raw.to_string(),
        })?;

    if !listing.errors.is_empty() {
        return Err(ListingError::ReportedErrors {
            messages: listing
                .errors
                .iter()
                .map(|error| error.message.clone())
                .collect(),
        });
    }

    if listing.suites.is_empty() {
        return Err(ListingError::Empty);
    }

    Ok(listing)
}
