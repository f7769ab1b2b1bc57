use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use pwpick_core::catalog::{Catalogs, build_catalogs};
use pwpick_core::index::{SuiteIndex, index_suites};
use pwpick_core::listing::parse_listing;
use pwpick_core::playwright::{FetchError, ListingRequest, fetch_listing};

use crate::App;

/// Where the suite listing comes from: a live runner invocation, or a
/// pre-captured JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    Runner(ListingRequest),
    File(PathBuf),
}

/// Everything the picker session needs, built once and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub index: SuiteIndex,
    pub catalogs: Catalogs,
}

impl<'a> App<'a> {
    pub fn load_inventory(&self, launcher: &str, source: &ListingSource) -> Result<Inventory> {
        let listing = match source {
            // Unwrap the fetch envelope so the typed ListingError stays
            // downcastable from the anyhow chain at the CLI boundary.
            ListingSource::Runner(request) => fetch_listing(self.runner, launcher, request)
                .map_err(|error| match error {
                    FetchError::Listing(listing_error) => anyhow::Error::new(listing_error),
                    other => anyhow::Error::new(other),
                })
                .context("failed to obtain suite listing from runner")?,
            ListingSource::File(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read listing file {}", path.display()))?;
                parse_listing(&raw)
                    .with_context(|| format!("invalid listing file {}", path.display()))?
            }
        };

        let index = index_suites(&listing.suites);
        let catalogs = build_catalogs(&index);
        Ok(Inventory { index, catalogs })
    }
}
