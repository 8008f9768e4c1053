//! Search and install entry points used by front ends.
//!
//! Each call opens the catalog it needs (refreshing it when stale), does its
//! work, and drops the store. The [`Config`] is passed in by the caller.

use chrono::{DateTime, Utc};

use psvpack_catalog::{CatalogStore, HttpClient};
use psvpack_core::{CatalogRecord, ListId, Region};

use crate::error::InstallError;
use crate::extractor::Extractor;
use crate::install::{BatchReport, InstallOptions, InstallOrchestrator};
use crate::progress::InstallProgress;
use crate::settings::Config;

/// Open and parse the catalog for `list`, failing if it did not load.
pub fn open_catalog(
    config: &Config,
    http: &dyn HttpClient,
    list: ListId,
) -> Result<CatalogStore, InstallError> {
    let store = CatalogStore::open(config.catalog_source(list), http)?;
    store.require_loaded()?;
    log::debug!("Loaded {} {} records", store.len(), list);
    Ok(store)
}

/// Matches from one catalog.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub list: ListId,
    pub last_update: Option<DateTime<Utc>>,
    pub records: Vec<CatalogRecord>,
}

pub struct SearchService<'a> {
    config: &'a Config,
    http: &'a dyn HttpClient,
}

impl<'a> SearchService<'a> {
    pub fn new(config: &'a Config, http: &'a dyn HttpClient) -> Self {
        Self { config, http }
    }

    pub fn run(
        &self,
        list: ListId,
        pattern: &str,
        regions: &[Region],
    ) -> Result<SearchResults, InstallError> {
        let store = open_catalog(self.config, self.http, list)?;
        let records = store
            .search(pattern, regions)
            .into_iter()
            .cloned()
            .collect();
        Ok(SearchResults {
            list,
            last_update: store.last_update(),
            records,
        })
    }
}

/// What to install and how.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub list: ListId,
    /// Title id or content id.
    pub identifier: String,
    /// Install every match instead of failing on ambiguity.
    pub get_all: bool,
    pub options: InstallOptions,
}

pub struct InstallService<'a> {
    config: &'a Config,
    http: &'a dyn HttpClient,
    extractor: &'a dyn Extractor,
    progress: Option<&'a dyn Fn(InstallProgress)>,
}

impl<'a> InstallService<'a> {
    pub fn new(config: &'a Config, http: &'a dyn HttpClient, extractor: &'a dyn Extractor) -> Self {
        Self {
            config,
            http,
            extractor,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn Fn(InstallProgress)) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Resolve the identifier and install every selected record.
    ///
    /// Resolution errors (not found, ambiguous, catalog unavailable) are
    /// returned as `Err`; per-record failures are collected in the report.
    pub fn run(&self, request: &InstallRequest) -> Result<BatchReport, InstallError> {
        let store = open_catalog(self.config, self.http, request.list)?;
        let records = resolve(&store, &request.identifier, request.get_all)?;

        let mut orchestrator =
            InstallOrchestrator::new(self.config.cache_dir.clone(), self.http, self.extractor);
        if let Some(progress) = self.progress {
            orchestrator = orchestrator.with_progress(progress);
        }
        Ok(orchestrator.install_batch(&records, &request.options))
    }
}

/// Select the records an identifier refers to.
pub fn resolve<'s>(
    store: &'s CatalogStore,
    identifier: &str,
    get_all: bool,
) -> Result<Vec<&'s CatalogRecord>, InstallError> {
    let hits = store
        .lookup(identifier)
        .ok_or_else(|| InstallError::RecordNotFound {
            list: store.list().to_string(),
            identifier: identifier.to_string(),
        })?;

    if hits.len() > 1 && !get_all {
        return Err(InstallError::AmbiguousMatch {
            identifier: identifier.to_string(),
            count: hits.len(),
        });
    }
    Ok(hits)
}
