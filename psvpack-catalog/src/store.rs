//! Cached, parsed catalogs.
//!
//! A [`CatalogStore`] is built per operation: it checks the age of the
//! locally cached TSV, refreshes it from the configured URL when stale,
//! parses it, and then answers search and lookup queries. Nothing is kept
//! between operations except the raw file under `<cache_dir>/tsv/`.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use psvpack_core::{CatalogRecord, ListId, Region, looks_like_content_id};

use crate::error::CatalogError;
use crate::http::HttpClient;
use crate::tsv;

/// Where a catalog comes from and how long a cached copy stays fresh.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub list: ListId,
    pub url: String,
    pub cache_dir: PathBuf,
    /// Freshness window in seconds.
    pub ttl: u64,
}

impl CatalogSource {
    pub fn new(list: ListId, url: impl Into<String>, cache_dir: impl Into<PathBuf>, ttl: u64) -> Self {
        Self {
            list,
            url: url.into(),
            cache_dir: cache_dir.into(),
            ttl,
        }
    }

    /// Local path of the cached catalog: `<cache_dir>/tsv/<basename of url>`.
    pub fn cache_path(&self) -> Result<PathBuf, CatalogError> {
        let name = url_basename(&self.url).ok_or_else(|| {
            CatalogError::config_unavailable(format!(
                "catalog URL for {} has no file name: '{}'",
                self.list, self.url
            ))
        })?;
        Ok(tsv_dir(&self.cache_dir).join(name))
    }
}

/// Directory holding cached catalogs below `cache_dir`.
pub fn tsv_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join("tsv")
}

/// Last path segment of a URL, ignoring any query string or fragment.
pub fn url_basename(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next()?;
    if name.is_empty() || name.contains(':') {
        None
    } else {
        Some(name)
    }
}

/// Whether a cache file last modified at `mtime` must be refreshed at `now`.
///
/// Stale once its age reaches `ttl` seconds. An mtime in the future counts
/// as age zero.
pub fn needs_refresh(mtime: SystemTime, now: SystemTime, ttl: u64) -> bool {
    let age = now.duration_since(mtime).unwrap_or(Duration::ZERO);
    age.as_secs() >= ttl
}

/// One loaded catalog.
#[derive(Debug)]
pub struct CatalogStore {
    source: CatalogSource,
    cache_path: PathBuf,
    last_update: Option<DateTime<Utc>>,
    records: Vec<CatalogRecord>,
    loaded: bool,
}

impl CatalogStore {
    /// Refresh the cached catalog if it is stale, then parse it.
    ///
    /// Returns `Err` only when no URL is configured or when the catalog
    /// could not be downloaded and there is no local copy to fall back on.
    /// A local file that fails to parse yields a store with
    /// [`is_loaded`](Self::is_loaded) false.
    pub fn open(source: CatalogSource, http: &dyn HttpClient) -> Result<Self, CatalogError> {
        Self::open_with(source, http, false)
    }

    /// Like [`open`](Self::open), optionally refreshing regardless of age.
    pub fn open_with(
        source: CatalogSource,
        http: &dyn HttpClient,
        force_refresh: bool,
    ) -> Result<Self, CatalogError> {
        if source.url.trim().is_empty() {
            return Err(CatalogError::config_unavailable(format!(
                "no catalog URL configured for {}",
                source.list
            )));
        }
        let cache_path = source.cache_path()?;
        log::debug!(
            "Using catalog for {}: URL={} / Local={}",
            source.list,
            source.url,
            cache_path.display()
        );

        let mut store = Self {
            source,
            cache_path,
            last_update: None,
            records: Vec::new(),
            loaded: false,
        };

        store.check_for_update(http, force_refresh, SystemTime::now())?;
        store.load();
        Ok(store)
    }

    /// Parse an already-cached catalog without touching the network.
    pub fn from_cache(source: CatalogSource) -> Result<Self, CatalogError> {
        let cache_path = source.cache_path()?;
        let last_update = fs::metadata(&cache_path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        let mut store = Self {
            source,
            cache_path,
            last_update,
            records: Vec::new(),
            loaded: false,
        };
        store.load();
        Ok(store)
    }

    fn check_for_update(
        &mut self,
        http: &dyn HttpClient,
        force: bool,
        now: SystemTime,
    ) -> Result<(), CatalogError> {
        let mtime = match fs::metadata(&self.cache_path) {
            Ok(meta) => Some(meta.modified()?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let stale = match mtime {
            Some(t) => force || needs_refresh(t, now, self.source.ttl),
            None => true,
        };

        if !stale {
            self.last_update = mtime.map(DateTime::<Utc>::from);
            log::debug!(
                "Cached catalog {} is fresh (updated {})",
                self.cache_path.display(),
                self.last_update.map(|t| t.to_rfc3339()).unwrap_or_default()
            );
            return Ok(());
        }

        match self.refresh(http) {
            Ok(()) => Ok(()),
            Err(e) if mtime.is_some() => {
                // Offline operation: keep using whatever we have.
                log::warn!("Failed to update {} catalog: {e}", self.source.list);
                log::warn!("Using cached copy at {}", self.cache_path.display());
                self.last_update = mtime.map(DateTime::<Utc>::from);
                Ok(())
            }
            Err(e) => Err(CatalogError::unreachable(format!(
                "{} ({e}) and no cached copy exists",
                self.source.url
            ))),
        }
    }

    /// Download the catalog and atomically replace the cached file.
    fn refresh(&mut self, http: &dyn HttpClient) -> Result<(), CatalogError> {
        log::info!("Updating cached {} catalog from {}", self.source.list, self.source.url);

        let response = http.get(&self.source.url)?;
        if !response.is_success() {
            return Err(CatalogError::unreachable(format!(
                "HTTP {} for {}",
                response.status, self.source.url
            )));
        }

        self.last_update = match response.last_modified.as_deref().map(parse_http_date) {
            Some(Some(t)) => {
                log::debug!("Remote catalog modification time: {}", t.to_rfc3339());
                Some(t)
            }
            _ => {
                log::warn!("Failed to parse catalog modification time, using current time");
                Some(Utc::now())
            }
        };

        let mut body = Vec::new();
        response.into_body().read_to_end(&mut body).map_err(|e| {
            CatalogError::unreachable(format!("reading {}: {e}", self.source.url))
        })?;

        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.cache_path.with_extension("tmp");
        fs::write(&tmp, &body)?;
        fs::rename(&tmp, &self.cache_path)?;
        log::info!("Wrote catalog file: {}", self.cache_path.display());
        Ok(())
    }

    fn load(&mut self) {
        match tsv::parse_catalog_file(&self.cache_path, self.source.list.record_kind()) {
            Ok(records) => {
                log::debug!("Loaded {} records from {}", records.len(), self.cache_path.display());
                self.records = records;
                self.loaded = true;
            }
            Err(e) => {
                log::error!("Failed to parse catalog file: {e}");
                self.records.clear();
                self.loaded = false;
            }
        }
    }

    /// Error out unless the catalog parsed successfully.
    pub fn require_loaded(&self) -> Result<(), CatalogError> {
        if self.loaded {
            Ok(())
        } else {
            Err(CatalogError::parse(format!(
                "{} catalog at {} could not be loaded",
                self.source.list,
                self.cache_path.display()
            )))
        }
    }

    /// Case-insensitive search on `name` / `original_name` (regex, falling
    /// back to a literal substring when the pattern doesn't compile), or an
    /// exact `title_id` match. Only records in `regions` are returned, in
    /// catalog order.
    pub fn search(&self, pattern: &str, regions: &[Region]) -> Vec<&CatalogRecord> {
        let matcher = regex::RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .or_else(|e| {
                log::debug!("Search pattern is not a valid regex ({e}), matching literally");
                regex::RegexBuilder::new(&regex::escape(pattern))
                    .case_insensitive(true)
                    .build()
            });
        let matcher = match matcher {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Unusable search pattern '{pattern}': {e}");
                return Vec::new();
            }
        };

        self.records
            .iter()
            .filter(|r| {
                matcher.is_match(&r.name)
                    || r.original_name.as_deref().is_some_and(|n| matcher.is_match(n))
                    || r.title_id.eq_ignore_ascii_case(pattern)
            })
            .filter(|r| regions.contains(&r.region))
            .collect()
    }

    /// Exact, case-insensitive lookup by content id (identifiers containing
    /// a hyphen) or title id. `None` when nothing matches.
    pub fn lookup(&self, identifier: &str) -> Option<Vec<&CatalogRecord>> {
        let wanted = identifier.trim();
        let by_content = looks_like_content_id(wanted);
        let hits: Vec<&CatalogRecord> = self
            .records
            .iter()
            .filter(|r| {
                let key = if by_content { &r.content_id } else { &r.title_id };
                key.eq_ignore_ascii_case(wanted)
            })
            .collect();

        if hits.is_empty() { None } else { Some(hits) }
    }

    pub fn list(&self) -> ListId {
        self.source.list
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

/// Parse an HTTP date (`Last-Modified`), e.g. `Wed, 21 Oct 2015 07:28:00 GMT`.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
