//! Package installation: cache check, download, extraction, verification.
//!
//! [`InstallOrchestrator`] drives one record through the pipeline:
//!
//! 1. Preflight: the record needs a license key and a package URL.
//! 2. Cache: `<cache_dir>/pkg/<content_id>.pkg` is reused when its SHA-256
//!    matches the catalog (or verification is disabled).
//! 3. Fetch: at most one download per call.
//! 4. Extract with the license key into the target root, then confirm the
//!    expected marker file exists.

use std::fs;
use std::path::{Path, PathBuf};

use psvpack_catalog::HttpClient;
use psvpack_core::CatalogRecord;

use crate::checksum::{checksum_matches, sha256_file_with_progress};
use crate::error::InstallError;
use crate::extractor::Extractor;
use crate::fetcher::PackageFetcher;
use crate::progress::InstallProgress;
use crate::settings::pkg_dir;

/// Per-request install options.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Directory the extractor writes `app/` and `addcont/` into.
    pub target_root: PathBuf,
    /// Download only; the result path is the cached package.
    pub skip_extraction: bool,
    /// Trust an existing cached package without hashing it.
    pub skip_verification: bool,
}

impl InstallOptions {
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
            skip_extraction: false,
            skip_verification: false,
        }
    }
}

/// Result of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Install directory, or the package path when extraction was skipped.
    pub path: PathBuf,
    pub package_path: PathBuf,
    /// Whether a download happened during this call.
    pub downloaded: bool,
}

/// Per-record results of a batch install.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<(String, InstallOutcome)>,
    pub failed: Vec<(String, InstallError)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct InstallOrchestrator<'a> {
    cache_dir: PathBuf,
    http: &'a dyn HttpClient,
    extractor: &'a dyn Extractor,
    progress: Option<&'a dyn Fn(InstallProgress)>,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        http: &'a dyn HttpClient,
        extractor: &'a dyn Extractor,
    ) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            http,
            extractor,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn Fn(InstallProgress)) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Cached package location for a record.
    pub fn package_path(&self, record: &CatalogRecord) -> PathBuf {
        pkg_dir(&self.cache_dir).join(format!("{}.pkg", record.content_id))
    }

    fn emit(&self, event: InstallProgress) {
        if let Some(cb) = self.progress {
            cb(event);
        }
    }

    /// Install a single record.
    pub fn install(
        &self,
        record: &CatalogRecord,
        options: &InstallOptions,
    ) -> Result<InstallOutcome, InstallError> {
        let license_key = record
            .license_key
            .as_deref()
            .ok_or_else(|| InstallError::MissingLicenseKey {
                content_id: record.content_id.clone(),
            })?;
        let url = record
            .package_url
            .as_deref()
            .ok_or_else(|| InstallError::MissingPackageUrl {
                content_id: record.content_id.clone(),
            })?;

        let package_path = self.package_path(record);
        if let Some(parent) = package_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let downloaded = if self.cached_package_usable(record, &package_path, options)? {
            log::info!("Using cached package {}", package_path.display());
            false
        } else {
            log::info!("Downloading {} ...", record.content_id);
            if let Some(dated) = record.last_modified_at() {
                log::debug!("Catalog lists {} as modified {dated}", record.content_id);
            }
            let fetcher = PackageFetcher::new(self.http);
            let emit = |event| self.emit(event);
            let expected = Some(record.file_size).filter(|n| *n > 0);
            fetcher.fetch(url, &package_path, expected, &emit)?;
            true
        };

        if options.skip_extraction {
            return Ok(InstallOutcome {
                path: package_path.clone(),
                package_path,
                downloaded,
            });
        }

        let path = self.extract(record, license_key, &package_path, &options.target_root)?;
        Ok(InstallOutcome {
            path,
            package_path,
            downloaded,
        })
    }

    /// Whether an existing cached package can be used as-is.
    fn cached_package_usable(
        &self,
        record: &CatalogRecord,
        package_path: &Path,
        options: &InstallOptions,
    ) -> Result<bool, InstallError> {
        if !package_path.is_file() {
            return Ok(false);
        }
        if options.skip_verification {
            log::warn!(
                "Skipping checksum verification of {}",
                package_path.display()
            );
            return Ok(true);
        }

        log::info!("Verifying cached package {} ...", package_path.display());
        let emit = |done, total| self.emit(InstallProgress::verifying(done, total));
        let actual = sha256_file_with_progress(package_path, &emit)?;
        if checksum_matches(&actual, &record.checksum) {
            return Ok(true);
        }

        let mismatch = InstallError::ChecksumMismatch {
            path: package_path.to_path_buf(),
            expected: record.checksum.clone(),
            actual,
        };
        log::warn!("{mismatch}; downloading again");
        Ok(false)
    }

    fn extract(
        &self,
        record: &CatalogRecord,
        license_key: &str,
        package_path: &Path,
        target_root: &Path,
    ) -> Result<PathBuf, InstallError> {
        fs::create_dir_all(target_root)?;
        // The extractor runs in target_root, so relative paths would break.
        let package = std::path::absolute(package_path)?;

        log::info!(
            "Extracting {} to {} ...",
            record.content_id,
            target_root.display()
        );
        self.emit(InstallProgress::Extracting);
        let outcome = self.extractor.extract(&package, license_key, target_root)?;
        if !outcome.success() {
            return Err(InstallError::extraction(
                outcome.code,
                format!("{} did not extract cleanly", record.content_id),
            ));
        }

        let marker = record.install_marker(target_root);
        if !marker.is_file() {
            return Err(InstallError::ExtractionVerificationFailed { expected: marker });
        }
        Ok(record.install_dir(target_root))
    }

    /// Install every record independently. Failures never stop the batch.
    pub fn install_batch(&self, records: &[&CatalogRecord], options: &InstallOptions) -> BatchReport {
        let mut report = BatchReport::default();
        for (i, record) in records.iter().enumerate() {
            log::debug!(
                "[{}/{}] Installing {}",
                i + 1,
                records.len(),
                record.content_id
            );
            match self.install(record, options) {
                Ok(outcome) => report.succeeded.push((record.content_id.clone(), outcome)),
                Err(e) => {
                    log::debug!("Install of {} failed: {e}", record.content_id);
                    report.failed.push((record.content_id.clone(), e));
                }
            }
        }
        report
    }
}
