//! Streaming package downloads.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use psvpack_catalog::HttpClient;

use crate::error::InstallError;
use crate::progress::InstallProgress;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Downloads a package URL to a local file.
pub struct PackageFetcher<'a> {
    http: &'a dyn HttpClient,
}

impl<'a> PackageFetcher<'a> {
    pub fn new(http: &'a dyn HttpClient) -> Self {
        Self { http }
    }

    /// Stream `url` into `dest`, overwriting it. Returns bytes written.
    ///
    /// `expected_size` (from the catalog) is used for progress when the
    /// server sends no length, and to warn about short or long downloads.
    /// A partially written file is removed on failure.
    pub fn fetch(
        &self,
        url: &str,
        dest: &Path,
        expected_size: Option<u64>,
        progress: &dyn Fn(InstallProgress),
    ) -> Result<u64, InstallError> {
        let result = self.fetch_inner(url, dest, expected_size, progress);
        if result.is_err() && dest.exists() {
            let _ = fs::remove_file(dest);
        }
        result
    }

    fn fetch_inner(
        &self,
        url: &str,
        dest: &Path,
        expected_size: Option<u64>,
        progress: &dyn Fn(InstallProgress),
    ) -> Result<u64, InstallError> {
        log::debug!("Fetching {url} -> {}", dest.display());

        let response = self
            .http
            .get(url)
            .map_err(|e| InstallError::download(url, e.to_string()))?;
        if !response.is_success() {
            return Err(InstallError::download(
                url,
                format!("HTTP status {}", response.status),
            ));
        }

        let total = response
            .content_length
            .or(expected_size)
            .filter(|n| *n > 0);
        progress(InstallProgress::DownloadStarted { total_bytes: total });

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| InstallError::download(url, e.to_string()))?;
        }
        let mut file = File::create(dest).map_err(|e| InstallError::download(url, e.to_string()))?;
        let mut body = response.into_body();
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut done = 0u64;

        loop {
            let n = body
                .read(&mut buf)
                .map_err(|e| InstallError::download(url, e.to_string()))?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])
                .map_err(|e| InstallError::download(url, e.to_string()))?;
            done += n as u64;
            progress(InstallProgress::downloading(done, total));
        }
        file.flush()
            .map_err(|e| InstallError::download(url, e.to_string()))?;

        if let Some(expected) = expected_size.filter(|n| *n > 0)
            && expected != done
        {
            log::warn!(
                "Downloaded {done} bytes from {url}, catalog lists {expected} bytes"
            );
        }

        progress(InstallProgress::DownloadFinished { bytes: done });
        Ok(done)
    }
}
