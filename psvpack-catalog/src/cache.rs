use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::CatalogError;

/// A file found in one of the cache directories.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub file_size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// List regular files in a cache directory, sorted by name. A missing
/// directory is an empty cache.
pub fn list(dir: &Path) -> Result<Vec<CacheEntry>, CatalogError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let meta = entry.metadata()?;
        entries.push(CacheEntry {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            file_size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
            path,
        });
    }

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

/// Remove all regular files in a cache directory. Returns bytes freed.
pub fn clear(dir: &Path) -> Result<u64, CatalogError> {
    let mut total_size = 0u64;

    if dir.exists() {
        for entry in fs::read_dir(dir)?.flatten() {
            let path = entry.path();
            if path.is_file() {
                if let Ok(meta) = fs::metadata(&path) {
                    total_size += meta.len();
                }
                fs::remove_file(&path)?;
            }
        }
    }

    Ok(total_size)
}
