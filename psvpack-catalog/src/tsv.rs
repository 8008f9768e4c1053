//! Tab-separated catalog parser.
//!
//! Catalog files start with a header row; columns are located by name so
//! that extra or reordered columns don't matter. Column names:
//!
//! `Title ID`, `Region`, `Name`, `PKG direct link`, `zRIF`, `Content ID`,
//! `Last Modification Date`, `Original Name`, `File Size`, `SHA256`,
//! `App Version` (not every list carries every column).

use std::collections::HashSet;
use std::path::Path;

use psvpack_core::{CatalogRecord, RecordKind, Region, optional_field};

use crate::error::CatalogError;

const COL_TITLE_ID: &str = "Title ID";
const COL_CONTENT_ID: &str = "Content ID";
const COL_REGION: &str = "Region";
const COL_NAME: &str = "Name";
const COL_ORIGINAL_NAME: &str = "Original Name";
const COL_APP_VERSION: &str = "App Version";
const COL_FILE_SIZE: &str = "File Size";
const COL_LAST_MODIFIED: &str = "Last Modification Date";
const COL_PKG_LINK: &str = "PKG direct link";
const COL_ZRIF: &str = "zRIF";
const COL_SHA256: &str = "SHA256";

/// Header positions of the columns we read.
#[derive(Debug)]
struct Columns {
    title_id: usize,
    content_id: usize,
    region: usize,
    name: usize,
    original_name: Option<usize>,
    app_version: Option<usize>,
    file_size: Option<usize>,
    last_modified: Option<usize>,
    pkg_link: Option<usize>,
    zrif: Option<usize>,
    sha256: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, CatalogError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| CatalogError::parse(format!("missing '{name}' column")))
        };

        Ok(Self {
            title_id: require(COL_TITLE_ID)?,
            content_id: require(COL_CONTENT_ID)?,
            region: require(COL_REGION)?,
            name: require(COL_NAME)?,
            original_name: find(COL_ORIGINAL_NAME),
            app_version: find(COL_APP_VERSION),
            file_size: find(COL_FILE_SIZE),
            last_modified: find(COL_LAST_MODIFIED),
            pkg_link: find(COL_PKG_LINK),
            zrif: find(COL_ZRIF),
            sha256: find(COL_SHA256),
        })
    }
}

/// Parse a catalog file from disk.
///
/// The whole file must be valid UTF-8; a decode failure is reported as
/// [`CatalogError::ParseFailed`] rather than silently dropping rows.
pub fn parse_catalog_file(path: &Path, kind: RecordKind) -> Result<Vec<CatalogRecord>, CatalogError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::parse(format!("{}: {e}", path.display())))?;
    parse_catalog(&contents, kind)
}

/// Parse catalog content from a string.
///
/// Rows with an unknown region, an empty content id, a content id seen
/// earlier in the file, or an id that is not a single path component are
/// skipped with a warning.
pub fn parse_catalog(content: &str, kind: RecordKind) -> Result<Vec<CatalogRecord>, CatalogError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CatalogError::parse(format!("unreadable header row: {e}")))?
        .clone();
    let cols = Columns::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (line, result) in reader.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed catalog row {}: {e}", line + 2);
                continue;
            }
        };

        let get = |i: usize| row.get(i).unwrap_or("").trim();
        let get_opt = |i: Option<usize>| i.map(|i| row.get(i).unwrap_or("")).and_then(optional_field);

        let content_id = get(cols.content_id).to_uppercase();
        if content_id.is_empty() || content_id == psvpack_core::MISSING {
            log::debug!("Skipping catalog row {} without a content id", line + 2);
            continue;
        }

        let title_id = get(cols.title_id).to_uppercase();
        if !is_path_component(&content_id) || !is_path_component(&title_id) {
            log::warn!(
                "Skipping catalog row {}: id {content_id:?} / {title_id:?} is not a plain name",
                line + 2
            );
            continue;
        }

        let region: Region = match get(cols.region).parse() {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping {content_id}: {e}");
                continue;
            }
        };

        if !seen.insert(content_id.clone()) {
            log::warn!("Skipping duplicate content id {content_id}");
            continue;
        }

        let file_size = get_opt(cols.file_size)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        records.push(CatalogRecord {
            kind,
            title_id,
            content_id,
            region,
            name: get(cols.name).to_string(),
            original_name: get_opt(cols.original_name),
            app_version: get_opt(cols.app_version),
            file_size,
            last_modified: get_opt(cols.last_modified),
            package_url: get_opt(cols.pkg_link),
            license_key: get_opt(cols.zrif),
            checksum: get_opt(cols.sha256)
                .map(|s| s.to_lowercase())
                .unwrap_or_default(),
        });
    }

    Ok(records)
}

/// Ids become directory and file names below the install root, so they
/// must not contain separators or parent references.
fn is_path_component(id: &str) -> bool {
    !id.contains(['/', '\\']) && !id.contains("..")
}

#[cfg(test)]
#[path = "tests/tsv_tests.rs"]
mod tests;
