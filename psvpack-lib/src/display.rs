//! Plain-text formatting of catalog records for search listings.
//!
//! Shared by every front end; colour is applied by the caller.

use psvpack_core::{CatalogRecord, ListId, RecordKind, format_size};

pub const NO_LICENSE_MARKER: &str = "<NO zRIF!>";
pub const NO_PACKAGE_MARKER: &str = "<NO PKG LINK!>";
pub const NO_RESULTS: &str = "!! No results.";

/// Column header line.
pub fn table_header() -> String {
    format!("{:16} {:4} {:8} {}", "ID", "Reg", "Size", "Name/Version")
}

/// Separator printed under the header.
pub fn table_rule() -> String {
    "=".repeat(60)
}

/// Warnings for a record that cannot be installed as-is.
///
/// The license key is only required on Vita lists.
pub fn record_warnings(record: &CatalogRecord, list: ListId) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if list.is_vita() && record.license_key.is_none() {
        warnings.push(NO_LICENSE_MARKER);
    }
    if record.package_url.is_none() {
        warnings.push(NO_PACKAGE_MARKER);
    }
    warnings
}

/// One table row, without warnings.
pub fn format_row(record: &CatalogRecord) -> String {
    let size = format_size(record.file_size);
    match record.kind {
        RecordKind::Dlc => format!(
            "{:42} {:4} {:8} {}",
            record.content_id,
            record.region.code(),
            size,
            record.name
        ),
        RecordKind::Title => {
            let version = record
                .app_version
                .as_deref()
                .map(|v| format!(" [{v}]"))
                .unwrap_or_default();
            format!(
                "{:16} {:4} {:8} {}{}",
                record.title_id,
                record.region.code(),
                size,
                record.name,
                version
            )
        }
    }
}

/// One table row followed by any warnings.
pub fn format_row_with_warnings(record: &CatalogRecord, list: ListId) -> String {
    let row = format_row(record);
    let warnings = record_warnings(record, list);
    if warnings.is_empty() {
        row
    } else {
        format!("{row} {}", warnings.join(" "))
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
