use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::region::Region;

/// Sentinel used by the catalogs for a field that is not available.
pub const MISSING: &str = "MISSING";

/// Catalog timestamp layout (`Last Modification Date` column).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether a catalog row describes a standalone title or an add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Title,
    Dlc,
}

/// One row of a title catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub kind: RecordKind,
    /// Title identifier (e.g., "PCSE00001"). Shared by a title and its DLC,
    /// and may be empty for orphaned DLC rows.
    pub title_id: String,
    /// Package identifier, unique within a catalog
    /// (e.g., "UP9000-PCSE00001_00-0000000000000000").
    pub content_id: String,
    pub region: Region,
    pub name: String,
    /// Name in the original script, searched alongside `name`.
    pub original_name: Option<String>,
    pub app_version: Option<String>,
    /// Reported package size in bytes (0 when the catalog doesn't say).
    pub file_size: u64,
    /// Raw `Last Modification Date` text.
    pub last_modified: Option<String>,
    pub package_url: Option<String>,
    /// zRIF license key.
    pub license_key: Option<String>,
    /// Lowercase hex SHA-256 of the package, empty if unknown.
    pub checksum: String,
}

impl CatalogRecord {
    pub fn is_dlc(&self) -> bool {
        self.kind == RecordKind::Dlc
    }

    /// Parsed modification timestamp, if the catalog value is well formed.
    pub fn last_modified_at(&self) -> Option<NaiveDateTime> {
        let raw = self.last_modified.as_deref()?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
    }

    /// Portion of the content id after the last hyphen. DLC payloads are
    /// installed into a directory with this name.
    pub fn content_suffix(&self) -> &str {
        self.content_id
            .rsplit_once('-')
            .map(|(_, suffix)| suffix)
            .unwrap_or(&self.content_id)
    }

    /// Directory the extracted payload lands in below `root`.
    pub fn install_dir(&self, root: &Path) -> PathBuf {
        match self.kind {
            RecordKind::Title => root.join("app").join(&self.title_id),
            RecordKind::Dlc => root
                .join("addcont")
                .join(&self.title_id)
                .join(self.content_suffix()),
        }
    }

    /// File whose presence proves an extraction actually produced output.
    pub fn install_marker(&self, root: &Path) -> PathBuf {
        let dir = self.install_dir(root);
        match self.kind {
            RecordKind::Title => dir.join("eboot.bin"),
            RecordKind::Dlc => dir.join("_data").join("addoninfo.dat"),
        }
    }
}

/// Normalise an optional catalog cell: blank cells and the `MISSING`
/// sentinel both become `None`.
pub fn optional_field(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MISSING {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether a user-supplied identifier should be matched against content ids
/// (content ids always contain a hyphen, title ids never do).
pub fn looks_like_content_id(identifier: &str) -> bool {
    identifier.contains('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: RecordKind, title_id: &str, content_id: &str) -> CatalogRecord {
        CatalogRecord {
            kind,
            title_id: title_id.to_string(),
            content_id: content_id.to_string(),
            region: Region::Us,
            name: "Test".to_string(),
            original_name: None,
            app_version: None,
            file_size: 0,
            last_modified: Some("2018-01-05 12:30:00".to_string()),
            package_url: None,
            license_key: None,
            checksum: String::new(),
        }
    }

    #[test]
    fn test_optional_field() {
        assert_eq!(optional_field("MISSING"), None);
        assert_eq!(optional_field("   "), None);
        assert_eq!(optional_field(" abc "), Some("abc".to_string()));
    }

    #[test]
    fn test_title_install_paths() {
        let r = record(RecordKind::Title, "PCSE00001", "UP9000-PCSE00001_00-0000000000000000");
        let root = Path::new("/ux0");
        assert_eq!(r.install_dir(root), Path::new("/ux0/app/PCSE00001"));
        assert_eq!(r.install_marker(root), Path::new("/ux0/app/PCSE00001/eboot.bin"));
    }

    #[test]
    fn test_dlc_install_paths() {
        let r = record(RecordKind::Dlc, "PCSE00001", "UP9000-PCSE00001_00-EXTRAPACK0000001");
        let root = Path::new("/ux0");
        assert_eq!(r.content_suffix(), "EXTRAPACK0000001");
        assert_eq!(
            r.install_marker(root),
            Path::new("/ux0/addcont/PCSE00001/EXTRAPACK0000001/_data/addoninfo.dat")
        );
    }

    #[test]
    fn test_last_modified_parse() {
        let mut r = record(RecordKind::Title, "PCSE00001", "X-Y");
        assert!(r.last_modified_at().is_some());
        r.last_modified = Some("yesterday".to_string());
        assert!(r.last_modified_at().is_none());
    }

    #[test]
    fn test_looks_like_content_id() {
        assert!(looks_like_content_id("UP9000-PCSE00001_00-0000000000000000"));
        assert!(!looks_like_content_id("PCSE00001"));
    }
}
