//! Shared catalog vocabulary: regions, list identifiers, records and size
//! formatting.

pub mod error;
pub mod list;
pub mod record;
pub mod region;
pub mod util;

pub use error::CoreError;
pub use list::ListId;
pub use record::{CatalogRecord, MISSING, RecordKind, looks_like_content_id, optional_field};
pub use region::Region;
pub use util::{format_rate, format_size};
