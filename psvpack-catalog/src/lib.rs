pub mod cache;
pub mod error;
pub mod http;
pub mod store;
pub mod tsv;

pub use cache::CacheEntry;
pub use error::CatalogError;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use store::{CatalogSource, CatalogStore, needs_refresh, tsv_dir};
pub use tsv::{parse_catalog, parse_catalog_file};
