pub mod checksum;
pub mod display;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod install;
pub mod progress;
pub mod service;
pub mod settings;

pub use checksum::{checksum_matches, sha256_file, sha256_file_with_progress};
pub use error::{InstallError, SettingsError};
pub use extractor::{ExtractOutcome, Extractor, Pkg2Zip};
pub use fetcher::PackageFetcher;
pub use install::{BatchReport, InstallOptions, InstallOrchestrator, InstallOutcome};
pub use progress::InstallProgress;
pub use service::{InstallRequest, InstallService, SearchResults, SearchService, open_catalog, resolve};
pub use settings::{Config, LoadedConfig, config_path, load_or_init, pkg_dir, resolve_config_path};
