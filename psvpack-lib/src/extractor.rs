//! Package extraction via an external `pkg2zip` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::InstallError;

/// Exit status of an extractor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOutcome {
    /// Process exit code; `None` if it was killed by a signal.
    pub code: Option<i32>,
}

impl ExtractOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Unpacks a package into a working directory using its license key.
///
/// Implementations must run with `cwd` as the output root: the package
/// contents land in `cwd/app/...` or `cwd/addcont/...`.
pub trait Extractor {
    fn extract(
        &self,
        package: &Path,
        license_key: &str,
        cwd: &Path,
    ) -> Result<ExtractOutcome, InstallError>;
}

/// Runs `pkg2zip -x <package> <key>`.
#[derive(Debug, Clone)]
pub struct Pkg2Zip {
    binary: PathBuf,
}

impl Pkg2Zip {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Extractor for Pkg2Zip {
    fn extract(
        &self,
        package: &Path,
        license_key: &str,
        cwd: &Path,
    ) -> Result<ExtractOutcome, InstallError> {
        log::debug!(
            "Running {} -x {} <key> in {}",
            self.binary.display(),
            package.display(),
            cwd.display()
        );

        let status = Command::new(&self.binary)
            .arg("-x")
            .arg(package)
            .arg(license_key)
            .current_dir(cwd)
            .status()
            .map_err(|e| {
                InstallError::extraction(
                    None,
                    format!("could not run {}: {e}", self.binary.display()),
                )
            })?;

        Ok(ExtractOutcome {
            code: status.code(),
        })
    }
}
