/// Progress update emitted while installing a package.
///
/// Front ends receive these through a callback and map them onto their
/// own progress display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProgress {
    /// Hashing a cached package.
    Verifying { bytes_done: u64, bytes_total: u64 },

    /// A package download has started.
    DownloadStarted {
        /// Size from the server or the catalog, if known
        total_bytes: Option<u64>,
    },

    /// Bytes received so far.
    Downloading {
        bytes_done: u64,
        total_bytes: Option<u64>,
    },

    /// Download finished successfully.
    DownloadFinished { bytes: u64 },

    /// The extractor is running.
    Extracting,
}

impl InstallProgress {
    pub fn verifying(bytes_done: u64, bytes_total: u64) -> Self {
        Self::Verifying {
            bytes_done,
            bytes_total,
        }
    }

    pub fn downloading(bytes_done: u64, total_bytes: Option<u64>) -> Self {
        Self::Downloading {
            bytes_done,
            total_bytes,
        }
    }
}
