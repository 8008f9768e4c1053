use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// SHA-256 of a file as lowercase hex.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    sha256_file_with_progress(path, &|_, _| {})
}

/// SHA-256 of a file, reporting `(bytes_done, bytes_total)` after each chunk.
pub fn sha256_file_with_progress(
    path: &Path,
    progress: &dyn Fn(u64, u64),
) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let total = file.metadata()?.len();
    sha256_reader(&mut file, total, progress)
}

fn sha256_reader(
    reader: &mut dyn Read,
    total: u64,
    progress: &dyn Fn(u64, u64),
) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut done = 0u64;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        done += n as u64;
        progress(done, total);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Case-insensitive comparison of a computed digest against a catalog
/// checksum. An empty expected value never matches.
pub fn checksum_matches(actual: &str, expected: &str) -> bool {
    let expected = expected.trim();
    !expected.is_empty() && actual.eq_ignore_ascii_case(expected)
}

#[cfg(test)]
#[path = "tests/checksum_tests.rs"]
mod tests;
