use super::*;
use std::cell::RefCell;
use std::fs;

use tempfile::TempDir;

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

#[test]
fn test_empty_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.pkg");
    fs::write(&path, b"").unwrap();
    assert_eq!(sha256_file(&path).unwrap(), EMPTY_SHA256);
}

#[test]
fn test_known_digest() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("abc.pkg");
    fs::write(&path, b"abc").unwrap();
    assert_eq!(sha256_file(&path).unwrap(), ABC_SHA256);
}

#[test]
fn test_digest_is_64_lowercase_hex_chars() {
    let tmp = TempDir::new().unwrap();
    for (i, body) in [&b"a"[..], b"psvpack", &[0u8; 17]].iter().enumerate() {
        let path = tmp.path().join(format!("{i}.pkg"));
        fs::write(&path, body).unwrap();
        let digest = sha256_file(&path).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}

#[test]
fn test_multi_chunk_progress() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("big.pkg");
    let data = vec![0x5Au8; CHUNK_SIZE * 2 + 100];
    fs::write(&path, &data).unwrap();

    let seen = RefCell::new(Vec::new());
    let digest = sha256_file_with_progress(&path, &|done, total| {
        seen.borrow_mut().push((done, total));
    })
    .unwrap();

    let mut hasher = Sha256::new();
    hasher.update(&data);
    assert_eq!(digest, format!("{:x}", hasher.finalize()));

    let seen = seen.into_inner();
    let total = data.len() as u64;
    assert!(seen.len() >= 3);
    assert_eq!(seen.last(), Some(&(total, total)));
    assert!(seen.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn test_missing_file_is_error() {
    let tmp = TempDir::new().unwrap();
    assert!(sha256_file(&tmp.path().join("nope.pkg")).is_err());
}

#[test]
fn test_checksum_matches() {
    assert!(checksum_matches(ABC_SHA256, &ABC_SHA256.to_uppercase()));
    assert!(checksum_matches(ABC_SHA256, &format!(" {ABC_SHA256} ")));
    assert!(!checksum_matches(ABC_SHA256, EMPTY_SHA256));
    assert!(!checksum_matches(ABC_SHA256, ""));
}
