use super::*;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.cache_ttl, 86400);
    assert_eq!(config.pkg2zip, PathBuf::from("/usr/local/bin/pkg2zip"));
    assert_eq!(config.install_root, PathBuf::from("./"));
    assert_eq!(config.catalog_urls.len(), ListId::ALL.len());
    assert!(config.catalog_urls.values().all(|v| v.is_empty()));
    assert!(config.configured_lists().is_empty());
}

#[test]
fn test_load_or_init_writes_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("psvpack").join("config.toml");

    let loaded = load_or_init(&path).unwrap();
    assert!(loaded.created);
    assert!(path.exists());
    assert_eq!(loaded.config.cache_ttl, 86400);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("# psvpack"));
    assert!(contents.contains("[catalog_urls]"));

    let again = load_or_init(&path).unwrap();
    assert!(!again.created);
    assert_eq!(again.config, loaded.config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(
        &path,
        "cache_ttl = 60\n[catalog_urls]\npsv = \"http://example.invalid/PSV_GAMES.tsv\"\n",
    )
    .unwrap();

    let config = load_or_init(&path).unwrap().config;
    assert_eq!(config.cache_ttl, 60);
    assert_eq!(config.pkg2zip, PathBuf::from("/usr/local/bin/pkg2zip"));
    assert_eq!(
        config.catalog_url(ListId::Psv),
        Some("http://example.invalid/PSV_GAMES.tsv")
    );
    assert_eq!(config.catalog_url(ListId::PsvDlc), None);
    assert_eq!(config.configured_lists(), vec![ListId::Psv]);
}

#[test]
fn test_invalid_file_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "cache_ttl = \"soon\"\n").unwrap();
    assert!(matches!(
        load_or_init(&path),
        Err(SettingsError::Parse { .. })
    ));
}

#[test]
fn test_save_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    let mut config = Config::default();
    config.cache_dir = tmp.path().join("cache");
    config
        .catalog_urls
        .insert("PSP".into(), "http://example.invalid/PSP_GAMES.tsv".into());

    config.save(&path).unwrap();
    assert!(!path.with_extension("toml.tmp").exists());

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(Config::from_toml(&contents, &path).unwrap(), config);
}

#[test]
fn test_catalog_source() {
    let mut config = Config::default();
    config.cache_dir = PathBuf::from("/tmp/psvpack-cache");
    config.cache_ttl = 10;
    config
        .catalog_urls
        .insert("PSV".into(), " http://example.invalid/PSV_GAMES.tsv ".into());

    let source = config.catalog_source(ListId::Psv);
    assert_eq!(source.url, "http://example.invalid/PSV_GAMES.tsv");
    assert_eq!(source.ttl, 10);
    assert_eq!(
        source.cache_path().unwrap(),
        PathBuf::from("/tmp/psvpack-cache/tsv/PSV_GAMES.tsv")
    );
    assert!(config.catalog_source(ListId::Psm).url.is_empty());
}

#[test]
fn test_expand_tilde() {
    assert_eq!(expand_tilde(Path::new("/abs/path")), PathBuf::from("/abs/path"));
    assert_eq!(expand_tilde(Path::new("rel")), PathBuf::from("rel"));
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expand_tilde(Path::new("~/vita")), home.join("vita"));
        assert_eq!(expand_tilde(Path::new("~")), home);
    }
}

#[test]
fn test_pkg_and_tsv_dirs() {
    let mut config = Config::default();
    config.cache_dir = PathBuf::from("/c");
    assert_eq!(config.pkg_dir(), PathBuf::from("/c/pkg"));
    assert_eq!(config.tsv_dir(), PathBuf::from("/c/tsv"));
}
