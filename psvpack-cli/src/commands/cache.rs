use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psvpack_catalog::{CatalogStore, ReqwestClient, cache};
use psvpack_core::{ListId, format_size};
use psvpack_lib::Config;

use crate::cli_types::CacheAction;
use crate::error::CliError;

pub(crate) fn run_cache(action: CacheAction, config: &Config, list: ListId) -> Result<(), CliError> {
    match action {
        CacheAction::List => run_cache_list(config),
        CacheAction::Clear { packages } => run_cache_clear(config, packages),
        CacheAction::Refresh => run_cache_refresh(config, list),
    }
}

/// List cached catalogs and packages.
fn run_cache_list(config: &Config) -> Result<(), CliError> {
    list_dir("Cached catalogs:", "No cached catalogs.", &config.tsv_dir())?;
    for line in catalog_summaries(config)? {
        log::info!("{line}");
    }
    log::info!("");
    list_dir("Cached packages:", "No cached packages.", &config.pkg_dir())?;
    Ok(())
}

fn list_dir(title: &str, empty: &str, dir: &Path) -> Result<(), CliError> {
    let entries = cache::list(dir)?;
    if entries.is_empty() {
        log::info!("{}", empty.if_supports_color(Stdout, |t| t.dimmed()));
        return Ok(());
    }

    log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    let mut total_size = 0u64;
    for entry in &entries {
        total_size += entry.file_size;
        let modified = entry
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        log::info!(
            "  {} ({}, {})",
            entry.file_name.if_supports_color(Stdout, |t| t.cyan()),
            format_size(entry.file_size),
            modified,
        );
    }
    log::info!(
        "Total: {} files, {}",
        entries.len(),
        format_size(total_size)
    );
    Ok(())
}

/// One line per configured list whose catalog is cached and parses.
fn catalog_summaries(config: &Config) -> Result<Vec<String>, CliError> {
    let mut lines = Vec::new();
    for list in config.configured_lists() {
        let source = config.catalog_source(list);
        if !source.cache_path()?.is_file() {
            continue;
        }
        let store = CatalogStore::from_cache(source)?;
        if store.is_loaded() {
            lines.push(format!(
                "  {:8} {} records ({})",
                list.code(),
                store.len(),
                list.description()
            ));
        }
    }
    Ok(lines)
}

/// Remove cached catalogs, and packages too when asked.
fn run_cache_clear(config: &Config, packages: bool) -> Result<(), CliError> {
    let mut freed = cache::clear(&config.tsv_dir())?;
    if packages {
        freed += cache::clear(&config.pkg_dir())?;
    }
    log::info!(
        "{} Cache cleared ({} freed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        format_size(freed),
    );
    Ok(())
}

/// Download the selected catalog regardless of its age.
fn run_cache_refresh(config: &Config, list: ListId) -> Result<(), CliError> {
    let http = ReqwestClient::new()?;
    let store = CatalogStore::open_with(config.catalog_source(list), &http, true)?;
    store.require_loaded()?;
    let updated = store
        .last_update()
        .map(|t| t.to_rfc2822())
        .unwrap_or_else(|| "unknown".to_string());
    log::info!(
        "{} {} ({} records, updated {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        list.code().if_supports_color(Stdout, |t| t.bold()),
        store.len(),
        updated,
    );
    Ok(())
}
