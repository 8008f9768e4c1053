use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psvpack_core::ListId;
use psvpack_lib::Config;

use crate::cli_types::ConfigAction;
use crate::error::CliError;

pub(crate) fn run_config(action: ConfigAction, path: &Path) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => run_config_show(path),
        ConfigAction::Path => {
            log::info!("{}", path.display());
            Ok(())
        }
        ConfigAction::Init { force } => run_config_init(path, force),
    }
}

/// Show the resolved configuration.
fn run_config_show(path: &Path) -> Result<(), CliError> {
    let config = super::load_config(path)?;

    log::info!(
        "{}",
        "psvpack Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log::info!(
        "  Config file:  {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Cache dir:    {}", config.cache_dir.display());
    log::info!("  Cache TTL:    {} seconds", config.cache_ttl);
    log::info!("  Install root: {}", config.install_root.display());

    let pkg2zip_status = if config.pkg2zip.is_file() {
        "(found)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found)".if_supports_color(Stdout, |t| t.red()).to_string()
    };
    log::info!(
        "  pkg2zip:      {} {}",
        config.pkg2zip.display(),
        pkg2zip_status
    );

    log::info!("");
    log::info!("  Catalogs:");
    for list in ListId::ALL {
        let label = format!("{:9}", format!("{}:", list.code()));
        match config.catalog_url(list) {
            Some(url) => log::info!(
                "    {}{}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                url
            ),
            None => log::info!(
                "    {}{}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
            ),
        }
    }
    Ok(())
}

/// Write a default settings file.
fn run_config_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        log::warn!(
            "{} {} already exists (use --force to overwrite)",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            path.display(),
        );
        return Ok(());
    }

    Config::default().save(path)?;
    log::info!(
        "{} Wrote default config to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    log::info!("Edit it to set catalog_urls and pkg2zip.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "cache_ttl = 5\n").unwrap();

        run_config_init(&path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "cache_ttl = 5\n");

        run_config_init(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("cache_ttl = 86400"));
    }
}
