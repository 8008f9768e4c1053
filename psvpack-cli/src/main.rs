//! psvpack CLI
//!
//! Command-line interface for searching package catalogs and installing
//! PS Vita, PSP, PSX, and PSM content.

mod cli_types;
mod commands;
mod error;
mod logger;
mod progress;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use psvpack_lib::resolve_config_path;

use cli_types::{Cli, Commands};
use commands::install::InstallArgs;
use error::CliError;
use logger::CliLogger;

fn main() {
    let cli = Cli::parse();
    CliLogger::init(cli.debug, cli.quiet, cli.logfile.as_deref());

    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            log::error!(
                "{} {}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                e
            );
            1
        }
    };
    log::logger().flush();
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = resolve_config_path(cli.config);
    log::debug!("Using config file {}", config_path.display());

    match cli.command {
        Commands::Config { action } => commands::config::run_config(action, &config_path),
        Commands::Search { term, regions } => {
            let config = commands::load_config(&config_path)?;
            commands::search::run_search(&config, cli.list, &term, &regions.regions())
        }
        Commands::Install {
            id,
            root,
            no_install,
            no_verify,
            get_all,
        } => {
            let config = commands::load_config(&config_path)?;
            let args = InstallArgs {
                id,
                root,
                no_install,
                no_verify,
                get_all,
            };
            commands::install::run_install(&config, cli.list, args, cli.quiet)
        }
        Commands::Cache { action } => {
            let config = commands::load_config(&config_path)?;
            commands::cache::run_cache(action, &config, cli.list)
        }
    }
}
