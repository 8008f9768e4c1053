use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use psvpack_catalog::ReqwestClient;
use psvpack_core::ListId;
use psvpack_lib::settings::expand_tilde;
use psvpack_lib::{Config, InstallOptions, InstallRequest, InstallService, Pkg2Zip};

use crate::error::CliError;
use crate::progress::InstallBar;

/// Options collected from the `install` subcommand.
pub(crate) struct InstallArgs {
    pub id: String,
    pub root: Option<PathBuf>,
    pub no_install: bool,
    pub no_verify: bool,
    pub get_all: bool,
}

/// Resolve an id against the catalog and install every selected record.
pub(crate) fn run_install(
    config: &Config,
    list: ListId,
    args: InstallArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let target_root = args
        .root
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| config.install_root.clone());

    let extractor = Pkg2Zip::new(&config.pkg2zip);
    if !args.no_install && !extractor.binary().is_file() {
        log::warn!(
            "{} pkg2zip not found at {}; set `pkg2zip` in the config file",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            extractor.binary().display(),
        );
    }

    let request = InstallRequest {
        list,
        identifier: args.id,
        get_all: args.get_all,
        options: InstallOptions {
            target_root,
            skip_extraction: args.no_install,
            skip_verification: args.no_verify,
        },
    };

    let http = ReqwestClient::new()?;
    let bar = InstallBar::new(quiet);
    let observe = |event| bar.handle(event);
    let result = InstallService::new(config, &http, &extractor)
        .with_progress(&observe)
        .run(&request);
    bar.finish();
    let report = result?;

    for (content_id, outcome) in &report.succeeded {
        log::info!(
            "{} {} -> {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            content_id.if_supports_color(Stdout, |t| t.bold()),
            outcome.path.display(),
        );
    }
    for (content_id, err) in &report.failed {
        log::warn!(
            "{} {}: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            content_id.if_supports_color(Stdout, |t| t.bold()),
            err,
        );
    }

    log::info!(
        "*** Installation report: {} success / {} failed",
        report.succeeded.len(),
        report.failed.len()
    );

    if report.all_succeeded() {
        Ok(())
    } else {
        Err(CliError::Partial {
            failed: report.failed.len(),
            total: report.total(),
        })
    }
}
