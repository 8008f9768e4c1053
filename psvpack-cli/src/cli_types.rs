//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use psvpack_core::{ListId, Region};

#[derive(Parser)]
#[command(name = "psvpack")]
#[command(version, about = "Search and install PS Vita packages", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (default: <config dir>/psvpack/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog to use (PSV, PSV_DLC, PSP, PSP_DLC, PSX, PSM)
    #[arg(short = 'g', long = "list", global = true, default_value = "PSV", value_name = "LIST")]
    pub list: ListId,

    /// Enable debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true, value_name = "PATH")]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Region filter for search results. Defaults to US and JP.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct RegionArgs {
    /// Show all regions
    #[arg(short = 'a', long)]
    pub all_regions: bool,

    /// Show English releases only (US and EU)
    #[arg(short = 'e', long)]
    pub english: bool,

    /// Show US region only
    #[arg(short = 'U', long)]
    pub us: bool,

    /// Show EU region only
    #[arg(short = 'E', long)]
    pub eu: bool,

    /// Show JP region only
    #[arg(short = 'J', long)]
    pub jp: bool,

    /// Show ASIA region only
    #[arg(short = 'A', long)]
    pub asia: bool,

    /// Explicit region list (e.g., us,eu)
    #[arg(long, value_delimiter = ',', value_name = "REGION")]
    pub region: Option<Vec<Region>>,
}

impl RegionArgs {
    /// Resolve the flags into an allow-list. Later presets win, matching
    /// the order they are declared in; `--region` overrides all presets.
    pub fn regions(&self) -> Vec<Region> {
        if let Some(explicit) = &self.region
            && !explicit.is_empty()
        {
            return explicit.clone();
        }

        let presets: [(bool, &[Region]); 6] = [
            (self.all_regions, &Region::ALL),
            (self.english, &[Region::Us, Region::Eu]),
            (self.us, &[Region::Us]),
            (self.eu, &[Region::Eu]),
            (self.jp, &[Region::Jp]),
            (self.asia, &[Region::Asia]),
        ];
        presets
            .iter()
            .rev()
            .find(|(on, _)| *on)
            .map(|(_, regions)| regions.to_vec())
            .unwrap_or_else(|| vec![Region::Us, Region::Jp])
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search the selected catalog by name, original name, or title id
    Search {
        /// Search term (case-insensitive regular expression)
        term: String,

        #[command(flatten)]
        regions: RegionArgs,
    },

    /// Download and install a package by title id or content id
    Install {
        /// Title id (e.g., PCSE00001) or content id
        id: String,

        /// Install root: a mounted ux0 or SD card (default: install_root from config)
        #[arg(short = 'r', long = "root", value_name = "PATH")]
        root: Option<PathBuf>,

        /// Download the package only; do not extract it
        #[arg(short = 'N', long)]
        no_install: bool,

        /// Skip checksum verification of an already cached package
        #[arg(short = 'X', long)]
        no_verify: bool,

        /// Install every record matching the id (e.g., all DLC for a title)
        #[arg(long)]
        get_all: bool,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage cached catalogs and packages
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the resolved configuration
    Show,

    /// Print the settings file path
    Path,

    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// List cached catalogs and packages
    List,

    /// Remove cached catalogs
    Clear {
        /// Also remove downloaded packages
        #[arg(long)]
        packages: bool,
    },

    /// Re-download the selected catalog regardless of age
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_regions() {
        assert_eq!(RegionArgs::default().regions(), vec![Region::Us, Region::Jp]);
    }

    #[test]
    fn test_region_presets() {
        let args = RegionArgs {
            english: true,
            ..Default::default()
        };
        assert_eq!(args.regions(), vec![Region::Us, Region::Eu]);

        let args = RegionArgs {
            all_regions: true,
            ..Default::default()
        };
        assert_eq!(args.regions(), Region::ALL.to_vec());

        let args = RegionArgs {
            all_regions: true,
            asia: true,
            ..Default::default()
        };
        assert_eq!(args.regions(), vec![Region::Asia]);
    }

    #[test]
    fn test_explicit_region_list() {
        let cli = Cli::try_parse_from(["psvpack", "search", "gravity", "--region", "eu,asia"]).unwrap();
        match cli.command {
            Commands::Search { term, regions } => {
                assert_eq!(term, "gravity");
                assert_eq!(regions.regions(), vec![Region::Eu, Region::Asia]);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_install_flags() {
        let cli = Cli::try_parse_from([
            "psvpack", "-g", "psv_dlc", "install", "PCSE00001", "-r", "/mnt/ux0", "-N", "-X", "--get-all",
        ])
        .unwrap();
        assert_eq!(cli.list, ListId::PsvDlc);
        match cli.command {
            Commands::Install {
                id,
                root,
                no_install,
                no_verify,
                get_all,
            } => {
                assert_eq!(id, "PCSE00001");
                assert_eq!(root, Some(PathBuf::from("/mnt/ux0")));
                assert!(no_install && no_verify && get_all);
            }
            _ => panic!("expected install"),
        }
    }

    #[test]
    fn test_unknown_list_rejected() {
        assert!(Cli::try_parse_from(["psvpack", "-g", "N64", "search", "x"]).is_err());
    }
}
