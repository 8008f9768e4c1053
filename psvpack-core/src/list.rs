use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::RecordKind;

/// The fixed set of catalogs the tool knows how to consume.
///
/// The serialized form (`PSV`, `PSV_DLC`, ...) is the key used in the
/// `catalog_urls` table of the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListId {
    #[serde(rename = "PSV")]
    Psv,
    #[serde(rename = "PSV_DLC")]
    PsvDlc,
    #[serde(rename = "PSP")]
    Psp,
    #[serde(rename = "PSP_DLC")]
    PspDlc,
    #[serde(rename = "PSX")]
    Psx,
    #[serde(rename = "PSM")]
    Psm,
}

impl ListId {
    pub const ALL: [ListId; 6] = [
        ListId::Psv,
        ListId::PsvDlc,
        ListId::Psp,
        ListId::PspDlc,
        ListId::Psx,
        ListId::Psm,
    ];

    /// Identifier as written in settings and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Psv => "PSV",
            Self::PsvDlc => "PSV_DLC",
            Self::Psp => "PSP",
            Self::PspDlc => "PSP_DLC",
            Self::Psx => "PSX",
            Self::Psm => "PSM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Psv => "PlayStation Vita games",
            Self::PsvDlc => "PlayStation Vita DLC",
            Self::Psp => "PSP games",
            Self::PspDlc => "PSP DLC",
            Self::Psx => "PlayStation classics",
            Self::Psm => "PlayStation Mobile",
        }
    }

    pub fn is_dlc(&self) -> bool {
        matches!(self, Self::PsvDlc | Self::PspDlc)
    }

    /// Vita lists require a license key for every installable row.
    pub fn is_vita(&self) -> bool {
        matches!(self, Self::Psv | Self::PsvDlc)
    }

    /// Kind of records this list produces.
    pub fn record_kind(&self) -> RecordKind {
        if self.is_dlc() {
            RecordKind::Dlc
        } else {
            RecordKind::Title
        }
    }
}

impl FromStr for ListId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|l| l.code() == wanted)
            .ok_or_else(|| CoreError::unknown_list(s))
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
