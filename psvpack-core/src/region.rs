use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Storefront regions used by the catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    /// North America
    Us,
    /// Europe / PAL territories
    Eu,
    /// Japan
    Jp,
    /// Asia (Hong Kong, Korea, Taiwan, ...)
    Asia,
}

impl Region {
    /// Every region, in catalog display order.
    pub const ALL: [Region; 4] = [Region::Us, Region::Eu, Region::Jp, Region::Asia];

    /// Returns the code used in the catalog `Region` column.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "EU",
            Self::Jp => "JP",
            Self::Asia => "ASIA",
        }
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "EU" => Ok(Self::Eu),
            "JP" => Ok(Self::Jp),
            "ASIA" => Ok(Self::Asia),
            _ => Err(CoreError::unknown_region(s)),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("us".parse::<Region>().unwrap(), Region::Us);
        assert_eq!("Asia".parse::<Region>().unwrap(), Region::Asia);
        assert_eq!(" JP ".parse::<Region>().unwrap(), Region::Jp);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("INT".parse::<Region>().is_err());
        assert!("".parse::<Region>().is_err());
    }

    #[test]
    fn test_display_uses_code() {
        for region in Region::ALL {
            assert_eq!(region.to_string(), region.code());
        }
    }
}
