//! Shopify API version definitions.
//!
//! This module provides the [`ApiVersion`] type for specifying which version
//! of the Shopify API to call.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify API version.
///
/// Shopify releases dated versions quarterly and exposes an `unstable`
/// version for development. Any `YYYY-MM` string is accepted so that newly
/// released versions can be used without a client upgrade.
///
/// # Example
///
/// ```rust
/// use shopify_client::ApiVersion;
///
/// let version: ApiVersion = "2021-07".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2021_07);
/// assert_eq!(version.to_string(), "2021-07");
///
/// let unstable: ApiVersion = "unstable".parse().unwrap();
/// assert!(!unstable.is_stable());
///
/// assert!("21-07".parse::<ApiVersion>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// A dated release.
    Stable {
        /// Four-digit release year.
        year: u16,
        /// Two-digit release month.
        month: u8,
    },
    /// Unstable API version for development and testing.
    Unstable,
}

impl ApiVersion {
    /// API version 2021-07 (July 2021).
    pub const V2021_07: Self = Self::Stable {
        year: 2021,
        month: 7,
    };
    /// API version 2024-10 (October 2024).
    pub const V2024_10: Self = Self::Stable {
        year: 2024,
        month: 10,
    };
    /// API version 2025-07 (July 2025).
    pub const V2025_07: Self = Self::Stable {
        year: 2025,
        month: 7,
    };
    /// API version 2025-10 (October 2025).
    pub const V2025_10: Self = Self::Stable {
        year: 2025,
        month: 10,
    };

    /// Returns the version used when none is configured.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// Returns `true` for dated releases and `false` for `unstable`.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Stable { .. })
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Unstable => f.write_str("unstable"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    /// Accepts exactly `NNNN-NN` (ASCII digits) or the literal `unstable`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "unstable" {
            return Ok(Self::Unstable);
        }

        let invalid = || ConfigError::InvalidApiVersion {
            version: s.to_string(),
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !all_digits(year, 4) || !all_digits(month, 2) {
            return Err(invalid());
        }

        Ok(Self::Stable {
            year: year.parse().map_err(|_| invalid())?,
            month: month.parse().map_err(|_| invalid())?,
        })
    }
}
