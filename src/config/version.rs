//! Admin API version selection.
//!
//! Shopify releases API versions quarterly (January, April, July, October),
//! named `YYYY-MM`, plus a rolling `unstable` version.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// An Admin API version, used in the `/admin/api/{version}/` path prefix.
///
/// Versions order chronologically, with `unstable` after every release.
///
/// # Example
///
/// ```rust
/// use shopify_admin::ApiVersion;
///
/// let version: ApiVersion = "2024-04".parse().unwrap();
/// assert_eq!(version.to_string(), "2024-04");
/// assert_eq!(ApiVersion::default().to_string(), "2021-10");
/// assert!(version > ApiVersion::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// A quarterly stable release.
    Release {
        /// Four-digit release year.
        year: u16,
        /// Release month: 1, 4, 7 or 10.
        month: u8,
    },
    /// The rolling development version.
    Unstable,
}

impl ApiVersion {
    /// Creates a stable release version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] unless `month` is a quarterly
    /// release month and `year` has four digits.
    pub fn release(year: u16, month: u8) -> Result<Self, ConfigError> {
        if !(1000..=9999).contains(&year) || !matches!(month, 1 | 4 | 7 | 10) {
            return Err(ConfigError::InvalidApiVersion {
                version: format!("{year}-{month:02}"),
            });
        }
        Ok(Self::Release { year, month })
    }

    /// Returns `true` for released versions.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Release { .. })
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::Release {
            year: 2021,
            month: 10,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release { year, month } => write!(f, "{year}-{month:02}"),
            Self::Unstable => f.write_str("unstable"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "unstable" {
            return Ok(Self::Unstable);
        }

        let invalid = || ConfigError::InvalidApiVersion { version: s.clone() };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year = year.parse::<u16>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        Self::release(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_version_is_2021_10() {
        assert_eq!(ApiVersion::default().to_string(), "2021-10");
    }

    #[test]
    fn test_parses_releases_and_unstable() {
        let version: ApiVersion = "2025-01".parse().unwrap();
        assert_eq!(
            version,
            ApiVersion::Release {
                year: 2025,
                month: 1
            }
        );
        assert_eq!(version.to_string(), "2025-01");

        let version: ApiVersion = " Unstable ".parse().unwrap();
        assert_eq!(version, ApiVersion::Unstable);
        assert!(!version.is_stable());
    }

    #[test]
    fn test_rejects_invalid() {
        for raw in ["", "2024", "2024-02", "2024-1", "24-01", "2024/01", "+024-01", "latest"] {
            assert!(
                matches!(
                    raw.parse::<ApiVersion>(),
                    Err(ConfigError::InvalidApiVersion { .. })
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_versions_order_chronologically() {
        let older: ApiVersion = "2023-10".parse().unwrap();
        let newer: ApiVersion = "2024-01".parse().unwrap();
        assert!(older < newer);
        assert!(newer < ApiVersion::Unstable);
    }

    #[test]
    fn test_release_constructor_validates_month() {
        assert!(ApiVersion::release(2024, 7).is_ok());
        assert!(ApiVersion::release(2024, 3).is_err());
    }
}
