//! Server version parsing and comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// `major.minor` version of a connected server.
///
/// Ordering compares `major` first, then `minor`. Any build or patch
/// components the server reports are dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerVersion {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
}

impl ServerVersion {
    /// First version that exposes organizations.
    pub const ORGANIZATIONS_FEATURE: Self = Self::new(6, 2);

    /// Build a version from its components.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for ServerVersion {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SessionError::InvalidVersion(s.to_string());
        let mut parts = s.trim().split('.');

        let major = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;

        Ok(Self { major, minor })
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_build_components() {
        let version: ServerVersion = "6.7.1.35068".parse().unwrap();
        assert_eq!(version, ServerVersion::new(6, 7));
        assert_eq!(version.to_string(), "6.7");
    }

    #[test]
    fn test_parse_rejects_malformed_versions() {
        for input in ["", "6", "six.two", "6.", ".2", "6.x"] {
            assert!(
                matches!(
                    input.parse::<ServerVersion>(),
                    Err(SessionError::InvalidVersion(_))
                ),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_ordering_is_major_then_minor() {
        assert!(ServerVersion::new(6, 10) > ServerVersion::new(6, 2));
        assert!(ServerVersion::new(7, 0) > ServerVersion::new(6, 9));
        assert!(ServerVersion::new(5, 6) < ServerVersion::ORGANIZATIONS_FEATURE);
    }
}
