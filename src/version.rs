//! Schema versioning utilities

use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::error::{Result, SchemaError};
use crate::objects::{Semver, SchemaVersion};

/// Converts a semantic version into its canonical string.
///
/// ```
/// use schema_collection::{semver_to_string, Semver};
///
/// assert_eq!(semver_to_string(&Semver::new(1, 2, 3)), "1.2.3");
/// ```
pub fn semver_to_string(version: &Semver) -> SchemaVersion {
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}

impl Semver {
    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// Parse a plain "1.2.3" or tagged "v1.2.3" string.
    ///
    /// Pre-release and build metadata have no place in a schema version
    /// and are rejected.
    pub fn parse(version_str: &str) -> Result<Self> {
        let stripped = version_str.strip_prefix('v').unwrap_or(version_str);
        let version = Version::parse(stripped)?;
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(SchemaError::InvalidVersion(version_str.to_string()));
        }
        Ok(Self::from(version))
    }
}

impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&semver_to_string(self))
    }
}

impl FromStr for Semver {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Version> for Semver {
    fn from(version: Version) -> Self {
        Self::new(version.major, version.minor, version.patch)
    }
}

impl From<Semver> for Version {
    fn from(version: Semver) -> Self {
        Version::new(version.major, version.minor, version.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(semver_to_string(&Semver::new(1, 2, 3)), "1.2.3");
        assert_eq!(semver_to_string(&Semver::new(0, 0, 0)), "0.0.0");
        assert_eq!(Semver::new(10, 20, 300).to_string(), "10.20.300");
    }

    #[test]
    fn test_version_parsing() {
        let v = Semver::parse("1.2.3").unwrap();
        assert_eq!(v, Semver::new(1, 2, 3));
    }

    #[test]
    fn test_version_with_v_prefix() {
        let v: Semver = "v1.2.3".parse().unwrap();
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_prerelease_rejected() {
        assert!(matches!(
            Semver::parse("1.0.0-beta.1"),
            Err(SchemaError::InvalidVersion(_))
        ));
        assert!(matches!(Semver::parse("1.0"), Err(SchemaError::Semver(_))));
    }

    #[test]
    fn test_ordering_follows_semver() {
        let mut versions = vec![
            Semver::new(1, 10, 0),
            Semver::new(1, 2, 0),
            Semver::new(0, 9, 9),
        ];
        versions.sort();
        assert_eq!(
            versions,
            vec![Semver::new(0, 9, 9), Semver::new(1, 2, 0), Semver::new(1, 10, 0)]
        );
        assert_eq!(Version::from(Semver::new(1, 2, 3)), Version::new(1, 2, 3));
    }
}
