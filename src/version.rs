use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{NextverError, Result};

/// A semantic version together with the text it was parsed from.
///
/// Tag names commonly carry a `v` prefix (`v1.2.3`); the prefix is stripped
/// before parsing but the original text is kept for display.
#[derive(Debug, Clone)]
pub struct SourceVersion {
    version: Version,
    original: String,
}

impl SourceVersion {
    /// Parse a version from a tag name or version string.
    ///
    /// Accepts an optional leading 'v' or 'V'; everything after it must be a
    /// well-formed semantic version.
    ///
    /// # Example
    /// ```ignore
    /// let v = SourceVersion::parse("v1.2.3-beta")?;
    /// assert_eq!(v.original(), "v1.2.3-beta");
    /// assert_eq!(v.semver().minor, 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        // At most one leading prefix character; "vv1.2.3" is not a version
        let clean = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);

        let version = Version::parse(clean).map_err(|e| NextverError::InvalidVersion {
            text: text.to_string(),
            source: e,
        })?;

        Ok(SourceVersion {
            version,
            original: text.to_string(),
        })
    }

    /// The `0.0.0` version used when a repository has no version tags.
    pub fn zero() -> Self {
        SourceVersion {
            version: Version::new(0, 0, 0),
            original: "0.0.0".to_string(),
        }
    }

    /// The parsed semantic version
    pub fn semver(&self) -> &Version {
        &self.version
    }

    /// The text this version was parsed from (prefix included)
    pub fn original(&self) -> &str {
        &self.original
    }
}

// Ordering follows semantic-version precedence, not the original text:
// "v1.0.0" and "1.0.0" compare equal.
impl PartialEq for SourceVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for SourceVersion {}

impl PartialOrd for SourceVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.version.cmp(&other.version)
    }
}

impl fmt::Display for SourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

/// Pick the maximum version from an ascending-sorted set.
///
/// The empty set defaults to `0.0.0`.
pub fn latest(mut versions: Vec<SourceVersion>) -> SourceVersion {
    versions.pop().unwrap_or_else(SourceVersion::zero)
}

/// Which version component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
    Major,
    Minor,
    Patch,
    None,
}

/// Apply a bump to a version.
///
/// - **Major**: major += 1, minor and patch reset to 0, prerelease cleared
/// - **Minor**: minor += 1, patch reset to 0, prerelease cleared
/// - **Patch**: if a prerelease is present it is cleared and patch stays put
///   (`1.2.3-beta` releases as `1.2.3`); otherwise patch += 1
/// - **None**: returned unchanged, prerelease included
///
/// Build metadata never survives a bump.
pub fn apply_bump(version: &Version, bump: Bump) -> Version {
    match bump {
        Bump::Major => Version {
            major: version.major + 1,
            minor: 0,
            patch: 0,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        },
        Bump::Minor => Version {
            major: version.major,
            minor: version.minor + 1,
            patch: 0,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        },
        Bump::Patch => Version {
            major: version.major,
            minor: version.minor,
            patch: if version.pre.is_empty() {
                version.patch + 1
            } else {
                version.patch
            },
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        },
        Bump::None => version.clone(),
    }
}

/// Overwrite the prerelease field with the given label.
///
/// The label must satisfy the semver prerelease grammar: dot-separated
/// alphanumeric/hyphen identifiers, no empty segments.
pub fn with_prerelease(version: &Version, label: &str) -> Result<Version> {
    let pre = Prerelease::new(label).map_err(|e| NextverError::InvalidPrerelease {
        text: label.to_string(),
        source: e,
    })?;

    Ok(Version {
        pre,
        ..version.clone()
    })
}

/// Render a version to text, with an optional literal prefix.
///
/// The prefix is concatenated directly, no separator: prefix "v" on "1.2.3"
/// yields "v1.2.3".
pub fn render(version: &Version, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("{}{}", prefix, version),
        None => version.to_string(),
    }
}
