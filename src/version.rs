use std::fmt;

/// Fallback when the manifest's version cannot be parsed.
///
/// Malformed input must never abort a release run; it produces a
/// deterministic bootstrap version instead.
pub const FALLBACK_VERSION: Version = Version {
    major: 0,
    minor: 0,
    patch: 1,
};

/// Semantic version representation (major.minor.patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version from a manifest value string.
    ///
    /// A pre-release or build suffix introduced by the first hyphen
    /// (e.g. "-SNAPSHOT", "-RC1") is stripped before parsing; it is not
    /// preserved through a bump. The remainder must be exactly three
    /// dot-separated non-negative integers.
    ///
    /// # Returns
    /// * `Some(Version)` - Successfully parsed version
    /// * `None` - Wrong number of components or a non-integer component
    pub fn parse(value: &str) -> Option<Self> {
        let base = value.split('-').next().unwrap_or("");

        let parts: Vec<&str> = base.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        let major = parts[0].parse::<u32>().ok()?;
        let minor = parts[1].parse::<u32>().ok()?;
        let patch = parts[2].parse::<u32>().ok()?;

        Some(Version::new(major, minor, patch))
    }

    /// Increment the patch component, leaving major and minor unchanged
    pub fn bump_patch(&self) -> Self {
        Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch + 1,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Computes the next patch version for a manifest value string.
///
/// Well-formed input gets its patch component incremented and any hyphen
/// suffix dropped; anything else falls back to [FALLBACK_VERSION]. Pure
/// function, never fails.
pub fn next_patch(current: &str) -> Version {
    match Version::parse(current) {
        Some(version) => version.bump_patch(),
        None => FALLBACK_VERSION,
    }
}
