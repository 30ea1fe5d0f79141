use crate::{error::VersionError, grammar, pre_release::PreRelease};
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Which part of a [Version] to increment with [Version::inc].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inc {
    /// Increment the major number. See [Version::next_major].
    Major,
    /// Increment the minor number. See [Version::next_minor].
    Minor,
    /// Increment the patch number. See [Version::next_patch].
    Patch,
    /// Increment the pre-release. See [Version::next_pre_release].
    PreRelease,
}

impl Inc {
    const EXPECTED: &'static str = "major, minor, patch, pre-release";

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Inc::Major => "major",
            Inc::Minor => "minor",
            Inc::Patch => "patch",
            Inc::PreRelease => "pre-release",
        }
    }
}

impl FromStr for Inc {
    type Err = VersionError;

    /// Parses `major`, `minor`, `patch`, or `pre-release` (also `pre_release`/`prerelease`),
    /// ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidUpdateType] for anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Inc::Major),
            "minor" => Ok(Inc::Minor),
            "patch" => Ok(Inc::Patch),
            "pre-release" | "pre_release" | "prerelease" => Ok(Inc::PreRelease),
            _ => Err(VersionError::InvalidUpdateType {
                update_type: s.to_owned(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl Display for Inc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A version of the form `<major>.<minor>.<patch>[-<pre-release>][+<build-metadata>]`.
///
/// Versions are immutable: every `next_*` method returns a new one. They are ordered by
/// major, minor, and patch numbers, then by pre-release, where a version without a pre-release
/// is greater than the same version with one. Build metadata is carried along and displayed but
/// never takes part in comparisons (or equality).
///
/// # Examples
///
/// ```
/// use version_stamp::Version;
///
/// let cur: Version = "1.2.3".parse().unwrap();
/// let next = cur.next_minor(None).unwrap();
/// assert_eq!("1.3.0", next.to_string());
/// assert!(cur < next);
/// ```
///
/// Pre-releases sort before their release:
///
/// ```
/// use version_stamp::Version;
///
/// let beta = Version::parse("2.0.0-beta.1", true).unwrap();
/// let release = Version::parse("2.0.0", true).unwrap();
/// assert!(beta < release);
/// assert_eq!(release, beta.next_patch(None).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Option<PreRelease>,
    build_metadata: Option<String>,
}

impl Version {
    /// The lowest version, `0.0.0`.
    pub const MIN: Version = Version::core(0, 0, 0);

    /// Returns a version with the given numbers and no pre-release or build metadata.
    pub const fn core(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Builds a version from its components. `pre_release` is parsed with [PreRelease::parse]
    /// (so `Some("")` gives the pre-release `0`). Empty `build_metadata` is treated as absent.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidVersionComponent] if `major`, `minor`, or `patch` is
    ///   negative.
    /// - Returns [VersionError::InvalidPreReleasePart] if `pre_release` is invalid.
    /// - Returns [VersionError::InvalidBuildMetadata] if `build_metadata` is not made of
    ///   dot-separated `[0-9A-Za-z-]+` identifiers.
    pub fn new(
        major: i64,
        minor: i64,
        patch: i64,
        pre_release: Option<&str>,
        build_metadata: Option<&str>,
    ) -> Result<Self, VersionError> {
        Ok(Self {
            major: non_negative("major", major)?,
            minor: non_negative("minor", minor)?,
            patch: non_negative("patch", patch)?,
            pre_release: parse_pre_release(pre_release)?,
            build_metadata: parse_build_metadata(build_metadata)?,
        })
    }

    /// Parses a version string.
    ///
    /// With `strict`, all of `<major>.<minor>.<patch>` are required and no prefix is allowed.
    /// Otherwise, a leading `v` is accepted and a missing minor or patch number defaults to `0`.
    /// Numbers must not be zero-padded in either mode.
    ///
    /// ```
    /// use version_stamp::Version;
    ///
    /// assert_eq!("1.2.0-rc.1", Version::parse("v1.2-rc.1", false).unwrap().to_string());
    /// assert!(Version::parse("v1.2-rc.1", true).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidVersionFormat] if the string doesn't match the grammar.
    pub fn parse(version_str: &str, strict: bool) -> Result<Self, VersionError> {
        let mismatch = || VersionError::InvalidVersionFormat {
            version: version_str.to_owned(),
        };
        let matched = grammar::match_version(version_str, strict).ok_or_else(mismatch)?;

        // the grammar guarantees digits, so the only failure left is overflow
        let number = |text: Option<&str>| match text {
            Some(text) => text.parse::<u64>().map_err(|_| mismatch()),
            None => Ok(0),
        };

        Ok(Self {
            major: number(Some(matched.major))?,
            minor: number(matched.minor)?,
            patch: number(matched.patch)?,
            pre_release: parse_pre_release(matched.pre_release)?,
            build_metadata: matched.build.map(str::to_owned),
        })
    }

    /// The major number.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// The minor number.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// The patch number.
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The pre-release, if any.
    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre_release.as_ref()
    }

    /// The build metadata (without the `+`), if any.
    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    /// True if this version has a pre-release.
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// True if the major number is above zero and there is no pre-release.
    pub fn is_stable(&self) -> bool {
        self.major > 0 && self.pre_release.is_none()
    }

    /// Returns `major+1.0.0`, with the given pre-release or none at all.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidPreReleasePart] if `pre_release` is invalid.
    /// - Returns [VersionError::ComponentOverflow] if the number to increment is `u64::MAX`.
    pub fn next_major(&self, pre_release: Option<&str>) -> Result<Self, VersionError> {
        let mut next = Self::core(incremented("major", self.major)?, 0, 0);
        next.pre_release = parse_pre_release(pre_release)?;
        Ok(next)
    }

    /// Returns `major.minor+1.0`, with the given pre-release or none at all.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidPreReleasePart] if `pre_release` is invalid.
    /// - Returns [VersionError::ComponentOverflow] if the number to increment is `u64::MAX`.
    pub fn next_minor(&self, pre_release: Option<&str>) -> Result<Self, VersionError> {
        let mut next = Self::core(self.major, incremented("minor", self.minor)?, 0);
        next.pre_release = parse_pre_release(pre_release)?;
        Ok(next)
    }

    /// Returns the next patch version, with the given pre-release or none at all.
    ///
    /// The patch number is incremented unless this version is a pre-release and no new
    /// pre-release is given. In that case the pre-release is just dropped, promoting it to the
    /// release it was leading up to: `1.0.0-beta.2` becomes `1.0.0`.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidPreReleasePart] if `pre_release` is invalid.
    /// - Returns [VersionError::ComponentOverflow] if the number to increment is `u64::MAX`.
    pub fn next_patch(&self, pre_release: Option<&str>) -> Result<Self, VersionError> {
        let patch = if self.pre_release.is_none() || pre_release.is_some() {
            incremented("patch", self.patch)?
        } else {
            self.patch
        };
        let mut next = Self::core(self.major, self.minor, patch);
        next.pre_release = parse_pre_release(pre_release)?;
        Ok(next)
    }

    /// Returns the next pre-release version.
    ///
    /// If this version is already a pre-release, the patch number is kept; otherwise it is
    /// incremented. The new pre-release is `pre_release` if given, else this version's
    /// pre-release [incremented](PreRelease::increment), else none.
    ///
    /// ```
    /// use version_stamp::Version;
    ///
    /// let v = Version::parse("1.0.0-beta.1", true).unwrap();
    /// assert_eq!("1.0.0-beta.2", v.next_pre_release(None).unwrap().to_string());
    /// assert_eq!("1.0.0-rc", v.next_pre_release(Some("rc")).unwrap().to_string());
    ///
    /// let v = Version::parse("1.0.0", true).unwrap();
    /// assert_eq!("1.0.1-alpha", v.next_pre_release(Some("alpha")).unwrap().to_string());
    /// ```
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidPreReleasePart] if `pre_release` is invalid.
    /// - Returns [VersionError::ComponentOverflow] if the number to increment is `u64::MAX`.
    pub fn next_pre_release(&self, pre_release: Option<&str>) -> Result<Self, VersionError> {
        let patch = if self.pre_release.is_some() {
            self.patch
        } else {
            incremented("patch", self.patch)?
        };
        let mut next = Self::core(self.major, self.minor, patch);
        next.pre_release = match parse_pre_release(pre_release)? {
            Some(explicit) => Some(explicit),
            None => self.pre_release.as_ref().map(PreRelease::increment),
        };
        Ok(next)
    }

    /// Dispatches to the `next_*` method for `by`.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidPreReleasePart] if `pre_release` is invalid.
    /// - Returns [VersionError::ComponentOverflow] if the number to increment is `u64::MAX`.
    pub fn inc(&self, by: Inc, pre_release: Option<&str>) -> Result<Self, VersionError> {
        match by {
            Inc::Major => self.next_major(pre_release),
            Inc::Minor => self.next_minor(pre_release),
            Inc::Patch => self.next_patch(pre_release),
            Inc::PreRelease => self.next_pre_release(pre_release),
        }
    }

    /// Returns this version with its pre-release replaced (or removed, with `None`). The
    /// numbers and build metadata are kept.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidPreReleasePart] if `pre_release` is invalid.
    pub fn with_pre_release(&self, pre_release: Option<&str>) -> Result<Self, VersionError> {
        Ok(Self {
            pre_release: parse_pre_release(pre_release)?,
            ..self.clone()
        })
    }

    /// Returns just `major.minor.patch`, without pre-release or build metadata.
    pub fn without_suffixes(&self) -> Self {
        Self::core(self.major, self.minor, self.patch)
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<u64, VersionError> {
    u64::try_from(value).map_err(|_| VersionError::InvalidVersionComponent { name, value })
}

fn incremented(name: &'static str, value: u64) -> Result<u64, VersionError> {
    value
        .checked_add(1)
        .ok_or(VersionError::ComponentOverflow { name, value })
}

fn parse_pre_release(pre_release: Option<&str>) -> Result<Option<PreRelease>, VersionError> {
    pre_release.map(PreRelease::parse).transpose()
}

fn parse_build_metadata(build_metadata: Option<&str>) -> Result<Option<String>, VersionError> {
    match build_metadata {
        None | Some("") => Ok(None),
        Some(build) if build.split('.').all(grammar::is_alphanumeric_or_hyphen) => {
            Ok(Some(build.to_owned()))
        }
        Some(build) => Err(VersionError::InvalidBuildMetadata {
            build_metadata: build.to_owned(),
        }),
    }
}

impl FromStr for Version {
    type Err = VersionError;

    /// Parses a version strictly. See [Version::parse].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, true)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // build metadata is excluded, same as in `eq`
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }
        if let Some(build_metadata) = &self.build_metadata {
            write!(f, "+{build_metadata}")?;
        }
        Ok(())
    }
}
