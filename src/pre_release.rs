use crate::{
    error::{PartDefect, VersionError},
    grammar::{is_alphanumeric_or_hyphen, is_numeric},
};
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};

const DEFAULT_INIT_PART: &str = "0";

/// The pre-release component of a version, e.g. `beta.3` in `1.2.0-beta.3`.
///
/// A pre-release is an ordered list of one or more dot-separated parts. Each part is made of
/// ASCII alphanumerics and hyphens, and a part made only of digits must not have a leading zero
/// (unless it is exactly `0`).
///
/// The first part is conventionally a label like `beta` (see [PreRelease::identity]), and the
/// parts after it carry numeric state that [PreRelease::increment] advances.
///
/// ```
/// use version_stamp::PreRelease;
///
/// let pre = PreRelease::parse("beta.3").unwrap();
/// assert_eq!("beta.4", pre.increment().to_string());
/// assert!(PreRelease::parse("beta.03").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    parts: Vec<String>,
}

impl PreRelease {
    /// Parses pre-release text (without the leading `-`).
    ///
    /// Empty or whitespace-only text gives the default pre-release, `0`. Surrounding whitespace
    /// is otherwise ignored.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidPreReleasePart] for the first part that is empty, contains
    ///   a character other than `[0-9A-Za-z-]`, or is numeric with a leading zero.
    pub fn parse(pre_release_str: &str) -> Result<Self, VersionError> {
        let trimmed = pre_release_str.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let parts = trimmed
            .split('.')
            .map(|part| match Self::validate_part(part) {
                Some(defect) => Err(VersionError::InvalidPreReleasePart {
                    part: part.to_owned(),
                    pre_release: pre_release_str.to_owned(),
                    defect,
                }),
                None => Ok(part.to_owned()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { parts })
    }

    fn validate_part(part: &str) -> Option<PartDefect> {
        if part.is_empty() {
            Some(PartDefect::Empty)
        } else if is_numeric(part) && part.len() > 1 && part.starts_with('0') {
            Some(PartDefect::LeadingZero)
        } else if !is_alphanumeric_or_hyphen(part) {
            Some(PartDefect::InvalidCharacter)
        } else {
            None
        }
    }

    /// Returns the first part, conventionally the pre-release label (`beta` in `beta.3`).
    pub fn identity(&self) -> &str {
        // there is always at least one part
        &self.parts[0]
    }

    /// Returns the dot-separated parts.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns a new pre-release where the last numeric part is incremented by one. If there is
    /// no numeric part, a new part `0` is appended instead.
    ///
    /// ```
    /// use version_stamp::PreRelease;
    ///
    /// let inc = |s: &str| PreRelease::parse(s).unwrap().increment().to_string();
    /// assert_eq!("alpha.2.beta", inc("alpha.1.beta"));
    /// assert_eq!("rc.0", inc("rc"));
    /// assert_eq!("10", inc("9"));
    /// ```
    pub fn increment(&self) -> Self {
        let mut parts = self.parts.clone();
        match parts.iter_mut().rev().find(|part| is_numeric(part)) {
            Some(last_numeric) => *last_numeric = increment_decimal(last_numeric),
            None => parts.push(DEFAULT_INIT_PART.to_owned()),
        }
        Self { parts }
    }

    fn compare_parts(a: &str, b: &str) -> Ordering {
        match (is_numeric(a), is_numeric(b)) {
            // without leading zeros, a longer number is a bigger one. this also handles values
            // that would overflow any fixed-width integer.
            (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.cmp(b),
        }
    }
}

/// Adds one to a string of ASCII digits.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    // every digit carried over
    format!("1{}", String::from_utf8_lossy(&bytes))
}

impl Default for PreRelease {
    /// The pre-release `0`.
    fn default() -> Self {
        Self {
            parts: vec![DEFAULT_INIT_PART.to_owned()],
        }
    }
}

impl Ord for PreRelease {
    /// Compares part by part. Numeric parts compare as integers and sort before alphanumeric
    /// parts, which compare lexically. If one pre-release is a prefix of the other, the shorter
    /// one is lesser.
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts
            .iter()
            .zip(&other.parts)
            .map(|(a, b)| Self::compare_parts(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.parts.len().cmp(&other.parts.len()))
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for PreRelease {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}
