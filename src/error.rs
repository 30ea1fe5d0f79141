use std::{io, path::PathBuf};

/// Why a pre-release part was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartDefect {
    /// The part is the empty string, e.g. the middle of `alpha..1`.
    Empty,
    /// The part is all digits, longer than one digit, and starts with `0`.
    LeadingZero,
    /// The part contains something other than ASCII alphanumerics and `-`.
    InvalidCharacter,
}

impl core::fmt::Display for PartDefect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PartDefect::Empty => "is empty",
            PartDefect::LeadingZero => "is numeric but contains a leading zero",
            PartDefect::InvalidCharacter => "contains an invalid character",
        })
    }
}

/// Errors that arise when building, parsing, or incrementing a [`Version`](crate::Version) or
/// [`PreRelease`](crate::PreRelease).
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum VersionError {
    /// The text does not match the selected (strict or loose) version grammar.
    #[error("Invalid version: `{version}`")]
    InvalidVersionFormat {
        /// The text that failed to parse.
        version: String,
    },

    /// One of the dot-separated parts of a pre-release is unacceptable.
    #[error("Pre-release part `{part}` {defect} ({pre_release})")]
    InvalidPreReleasePart {
        /// The offending part.
        part: String,
        /// The full pre-release text the part came from.
        pre_release: String,
        /// What is wrong with the part.
        defect: PartDefect,
    },

    /// A negative major, minor, or patch number was given to a constructor.
    #[error("The {name} number must be >= 0, got {value}")]
    InvalidVersionComponent {
        /// `major`, `minor`, or `patch`.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// Incrementing a major, minor, or patch number would overflow.
    #[error("The {name} number {value} cannot be incremented any further")]
    ComponentOverflow {
        /// `major`, `minor`, or `patch`.
        name: &'static str,
        /// The number that is already at its maximum.
        value: u64,
    },

    /// Build metadata given to a constructor is not dot-separated `[0-9A-Za-z-]+` identifiers.
    #[error("Invalid build metadata: `{build_metadata}`")]
    InvalidBuildMetadata {
        /// The rejected build metadata.
        build_metadata: String,
    },

    /// The update kind is not one of the recognized kinds.
    #[error("Invalid update type `{update_type}`: must be one of {expected}")]
    InvalidUpdateType {
        /// The rejected kind.
        update_type: String,
        /// Human readable list of acceptable kinds.
        expected: &'static str,
    },
}

/// Errors from reading or writing a properties file.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Reading or writing the file failed.
    #[error("Could not access properties file `{}`: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line is neither blank, a `#` comment, nor a `key=value` pair.
    #[error("Line {line_number} of `{}` should be `key=value`: {line}", path.display())]
    MalformedLine {
        /// The file being read.
        path: PathBuf,
        /// 1-based line number.
        line_number: usize,
        /// The offending line.
        line: String,
    },
}

/// Errors from [`update`](crate::update).
#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    /// No usable (present and numeric) version code from the store or the arguments.
    #[error("Invalid version code: a numeric version code is required")]
    MissingVersionCode,

    /// No usable (present and non-empty) version name from the store or the arguments.
    #[error("Invalid version: a version name is required")]
    MissingVersionName,

    /// The version code cannot be incremented without overflowing.
    #[error("Version code {code} cannot be incremented any further")]
    VersionCodeOverflow {
        /// The previous code.
        code: u64,
    },

    /// The previous version name or the build postfix is invalid.
    #[error("{0}")]
    Version(#[from] VersionError),

    /// The store could not be saved.
    #[error("{0}")]
    Store(#[from] StoreError),
}
