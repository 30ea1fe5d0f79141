use crate::{
    error::{UpdateError, VersionError},
    store::PropertyStore,
    version::Version,
};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use tracing::{debug, info};

/// The kind of update to apply to a version name. The version code is incremented by one for
/// every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// `1.2.3` becomes `2.0.0`. Any pre-release is dropped.
    Major,
    /// `1.2.3` becomes `1.3.0`. Any pre-release is dropped.
    Minor,
    /// `1.2.3` becomes `1.2.4`, but `1.2.3-beta.1` becomes `1.2.3`.
    Patch,
    /// `1.2.3` becomes `1.2.3-<postfix><new code>`, replacing any existing pre-release.
    Build,
}

impl UpdateKind {
    const EXPECTED: &'static str = "major, minor, patch, build";

    /// All kinds, in order.
    pub const ALL: [UpdateKind; 4] = [
        UpdateKind::Major,
        UpdateKind::Minor,
        UpdateKind::Patch,
        UpdateKind::Build,
    ];

    /// The lowercase name, as accepted by [UpdateKind::from_str].
    pub fn name(&self) -> &'static str {
        match self {
            UpdateKind::Major => "major",
            UpdateKind::Minor => "minor",
            UpdateKind::Patch => "patch",
            UpdateKind::Build => "build",
        }
    }
}

impl FromStr for UpdateKind {
    type Err = VersionError;

    /// Parses exactly `major`, `minor`, `patch`, or `build`.
    ///
    /// # Errors
    ///
    /// - Returns [VersionError::InvalidUpdateType] for anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| VersionError::InvalidUpdateType {
                update_type: s.to_owned(),
                expected: Self::EXPECTED,
            })
    }
}

impl Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of the keys that hold the version name and code in a [PropertyStore].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    /// Key of the version name. Defaults to `version`.
    pub name: String,
    /// Key of the version code. Defaults to `code`.
    pub code: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            name: "version".to_owned(),
            code: "code".to_owned(),
        }
    }
}

/// A version name together with its version code: the result of an [update].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionInfo {
    /// The formatted version, e.g. `1.2.3-beta401`.
    pub name: String,
    /// The monotonically increasing version code.
    pub code: u64,
}

impl VersionInfo {
    /// Pairs a name with a code.
    pub fn new(name: impl Into<String>, code: u64) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }
}

impl Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// What to update, and the previous name and code to use when no store is given.
///
/// ```
/// use version_stamp::{update, StoreKeys, UpdateKind, UpdateRequest};
///
/// let request = UpdateRequest::new(UpdateKind::Build)
///     .version_name("1.0.0")
///     .version_code(400)
///     .postfix("beta");
/// let info = update(&request, &StoreKeys::default(), None).unwrap();
/// assert_eq!("1.0.0-beta401", info.name);
/// assert_eq!(401, info.code);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest<'a> {
    /// The kind of update.
    pub kind: UpdateKind,
    /// The previous version name, used when there is no store.
    pub version_name: Option<&'a str>,
    /// The previous version code, used when there is no store.
    pub version_code: Option<u64>,
    /// Prefix of the build number in the pre-release of a [UpdateKind::Build] update.
    pub postfix: Option<&'a str>,
}

impl<'a> UpdateRequest<'a> {
    /// A request of the given kind with no name, code, or postfix.
    pub fn new(kind: UpdateKind) -> Self {
        Self {
            kind,
            version_name: None,
            version_code: None,
            postfix: None,
        }
    }

    /// Sets the previous version name.
    pub fn version_name(mut self, version_name: &'a str) -> Self {
        self.version_name = Some(version_name);
        self
    }

    /// Sets the previous version code.
    pub fn version_code(mut self, version_code: u64) -> Self {
        self.version_code = Some(version_code);
        self
    }

    /// Sets the build postfix.
    pub fn postfix(mut self, postfix: &'a str) -> Self {
        self.postfix = Some(postfix);
        self
    }
}

/// Parses a version code, allowing surrounding whitespace. Returns `None` for anything that is
/// not a non-negative integer.
pub fn parse_version_code(code_str: &str) -> Option<u64> {
    code_str.trim().parse().ok()
}

/// Computes the next version name and code, and writes them back to `store` if one is given.
///
/// The previous name and code are read from `store` under `keys` when a store is given, and
/// taken from `request` otherwise. The code always becomes the previous code plus one. The name
/// is parsed strictly and advanced according to [UpdateRequest::kind]:
///
/// - [UpdateKind::Major], [UpdateKind::Minor], [UpdateKind::Patch]: see
///   [Version::next_major], [Version::next_minor], and [Version::next_patch] (called without a
///   new pre-release).
/// - [UpdateKind::Build]: the numbers are kept, and the pre-release becomes the postfix (if any)
///   followed by the new code.
///
/// The store is only written (and saved once) after the new name and code are fully computed.
///
/// # Errors
///
/// - Returns [UpdateError::MissingVersionCode] if the previous code is absent or not numeric.
/// - Returns [UpdateError::MissingVersionName] if the previous name is absent or empty.
/// - Returns [UpdateError::VersionCodeOverflow] if the previous code is [u64::MAX].
/// - Returns [UpdateError::Version] if the previous name doesn't parse, one of its numbers
///   cannot be incremented, or the postfix makes an invalid pre-release.
/// - Returns [UpdateError::Store] if saving the store fails.
pub fn update(
    request: &UpdateRequest<'_>,
    keys: &StoreKeys,
    store: Option<&mut dyn PropertyStore>,
) -> Result<VersionInfo, UpdateError> {
    match store {
        Some(store) => {
            let code = store
                .get(&keys.code)
                .and_then(parse_version_code)
                .ok_or(UpdateError::MissingVersionCode)?;
            let name = store
                .get(&keys.name)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .ok_or(UpdateError::MissingVersionName)?;
            debug!(%name, code, "read previous version from store");

            let next = next_version_info(request, &name, code)?;
            store.set(&keys.name, &next.name);
            store.set(&keys.code, &next.code.to_string());
            store.save()?;
            info!(
                old_name = %name,
                old_code = code,
                new_name = %next.name,
                new_code = next.code,
                "updated version in store"
            );
            Ok(next)
        }
        None => {
            let code = request.version_code.ok_or(UpdateError::MissingVersionCode)?;
            let name = request
                .version_name
                .filter(|name| !name.is_empty())
                .ok_or(UpdateError::MissingVersionName)?;
            debug!(name, code, "using previous version from arguments");

            let next = next_version_info(request, name, code)?;
            info!(
                old_name = name,
                old_code = code,
                new_name = %next.name,
                new_code = next.code,
                "computed next version"
            );
            Ok(next)
        }
    }
}

fn next_version_info(
    request: &UpdateRequest<'_>,
    name: &str,
    code: u64,
) -> Result<VersionInfo, UpdateError> {
    let version = Version::parse(name, true)?;
    let next_code = code
        .checked_add(1)
        .ok_or(UpdateError::VersionCodeOverflow { code })?;

    let next_version = match request.kind {
        UpdateKind::Major => version.next_major(None)?,
        UpdateKind::Minor => version.next_minor(None)?,
        UpdateKind::Patch => version.next_patch(None)?,
        UpdateKind::Build => {
            let pre_release = format!("{}{next_code}", request.postfix.unwrap_or_default());
            version.with_pre_release(Some(&pre_release))?
        }
    };

    Ok(VersionInfo::new(next_version.to_string(), next_code))
}
