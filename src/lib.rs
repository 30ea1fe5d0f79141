//! # version-stamp
//!
//! A library for assigning and advancing release identifiers made of two values: a human-readable
//! [SemVer](https://semver.org/)-like *version name* and a monotonically increasing integer
//! *version code*.
//!
//! ## Examples
//!
//! Quickly get the next name and code:
//!
//! ```
//! use version_stamp::prelude::*;
//!
//! let request = UpdateRequest::new(UpdateKind::Patch)
//!     .version_name("1.0.0-beta.400") // previous version name
//!     .version_code(400);             // previous version code
//! let next = update(&request, &StoreKeys::default(), None).unwrap();
//! assert_eq!(next, VersionInfo::new("1.0.0", 401));
//! ```
//!
//! Or keep the name and code in a properties file, which is read, updated, and saved in one go:
//!
//! ```no_run
//! use version_stamp::prelude::*;
//!
//! let mut file = PropertiesFile::open("version.properties").unwrap();
//! let request = UpdateRequest::new(UpdateKind::Build).postfix("beta");
//! let next = update(&request, &StoreKeys::default(), Some(&mut file)).unwrap();
//! println!("{next}");
//! ```
//!
//! Or work with [`Version`]s directly:
//!
//! ```
//! use version_stamp::prelude::*;
//!
//! let version = Version::parse("v1.2", false).unwrap();
//! let next = version.inc(Inc::PreRelease, Some("rc.1")).unwrap();
//! assert_eq!("1.2.1-rc.1", next.to_string());
//! assert!(version < next);
//! ```
//!
//! ## Important Terms
//!
//! - **Version name**: The formatted string `<major>.<minor>.<patch>[-<pre-release>][+<build>]`.
//!   It's modeled by the [`Version`] struct. Versions can be incremented and compared amongst
//!   each other.
//! - **Version code**: An integer that accompanies the version name and is incremented by one on
//!   every [`update`], whatever its [`UpdateKind`].
//! - **Pre-release**: Dot-separated identifiers after a `-`, modeled by [`PreRelease`]. A version
//!   with a pre-release has lower precedence than the same version without one.
//! - **Build metadata**: Dot-separated identifiers after a `+`. They are kept but never take part
//!   in comparisons.
//!
//! ## Update Kinds
//!
//! | Kind | Previous | Next |
//! |---|---|---|
//! | `major` | `1.2.3-beta.4` | `2.0.0` |
//! | `minor` | `1.2.3-beta.4` | `1.3.0` |
//! | `patch` | `1.2.3` | `1.2.4` |
//! | `patch` | `1.2.3-beta.4` | `1.2.3` |
//! | `build` (postfix `rc`, code `41`) | `1.2.3` | `1.2.3-rc42` |
//!
//! ## Prelude
//!
//! version-stamp provides a prelude module for convenience. It contains everything needed to
//! interact with the library.
//!
//! Use it with:
//!
//! ```
//! use version_stamp::prelude::*;
//! ```
#![warn(missing_docs)]

mod error;
mod grammar;
mod pre_release;
mod store;
mod updater;
mod version;

pub use crate::error::{PartDefect, StoreError, UpdateError, VersionError};
pub use crate::pre_release::PreRelease;
pub use crate::store::{MemoryStore, PropertiesFile, PropertyStore};
pub use crate::updater::{
    parse_version_code, update, StoreKeys, UpdateKind, UpdateRequest, VersionInfo,
};
pub use crate::version::{Inc, Version};

/// A convenience module appropriate for glob imports (`use version_stamp::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::update;
    #[doc(no_inline)]
    pub use crate::Inc;
    #[doc(no_inline)]
    pub use crate::MemoryStore;
    #[doc(no_inline)]
    pub use crate::PreRelease;
    #[doc(no_inline)]
    pub use crate::PropertiesFile;
    #[doc(no_inline)]
    pub use crate::PropertyStore;
    #[doc(no_inline)]
    pub use crate::StoreKeys;
    #[doc(no_inline)]
    pub use crate::UpdateError;
    #[doc(no_inline)]
    pub use crate::UpdateKind;
    #[doc(no_inline)]
    pub use crate::UpdateRequest;
    #[doc(no_inline)]
    pub use crate::Version;
    #[doc(no_inline)]
    pub use crate::VersionError;
    #[doc(no_inline)]
    pub use crate::VersionInfo;
}
