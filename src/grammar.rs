//! Regular expressions for the version grammar.
//!
//! The building blocks are kept as string constants so that the full patterns read like the
//! grammar itself:
//!
//! ```text
//! numeric          := 0 | [1-9][0-9]*
//! non-numeric      := [0-9]* [a-zA-Z-] [0-9a-zA-Z-]*
//! pre-release      := "-" part ("." part)*          where part := numeric | non-numeric
//! build            := "+" [0-9a-zA-Z-]+ ("." [0-9a-zA-Z-]+)*
//! strict version   := numeric "." numeric "." numeric pre-release? build?
//! loose version    := "v"? numeric ("." numeric)? ("." numeric)? pre-release? build?
//! ```
use regex::{Captures, Regex};
use std::sync::LazyLock;

const NUMERIC: &str = r"0|[1-9][0-9]*";
const ALPHANUMERIC_OR_HYPHEN: &str = r"[0-9a-zA-Z-]";
const LETTER_OR_HYPHEN: &str = r"[a-zA-Z-]";

fn non_numeric() -> String {
    format!("[0-9]*{LETTER_OR_HYPHEN}{ALPHANUMERIC_OR_HYPHEN}*")
}

fn pre_release_part() -> String {
    format!("(?:{NUMERIC}|{})", non_numeric())
}

/// `-` followed by dot-separated parts. Captures the text after the hyphen as `pre`.
fn pre_release() -> String {
    let part = pre_release_part();
    format!(r"(?:-(?P<pre>{part}(?:\.{part})*))")
}

/// `+` followed by dot-separated identifiers. Captures the text after the plus as `build`.
fn build() -> String {
    format!(r"(?:\+(?P<build>{ALPHANUMERIC_OR_HYPHEN}+(?:\.{ALPHANUMERIC_OR_HYPHEN}+)*))")
}

static STRICT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"^(?P<major>{NUMERIC})\.(?P<minor>{NUMERIC})\.(?P<patch>{NUMERIC}){}?{}?$",
        pre_release(),
        build()
    );
    Regex::new(&pattern).unwrap_or_else(|e| panic!("strict version pattern is valid: {e}"))
});

static LOOSE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"^v?(?P<major>{NUMERIC})(?:\.(?P<minor>{NUMERIC}))?(?:\.(?P<patch>{NUMERIC}))?{}?{}?$",
        pre_release(),
        build()
    );
    Regex::new(&pattern).unwrap_or_else(|e| panic!("loose version pattern is valid: {e}"))
});

/// The raw pieces of a version string that matched one of the grammars. Absent minor/patch
/// (loose grammar only) are `None`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct VersionMatch<'vs> {
    pub(crate) major: &'vs str,
    pub(crate) minor: Option<&'vs str>,
    pub(crate) patch: Option<&'vs str>,
    pub(crate) pre_release: Option<&'vs str>,
    pub(crate) build: Option<&'vs str>,
}

impl<'vs> VersionMatch<'vs> {
    fn from_captures(caps: &Captures<'vs>) -> Option<Self> {
        Some(Self {
            major: caps.name("major")?.as_str(),
            minor: caps.name("minor").map(|m| m.as_str()),
            patch: caps.name("patch").map(|m| m.as_str()),
            pre_release: caps.name("pre").map(|m| m.as_str()),
            build: caps.name("build").map(|m| m.as_str()),
        })
    }
}

/// Matches `version_str` against the strict grammar (`strict == true`) or the loose one.
pub(crate) fn match_version(version_str: &str, strict: bool) -> Option<VersionMatch<'_>> {
    let regex = if strict {
        &*STRICT_VERSION
    } else {
        &*LOOSE_VERSION
    };
    regex
        .captures(version_str)
        .and_then(|caps| VersionMatch::from_captures(&caps))
}

/// True if `part` is made only of ASCII digits (and is not empty).
pub(crate) fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

/// True if `part` is made only of ASCII alphanumerics and hyphens (and is not empty).
pub(crate) fn is_alphanumeric_or_hyphen(part: &str) -> bool {
    !part.is_empty()
        && part
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0.0.0", true)]
    #[case("1.2.3", true)]
    #[case("10.20.30", true)]
    #[case("1.2.3-alpha", true)]
    #[case("1.2.3-alpha.1", true)]
    #[case("1.2.3-0", true)]
    #[case("1.2.3-0a", true)] // digits followed by a letter is non-numeric, leading zero ok
    #[case("1.2.3-x-y-z.--", true)]
    #[case("1.2.3+build.5", true)]
    #[case("1.2.3-rc.1+build.0005", true)] // build identifiers may have leading zeros
    #[case("01.2.3", false)] // zero-padding disallowed
    #[case("1.02.3", false)]
    #[case("1.2.03", false)]
    #[case("1.2.3-01", false)] // numeric pre-release part with leading zero
    #[case("1.2.3-alpha..1", false)]
    #[case("1.2.3-", false)]
    #[case("1.2.3+", false)]
    #[case("1.2.3-alpha_1", false)]
    #[case("1.2", false)] // strict requires all three components
    #[case("v1.2.3", false)] // strict has no prefix
    #[case(" 1.2.3", false)]
    fn test_strict_grammar(#[case] version_str: &str, #[case] accepted: bool) {
        assert_eq!(match_version(version_str, true).is_some(), accepted);
    }

    #[rstest]
    #[case("1", true)]
    #[case("1.2", true)]
    #[case("1.2.3", true)]
    #[case("v1", true)]
    #[case("v1.2-beta+exp", true)]
    #[case("v1.2.3-beta.4", true)]
    #[case("V1.2.3", false)] // only lowercase prefix
    #[case("vv1", false)]
    #[case("1.", false)]
    #[case("01.2", false)]
    #[case("1.2.3.4", false)]
    fn test_loose_grammar(#[case] version_str: &str, #[case] accepted: bool) {
        assert_eq!(match_version(version_str, false).is_some(), accepted);
    }

    #[test]
    fn test_captures() {
        let m = match_version("v1.2-beta.3+sha.abc", false).unwrap();
        assert_eq!(
            m,
            VersionMatch {
                major: "1",
                minor: Some("2"),
                patch: None,
                pre_release: Some("beta.3"),
                build: Some("sha.abc"),
            }
        );
    }

    #[test]
    fn test_character_classes() {
        assert!(is_numeric("0123"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("1a"));
        assert!(is_alphanumeric_or_hyphen("a-1"));
        assert!(!is_alphanumeric_or_hyphen(""));
        assert!(!is_alphanumeric_or_hyphen("a.b"));
        assert!(!is_alphanumeric_or_hyphen("ü"));
    }
}
