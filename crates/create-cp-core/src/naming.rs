//! Target directory normalization and package name validation

use regex::Regex;
use std::sync::LazyLock;

static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
        .expect("package name regex is valid")
});
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-~]+").expect("disallowed-char regex is valid"));

/// Normalize a user-supplied target directory.
///
/// Surrounding whitespace and trailing `/` separators are removed. Returns
/// `None` for absent input, and for input that normalizes to nothing.
pub fn format_target_dir(input: Option<&str>) -> Option<String> {
    let trimmed = input?
        .trim()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether `name` is an acceptable `package.json` name (`[@scope/]name`)
pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME_RE.is_match(name)
}

/// Derive a package name from an arbitrary project name.
///
/// The result may still be empty, or start with `-`, when the input holds
/// no usable characters.
pub fn to_valid_package_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let hyphenated = WHITESPACE_RE.replace_all(&lowered, "-");
    let stripped = hyphenated
        .strip_prefix(['.', '_'])
        .unwrap_or(&*hyphenated);
    DISALLOWED_RE.replace_all(stripped, "-").into_owned()
}
