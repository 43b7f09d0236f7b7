//! Property-based tests for path normalization and installer arguments.
//!
//! Uses `proptest` to verify invariants across many random inputs.

use proptest::prelude::*;

use agent_provision::domain::installer_args;
use agent_provision::domain::path::{normalize, remote_file_name};

proptest! {
    /// Normalizing twice is the same as normalizing once.
    #[test]
    fn prop_normalize_is_idempotent(path in ".{0,40}", sep in prop::sample::select(vec!['/', '\\'])) {
        let once = normalize(&path, sep);
        prop_assert_eq!(normalize(&once, sep), once);
    }

    /// The result always ends with the separator and starts with the input.
    #[test]
    fn prop_normalize_only_appends(path in ".{0,40}", sep in prop::sample::select(vec!['/', '\\'])) {
        let normalized = normalize(&path, sep);
        prop_assert!(normalized.ends_with(sep));
        prop_assert!(normalized.starts_with(&path));
        prop_assert!(normalized.len() - path.len() <= 1);
    }

    /// Joining a normalized directory with a name keeps the name as base name.
    #[test]
    fn prop_remote_file_name_roundtrips(dir in "[a-zA-Z0-9/_.-]{0,30}", name in "[a-zA-Z0-9_.-]{1,20}") {
        let remote = format!("{}{name}", normalize(&dir, '/'));
        prop_assert_eq!(remote_file_name(&remote), name.as_str());
    }

    /// The installer always gets four arguments, each flag glued to its value.
    #[test]
    fn prop_installer_args_shape(token in ".{0,20}", url in ".{0,20}", version in ".{0,20}") {
        let args = installer_args(&token, &url, &version);
        prop_assert_eq!(args.len(), 4);
        prop_assert_eq!(&args[0], "install");
        prop_assert_eq!(&args[1], &format!("-token {token}"));
        prop_assert_eq!(&args[2], &format!("-url {url}"));
        prop_assert_eq!(&args[3], &format!("-version {version}"));
    }
}

#[test]
fn test_normalize_keeps_correct_separator() {
    assert_eq!(normalize("a/", '/'), "a/");
}

#[test]
fn test_installer_args_literal() {
    assert_eq!(
        installer_args("T", "U", "V"),
        ["install", "-token T", "-url U", "-version V"]
    );
}
