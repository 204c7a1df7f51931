//! Sorted text rendering of a ConfigStore

use std::borrow::Cow;
use std::fmt::Write;

use regex::Regex;

use crate::store::ConfigStore;

/// Options narrowing what ends up in the dump
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Print keys without values
    pub keys_only: bool,
    /// Print `key="value"` assignments a POSIX shell can source
    pub shell: bool,
    /// Only include keys matching this pattern
    pub filter: Option<Regex>,
}

/// Render every entry as `key: value`, sorted by key, one per line with a
/// trailing newline
pub fn format_dump(store: &ConfigStore) -> String {
    format_dump_with(store, &DumpOptions::default())
}

/// Render the store honoring `opts`
///
/// Keys are compared byte-wise (plain `str` ordering), so the output is
/// identical regardless of the order entries were loaded in.
pub fn format_dump_with(store: &ConfigStore, opts: &DumpOptions) -> String {
    let mut entries: Vec<(&str, &str)> = store
        .iter()
        .filter(|(k, _)| opts.filter.as_ref().is_none_or(|re| re.is_match(k)))
        .collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (key, value) in entries {
        let key = if opts.shell { shell_name(key) } else { Cow::Borrowed(key) };
        // Writing into a String cannot fail
        let _ = if opts.keys_only {
            writeln!(out, "{}", key)
        } else if opts.shell {
            writeln!(out, "{}=\"{}\"", key, shell_quote(value))
        } else {
            writeln!(out, "{}: {}", key, value)
        };
    }
    out
}

/// Turn a registry key into a shell variable name: `version/version` → `version_version`
fn shell_name(key: &str) -> Cow<'_, str> {
    if key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Cow::Borrowed(key);
    }
    Cow::Owned(
        key.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect(),
    )
}

/// Escape the characters that stay special inside double quotes
fn shell_quote(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '$', '`']) {
        return Cow::Borrowed(value);
    }
    let mut quoted = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    Cow::Owned(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_dump_sorted() {
        let store: ConfigStore = [("a", "1"), ("c", "3"), ("b", "2")].into_iter().collect();
        assert_eq!(format_dump(&store), "a: 1\nb: 2\nc: 3\n");
    }

    #[test]
    fn test_dump_empty_store() {
        assert_eq!(format_dump(&ConfigStore::default()), "");
    }

    #[test]
    fn test_dump_is_case_sensitive_bytewise() {
        let store: ConfigStore = [("b", "x"), ("B", "y"), ("a", "z"), ("_", "w")].into_iter().collect();
        assert_eq!(format_dump(&store), "B: y\n_: w\na: z\nb: x\n");
    }

    #[test]
    fn test_dump_keys_only() {
        let store: ConfigStore = [("z", "1"), ("y", "2")].into_iter().collect();
        let opts = DumpOptions {
            keys_only: true,
            ..Default::default()
        };
        assert_eq!(format_dump_with(&store, &opts), "y\nz\n");
    }

    #[test]
    fn test_dump_filter() {
        let store: ConfigStore = [
            ("version/version", "5.0"),
            ("version/patchlevel", "4"),
            ("hostname", "dc01"),
        ]
        .into_iter()
        .collect();
        let opts = DumpOptions {
            filter: Some(Regex::new("^version/").unwrap()),
            ..Default::default()
        };
        assert_eq!(
            format_dump_with(&store, &opts),
            "version/patchlevel: 4\nversion/version: 5.0\n"
        );
    }

    #[test]
    fn test_dump_shell_assignments() {
        let store: ConfigStore = [
            ("version/version", "1.0"),
            ("motd", "say \"hi\" to $USER"),
            ("ldap/base", ""),
        ]
        .into_iter()
        .collect();
        let opts = DumpOptions {
            shell: true,
            ..Default::default()
        };
        assert_eq!(
            format_dump_with(&store, &opts),
            "ldap_base=\"\"\nmotd=\"say \\\"hi\\\" to \\$USER\"\nversion_version=\"1.0\"\n"
        );
    }

    #[test]
    fn test_dump_shell_keys_only() {
        let store: ConfigStore = [("a/b-c", "1")].into_iter().collect();
        let opts = DumpOptions {
            shell: true,
            keys_only: true,
            ..Default::default()
        };
        assert_eq!(format_dump_with(&store, &opts), "a_b_c\n");
    }

    proptest! {
        #[test]
        fn prop_dump_lines_ascending(map in prop::collection::btree_map("[a-zA-Z0-9/_.-]{1,12}", "[ -~]{0,12}", 0..40)) {
            // Values are trimmed on load, so mirror that here
            let map: BTreeMap<String, String> = map.into_iter().map(|(k, v)| (k, v.trim().to_string())).collect();
            let store: ConfigStore = map.clone().into_iter().collect();
            let dump = format_dump(&store);

            let lines: Vec<&str> = dump.lines().collect();
            prop_assert_eq!(lines.len(), map.len());
            for (line, (k, v)) in lines.iter().zip(map.iter()) {
                prop_assert_eq!(*line, format!("{}: {}", k, v));
            }
            for pair in lines.windows(2) {
                let a = pair[0].split(": ").next().unwrap_or_default();
                let b = pair[1].split(": ").next().unwrap_or_default();
                prop_assert!(a.as_bytes() < b.as_bytes());
            }
        }

        #[test]
        fn prop_dump_independent_of_insertion_order(
            pairs in prop::collection::vec(("[a-z]{1,6}", "[a-z0-9]{0,6}"), 0..30),
        ) {
            // Deduplicate first so "last write wins" cannot differ between orders
            let unique: BTreeMap<String, String> = pairs.into_iter().collect();
            let forward: ConfigStore = unique.clone().into_iter().collect();
            let reversed: ConfigStore = unique.into_iter().rev().collect();
            prop_assert_eq!(format_dump(&forward), format_dump(&reversed));
        }
    }
}
