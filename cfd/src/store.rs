//! Flat key/value registry loading

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::DumpError;

/// Immutable key → value mapping read once from a registry file
///
/// Entries are unordered; sorting happens only when the store is dumped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    entries: HashMap<String, String>,
}

impl ConfigStore {
    /// Read and parse a registry file
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, and
    /// lines that are not key/value pairs are skipped with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DumpError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "ConfigStore::load: called");

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DumpError::NotFound {
                path: path.to_path_buf(),
            },
            _ => DumpError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{} is not valid UTF-8, invalid bytes replaced", path.display());
        }

        let store = Self::parse(&content);
        info!("Loaded {} entries from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse registry text
    fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Continuation lines of multi-line values carry no separator
            let Some(sep) = line.find(['=', ':']) else {
                warn!("Skipping line {} without separator: {:?}", idx + 1, raw);
                continue;
            };
            let key = line[..sep].trim();
            if key.is_empty() {
                warn!("Skipping line {} with empty key: {:?}", idx + 1, raw);
                continue;
            }
            let value = line[sep + 1..].trim();

            if let Some(old) = entries.insert(key.to_string(), value.to_string()) {
                debug!(%key, %old, "ConfigStore::parse: duplicate key overwritten");
            }
        }

        Self { entries }
    }

    /// Look up a single value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_registry(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("base.conf");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_equals_format() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(&temp, "a=1\nc=3\nb=2\n");

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("a"), Some("1"));
        assert_eq!(store.get("c"), Some("3"));
    }

    #[test]
    fn test_load_colon_format_with_comments() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(
            &temp,
            "# univention_ base.conf\n\nversion/version: 5.0\nhostname: dc01\n  # indented comment\n",
        );

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("version/version"), Some("5.0"));
        assert_eq!(store.get("hostname"), Some("dc01"));
    }

    #[test]
    fn test_load_trims_and_splits_on_first_separator() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(&temp, "  url =  http://example.org:8080/x=y  \nempty=\n");

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.get("url"), Some("http://example.org:8080/x=y"));
        assert_eq!(store.get("empty"), Some(""));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(&temp, "key=first\nkey: second\n");

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key"), Some("second"));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.conf");

        let err = ConfigStore::load(&path).unwrap_err();
        assert!(matches!(err, DumpError::NotFound { .. }));
        assert!(err.to_string().contains("nope.conf"));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let temp = TempDir::new().unwrap();

        let err = ConfigStore::load(temp.path()).unwrap_err();
        assert!(matches!(err, DumpError::Read { .. }));
    }

    #[test]
    fn test_load_latin1_value_is_replaced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("latin1.conf");
        fs::write(&path, b"location: M\xfcnchen\nhostname: dc01\n").unwrap();

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("location"), Some("M\u{FFFD}nchen"));
        assert_eq!(store.get("hostname"), Some("dc01"));
    }

    #[test]
    fn test_continuation_lines_are_skipped() {
        let store = ConfigStore::parse("version/repository-version: 5.0\nmotd: line one\nline two\n");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("version/repository-version"), Some("5.0"));
        assert_eq!(store.get("motd"), Some("line one"));
    }

    #[test]
    fn test_load_skips_malformed_and_empty_key_lines() {
        let temp = TempDir::new().unwrap();
        let path = write_registry(&temp, "a=1\njust some words\n=value\n: other\nb=2\n");

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), Some("1"));
        assert_eq!(store.get("b"), Some("2"));
    }

    #[test]
    fn test_from_iter() {
        let store: ConfigStore = [("x", "1"), ("y", "2")].into_iter().collect();
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert_eq!(store.get("y"), Some("2"));
        assert_eq!(store.get("z"), None);
    }
}
