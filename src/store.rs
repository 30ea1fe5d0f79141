//! Key/value stores that the version name and code are read from and written back to.
use crate::error::StoreError;
use indexmap::IndexMap;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// A flat, string-keyed store of string values.
///
/// [update](crate::update) reads the previous version name and code through [PropertyStore::get],
/// and only after a successful transition writes the new ones with [PropertyStore::set] followed
/// by a single [PropertyStore::save].
pub trait PropertyStore {
    /// Returns the value for `key`, if present.
    fn get(&self, key: &str) -> Option<&str>;

    /// Sets the value for `key`, inserting it if absent.
    fn set(&mut self, key: &str, value: &str);

    /// Persists all values.
    ///
    /// # Errors
    ///
    /// - Returns a [StoreError] if the values could not be persisted.
    fn save(&mut self) -> Result<(), StoreError>;
}

/// A `.properties`-style file of `key=value` lines.
///
/// When reading, keys and values are trimmed, blank lines and lines starting with `#` are
/// skipped, and the value is everything after the first `=`. Saving rewrites the whole file as
/// `key=value` lines in the order keys were first seen (comments are not kept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesFile {
    path: PathBuf,
    properties: IndexMap<String, String>,
}

impl PropertiesFile {
    /// Reads the properties file at `path`.
    ///
    /// # Errors
    ///
    /// - Returns [StoreError::Io] if the file can't be read.
    /// - Returns [StoreError::MalformedLine] for a line that is not blank, not a comment, and
    ///   has no `=`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let properties = Self::parse(&path, &content)?;
        Ok(Self { path, properties })
    }

    /// Like [PropertiesFile::open], but returns `Ok(None)` if there is no file at `path`.
    ///
    /// # Errors
    ///
    /// - Same as [PropertiesFile::open], except for a missing file.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Option<Self>, StoreError> {
        match Self::open(path) {
            Ok(file) => Ok(Some(file)),
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The path this file was read from and will be saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(path: &Path, content: &str) -> Result<IndexMap<String, String>, StoreError> {
        let mut properties = IndexMap::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| StoreError::MalformedLine {
                    path: path.to_path_buf(),
                    line_number: idx + 1,
                    line: line.to_owned(),
                })?;
            properties.insert(key.trim().to_owned(), value.trim().to_owned());
        }
        Ok(properties)
    }

    fn render(&self) -> String {
        self.properties
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect()
    }
}

impl PropertyStore for PropertiesFile {
    fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_owned(), value.to_owned());
    }

    fn save(&mut self) -> Result<(), StoreError> {
        fs::write(&self.path, self.render()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// A [PropertyStore] that only lives in memory. [PropertyStore::save] just counts how many times
/// it was called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    properties: IndexMap<String, String>,
    saves: usize,
}

impl MemoryStore {
    /// Returns an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of times [PropertyStore::save] has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            saves: 0,
        }
    }
}

impl PropertyStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_owned(), value.to_owned());
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_open() {
        let file = file_with("# release info\n\nversion = 1.2.3\ncode=42\nurl=a=b\n");
        let props = PropertiesFile::open(file.path()).unwrap();
        assert_eq!(Some("1.2.3"), props.get("version"));
        assert_eq!(Some("42"), props.get("code"));
        assert_eq!(Some("a=b"), props.get("url"));
        assert_eq!(None, props.get("# release info"));
        assert_eq!(None, props.get("missing"));
    }

    #[test]
    fn test_open_malformed() {
        let file = file_with("version=1.2.3\njust some text\n");
        let err = PropertiesFile::open(file.path()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MalformedLine { line_number: 2, ref line, .. } if line == "just some text"
        ));
    }

    #[test]
    fn test_open_existing_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("version.properties");
        assert!(PropertiesFile::open_existing(&path).unwrap().is_none());
        assert!(matches!(
            PropertiesFile::open(&path),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn test_save_preserves_key_order() {
        let file = file_with("# comment\nversion=1.0.0\ncode=0\nother = kept\n");
        let mut props = PropertiesFile::open_existing(file.path()).unwrap().unwrap();
        props.set("code", "1");
        props.set("version", "1.0.1");
        props.set("new", "last");
        props.save().unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!("version=1.0.1\ncode=1\nother=kept\nnew=last\n", content);

        let reread = PropertiesFile::open(file.path()).unwrap();
        assert_eq!(props, reread);
    }

    #[test]
    fn test_memory_store() {
        let mut store: MemoryStore = [("version", "1.0.0")].into_iter().collect();
        assert_eq!(Some("1.0.0"), store.get("version"));
        store.set("code", "7");
        assert_eq!(Some("7"), store.get("code"));
        assert_eq!(0, store.saves());
        store.save().unwrap();
        assert_eq!(1, store.saves());
    }
}
