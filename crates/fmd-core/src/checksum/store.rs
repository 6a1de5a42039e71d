//! The checksum store: `<hex-digest>  <filename>` per line, `sha256sum` style.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use super::hash::is_sha256_hex;

/// Filename → lowercase hex digest, kept sorted by filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumStore {
    entries: BTreeMap<String, String>,
}

impl ChecksumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse store text. Blank lines and `#` comments are skipped, a leading
    /// `*` (binary mode marker) on the filename is dropped, and lines without
    /// a valid digest are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((digest, name)) = line.split_once(char::is_whitespace) else {
                tracing::warn!("checksum store line {}: no filename", idx + 1);
                continue;
            };
            let name = name.trim_start();
            let name = name.strip_prefix('*').unwrap_or(name);
            if name.is_empty() || !is_sha256_hex(digest) {
                tracing::warn!("checksum store line {}: malformed entry", idx + 1);
                continue;
            }
            entries.insert(name.to_string(), digest.to_ascii_lowercase());
        }
        Self { entries }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, digest) in &self.entries {
            out.push_str(digest);
            out.push_str("  ");
            out.push_str(name);
            out.push('\n');
        }
        out
    }

    /// Read the store at `path`; Ok(None) when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self::parse(&text))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read checksum store {}", path.display())),
        }
    }

    /// Write to a temp file next to `path`, fsync, then rename over `path`,
    /// so an interrupted write never leaves a partial store behind.
    pub fn save_atomic(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(self.render().as_bytes())
            .context("write checksum store")?;
        tmp.as_file().sync_all().context("sync checksum store")?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("rename checksum store into {}", path.display()))?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Insert or overwrite; returns the previous digest.
    pub fn insert(&mut self, name: impl Into<String>, digest: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), digest.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D1: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";
    const D2: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn parse_skips_comments_and_junk() {
        let text = format!(
            "# generated\n\n{D1}  data/b.csv\nnot-a-digest  data/x.csv\n{D2}\n{D2}  data/a.csv\n"
        );
        let store = ChecksumStore::parse(&text);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("data/a.csv"), Some(D2));
        assert_eq!(store.get("data/b.csv"), Some(D1));
        assert_eq!(store.get("data/x.csv"), None);
    }

    #[test]
    fn parse_binary_marker_spaces_and_uppercase() {
        let upper = D1.to_ascii_uppercase();
        let text = format!("{upper} *data/my file.csv\n");
        let store = ChecksumStore::parse(&text);
        assert_eq!(store.get("data/my file.csv"), Some(D1));
    }

    #[test]
    fn render_is_sorted_two_space_format() {
        let mut store = ChecksumStore::new();
        store.insert("data/b.csv", D1);
        store.insert("data/a.csv", D2);
        assert_eq!(
            store.render(),
            format!("{D2}  data/a.csv\n{D1}  data/b.csv\n")
        );
        assert_eq!(ChecksumStore::parse(&store.render()), store);
    }

    #[test]
    fn insert_overwrites() {
        let mut store = ChecksumStore::new();
        assert_eq!(store.insert("data/a.csv", D1), None);
        assert_eq!(store.insert("data/a.csv", D2).as_deref(), Some(D1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ChecksumStore::load(&dir.path().join("checksums.sha256"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn save_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checksums.sha256");
        std::fs::write(&path, "garbage that is not a store\n").unwrap();

        let mut store = ChecksumStore::new();
        store.insert("data/a.csv", D1);
        store.save_atomic(&path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("{D1}  data/a.csv\n")
        );
        // No temp files left behind.
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("checksums.sha256")]);
    }
}
