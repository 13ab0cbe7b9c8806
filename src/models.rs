use chrono::{SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const UNKNOWN_BUILD: &str = "Unknown";

/// One language/architecture/file/URL tuple taken from a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRecord {
    pub language: String,
    pub architecture: String,
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub version_name: String,
    pub version_label: String,
    pub build: String,
    pub downloads: Vec<DownloadRecord>,
}

impl VersionRecord {
    pub fn download_count(&self) -> usize {
        self.downloads.len()
    }
}

/// Category label → versions, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: Vec<(String, Vec<VersionRecord>)>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, category: impl Into<String>, versions: Vec<VersionRecord>) {
        let category = category.into();
        match self.entries.iter_mut().find(|(k, _)| *k == category) {
            Some((_, existing)) => *existing = versions,
            None => self.entries.push((category, versions)),
        }
    }

    /// Merge `other` into `self`, entry by entry.
    pub fn extend(&mut self, other: CategoryMap) {
        for (category, versions) in other.entries {
            self.insert(category, versions);
        }
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<&[VersionRecord]> {
        self.entries
            .iter()
            .find(|(k, _)| k == category)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[VersionRecord])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, versions) in &self.entries {
            map.serialize_entry(category, versions)?;
        }
        map.end()
    }
}

/// Top-level output artifact.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub last_updated: String,
    pub source: String,
    pub windows_versions: CategoryMap,
    pub office_versions: CategoryMap,
}

impl Catalog {
    pub fn new(source: &str) -> Self {
        Catalog {
            last_updated: utc_timestamp(),
            source: source.to_string(),
            windows_versions: CategoryMap::new(),
            office_versions: CategoryMap::new(),
        }
    }

    pub fn category_count(&self) -> usize {
        self.windows_versions.len() + self.office_versions.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// e.g. `2025-10-15T09:30:12.123456Z`
fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
