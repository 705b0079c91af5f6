//! # Repository Index
//!
//! The persistent path → repository mapping, stored as a JSON document in the
//! configuration directory (`cache.json`). Each record's `path` is its natural
//! key: two clone URLs that canonicalize to the same slot share one record.
//!
//! ## Document formats
//!
//! The current format is:
//!
//! ```json
//! {
//!   "repositories": [
//!     {"name": "go", "url": "...", "path": "...", "platform": "github.com", "added_at": "2024-05-01T10:00:00Z"}
//!   ],
//!   "updated_at": "2024-05-01T10:00:00Z"
//! }
//! ```
//!
//! Older installations wrote a flat object keyed by repository path, each value
//! holding at least a `repo` URL, plus an ignorable `version` key. Such
//! documents are migrated in memory on load and written back in the current
//! format on the next save.
//!
//! A document that exists but parses under neither format is reported as
//! [`Error::CorruptIndex`] instead of being replaced with an empty index.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::filesystem::write_json_atomic;
use crate::identity::RepositoryIdentity;

/// Key of the current-format record list.
const REPOSITORIES_KEY: &str = "repositories";

/// Top-level key of legacy documents that is not a repository.
const LEGACY_VERSION_KEY: &str = "version";

/// Host substrings recognized when migrating legacy records.
const KNOWN_PLATFORMS: &[(&str, &str)] = &[
    ("github.com", "github"),
    ("gitlab.com", "gitlab"),
    ("gitee.com", "gitee"),
    ("code.byted.org", "byted"),
    ("git.byted.org", "byted"),
];

/// A managed repository as persisted in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub url: String,
    pub path: PathBuf,
    pub platform: String,
    pub added_at: DateTime<Utc>,
}

impl RepositoryRecord {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        path: impl Into<PathBuf>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            path: path.into(),
            platform: platform.into(),
            added_at: Utc::now(),
        }
    }

    /// Build the record for a repository resolved to `identity` and living at `path`.
    pub fn from_identity(identity: &RepositoryIdentity, path: impl Into<PathBuf>) -> Self {
        Self::new(
            identity.name.clone(),
            identity.canonical_url.clone(),
            path,
            identity.platform.clone(),
        )
    }

    /// Case-insensitive substring match against name, path and url.
    ///
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.path.to_string_lossy().to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
    }
}

#[derive(Serialize)]
struct IndexDocumentRef<'a> {
    repositories: &'a [RepositoryRecord],
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct IndexDocument {
    /// Older writers emit `null` once every record has been pruned.
    #[serde(default)]
    repositories: Option<Vec<RepositoryRecord>>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

/// In-memory view of the index document, loaded once per invocation and saved
/// back at the end.
#[derive(Debug, Clone)]
pub struct RepositoryIndex {
    location: PathBuf,
    records: Vec<RepositoryRecord>,
    updated_at: DateTime<Utc>,
}

impl RepositoryIndex {
    /// Create an empty index that will be saved to `location`.
    pub fn empty(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            records: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Load the index document at `location`.
    ///
    /// A missing file yields an empty index. Legacy documents are migrated.
    pub fn load(location: impl Into<PathBuf>) -> Result<Self> {
        let location = location.into();
        let data = match fs::read(&location) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no index at {}, starting empty", location.display());
                return Ok(Self::empty(location));
            }
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_slice(&data).map_err(|e| Error::CorruptIndex {
            path: location.clone(),
            message: e.to_string(),
        })?;

        let Value::Object(object) = value else {
            return Err(Error::CorruptIndex {
                path: location,
                message: "expected a JSON object at the top level".to_string(),
            });
        };

        if object.contains_key(REPOSITORIES_KEY) {
            let document: IndexDocument = serde_json::from_value(Value::Object(object))
                .map_err(|e| Error::CorruptIndex {
                    path: location.clone(),
                    message: e.to_string(),
                })?;
            return Ok(Self {
                location,
                records: document.repositories.unwrap_or_default(),
                updated_at: document.updated_at,
            });
        }

        let records = migrate_legacy(&object);
        let has_entries = object.keys().any(|key| key.as_str() != LEGACY_VERSION_KEY);
        if records.is_empty() && has_entries {
            return Err(Error::CorruptIndex {
                path: location,
                message: "document matches neither the current nor the legacy format".to_string(),
            });
        }
        info!(
            "migrated {} record(s) from legacy index format at {}",
            records.len(),
            location.display()
        );
        Ok(Self {
            location,
            records,
            updated_at: Utc::now(),
        })
    }

    /// Stamp `updated_at` and write the document atomically.
    pub fn save(&mut self) -> Result<()> {
        self.updated_at = Utc::now();
        let document = IndexDocumentRef {
            repositories: &self.records,
            updated_at: self.updated_at,
        };
        write_json_atomic(&self.location, &document)
    }

    /// Insert or replace the record at `record.path`.
    ///
    /// A replaced record keeps its position; `added_at` is reset either way.
    pub fn add(&mut self, mut record: RepositoryRecord) {
        record.added_at = Utc::now();
        match self.records.iter_mut().find(|r| r.path == record.path) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Remove the record at `path`, returning whether one was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.path != path);
        self.records.len() != before
    }

    /// Remove every record for which `predicate` holds and return them.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<RepositoryRecord>
    where
        F: FnMut(&RepositoryRecord) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| predicate(r));
        self.records = kept;
        removed
    }

    /// Records whose name, path or url contains `query`, ignoring case.
    ///
    /// An empty query returns every record. Results keep index order.
    pub fn find(&self, query: &str) -> Vec<&RepositoryRecord> {
        if query.is_empty() {
            return self.records.iter().collect();
        }
        let needle = query.to_lowercase();
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    pub fn get_by_path(&self, path: &Path) -> Option<&RepositoryRecord> {
        self.records.iter().find(|r| r.path == path)
    }

    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Path of the document this index is saved to.
    pub fn location(&self) -> &Path {
        &self.location
    }
}

fn migrate_legacy(object: &Map<String, Value>) -> Vec<RepositoryRecord> {
    object
        .iter()
        .filter(|(key, _)| key.as_str() != LEGACY_VERSION_KEY)
        .filter_map(|(path, entry)| {
            let url = entry.get("repo")?.as_str()?;
            Some(RepositoryRecord::new(
                legacy_name(url, path),
                url,
                path.as_str(),
                legacy_platform(url),
            ))
        })
        .collect()
}

/// Repository name from the last segment of the URL, falling back to the
/// directory name.
fn legacy_name(url: &str, path: &str) -> String {
    let from_url = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .map(|segment| segment.strip_suffix(".git").unwrap_or(segment))
        .unwrap_or_default();
    if !from_url.is_empty() {
        return from_url.to_string();
    }
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn legacy_platform(url: &str) -> String {
    KNOWN_PLATFORMS
        .iter()
        .find(|(host, _)| url.contains(host))
        .map(|(_, platform)| platform.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
