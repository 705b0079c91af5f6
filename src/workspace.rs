//! # Workspace Client
//!
//! [`Workspace`] ties the pieces together for one process invocation: it owns
//! one [`Config`], one [`RepositoryIndex`] and one [`GitOperations`]
//! implementation, runs a single operation against them and saves the index at
//! the end. Nothing is shared through globals; tests build a `Workspace` with
//! [`Workspace::new`] and a fake git implementation.
//!
//! If an operation fails before its save step the index document on disk is
//! left as it was.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::cache::{RepositoryIndex, RepositoryRecord};
use crate::config::Config;
use crate::defaults::INDEX_FILENAME;
use crate::error::{Error, Result};
use crate::filesystem::remove_dir_if_present;
use crate::path::map_path;
use crate::reconcile::{self, ImportReport, SyncReport};
use crate::repository::{DefaultGitOperations, GitOperations};

pub struct Workspace {
    config_dir: PathBuf,
    config: Config,
    index: RepositoryIndex,
    git: Box<dyn GitOperations>,
}

impl Workspace {
    /// Load configuration and index from `config_dir`, using the system git.
    pub fn open(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let config = Config::load(&config_dir)?;
        let index = RepositoryIndex::load(config_dir.join(INDEX_FILENAME))?;
        Ok(Self::new(
            config_dir,
            config,
            index,
            Box::new(DefaultGitOperations),
        ))
    }

    pub fn new(
        config_dir: impl Into<PathBuf>,
        config: Config,
        index: RepositoryIndex,
        git: Box<dyn GitOperations>,
    ) -> Self {
        Self {
            config_dir: config_dir.into(),
            config,
            index,
            git,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn index(&self) -> &RepositoryIndex {
        &self.index
    }

    /// Expanded workspace base directory.
    pub fn base(&self) -> Result<PathBuf> {
        self.config.base_path()
    }

    /// Create the configuration and base directories and write both documents.
    ///
    /// Existing settings and records are kept. Returns the base directory.
    pub fn init(&mut self) -> Result<PathBuf> {
        let base = self.base()?;
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&base)?;
        self.config.save(&self.config_dir)?;
        self.index.save()?;
        info!(
            "initialized workspace at {} (config in {})",
            base.display(),
            self.config_dir.display()
        );
        Ok(base)
    }

    /// Persist the configuration document.
    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.config_dir)
    }

    /// Clone `reference` to its canonical path and index it.
    ///
    /// Fails with [`Error::AlreadyManaged`] when a record already occupies the
    /// canonical path. A failed clone leaves the index untouched.
    pub fn add(&mut self, reference: &str) -> Result<RepositoryRecord> {
        let identity = self.config.resolver().resolve(reference)?;
        let target = map_path(&identity, &self.base()?);

        if self.index.get_by_path(&target).is_some() {
            return Err(Error::AlreadyManaged { path: target });
        }

        debug!("cloning {} into {}", identity.canonical_url, target.display());
        self.git
            .clone_repository(&identity.canonical_url, &target)?;

        let record = RepositoryRecord::from_identity(&identity, &target);
        self.index.add(record.clone());
        self.index.save()?;
        info!("added {}", target.display());
        Ok(record)
    }

    /// Records matching `query` (name, path or url, case-insensitive).
    pub fn find(&self, query: &str) -> Vec<&RepositoryRecord> {
        self.index.find(query)
    }

    /// Every record in index order.
    pub fn list(&self) -> &[RepositoryRecord] {
        self.index.records()
    }

    /// Remove the single record matching `query`.
    ///
    /// Zero matches is [`Error::NotFound`]; several is
    /// [`Error::AmbiguousQuery`] and nothing is removed. With `delete_files`
    /// the working tree is deleted before the index is saved.
    pub fn remove(&mut self, query: &str, delete_files: bool) -> Result<RepositoryRecord> {
        let record = self.resolve_one(query)?.clone();

        self.index.remove(&record.path);
        if delete_files {
            debug!("deleting {}", record.path.display());
            remove_dir_if_present(&record.path)?;
        }
        self.index.save()?;
        info!("removed {}", record.path.display());
        Ok(record)
    }

    /// The one record matching `query`, or the error explaining why there is
    /// not exactly one.
    pub fn resolve_one(&self, query: &str) -> Result<&RepositoryRecord> {
        let matches = self.index.find(query);
        match matches.as_slice() {
            [] => Err(Error::NotFound {
                query: query.to_string(),
            }),
            [record] => Ok(*record),
            many => Err(Error::AmbiguousQuery {
                query: query.to_string(),
                candidates: many
                    .iter()
                    .map(|r| r.path.display().to_string())
                    .collect(),
            }),
        }
    }

    /// Prune stale records and, when `discover` is set, index unrecorded
    /// repositories under the base directory. Saves the index.
    pub fn sync(&mut self, discover: bool) -> Result<SyncReport> {
        let base = self.base()?;
        let resolver = self.config.resolver();
        let report = reconcile::sync(&mut self.index, self.git.as_ref(), &base, &resolver, discover);
        self.index.save()?;
        info!(
            "sync: {} added, {} removed",
            report.added.len(),
            report.removed.len()
        );
        Ok(report)
    }

    /// Move repositories found under `source` into the workspace. Saves the
    /// index once the whole tree has been processed.
    pub fn import(&mut self, source: &Path) -> Result<ImportReport> {
        let base = self.base()?;
        let resolver = self.config.resolver();
        let report = reconcile::import(&mut self.index, self.git.as_ref(), source, &base, &resolver)?;
        self.index.save()?;
        info!(
            "import: {} imported, {} skipped",
            report.imported(),
            report.skipped()
        );
        Ok(report)
    }
}
