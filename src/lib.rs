//! # projj
//!
//! This library manages a workspace of cloned git repositories laid out by
//! identity: every repository lives at `<base>/<platform>/<owner>/<name>`, and
//! a JSON index records what is managed so it can be searched without walking
//! the disk. It is designed to be used by the `projj` command-line tool but
//! the pieces are usable on their own.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use projj::identity::{resolve, AliasTable};
//! use projj::path::map_path;
//!
//! let aliases = AliasTable::builtin();
//! let identity = resolve("github://golang/go", &aliases).unwrap();
//! assert_eq!(identity.canonical_url, "git@github.com:golang/go.git");
//!
//! let path = map_path(&identity, Path::new("/home/me/projj"));
//! assert_eq!(path, Path::new("/home/me/projj/github.com/golang/go"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Identity (`identity`)**: parses SSH, URL, `host/owner/name` and
//!   `owner/name` references, after alias substitution, into a canonical
//!   `(platform, owner, name, url)` identity.
//! - **Path mapping (`path`)**: places an identity under the workspace base.
//! - **Index (`cache`)**: the persisted path → record mapping, including the
//!   migration of documents written by older versions.
//! - **Reconciliation (`reconcile`)**: prunes records whose directory is gone,
//!   discovers unindexed repositories and imports existing checkouts.
//! - **Workspace (`workspace`)**: the per-invocation client that owns one
//!   configuration, one index and one git implementation.
//! - **Git (`repository`, `git`)**: the version-control capability behind a
//!   trait, with a system-git implementation.
//!
//! Every command follows the same flow: load config and index, mutate in
//! memory, save the index atomically, exit. There is no locking between
//! concurrent invocations.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod identity;
pub mod output;
pub mod path;
pub mod reconcile;
pub mod repository;
pub mod suggestions;
pub mod workspace;

#[cfg(test)]
mod identity_proptest;
