//! # Repository Identity Resolution
//!
//! Turns a user-supplied repository reference into a canonical
//! [`RepositoryIdentity`]: the `(platform, owner, name)` triple used for path
//! construction plus the URL to clone from.
//!
//! ## Supported forms
//!
//! Forms are tried in order and the first match wins, because they overlap:
//!
//! 1. Alias substitution (`github://golang/go` → `git@github.com:golang/go`),
//!    after which resolution continues on the substituted string.
//! 2. SSH: `git@github.com:golang/go.git`
//! 3. Scheme-qualified URL: `https://github.com/golang/go.git`
//! 4. Bare platform: `github.com/golang/go`
//! 5. Shorthand: `golang/go` (uses the default host)
//!
//! A dot in the first segment separates the bare platform form from the
//! shorthand form. Resolution is pure: no filesystem or network access.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::defaults::{default_aliases, DEFAULT_HOST};
use crate::error::{Error, Result};

/// URL schemes accepted by the scheme-qualified form.
const URL_SCHEMES: &[&str] = &["http", "https", "ssh", "git", "git+ssh", "git+https"];

/// Version-control suffix stripped from repository names.
const GIT_SUFFIX: &str = ".git";

static SSH_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w.-]+)@([^:/@\s]+):([^/\s]+)/([^/\s]+?)(?:\.git)?$")
        .expect("SSH reference pattern is valid")
});

static BARE_PLATFORM_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/:@\s]+\.[^/:@\s]+)/([^/\s]+)/([^/\s]+?)(?:\.git)?$")
        .expect("bare platform reference pattern is valid")
});

static SHORTHAND_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/.:@\s]+)/([^/\s]+?)(?:\.git)?$").expect("shorthand reference pattern is valid")
});

/// Canonical identity of a repository, derived fresh on every resolve call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    /// Host the repository lives on, e.g. `github.com`
    pub platform: String,
    /// User or organization segment
    pub owner: String,
    /// Repository name, never carrying a `.git` suffix
    pub name: String,
    /// URL handed to the clone capability
    pub canonical_url: String,
}

/// Ordered `(prefix, replacement)` pairs applied to references before parsing.
///
/// The first prefix in table order that matches wins. The table round-trips
/// through a JSON object while keeping the document's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    /// Create an empty alias table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The aliases a fresh configuration starts with.
    pub fn builtin() -> Self {
        default_aliases().into_iter().collect()
    }

    /// Append an alias. An existing entry with the same prefix is replaced in place.
    pub fn insert(&mut self, prefix: impl Into<String>, replacement: impl Into<String>) {
        let prefix = prefix.into();
        let replacement = replacement.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = replacement,
            None => self.entries.push((prefix, replacement)),
        }
    }

    /// Iterate over `(prefix, replacement)` pairs in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, r)| (p.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the first matching alias prefix of `input`.
    pub fn substitute<'a>(&self, input: &'a str) -> Cow<'a, str> {
        for (prefix, replacement) in &self.entries {
            if let Some(rest) = input.strip_prefix(prefix.as_str()) {
                debug!("alias '{}' expands '{}'", prefix, input);
                return Cow::Owned(format!("{}{}", replacement, rest));
            }
        }
        Cow::Borrowed(input)
    }
}

impl FromIterator<(String, String)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = AliasTable::new();
        for (prefix, replacement) in iter {
            table.insert(prefix, replacement);
        }
        table
    }
}

impl Serialize for AliasTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prefix, replacement) in &self.entries {
            map.serialize_entry(prefix, replacement)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AliasVisitor;

        impl<'de> Visitor<'de> for AliasVisitor {
            type Value = AliasTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of alias prefix to replacement")
            }

            fn visit_map<M: MapAccess<'de>>(
                self,
                mut access: M,
            ) -> std::result::Result<AliasTable, M::Error> {
                let mut table = AliasTable::new();
                while let Some((prefix, replacement)) = access.next_entry::<String, String>()? {
                    table.insert(prefix, replacement);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(AliasVisitor)
    }
}

/// Resolution settings borrowed from the configuration.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    aliases: &'a AliasTable,
    default_host: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(aliases: &'a AliasTable, default_host: &'a str) -> Self {
        Self {
            aliases,
            default_host,
        }
    }

    pub fn resolve(&self, reference: &str) -> Result<RepositoryIdentity> {
        resolve_with_host(reference, self.aliases, self.default_host)
    }
}

/// Resolve a reference, using `github.com` for the shorthand form.
pub fn resolve(reference: &str, aliases: &AliasTable) -> Result<RepositoryIdentity> {
    resolve_with_host(reference, aliases, DEFAULT_HOST)
}

/// Resolve a reference with an explicit host for the `owner/name` shorthand.
pub fn resolve_with_host(
    reference: &str,
    aliases: &AliasTable,
    default_host: &str,
) -> Result<RepositoryIdentity> {
    let input = aliases.substitute(reference.trim());

    let identity = parse_ssh(&input)
        .or_else(|| parse_scheme_url(&input))
        .or_else(|| parse_bare_platform(&input))
        .or_else(|| parse_shorthand(&input, default_host))
        .filter(is_path_safe)
        .ok_or_else(|| Error::Parse {
            reference: reference.to_string(),
        })?;

    debug!(
        "resolved '{}' to {}/{}/{}",
        reference, identity.platform, identity.owner, identity.name
    );
    Ok(identity)
}

fn parse_ssh(input: &str) -> Option<RepositoryIdentity> {
    let caps = SSH_FORM.captures(input)?;
    let (user, host, owner, name) = (&caps[1], &caps[2], &caps[3], &caps[4]);
    Some(RepositoryIdentity {
        platform: host.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
        canonical_url: format!("{}@{}:{}/{}{}", user, host, owner, name, GIT_SUFFIX),
    })
}

fn parse_scheme_url(input: &str) -> Option<RepositoryIdentity> {
    let url = Url::parse(input).ok()?;
    if !URL_SCHEMES.contains(&url.scheme()) {
        return None;
    }
    let host = url.host_str().filter(|h| !h.is_empty())?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let name = strip_git_suffix(segments.next()?);

    Some(RepositoryIdentity {
        platform: host.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
        canonical_url: input.to_string(),
    })
}

fn parse_bare_platform(input: &str) -> Option<RepositoryIdentity> {
    let caps = BARE_PLATFORM_FORM.captures(input)?;
    let (host, owner, name) = (&caps[1], &caps[2], &caps[3]);
    Some(RepositoryIdentity {
        platform: host.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
        canonical_url: https_url(host, owner, name),
    })
}

fn parse_shorthand(input: &str, default_host: &str) -> Option<RepositoryIdentity> {
    let caps = SHORTHAND_FORM.captures(input)?;
    let (owner, name) = (&caps[1], &caps[2]);
    Some(RepositoryIdentity {
        platform: default_host.to_string(),
        owner: owner.to_string(),
        name: name.to_string(),
        canonical_url: https_url(default_host, owner, name),
    })
}

fn https_url(host: &str, owner: &str, name: &str) -> String {
    format!("https://{}/{}/{}{}", host, owner, name, GIT_SUFFIX)
}

fn strip_git_suffix(name: &str) -> &str {
    name.strip_suffix(GIT_SUFFIX).unwrap_or(name)
}

/// Owner and name become directory names under the base path; reject anything
/// that could escape it.
fn is_path_safe(identity: &RepositoryIdentity) -> bool {
    [&identity.platform, &identity.owner, &identity.name]
        .iter()
        .all(|part| {
            !part.is_empty()
                && part.as_str() != "."
                && part.as_str() != ".."
                && !part.contains(['/', '\\'])
        })
}
