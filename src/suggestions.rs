//! # Error Suggestions
//!
//! Helper functions for turning library errors into messages that tell users
//! what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use projj::suggestions;
//!
//! // Instead of:
//! workspace.remove(query, false)?;
//!
//! // Use:
//! workspace
//!     .remove(query, false)
//!     .map_err(|e| suggestions::explain(e, &names))?;
//! ```

use std::path::Path;

use crate::config::ConfigKey;
use crate::error::Error;

/// Convert a library error into an `anyhow::Error`, adding hints where the
/// fix is not obvious.
///
/// `known_names` are the repository names currently indexed; they feed the
/// "did you mean" hint for queries that matched nothing.
pub fn explain(error: Error, known_names: &[&str]) -> anyhow::Error {
    match error {
        Error::Parse { reference } => unrecognized_reference(&reference),
        Error::AlreadyManaged { path } => already_managed(&path),
        Error::NotFound { query } => no_match(&query, known_names),
        Error::AmbiguousQuery { query, candidates } => ambiguous_query(&query, &candidates),
        Error::CorruptIndex { path, message } => corrupt_index(&path, &message),
        Error::DestinationExists { path } => destination_exists(&path),
        other => anyhow::Error::new(other),
    }
}

/// Generate an error for a reference that matched no supported form.
pub fn unrecognized_reference(reference: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unrecognized repository reference: {reference}\n\n\
         hint: Use owner/name, host/owner/name, git@host:owner/name.git or a full URL\n\
         hint: Aliases such as github://owner/name are configured in config.json"
    )
}

/// Generate an error for adding a repository that is already indexed.
pub fn already_managed(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Repository already managed at {path}\n\n\
         hint: Run 'projj find' to locate it\n\
         hint: Run 'projj sync' if the directory was deleted by hand",
        path = path.display()
    )
}

/// Generate an error for a query that matched no record.
///
/// Suggests the closest indexed name when one is near enough.
pub fn no_match(query: &str, known_names: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(query, known_names)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "No repository matches '{query}'{did_you_mean}\n\n\
         hint: Run 'projj list' to see every managed repository"
    )
}

/// Generate an error for a query that matched several records.
pub fn ambiguous_query(query: &str, candidates: &[String]) -> anyhow::Error {
    let listing = candidates
        .iter()
        .map(|c| format!("  {c}"))
        .collect::<Vec<_>>()
        .join("\n");

    anyhow::anyhow!(
        "Query '{query}' matches {count} repositories:\n{listing}\n\n\
         hint: Use a longer query, such as owner/name or the full path",
        count = candidates.len()
    )
}

/// Generate an error for an index document that cannot be read.
pub fn corrupt_index(path: &Path, message: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Corrupt index file {path}\n\
         error: {message}\n\n\
         hint: Fix the JSON by hand, or move the file away and run 'projj sync' to rebuild it",
        path = path.display()
    )
}

/// Generate an error for a clone or relocation onto an occupied directory.
pub fn destination_exists(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Destination already exists: {path}\n\n\
         hint: An interrupted clone may have left it behind; remove it and retry\n\
         hint: Run 'projj sync' to index it if it is a complete repository",
        path = path.display()
    )
}

/// Generate an error for an unknown `config` key.
pub fn unknown_config_key(key: &str) -> anyhow::Error {
    let valid_keys = ConfigKey::ALL.map(ConfigKey::as_str);

    let did_you_mean = find_similar(key, &valid_keys)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown configuration key: {key}{did_you_mean}\n\n\
         Valid keys are: {keys}",
        keys = valid_keys.join(", ")
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
