//! Property-based tests for reference resolution and path mapping.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::path::{Component, Path};

    use crate::identity::{resolve, resolve_with_host, AliasTable};
    use crate::path::map_path;
    use proptest::prelude::*;

    /// Owner/name segments as hosting platforms allow them.
    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9_-]{0,20}"
    }

    fn host() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,10}\\.(com|org|io)"
    }

    proptest! {
        /// Property: resolve never panics, whatever the input
        #[test]
        fn resolve_never_panics(input in ".*") {
            let _ = resolve(&input, &AliasTable::builtin());
        }

        /// Property: resolve followed by map_path is deterministic
        #[test]
        fn resolve_and_map_are_deterministic(owner in segment(), name in segment()) {
            let reference = format!("{}/{}", owner, name);
            let aliases = AliasTable::builtin();
            let base = Path::new("/work");

            let first = resolve(&reference, &aliases).unwrap();
            let second = resolve(&reference, &aliases).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(map_path(&first, base), map_path(&second, base));
        }

        /// Property: every supported form of one repository maps to one path
        #[test]
        fn all_forms_share_a_path(host in host(), owner in segment(), name in segment()) {
            let aliases = AliasTable::new();
            let base = Path::new("/work");
            let references = [
                format!("git@{}:{}/{}.git", host, owner, name),
                format!("https://{}/{}/{}.git", host, owner, name),
                format!("https://{}/{}/{}", host, owner, name),
                format!("{}/{}/{}", host, owner, name),
            ];

            let expected = base.join(&host).join(&owner).join(&name);
            for reference in &references {
                let identity = resolve(reference, &aliases).unwrap();
                prop_assert_eq!(map_path(&identity, base), expected.clone(), "reference {}", reference);
            }
            let shorthand = resolve_with_host(&format!("{}/{}", owner, name), &aliases, &host).unwrap();
            prop_assert_eq!(map_path(&shorthand, base), expected);
        }

        /// Property: a resolved identity never maps outside the base directory
        #[test]
        fn mapped_path_stays_under_base(input in "[a-z.@:/_-]{1,40}") {
            let base = Path::new("/work");
            if let Ok(identity) = resolve(&input, &AliasTable::builtin()) {
                let path = map_path(&identity, base);
                prop_assert!(path.starts_with(base));
                let extra: Vec<_> = path.strip_prefix(base).unwrap().components().collect();
                prop_assert_eq!(extra.len(), 3, "input {} mapped to {}", input, path.display());
                prop_assert!(extra.iter().all(|c| matches!(c, Component::Normal(_))));
            }
        }

        /// Property: the `.git` suffix never ends up in the repository name
        #[test]
        fn name_never_keeps_git_suffix(owner in segment(), name in segment()) {
            let identity = resolve(&format!("git@github.com:{}/{}.git", owner, name), &AliasTable::new()).unwrap();
            prop_assert_eq!(identity.name, name);
        }
    }
}
