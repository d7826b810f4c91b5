//! Permission slug normalisation and matching.
//!
//! Roles scoped to a business unit may carry slugs such as
//! `bu:6f1c...:deployments:create`. The backend expects the bare slug, so the
//! prefix is stripped before submission. Matching against the known
//! permission catalogue is case-insensitive.
//!
//! Invariants:
//! - The `bu:` prefix is stripped only when its middle segment is a UUID.
//! - Normalised output is trimmed, lower-cased and free of duplicates, in
//!   first-seen order.
//! - Empty slugs are dropped.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::Permission;

const BU_PREFIX: &str = "bu:";

/// Strip a `bu:{uuid}:` prefix.
///
/// ```
/// use provisio_client::permissions::strip_business_unit_prefix;
///
/// assert_eq!(
///     strip_business_unit_prefix("bu:6f1c2a9e-2b7d-4c1e-9a51-3b1e4f5d6a7b:roles:read"),
///     "roles:read"
/// );
/// assert_eq!(strip_business_unit_prefix("bu:not-a-uuid:roles:read"), "bu:not-a-uuid:roles:read");
/// ```
pub fn strip_business_unit_prefix(slug: &str) -> &str {
    let Some(rest) = slug
        .get(..BU_PREFIX.len())
        .filter(|p| p.eq_ignore_ascii_case(BU_PREFIX))
        .map(|_| &slug[BU_PREFIX.len()..])
    else {
        return slug;
    };

    match rest.split_once(':') {
        Some((id, base)) if Uuid::parse_str(id).is_ok() && !base.is_empty() => base,
        _ => slug,
    }
}

/// Canonical form of one slug.
pub fn normalize_slug(slug: &str) -> String {
    strip_business_unit_prefix(slug.trim()).trim().to_lowercase()
}

/// Normalise a list of slugs for submission.
pub fn normalize_permissions<S: AsRef<str>>(slugs: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    slugs
        .iter()
        .map(|s| normalize_slug(s.as_ref()))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Result of checking slugs against the known catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatch {
    /// Known slugs, spelled as the catalogue spells them.
    pub matched: Vec<String>,
    /// Normalised slugs the catalogue does not know.
    pub unknown: Vec<String>,
}

/// Match `slugs` against `known`, case-insensitively, after normalisation.
pub fn match_known<S: AsRef<str>>(slugs: &[S], known: &[Permission]) -> PermissionMatch {
    let mut result = PermissionMatch::default();
    for slug in normalize_permissions(slugs) {
        match known
            .iter()
            .find(|p| p.slug.trim().eq_ignore_ascii_case(&slug))
        {
            Some(permission) => {
                let canonical = permission.slug.trim().to_string();
                if !result.matched.contains(&canonical) {
                    result.matched.push(canonical);
                }
            }
            None => result.unknown.push(slug),
        }
    }
    result
}

/// Whether `granted` contains `required`, ignoring case and BU prefixes.
pub fn has_permission<S: AsRef<str>>(granted: &[S], required: &str) -> bool {
    let required = normalize_slug(required);
    granted
        .iter()
        .any(|g| normalize_slug(g.as_ref()) == required)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BU: &str = "6f1c2a9e-2b7d-4c1e-9a51-3b1e4f5d6a7b";

    fn perm(slug: &str) -> Permission {
        Permission {
            slug: slug.to_string(),
            name: None,
            description: None,
            category: None,
        }
    }

    #[test]
    fn test_strip_prefix_requires_uuid() {
        assert_eq!(
            strip_business_unit_prefix(&format!("bu:{BU}:deployments:create")),
            "deployments:create"
        );
        assert_eq!(
            strip_business_unit_prefix(&format!("BU:{BU}:plugins:lock")),
            "plugins:lock"
        );
        assert_eq!(strip_business_unit_prefix("bu:abc:roles:read"), "bu:abc:roles:read");
        assert_eq!(strip_business_unit_prefix(&format!("bu:{BU}:")), format!("bu:{BU}:"));
        assert_eq!(strip_business_unit_prefix("roles:read"), "roles:read");
        assert_eq!(strip_business_unit_prefix("bu"), "bu");
    }

    #[test]
    fn test_normalize_dedupes_preserving_order() {
        let input = vec![
            format!("bu:{BU}:Deployments:Create"),
            " roles:read ".to_string(),
            "deployments:create".to_string(),
            String::new(),
            "ROLES:READ".to_string(),
        ];
        assert_eq!(
            normalize_permissions(&input),
            vec!["deployments:create", "roles:read"]
        );
    }

    #[test]
    fn test_match_known_is_case_insensitive() {
        let known = vec![perm("deployments:create"), perm("Audit:Read")];
        let result = match_known(
            &["DEPLOYMENTS:CREATE", "audit:read", "plugins:fly"],
            &known,
        );
        assert_eq!(result.matched, vec!["deployments:create", "Audit:Read"]);
        assert_eq!(result.unknown, vec!["plugins:fly"]);
    }

    #[test]
    fn test_has_permission() {
        let granted = vec![format!("bu:{BU}:plugins:lock")];
        assert!(has_permission(&granted, "Plugins:Lock"));
        assert!(!has_permission(&granted, "plugins:unlock"));
    }
}
