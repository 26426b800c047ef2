//! Owner-to-tag-name resolution policy.

use crate::mapping::OwnerTagMapping;

/// A tag name resolved for an owner, carrying where it came from.
///
/// The distinction matters: explicitly mapped tags are operator
/// configuration and are never auto-created, while generated names may be
/// created on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTag {
    /// The username had an explicit mapping entry; value returned verbatim.
    Mapped(String),
    /// Default rule: configured prefix + username.
    Generated(String),
}

impl ResolvedTag {
    /// The resolved tag name, regardless of origin.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Mapped(name) | Self::Generated(name) => name,
        }
    }

    /// Whether this name came from an explicit mapping entry.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

/// Resolution policy: explicit mapping first, prefix rule otherwise.
///
/// Pure and total; no I/O. Immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct TagPolicy {
    prefix: String,
    mapping: OwnerTagMapping,
}

impl TagPolicy {
    #[must_use]
    pub fn new(prefix: impl Into<String>, mapping: OwnerTagMapping) -> Self {
        Self {
            prefix: prefix.into(),
            mapping,
        }
    }

    /// Resolve the tag name for a username.
    #[must_use]
    pub fn resolve(&self, username: &str) -> ResolvedTag {
        match self.mapping.get(username) {
            Some(mapped) => ResolvedTag::Mapped(mapped.to_string()),
            None => ResolvedTag::Generated(format!("{}{}", self.prefix, username)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with(entries: &[(&str, &str)]) -> TagPolicy {
        let mapping = OwnerTagMapping::from_entries(
            entries
                .iter()
                .map(|(user, tag)| (user.to_string(), tag.to_string())),
        );
        TagPolicy::new("owner:", mapping)
    }

    #[test]
    fn mapped_username_returns_mapped_value_verbatim() {
        let policy = policy_with(&[("jane", "Jane-Documents")]);
        assert_eq!(
            policy.resolve("jane"),
            ResolvedTag::Mapped("Jane-Documents".to_string())
        );
    }

    #[test]
    fn mapped_value_is_independent_of_prefix() {
        let mapping =
            OwnerTagMapping::from_entries([("jane".to_string(), "Jane-Documents".to_string())]);
        let policy = TagPolicy::new("completely-different:", mapping);
        assert_eq!(policy.resolve("jane").name(), "Jane-Documents");
    }

    #[test]
    fn unmapped_username_gets_prefixed() {
        let policy = policy_with(&[("jane", "Jane-Documents")]);
        assert_eq!(
            policy.resolve("bob"),
            ResolvedTag::Generated("owner:bob".to_string())
        );
    }

    #[test]
    fn resolution_is_total_for_odd_usernames() {
        let policy = policy_with(&[]);
        assert_eq!(policy.resolve("").name(), "owner:");
        assert_eq!(policy.resolve("空白").name(), "owner:空白");
    }
}
