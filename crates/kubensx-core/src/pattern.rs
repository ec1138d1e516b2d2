use tracing::debug;

use crate::matcher::{FieldMatcher, MatchMode};
use crate::triple::Triple;

/// Which field a bare pattern applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// `user:cluster/namespace`, `user:cluster`, `cluster/namespace` or `namespace`.
    #[default]
    All,
    User,
    Cluster,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPattern {
    pub pattern: String,
    /// Spelled out by the user, as opposed to defaulted from the current context.
    pub explicit: bool,
}

impl FieldPattern {
    pub fn explicit(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), explicit: true }
    }

    pub fn implicit(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), explicit: false }
    }

    pub fn matcher<'a>(&'a self, mode: MatchMode, default: &'a str) -> FieldMatcher<'a> {
        FieldMatcher::new(mode, &self.pattern, default, self.explicit)
    }
}

/// A parsed `use` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPattern {
    pub mode: MatchMode,
    pub user: FieldPattern,
    pub cluster: FieldPattern,
    pub namespace: FieldPattern,
}

impl ContextPattern {
    /// `pattern` must already have its sigil stripped (see [`MatchMode::detect`]).
    /// Fields the pattern does not name are defaulted from `current`.
    pub fn parse(pattern: &str, mode: MatchMode, target: Target, current: &Triple) -> Self {
        let user = FieldPattern::implicit(&current.user);
        let cluster = FieldPattern::implicit(&current.cluster);
        let namespace = FieldPattern::implicit(&current.namespace);
        let parsed = match target {
            Target::User => Self { mode, user: FieldPattern::explicit(pattern), cluster, namespace },
            Target::Cluster => Self { mode, user, cluster: FieldPattern::explicit(pattern), namespace },
            Target::Namespace => Self { mode, user, cluster, namespace: FieldPattern::explicit(pattern) },
            Target::All => match split_fields(pattern) {
                Fields::Three(u, c, n) => Self {
                    mode,
                    user: FieldPattern::explicit(u),
                    cluster: FieldPattern::explicit(c),
                    namespace: FieldPattern::explicit(n),
                },
                Fields::UserCluster(u, c) => {
                    Self { mode, user: FieldPattern::explicit(u), cluster: FieldPattern::explicit(c), namespace }
                }
                Fields::ClusterNamespace(c, n) => {
                    Self { mode, user, cluster: FieldPattern::explicit(c), namespace: FieldPattern::explicit(n) }
                }
                Fields::Namespace(n) => Self { mode, user, cluster, namespace: FieldPattern::explicit(n) },
            },
        };
        debug!(
            r#"Searching for "{}({}):{}({})/{}({})""#,
            parsed.user.pattern,
            parsed.user.explicit,
            parsed.cluster.pattern,
            parsed.cluster.explicit,
            parsed.namespace.pattern,
            parsed.namespace.explicit
        );
        parsed
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Fields<'a> {
    Three(&'a str, &'a str, &'a str),
    UserCluster(&'a str, &'a str),
    ClusterNamespace(&'a str, &'a str),
    Namespace(&'a str),
}

/// Splits on the first two `:`/`/` separators; the third field keeps the rest.
/// With one separator, `:` means `user:cluster` and `/` means `cluster/namespace`.
fn split_fields(pattern: &str) -> Fields<'_> {
    let is_separator = |c: char| c == ':' || c == '/';
    let Some(first) = pattern.find(is_separator) else {
        return Fields::Namespace(pattern);
    };
    let head = &pattern[..first];
    let tail = &pattern[first + 1..];
    match tail.find(is_separator) {
        Some(second) => Fields::Three(head, &tail[..second], &tail[second + 1..]),
        None if pattern[first..].starts_with(':') => Fields::UserCluster(head, tail),
        None => Fields::ClusterNamespace(head, tail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> Triple {
        Triple::new("me", "home", "default")
    }

    #[test]
    fn splits_full_triple() {
        assert_eq!(split_fields("qa:us-west/staging"), Fields::Three("qa", "us-west", "staging"));
        assert_eq!(split_fields("a:b/c/d"), Fields::Three("a", "b", "c/d"));
        assert_eq!(split_fields("::"), Fields::Three("", "", ""));
    }

    #[test]
    fn splits_pairs() {
        assert_eq!(split_fields("qa:*"), Fields::UserCluster("qa", "*"));
        assert_eq!(split_fields("*.internal/staging"), Fields::ClusterNamespace("*.internal", "staging"));
        assert_eq!(split_fields("kube-system"), Fields::Namespace("kube-system"));
    }

    #[test]
    fn full_pattern_is_explicit_everywhere() {
        let pattern = ContextPattern::parse("qa:us-west/", MatchMode::Wildcard, Target::All, &current());
        assert_eq!(pattern.user, FieldPattern::explicit("qa"));
        assert_eq!(pattern.cluster, FieldPattern::explicit("us-west"));
        assert_eq!(pattern.namespace, FieldPattern::explicit(""));
    }

    #[test]
    fn user_cluster_defaults_namespace() {
        let pattern = ContextPattern::parse("qa:*", MatchMode::Wildcard, Target::All, &current());
        assert_eq!(pattern.user, FieldPattern::explicit("qa"));
        assert_eq!(pattern.cluster, FieldPattern::explicit("*"));
        assert_eq!(pattern.namespace, FieldPattern::implicit("default"));
    }

    #[test]
    fn cluster_namespace_defaults_user() {
        let pattern = ContextPattern::parse("prod/kube-system", MatchMode::Fuzzy, Target::All, &current());
        assert_eq!(pattern.mode, MatchMode::Fuzzy);
        assert_eq!(pattern.user, FieldPattern::implicit("me"));
        assert_eq!(pattern.cluster, FieldPattern::explicit("prod"));
        assert_eq!(pattern.namespace, FieldPattern::explicit("kube-system"));
    }

    #[test]
    fn bare_pattern_is_namespace() {
        let pattern = ContextPattern::parse("kube-*", MatchMode::Wildcard, Target::All, &current());
        assert_eq!(pattern.user, FieldPattern::implicit("me"));
        assert_eq!(pattern.cluster, FieldPattern::implicit("home"));
        assert_eq!(pattern.namespace, FieldPattern::explicit("kube-*"));
    }

    #[test]
    fn pinned_targets_take_pattern_literally() {
        let pattern = ContextPattern::parse("a:b", MatchMode::Wildcard, Target::Cluster, &current());
        assert_eq!(pattern.cluster, FieldPattern::explicit("a:b"));
        assert_eq!(pattern.user, FieldPattern::implicit("me"));

        let pattern = ContextPattern::parse("qa", MatchMode::Wildcard, Target::User, &current());
        assert_eq!(pattern.user, FieldPattern::explicit("qa"));
        assert_eq!(pattern.namespace, FieldPattern::implicit("default"));

        let pattern = ContextPattern::parse("dev", MatchMode::Wildcard, Target::Namespace, &current());
        assert_eq!(pattern.namespace, FieldPattern::explicit("dev"));
    }
}
