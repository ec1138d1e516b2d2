//! Pattern-driven edits of the association and explicit-namespace indexes.
//!
//! Every field named in a pattern is explicit here: there is no fallback to
//! the current value, `.` binds to it and `*` selects every candidate.

use std::fmt;

use tracing::debug;

use crate::error::{KubensxError, Result};
use crate::matcher::{FieldMatcher, MatchMode};
use crate::store::ContextStore;
use crate::triple::{validate_namespace, Association, ExplicitNamespace};

/// One index entry added or removed by a bulk edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(String),
    Removed(String),
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(entry) => write!(f, "+ {entry}"),
            Self::Removed(entry) => write!(f, "- {entry}"),
        }
    }
}

/// `user[:cluster]`. A missing cluster means every cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairPattern {
    pub mode: MatchMode,
    pub user: String,
    pub cluster: Option<String>,
}

impl PairPattern {
    /// `pattern` must already have its sigil stripped.
    pub fn parse(pattern: &str, mode: MatchMode) -> Result<Self> {
        let (user, cluster) = match pattern.split_once(':') {
            Some((user, cluster)) => (user, Some(cluster)),
            None => (pattern, None),
        };
        if user.is_empty() {
            return Err(KubensxError::validation("<user> cannot be empty"));
        }
        if cluster == Some("") {
            return Err(KubensxError::validation("<cluster> cannot be empty"));
        }
        Ok(Self { mode, user: user.to_string(), cluster: cluster.map(str::to_string) })
    }

    fn users(&self, store: &ContextStore) -> Vec<String> {
        FieldMatcher::new(self.mode, &self.user, store.user(), true).apply(&store.users())
    }

    fn clusters(&self, store: &ContextStore, candidates: &[String]) -> Vec<String> {
        match &self.cluster {
            Some(cluster) => FieldMatcher::new(self.mode, cluster, store.cluster(), true).apply(candidates),
            None => sorted(candidates.to_vec()),
        }
    }
}

/// `user:cluster[/namespace]`. The namespace is a literal when adding and a
/// pattern (all of the pair when missing) when deleting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePattern {
    pub pair: PairPattern,
    pub namespace: Option<String>,
}

impl NamespacePattern {
    pub fn parse(pattern: &str, mode: MatchMode) -> Result<Self> {
        let (pair, namespace) = match pattern.rsplit_once('/') {
            Some((pair, namespace)) => (pair, Some(namespace.to_string())),
            None => (pattern, None),
        };
        let pair = PairPattern::parse(pair, mode)?;
        if pair.cluster.is_none() {
            return Err(KubensxError::validation("<cluster> cannot be empty"));
        }
        Ok(Self { pair, namespace })
    }
}

/// Associates every matching user with every matching cluster.
pub fn associate(store: &mut ContextStore, pattern: &PairPattern) -> Vec<Change> {
    let clusters = store.clusters();
    let mut changes = Vec::new();
    for user in pattern.users(store) {
        for cluster in pattern.clusters(store, &clusters) {
            if store.associate(&user, &cluster) {
                changes.push(Change::Added(Association::new(&user, &cluster).to_string()));
            }
        }
    }
    changes
}

/// Dissociates matching pairs. `None` drops every association.
pub fn dissociate(store: &mut ContextStore, pattern: Option<&PairPattern>) -> Vec<Change> {
    let users = pattern.map(|p| p.users(store));
    let mut changes = Vec::new();
    for (user, clusters) in store.clusters_by_user() {
        let clusters = match (pattern, &users) {
            (Some(pattern), Some(users)) if users.contains(&user) => pattern.clusters(store, &clusters),
            (Some(_), _) => continue,
            (None, _) => clusters,
        };
        for cluster in clusters {
            if store.dissociate(&user, &cluster) {
                changes.push(Change::Removed(Association::new(&user, &cluster).to_string()));
            }
        }
    }
    changes
}

/// Makes `clusters` the exact set of clusters associated with `user`.
pub fn reassociate(store: &mut ContextStore, user: &str, clusters: &[String]) -> Vec<Change> {
    let existing = store.clusters_by_user().remove(user).unwrap_or_default();
    let mut changes = Vec::new();
    for cluster in existing.iter().filter(|c| !clusters.contains(c)) {
        if store.dissociate(user, cluster) {
            changes.push(Change::Removed(Association::new(user, cluster).to_string()));
        }
    }
    for cluster in sorted(clusters.to_vec()) {
        if store.associate(user, &cluster) {
            changes.push(Change::Added(Association::new(user, &cluster).to_string()));
        }
    }
    changes
}

/// Records the pattern's namespace for every matching user+cluster pair.
pub fn add_explicit_namespaces(store: &mut ContextStore, pattern: &NamespacePattern) -> Result<Vec<Change>> {
    let namespace = match pattern.namespace.as_deref() {
        Some(".") => store.namespace().to_string(),
        Some(namespace) => namespace.to_string(),
        None => String::new(),
    };
    validate_namespace(&namespace)?;

    let clusters = store.clusters();
    let mut changes = Vec::new();
    for user in pattern.pair.users(store) {
        for cluster in pattern.pair.clusters(store, &clusters) {
            if store.set_explicit_namespace(&user, &cluster, &namespace)? {
                changes.push(Change::Added(ExplicitNamespace::new(&user, &cluster, &namespace).to_string()));
            }
        }
    }
    Ok(changes)
}

/// Deletes matching explicit namespaces. `None` drops all of them.
pub fn delete_explicit_namespaces(store: &mut ContextStore, pattern: Option<&NamespacePattern>) -> Vec<Change> {
    let doomed: Vec<ExplicitNamespace> = match pattern {
        None => store.explicit_namespaces(),
        Some(pattern) => {
            let users = pattern.pair.users(store);
            let clusters = pattern.pair.clusters(store, &store.clusters());
            store
                .explicit_namespaces()
                .into_iter()
                .filter(|entry| users.contains(&entry.user) && clusters.contains(&entry.cluster))
                .filter(|entry| match pattern.namespace.as_deref() {
                    None => true,
                    Some(namespace) => FieldMatcher::new(pattern.pair.mode, namespace, store.namespace(), true)
                        .apply(std::slice::from_ref(&entry.namespace))
                        .contains(&entry.namespace),
                })
                .collect()
        }
    };

    let mut changes = Vec::new();
    for entry in doomed {
        if store.delete_explicit_namespace(&entry.user, &entry.cluster, &entry.namespace) {
            changes.push(Change::Removed(entry.to_string()));
        }
    }
    debug!("Deleted {} explicit ns entries", changes.len());
    changes
}

fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}
