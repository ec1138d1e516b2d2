use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::kubeconfig::{
    KubeconfigDocument, ASSOC_PREFIX, ASSOC_SEPARATOR, CONTEXT_CURRENT, CONTEXT_PREVIOUS, NS_PREFIX, NS_SEPARATOR,
};
use crate::triple::{is_valid_namespace, Association, ExplicitNamespace, Triple};

mod assoc;
mod explicit_ns;

/// The kubeconfig being edited by one command, plus the association and
/// explicit-namespace sets decoded out of its `contexts` section.
///
/// Reads never touch the document. The first setter call materializes a
/// private `kubensx-current` context and points `current-context` at it, so an
/// entry shared with other tooling is never edited in place. Nothing reaches
/// disk until [`ContextStore::commit`].
pub struct ContextStore {
    doc: KubeconfigDocument,
    path: Option<PathBuf>,
    current: Triple,
    snapshot: Option<Triple>,
    materialized: bool,
    associations: BTreeSet<Association>,
    explicit_namespaces: BTreeSet<ExplicitNamespace>,
}

impl ContextStore {
    pub fn load(path: &Path) -> Result<Self> {
        let doc = KubeconfigDocument::read_from(path)?;
        let mut store = Self::from_document(doc);
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// In-memory store; `commit` purges and re-encodes but writes nothing.
    pub fn from_document(mut doc: KubeconfigDocument) -> Self {
        let snapshot = doc.current_context().and_then(|name| doc.context(name));
        let current = snapshot.clone().or_else(|| doc.context(CONTEXT_CURRENT)).unwrap_or_default();

        let mut associations = BTreeSet::new();
        for (key, record) in doc.take_contexts(|name| name.starts_with(ASSOC_PREFIX)) {
            match decode_association(&key, &record, &doc) {
                Some(assoc) => {
                    associations.insert(assoc);
                }
                None => debug!(r#"Ignored undecodable assoc[iation] "{key}""#),
            }
        }
        let mut explicit_namespaces = BTreeSet::new();
        for (key, record) in doc.take_contexts(|name| name.starts_with(NS_PREFIX)) {
            match decode_explicit_namespace(&key, &record, &doc) {
                Some(ns) => {
                    explicit_namespaces.insert(ns);
                }
                None => debug!(r#"Ignored undecodable explicit ns "{key}""#),
            }
        }

        Self { doc, path: None, current, snapshot, materialized: false, associations, explicit_namespaces }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn document(&self) -> &KubeconfigDocument {
        &self.doc
    }

    pub fn current(&self) -> &Triple {
        &self.current
    }

    pub fn user(&self) -> &str {
        &self.current.user
    }

    pub fn cluster(&self) -> &str {
        &self.current.cluster
    }

    pub fn namespace(&self) -> &str {
        &self.current.namespace
    }

    /// The context saved by the last command that switched away from it.
    /// Falls back to the current context before any switch has been recorded.
    pub fn previous(&self) -> Triple {
        self.doc.context(CONTEXT_PREVIOUS).unwrap_or_else(|| self.current.clone())
    }

    pub fn user_previous(&self) -> String {
        self.previous().user
    }

    pub fn cluster_previous(&self) -> String {
        self.previous().cluster
    }

    pub fn namespace_previous(&self) -> String {
        self.previous().namespace
    }

    pub fn users(&self) -> Vec<String> {
        self.doc.users()
    }

    pub fn clusters(&self) -> Vec<String> {
        self.doc.clusters()
    }

    pub fn set_user(&mut self, value: &str) {
        self.mutate_current(|current| current.user = value.to_string());
    }

    pub fn set_cluster(&mut self, value: &str) {
        self.mutate_current(|current| current.cluster = value.to_string());
    }

    pub fn set_namespace(&mut self, value: &str) {
        self.mutate_current(|current| current.namespace = value.to_string());
    }

    pub fn set_current(&mut self, value: Triple) {
        self.mutate_current(|current| *current = value);
    }

    pub fn is_mutated(&self) -> bool {
        self.materialized
    }

    /// Purges stale index entries, encodes the indexes back into `contexts`,
    /// records the previous context and writes the file (if loaded from one).
    pub fn commit(&mut self) -> Result<()> {
        self.flush();
        if let Some(path) = &self.path {
            self.doc.write_to(path)?;
        }
        Ok(())
    }

    fn mutate_current(&mut self, update: impl FnOnce(&mut Triple)) {
        self.materialize_current();
        update(&mut self.current);
        self.doc.set_context(CONTEXT_CURRENT, &self.current);
    }

    fn materialize_current(&mut self) {
        if self.materialized {
            return;
        }
        self.materialized = true;
        if self.doc.current_context() != Some(CONTEXT_CURRENT) {
            debug!(
                r#"Redirecting current-context from "{}" to "{CONTEXT_CURRENT}""#,
                self.doc.current_context().unwrap_or_default()
            );
            self.doc.set_current_context(CONTEXT_CURRENT);
        }
        self.doc.set_context(CONTEXT_CURRENT, &self.current);
    }

    fn flush(&mut self) {
        if self.materialized {
            if let Some(snapshot) = &self.snapshot {
                self.doc.set_context(CONTEXT_PREVIOUS, snapshot);
                debug!(r#"Set "{CONTEXT_PREVIOUS}" to "{snapshot}""#);
            }
            debug!(r#"Set "{CONTEXT_CURRENT}" to "{}""#, self.current);
        }
        self.purge_invalid();

        self.doc.take_contexts(|name| name.starts_with(ASSOC_PREFIX) || name.starts_with(NS_PREFIX));
        for assoc in &self.associations {
            self.doc.set_context(&association_key(assoc), &Triple::new(&assoc.user, &assoc.cluster, ""));
        }
        for ns in &self.explicit_namespaces {
            self.doc.set_context(&explicit_namespace_key(ns), &Triple::new(&ns.user, &ns.cluster, &ns.namespace));
        }
    }

    fn purge_invalid(&mut self) {
        let doc = &self.doc;
        self.associations.retain(|assoc| {
            let valid = is_valid_pair(doc, &assoc.user, &assoc.cluster);
            if valid {
                debug!(r#"Found assoc[iation] "{}""#, association_key(assoc));
            } else {
                debug!(r#"Deleted assoc[iation] "{}""#, association_key(assoc));
            }
            valid
        });
        self.explicit_namespaces.retain(|ns| {
            let valid = is_valid_pair(doc, &ns.user, &ns.cluster) && is_valid_namespace(&ns.namespace);
            if valid {
                debug!(r#"Found explicit ns "{}""#, explicit_namespace_key(ns));
            } else {
                debug!(r#"Deleted explicit ns "{}""#, explicit_namespace_key(ns));
            }
            valid
        });
    }

    fn is_valid_association(&self, assoc: &Association) -> bool {
        is_valid_pair(&self.doc, &assoc.user, &assoc.cluster)
    }

    fn is_valid_explicit_namespace(&self, ns: &ExplicitNamespace) -> bool {
        is_valid_pair(&self.doc, &ns.user, &ns.cluster) && is_valid_namespace(&ns.namespace)
    }
}

fn is_valid_pair(doc: &KubeconfigDocument, user: &str, cluster: &str) -> bool {
    doc.has_user(user) && doc.has_cluster(cluster)
}

pub(crate) fn association_key(assoc: &Association) -> String {
    format!("{ASSOC_PREFIX}{}{ASSOC_SEPARATOR}{}", assoc.user, assoc.cluster)
}

pub(crate) fn explicit_namespace_key(ns: &ExplicitNamespace) -> String {
    format!("{NS_PREFIX}{}{ASSOC_SEPARATOR}{}{NS_SEPARATOR}{}", ns.user, ns.cluster, ns.namespace)
}

fn decode_association(key: &str, record: &Triple, doc: &KubeconfigDocument) -> Option<Association> {
    let pair = key.strip_prefix(ASSOC_PREFIX)?;
    let from_record = Association::new(&record.user, &record.cluster);
    if association_key(&from_record) == key {
        return Some(from_record);
    }
    split_pair(pair, doc)
}

fn decode_explicit_namespace(key: &str, record: &Triple, doc: &KubeconfigDocument) -> Option<ExplicitNamespace> {
    let encoded = key.strip_prefix(NS_PREFIX)?;
    let from_record = ExplicitNamespace::new(&record.user, &record.cluster, &record.namespace);
    if explicit_namespace_key(&from_record) == key {
        return Some(from_record);
    }
    let (pair, namespace) = encoded.rsplit_once(NS_SEPARATOR)?;
    let assoc = split_pair(pair, doc)?;
    Some(ExplicitNamespace::new(assoc.user, assoc.cluster, namespace))
}

/// Splits `user:cluster`. Both names may contain `:` themselves, so prefer
/// the split point that names an existing user and cluster, else the last one.
fn split_pair(pair: &str, doc: &KubeconfigDocument) -> Option<Association> {
    let splits: Vec<usize> = pair.match_indices(ASSOC_SEPARATOR).map(|(index, _)| index).collect();
    let index = splits
        .iter()
        .rev()
        .copied()
        .find(|&i| is_valid_pair(doc, &pair[..i], &pair[i + 1..]))
        .or_else(|| splits.last().copied())?;
    Some(Association::new(&pair[..index], &pair[index + 1..]))
}

#[cfg(test)]
mod tests;
