use tracing::debug;

use super::ContextStore;
use crate::client::NamespaceLister;
use crate::error::Result;
use crate::triple::{validate_namespace, ExplicitNamespace};

impl ContextStore {
    /// Recorded user+cluster/namespace entries that are still valid, sorted.
    pub fn explicit_namespaces(&self) -> Vec<ExplicitNamespace> {
        self.explicit_namespaces.iter().filter(|ns| self.is_valid_explicit_namespace(ns)).cloned().collect()
    }

    pub fn explicit_namespaces_for(&self, user: &str, cluster: &str) -> Vec<String> {
        self.explicit_namespaces()
            .into_iter()
            .filter(|ns| ns.user == user && ns.cluster == cluster)
            .map(|ns| ns.namespace)
            .collect()
    }

    /// Returns `Ok(false)` if the entry already exists. The namespace name is
    /// validated before anything is recorded.
    pub fn set_explicit_namespace(&mut self, user: &str, cluster: &str, namespace: &str) -> Result<bool> {
        validate_namespace(namespace)?;
        let inserted = self.explicit_namespaces.insert(ExplicitNamespace::new(user, cluster, namespace));
        if inserted {
            debug!(r#"Added explicit ns "{user}:{cluster}/{namespace}""#);
        }
        Ok(inserted)
    }

    /// Returns false if the entry did not exist.
    pub fn delete_explicit_namespace(&mut self, user: &str, cluster: &str, namespace: &str) -> bool {
        let removed = self.explicit_namespaces.remove(&ExplicitNamespace::new(user, cluster, namespace));
        if removed {
            debug!(r#"Deleted explicit ns "{user}:{cluster}/{namespace}""#);
        }
        removed
    }

    /// Live namespaces of the current user+cluster.
    pub fn namespaces(&self, lister: &dyn NamespaceLister) -> Result<Vec<String>> {
        lister.list_namespaces(self.user(), self.cluster())
    }

    /// Namespaces offered for the current user+cluster.
    pub fn namespace_view(&self, lister: &dyn NamespaceLister) -> Result<Vec<String>> {
        self.namespace_view_for(self.user(), self.cluster(), lister)
    }

    /// Explicit entries for the pair shadow the live listing entirely; the
    /// lister is only consulted when there are none.
    pub fn namespace_view_for(&self, user: &str, cluster: &str, lister: &dyn NamespaceLister) -> Result<Vec<String>> {
        let explicit = self.explicit_namespaces_for(user, cluster);
        if !explicit.is_empty() {
            return Ok(explicit);
        }
        lister.list_namespaces(user, cluster)
    }
}
