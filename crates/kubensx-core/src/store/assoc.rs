use std::collections::BTreeMap;

use tracing::debug;

use super::ContextStore;
use crate::triple::Association;

impl ContextStore {
    /// Records that `user` is normally used with `cluster`. Returns false if
    /// the pair was already recorded.
    pub fn associate(&mut self, user: &str, cluster: &str) -> bool {
        let inserted = self.associations.insert(Association::new(user, cluster));
        if inserted {
            debug!(r#"Associated "{user}" with "{cluster}""#);
        }
        inserted
    }

    /// Returns false if the pair was not recorded.
    pub fn dissociate(&mut self, user: &str, cluster: &str) -> bool {
        let removed = self.associations.remove(&Association::new(user, cluster));
        if removed {
            debug!(r#"Dissociated "{user}" from "{cluster}""#);
        }
        removed
    }

    /// Recorded pairs whose user and cluster both still exist, sorted.
    pub fn associations(&self) -> Vec<Association> {
        self.associations.iter().filter(|assoc| self.is_valid_association(assoc)).cloned().collect()
    }

    /// cluster -> associated users
    pub fn users_by_cluster(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for assoc in self.associations() {
            map.entry(assoc.cluster).or_default().push(assoc.user);
        }
        map
    }

    /// user -> associated clusters
    pub fn clusters_by_user(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for assoc in self.associations() {
            map.entry(assoc.user).or_default().push(assoc.cluster);
        }
        map
    }
}
