use tracing::debug;

use crate::client::NamespaceLister;
use crate::error::{Field, KubensxError, Result};
use crate::matcher::FieldMatcher;
use crate::pattern::{ContextPattern, FieldPattern, Target};
use crate::store::ContextStore;
use crate::triple::{validate_namespace, Triple};

/// Interactive narrowing, supplied by the front end.
pub trait Chooser {
    /// Picks one of `options` (sorted, at least two). `selected` indexes the
    /// preselected option.
    fn choose(&mut self, field: Field, options: &[String], selected: usize) -> Result<String>;

    /// Picks any subset of `options`; `selected` are preselected.
    fn choose_many(&mut self, field: Field, options: &[String], selected: &[String]) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Offer every user for a cluster, even when some are associated with it.
    pub ignore_assoc: bool,
    /// Skip explicit namespaces and always ask the cluster.
    pub ignore_config_ns: bool,
    /// Take the namespace literally instead of checking it against a listing.
    pub force: bool,
}

/// Turns patterns into concrete triples. Holds no state of its own; every
/// call works on the store it is handed.
pub struct Resolver<'a> {
    lister: &'a dyn NamespaceLister,
    options: ResolveOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(lister: &'a dyn NamespaceLister, options: ResolveOptions) -> Self {
        Self { lister, options }
    }

    /// Users offered for `cluster`: its associated users if it has any,
    /// otherwise every user.
    pub fn users_for_cluster(&self, store: &ContextStore, cluster: &str) -> Vec<String> {
        self.associated_users(store, cluster).unwrap_or_else(|| store.users())
    }

    /// Every triple `pattern` denotes, ordered by cluster, then user, then
    /// namespace. Nothing is written to the store.
    pub fn enumerate(&self, store: &ContextStore, pattern: &ContextPattern) -> Result<Vec<Triple>> {
        let current = store.current();
        let mut triples = Vec::new();
        for cluster in pattern.cluster.matcher(pattern.mode, &current.cluster).apply(&store.clusters()) {
            let users = self.users_for_cluster(store, &cluster);
            for user in pattern.user.matcher(pattern.mode, &current.user).apply(&users) {
                let namespaces = self.namespace_candidates(store, &user, &cluster, &pattern.namespace, current)?;
                for namespace in pattern.namespace.matcher(pattern.mode, &current.namespace).apply(&namespaces) {
                    triples.push(Triple { user: user.clone(), cluster: cluster.clone(), namespace });
                }
            }
        }
        Ok(triples)
    }

    /// Resolves `pattern` field by field (cluster, then user, then namespace)
    /// and applies each choice to the store. Ambiguous fields are handed to
    /// `chooser`.
    pub fn resolve(
        &self,
        store: &mut ContextStore,
        pattern: &ContextPattern,
        chooser: &mut dyn Chooser,
    ) -> Result<Triple> {
        ensure_selectable(store)?;
        let start = store.current().clone();

        let cluster_matcher = pattern.cluster.matcher(pattern.mode, &start.cluster);
        let cluster = pick(Field::Cluster, &pattern.cluster, cluster_matcher, store.clusters(), chooser)?;
        store.set_cluster(&cluster);

        let users = self.users_for_cluster(store, &cluster);
        let user_matcher = pattern.user.matcher(pattern.mode, &start.user);
        let user = pick(Field::User, &pattern.user, user_matcher, users, chooser)?;
        store.set_user(&user);

        let namespaces = self.namespace_candidates(store, &user, &cluster, &pattern.namespace, &start)?;
        let namespace_matcher = pattern.namespace.matcher(pattern.mode, &start.namespace);
        let namespace = pick(Field::Namespace, &pattern.namespace, namespace_matcher, namespaces, chooser)?;
        store.set_namespace(&namespace);

        Ok(store.current().clone())
    }

    /// Pattern-less selection. Fields outside `target` keep their current
    /// value, except that a user not associated with the chosen cluster is
    /// replaced by the first associated one.
    pub fn interactive(&self, store: &mut ContextStore, target: Target, chooser: &mut dyn Chooser) -> Result<Triple> {
        ensure_selectable(store)?;
        let ask = |field: Target| target == Target::All || target == field;

        let mut clusters = store.clusters();
        clusters.sort();
        let cluster = prompt(Field::Cluster, &clusters, store.cluster(), ask(Target::Cluster), chooser)?;
        store.set_cluster(&cluster);

        let mut default_user = store.user().to_string();
        let mut users = match self.associated_users(store, &cluster) {
            Some(associated) => {
                if !associated.contains(&default_user) {
                    default_user = associated[0].clone();
                }
                associated
            }
            None => store.users(),
        };
        users.sort();
        let user = prompt(Field::User, &users, &default_user, ask(Target::User), chooser)?;
        store.set_user(&user);

        let mut namespaces = self.namespace_list(store, &user, &cluster)?;
        namespaces.sort();
        let default_namespace = store.namespace().to_string();
        let namespace = prompt(Field::Namespace, &namespaces, &default_namespace, ask(Target::Namespace), chooser)?;
        store.set_namespace(&namespace);

        Ok(store.current().clone())
    }

    fn associated_users(&self, store: &ContextStore, cluster: &str) -> Option<Vec<String>> {
        if self.options.ignore_assoc {
            return None;
        }
        store.users_by_cluster().remove(cluster).filter(|users| !users.is_empty())
    }

    fn namespace_list(&self, store: &ContextStore, user: &str, cluster: &str) -> Result<Vec<String>> {
        if self.options.ignore_config_ns {
            self.lister.list_namespaces(user, cluster)
        } else {
            store.namespace_view_for(user, cluster, self.lister)
        }
    }

    fn namespace_candidates(
        &self,
        store: &ContextStore,
        user: &str,
        cluster: &str,
        pattern: &FieldPattern,
        start: &Triple,
    ) -> Result<Vec<String>> {
        if pattern.pattern.is_empty() {
            return Ok(vec![String::new()]);
        }
        if self.options.force {
            let literal = if pattern.pattern == "." { start.namespace.as_str() } else { pattern.pattern.as_str() };
            if !literal.is_empty() {
                validate_namespace(literal)?;
            }
            debug!(r#"Skipping namespace lookup, using "{literal}" as is"#);
            return Ok(vec![literal.to_string()]);
        }
        self.namespace_list(store, user, cluster)
    }
}

/// Puts back the context recorded before the last switch.
pub fn restore_previous(store: &mut ContextStore) -> Triple {
    let previous = store.previous();
    debug!(r#"Restoring "{previous}""#);
    store.set_current(previous);
    store.current().clone()
}

/// Fails when the document has no cluster or no user to pick from.
pub fn ensure_selectable(store: &ContextStore) -> Result<()> {
    if store.clusters().is_empty() {
        return Err(KubensxError::NoClusters);
    }
    if store.users().is_empty() {
        return Err(KubensxError::NoUsers);
    }
    Ok(())
}

fn pick(
    field: Field,
    pattern: &FieldPattern,
    matcher: FieldMatcher<'_>,
    mut options: Vec<String>,
    chooser: &mut dyn Chooser,
) -> Result<String> {
    options.sort();
    let mut matches = matcher.apply(&options);
    match matches.len() {
        0 => Err(KubensxError::NoMatch { field, pattern: pattern.pattern.clone(), options }),
        1 => Ok(matches.remove(0)),
        _ => {
            let selected = matches.iter().position(|m| m == matcher.default).unwrap_or(0);
            chooser.choose(field, &matches, selected)
        }
    }
}

fn prompt(field: Field, options: &[String], default: &str, ask: bool, chooser: &mut dyn Chooser) -> Result<String> {
    if !ask {
        return Ok(default.to_string());
    }
    match options.len() {
        0 => Ok(default.to_string()),
        1 => Ok(options[0].clone()),
        _ => {
            let selected = options.iter().position(|o| o == default).unwrap_or(0);
            chooser.choose(field, options, selected)
        }
    }
}
