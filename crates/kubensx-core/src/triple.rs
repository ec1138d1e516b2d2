use std::fmt;

use crate::error::{KubensxError, Result};

/// A concrete `user:cluster/namespace` selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub user: String,
    pub cluster: String,
    pub namespace: String,
}

impl Triple {
    pub fn new(user: impl Into<String>, cluster: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self { user: user.into(), cluster: cluster.into(), namespace: namespace.into() }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.user, self.cluster, self.namespace)
    }
}

/// "This user is normally used with this cluster."
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Association {
    pub user: String,
    pub cluster: String,
}

impl Association {
    pub fn new(user: impl Into<String>, cluster: impl Into<String>) -> Self {
        Self { user: user.into(), cluster: cluster.into() }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user, self.cluster)
    }
}

/// "This namespace is a known value for this user+cluster."
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExplicitNamespace {
    pub user: String,
    pub cluster: String,
    pub namespace: String,
}

impl ExplicitNamespace {
    pub fn new(user: impl Into<String>, cluster: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self { user: user.into(), cluster: cluster.into(), namespace: namespace.into() }
    }

    pub fn pair(&self) -> Association {
        Association::new(self.user.clone(), self.cluster.clone())
    }
}

impl fmt::Display for ExplicitNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.user, self.cluster, self.namespace)
    }
}

pub(crate) fn is_valid_namespace(ns: &str) -> bool {
    !ns.is_empty() && ns.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
}

/// Namespace names are restricted to lowercase alphanumerics, `-` and `.`.
pub fn validate_namespace(ns: &str) -> Result<()> {
    if ns.is_empty() {
        return Err(KubensxError::validation("<namespace> cannot be empty"));
    }
    if !is_valid_namespace(ns) {
        return Err(KubensxError::validation(format!(
            "\"{ns}\" is not a valid namespace name (expected lowercase alphanumeric characters, '-' or '.')"
        )));
    }
    Ok(())
}
