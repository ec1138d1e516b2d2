use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One of the three positions of a `user:cluster/namespace` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    User,
    Cluster,
    Namespace,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Cluster => write!(f, "cluster"),
            Self::Namespace => write!(f, "namespace"),
        }
    }
}

#[derive(Debug, Error)]
pub enum KubensxError {
    #[error("{0}")]
    Validation(String),

    #[error("\"{pattern}\" does not match any of the {field}s (expected one of ({}))", .options.join(", "))]
    NoMatch { field: Field, pattern: String, options: Vec<String> },

    #[error("No clusters have been found.\nSee `kubectl config set-cluster --help` on how to add one.")]
    NoClusters,

    #[error("No users have been found.\nSee `kubectl config set-credentials --help` on how to add one.")]
    NoUsers,

    #[error("Unable to list namespaces of {user}:{cluster}: {message}")]
    NamespaceListing { user: String, cluster: String, message: String },

    #[error("Invalid kubeconfig {}: {message}", .path.display())]
    Kubeconfig { path: PathBuf, message: String },

    #[error("Interrupted")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl KubensxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T, E = KubensxError> = std::result::Result<T, E>;
