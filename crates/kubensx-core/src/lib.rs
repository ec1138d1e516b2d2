pub mod bulk;
pub mod client;
pub mod error;
pub mod kubeconfig;
pub mod matcher;
pub mod pattern;
pub mod resolve;
pub mod store;
pub mod triple;

pub use client::{KubeNamespaceLister, NamespaceLister};
pub use error::{Field, KubensxError, Result};
pub use kubeconfig::KubeconfigDocument;
pub use matcher::{FieldMatcher, MatchMode};
pub use pattern::{ContextPattern, FieldPattern, Target};
pub use resolve::{Chooser, ResolveOptions, Resolver};
pub use store::ContextStore;
pub use triple::{validate_namespace, Association, ExplicitNamespace, Triple};
