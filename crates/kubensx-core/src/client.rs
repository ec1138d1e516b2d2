use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use k8s_openapi::api::core::v1::Namespace;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig, NamedContext};
use kube::{Api, Client, Config};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{KubensxError, Result};

const PROBE_CONTEXT: &str = "kubensx-probe";

/// Lists the namespaces visible to `user` on `cluster`.
///
/// Implementations must report an authorization-denied response as an empty
/// list rather than an error.
pub trait NamespaceLister {
    fn list_namespaces(&self, user: &str, cluster: &str) -> Result<Vec<String>>;
}

impl<F> NamespaceLister for F
where
    F: Fn(&str, &str) -> Result<Vec<String>>,
{
    fn list_namespaces(&self, user: &str, cluster: &str) -> Result<Vec<String>> {
        self(user, cluster)
    }
}

/// Talks to the API server with the credentials of an arbitrary user/cluster
/// pair from the kubeconfig, independent of any context defined there.
pub struct KubeNamespaceLister {
    kubeconfig: PathBuf,
    runtime: tokio::runtime::Runtime,
    cache: RefCell<HashMap<(String, String), Vec<String>>>,
}

impl KubeNamespaceLister {
    pub fn new(kubeconfig: &Path) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        Ok(Self { kubeconfig: kubeconfig.to_path_buf(), runtime, cache: RefCell::new(HashMap::new()) })
    }

    async fn fetch(&self, user: &str, cluster: &str) -> Result<Vec<String>> {
        let fail = |e: &dyn Display| KubensxError::NamespaceListing {
            user: user.to_string(),
            cluster: cluster.to_string(),
            message: e.to_string(),
        };

        let mut kubeconfig = Kubeconfig::read_from(&self.kubeconfig).map_err(|e| fail(&e))?;
        kubeconfig.contexts.push(probe_context(user, cluster)?);
        let options = KubeConfigOptions { context: Some(PROBE_CONTEXT.to_string()), ..Default::default() };

        debug!(r#"Initializing client with "{user}:{cluster}""#);
        let config = Config::from_custom_kubeconfig(kubeconfig, &options).await.map_err(|e| fail(&e))?;
        let client = Client::try_from(config).map_err(|e| fail(&e))?;

        let api: Api<Namespace> = Api::all(client);
        match api.list(&ListParams::default()).await {
            Ok(list) => Ok(list.items.into_iter().filter_map(|ns| ns.metadata.name).collect()),
            Err(kube::Error::Api(response)) if response.code == 403 => {
                debug!(r#""{user}:{cluster}" is not allowed to list namespaces"#);
                Ok(Vec::new())
            }
            Err(e) => Err(fail(&e)),
        }
    }
}

impl NamespaceLister for KubeNamespaceLister {
    fn list_namespaces(&self, user: &str, cluster: &str) -> Result<Vec<String>> {
        let key = (user.to_string(), cluster.to_string());
        if let Some(cached) = self.cache.borrow().get(&key) {
            return Ok(cached.clone());
        }
        let namespaces = self.runtime.block_on(self.fetch(user, cluster))?;
        self.cache.borrow_mut().insert(key, namespaces.clone());
        Ok(namespaces)
    }
}

fn probe_context(user: &str, cluster: &str) -> Result<NamedContext> {
    let mut context = Mapping::new();
    context.insert(Value::from("cluster"), Value::from(cluster));
    context.insert(Value::from("user"), Value::from(user));
    let mut named = Mapping::new();
    named.insert(Value::from("name"), Value::from(PROBE_CONTEXT));
    named.insert(Value::from("context"), Value::Mapping(context));
    Ok(serde_yaml::from_value(Value::Mapping(named))?)
}
