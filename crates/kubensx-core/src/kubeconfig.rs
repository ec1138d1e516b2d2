use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::error::{KubensxError, Result};
use crate::triple::Triple;

pub const CONTEXT_CURRENT: &str = "kubensx-current";
pub const CONTEXT_PREVIOUS: &str = "kubensx-prev";
pub const ASSOC_PREFIX: &str = "kubensx-assoc:";
pub const NS_PREFIX: &str = "kubensx-ns:";
pub const ASSOC_SEPARATOR: char = ':';
pub const NS_SEPARATOR: char = '/';

/// A kubeconfig file held as a raw YAML mapping.
///
/// Only `users`, `clusters`, `contexts` and `current-context` are interpreted.
/// Everything else (preferences, extensions, auth providers, key order) is
/// carried through to the written file untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KubeconfigDocument {
    root: Mapping,
}

impl KubeconfigDocument {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let root: Mapping = serde_yaml::from_str(raw)?;
        Ok(Self { root })
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Reads `path`. A missing file is an empty document, the same way kubectl
    /// treats it before the first `config set-*`.
    pub fn read_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("{} does not exist, starting from an empty kubeconfig", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
            .map_err(|e| KubensxError::Kubeconfig { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Replaces `path` with the serialized document via a temp file in the
    /// same directory, so a failed write never leaves a truncated kubeconfig.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(self.to_yaml()?.as_bytes())?;
        file.persist(path).map_err(|e| e.error)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    pub fn users(&self) -> Vec<String> {
        self.names("users")
    }

    pub fn clusters(&self) -> Vec<String> {
        self.names("clusters")
    }

    pub fn context_names(&self) -> Vec<String> {
        self.names("contexts")
    }

    pub fn has_user(&self, name: &str) -> bool {
        self.find("users", name).is_some()
    }

    pub fn has_cluster(&self, name: &str) -> bool {
        self.find("clusters", name).is_some()
    }

    pub fn current_context(&self) -> Option<&str> {
        self.root.get("current-context").and_then(Value::as_str).filter(|name| !name.is_empty())
    }

    pub fn set_current_context(&mut self, name: &str) {
        self.root.insert(Value::from("current-context"), Value::from(name));
    }

    pub fn context(&self, name: &str) -> Option<Triple> {
        let entry = self.find("contexts", name)?;
        Some(read_context_body(entry.get("context")))
    }

    /// Inserts or updates the named context. Fields other than
    /// cluster/user/namespace on an existing entry are preserved.
    pub fn set_context(&mut self, name: &str, value: &Triple) {
        let Some(contexts) = self.section_mut("contexts") else { return };
        let position = contexts.iter().position(|entry| entry_name(entry) == Some(name));
        let entry = match position {
            Some(index) => &mut contexts[index],
            None => {
                let mut entry = Mapping::new();
                entry.insert(Value::from("name"), Value::from(name));
                contexts.push(Value::Mapping(entry));
                let last = contexts.len() - 1;
                &mut contexts[last]
            }
        };
        if let Some(body) = context_body_mut(entry) {
            body.insert(Value::from("cluster"), Value::from(value.cluster.as_str()));
            body.insert(Value::from("user"), Value::from(value.user.as_str()));
            if value.namespace.is_empty() {
                body.remove("namespace");
            } else {
                body.insert(Value::from("namespace"), Value::from(value.namespace.as_str()));
            }
        }
    }

    pub fn remove_context(&mut self, name: &str) -> Option<Triple> {
        let removed = self.take_contexts(|candidate| candidate == name);
        removed.into_iter().next().map(|(_, value)| value)
    }

    /// Removes every context whose name satisfies `predicate` and returns them
    /// in document order.
    pub fn take_contexts(&mut self, predicate: impl Fn(&str) -> bool) -> Vec<(String, Triple)> {
        let Some(contexts) = self.section_mut("contexts") else { return Vec::new() };
        let mut taken = Vec::new();
        contexts.retain(|entry| match entry_name(entry) {
            Some(name) if predicate(name) => {
                taken.push((name.to_string(), read_context_body(entry.get("context"))));
                false
            }
            _ => true,
        });
        taken
    }

    fn names(&self, section: &str) -> Vec<String> {
        self.section(section)
            .map(|entries| entries.iter().filter_map(entry_name).map(String::from).collect())
            .unwrap_or_default()
    }

    fn find(&self, section: &str, name: &str) -> Option<&Value> {
        self.section(section)?.iter().find(|entry| entry_name(entry) == Some(name))
    }

    fn section(&self, key: &str) -> Option<&Vec<Value>> {
        self.root.get(key).and_then(Value::as_sequence)
    }

    fn section_mut(&mut self, key: &str) -> Option<&mut Vec<Value>> {
        let slot = self.root.entry(Value::from(key)).or_insert(Value::Null);
        if !slot.is_sequence() {
            *slot = Value::Sequence(Vec::new());
        }
        slot.as_sequence_mut()
    }
}

fn entry_name(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}

fn read_context_body(body: Option<&Value>) -> Triple {
    let field = |key: &str| body.and_then(|b| b.get(key)).and_then(Value::as_str).unwrap_or_default().to_string();
    Triple { user: field("user"), cluster: field("cluster"), namespace: field("namespace") }
}

fn context_body_mut(entry: &mut Value) -> Option<&mut Mapping> {
    let entry = entry.as_mapping_mut()?;
    let body = entry.entry(Value::from("context")).or_insert(Value::Null);
    if !body.is_mapping() {
        *body = Value::Mapping(Mapping::new());
    }
    body.as_mapping_mut()
}

/// Kubeconfig location: the explicit path if given, else the first existing
/// entry of `KUBECONFIG`, else `~/.kube/config`. The other `KUBECONFIG`
/// entries are not merged in.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    resolve_path_with(explicit, std::env::var_os("KUBECONFIG"))
}

pub(crate) fn resolve_path_with(explicit: Option<&Path>, env: Option<OsString>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(paths) = env {
        let paths: Vec<PathBuf> = std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect();
        if let Some(path) = paths.iter().find(|p| p.exists()).or(paths.first()) {
            if paths.len() > 1 {
                warn!("KUBECONFIG lists {} files, only {} is used", paths.len(), path.display());
            }
            return path.clone();
        }
    }
    default_path()
}

pub fn default_path() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".kube").join("config")
}
