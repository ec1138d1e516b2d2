use pretty_assertions::assert_eq;

use super::*;
use crate::error::KubensxError;

const FIXTURE: &str = r#"
clusters:
- name: us-west
  cluster: {server: "https://west"}
- name: "arn:aws:eks:prod"
  cluster: {server: "https://eks"}
users:
- name: qa
  user: {token: a}
- name: "admin:sso"
  user: {token: b}
contexts:
- name: work
  context: {cluster: us-west, user: qa, namespace: default, extensions: [{name: shared, extension: {}}]}
current-context: work
"#;

fn store() -> ContextStore {
    ContextStore::from_document(KubeconfigDocument::from_yaml(FIXTURE).unwrap())
}

fn lister(_user: &str, _cluster: &str) -> Result<Vec<String>> {
    Ok(vec!["default".to_string(), "kube-system".to_string()])
}

#[test]
fn reads_current_context() {
    let store = store();
    assert_eq!(store.current(), &Triple::new("qa", "us-west", "default"));
    assert_eq!(store.user(), "qa");
    assert_eq!(store.cluster(), "us-west");
    assert_eq!(store.namespace(), "default");
    assert!(!store.is_mutated());
}

#[test]
fn previous_defaults_to_current_on_first_run() {
    let store = store();
    assert_eq!(store.previous(), Triple::new("qa", "us-west", "default"));
    assert_eq!(store.namespace_previous(), "default");
}

#[test]
fn first_write_redirects_to_private_context() {
    let mut store = store();
    store.set_namespace("kube-system");
    assert!(store.is_mutated());

    let doc = store.document();
    assert_eq!(doc.current_context(), Some(CONTEXT_CURRENT));
    assert_eq!(doc.context(CONTEXT_CURRENT), Some(Triple::new("qa", "us-west", "kube-system")));
    assert_eq!(doc.context("work"), Some(Triple::new("qa", "us-west", "default")));
    assert!(doc.to_yaml().unwrap().contains("shared"));
}

#[test]
fn commit_records_previous_context() {
    let mut store = store();
    store.set_user("admin:sso");
    store.commit().unwrap();

    let doc = store.document();
    assert_eq!(doc.context(CONTEXT_PREVIOUS), Some(Triple::new("qa", "us-west", "default")));
    assert_eq!(doc.context(CONTEXT_CURRENT), Some(Triple::new("admin:sso", "us-west", "default")));
}

#[test]
fn commit_without_switch_leaves_pointers_alone() {
    let mut store = store();
    store.associate("qa", "us-west");
    store.commit().unwrap();

    let doc = store.document();
    assert_eq!(doc.current_context(), Some("work"));
    assert_eq!(doc.context(CONTEXT_PREVIOUS), None);
    assert_eq!(doc.context(CONTEXT_CURRENT), None);
}

#[test]
fn associate_is_idempotent() {
    let mut store = store();
    assert!(store.associate("qa", "us-west"));
    assert!(!store.associate("qa", "us-west"));
    assert!(store.dissociate("qa", "us-west"));
    assert!(!store.dissociate("qa", "us-west"));
    assert!(store.associations().is_empty());
}

#[test]
fn explicit_namespace_is_idempotent() {
    let mut store = store();
    assert!(store.set_explicit_namespace("qa", "us-west", "team-a").unwrap());
    assert!(!store.set_explicit_namespace("qa", "us-west", "team-a").unwrap());
    assert!(store.delete_explicit_namespace("qa", "us-west", "team-a"));
    assert!(!store.delete_explicit_namespace("qa", "us-west", "team-a"));
}

#[test]
fn invalid_explicit_namespace_is_rejected() {
    let mut store = store();
    let err = store.set_explicit_namespace("qa", "us-west", "Team_A").unwrap_err();
    assert!(matches!(err, KubensxError::Validation(_)));
    let err = store.set_explicit_namespace("qa", "us-west", "").unwrap_err();
    assert_eq!(err.to_string(), "<namespace> cannot be empty");
    assert!(store.explicit_namespaces().is_empty());
}

#[test]
fn lookups_group_associations() {
    let mut store = store();
    store.associate("qa", "us-west");
    store.associate("admin:sso", "us-west");
    store.associate("admin:sso", "arn:aws:eks:prod");

    let by_cluster = store.users_by_cluster();
    assert_eq!(by_cluster["us-west"], vec!["admin:sso".to_string(), "qa".to_string()]);
    let by_user = store.clusters_by_user();
    assert_eq!(by_user["admin:sso"], vec!["arn:aws:eks:prod".to_string(), "us-west".to_string()]);
}

#[test]
fn stale_entries_are_hidden_and_purged() {
    let mut store = store();
    store.associate("gone", "us-west");
    store.associate("qa", "us-west");
    store.set_explicit_namespace("qa", "nowhere", "team-a").unwrap();
    assert_eq!(store.associations(), vec![Association::new("qa", "us-west")]);
    assert!(store.explicit_namespaces().is_empty());

    store.commit().unwrap();
    let names = store.document().context_names();
    assert!(names.contains(&"kubensx-assoc:qa:us-west".to_string()));
    assert!(!names.iter().any(|n| n.contains("gone") || n.contains("nowhere")));
}

#[test]
fn namespace_view_prefers_explicit_entries() {
    let mut store = store();
    assert_eq!(store.namespace_view(&lister).unwrap(), vec!["default".to_string(), "kube-system".to_string()]);

    store.set_explicit_namespace("qa", "us-west", "team-a").unwrap();
    assert_eq!(store.namespace_view(&lister).unwrap(), vec!["team-a".to_string()]);
    assert_eq!(store.namespaces(&lister).unwrap().len(), 2);
    assert_eq!(store.namespace_view_for("admin:sso", "us-west", &lister).unwrap().len(), 2);
}

#[test]
fn indexes_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    std::fs::write(&path, FIXTURE).unwrap();

    let mut store = ContextStore::load(&path).unwrap();
    store.associate("admin:sso", "arn:aws:eks:prod");
    store.set_explicit_namespace("admin:sso", "arn:aws:eks:prod", "payments").unwrap();
    store.set_cluster("arn:aws:eks:prod");
    store.commit().unwrap();

    let reloaded = ContextStore::load(&path).unwrap();
    assert_eq!(reloaded.path(), Some(path.as_path()));
    assert_eq!(reloaded.cluster(), "arn:aws:eks:prod");
    assert_eq!(reloaded.associations(), vec![Association::new("admin:sso", "arn:aws:eks:prod")]);
    assert_eq!(
        reloaded.explicit_namespaces(),
        vec![ExplicitNamespace::new("admin:sso", "arn:aws:eks:prod", "payments")]
    );
    assert_eq!(reloaded.previous(), Triple::new("qa", "us-west", "default"));
}

#[test]
fn decodes_colon_names_from_key_alone() {
    let doc = KubeconfigDocument::from_yaml(FIXTURE).unwrap();
    let split = split_pair("admin:sso:arn:aws:eks:prod", &doc).unwrap();
    assert_eq!(split, Association::new("admin:sso", "arn:aws:eks:prod"));

    let unknown = split_pair("a:b:c", &doc).unwrap();
    assert_eq!(unknown, Association::new("a:b", "c"));
    assert_eq!(split_pair("nocolon", &doc), None);
}

#[test]
fn record_fields_win_when_they_encode_the_key() {
    let doc = KubeconfigDocument::default();
    let record = Triple::new("x:y", "z", "");
    assert_eq!(decode_association("kubensx-assoc:x:y:z", &record, &doc), Some(Association::new("x:y", "z")));

    let record = Triple::new("x", "y", "ns");
    let decoded = decode_explicit_namespace("kubensx-ns:x:y/ns", &record, &doc);
    assert_eq!(decoded, Some(ExplicitNamespace::new("x", "y", "ns")));
}

#[test]
fn foreign_contexts_are_kept_on_commit() {
    let mut store = store();
    store.set_namespace("kube-system");
    store.commit().unwrap();
    let names = store.document().context_names();
    assert!(names.contains(&"work".to_string()));
    assert!(names.contains(&CONTEXT_CURRENT.to_string()));
    assert!(names.contains(&CONTEXT_PREVIOUS.to_string()));
}
